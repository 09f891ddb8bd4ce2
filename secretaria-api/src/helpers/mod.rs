pub mod database;
pub mod identity;
pub mod local_time;
