pub mod config;
pub mod database;
pub mod handlers;
pub mod helpers;
pub mod integrations;
pub mod interpreter;
pub mod jobs;
pub mod storage;

pub use database::Database;
pub use interpreter::{ChatReply, CommandInterpreter};
