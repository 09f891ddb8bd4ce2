//! Extractors Crate
//!
//! Stateless text processing for the calendar chat. Nothing here touches the
//! store or the clock: callers pass in the message, the caller's local date
//! and the current event list.
//!
//! # Pipeline
//!
//! - `intent`: phrase-table classification into view/create/edit/delete
//! - `fields`: title, new title, date, time, day of month and description
//! - `resolver`: maps a candidate title onto one of the owner's events
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{classify, extract, Intent};
//!
//! let intent = classify("criar evento Dentista no dia 20/06 às 09:00");
//! assert_eq!(intent, Intent::Create);
//! let fields = extract("criar evento Dentista no dia 20/06 às 09:00", intent, today);
//! ```

pub mod date_parser;
pub mod fields;
pub mod intent;
pub mod resolver;

pub use date_parser::{ExtractedDate, ExtractedTime};
pub use fields::{extract, ExtractedFields};
pub use intent::{classify, Intent};
pub use resolver::resolve;
