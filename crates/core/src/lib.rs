#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod model;
pub mod time;

pub use error::Error;
pub use filter::ContentFilter;
pub use time::Clock;
