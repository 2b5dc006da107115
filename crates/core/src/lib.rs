#![forbid(unsafe_code)]

pub mod combo;
pub mod error;
pub mod model;
pub mod notify;
pub mod time;
pub mod timer;

pub use error::Error;
pub use time::Clock;
