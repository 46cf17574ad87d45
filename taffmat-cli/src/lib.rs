pub mod config;
pub mod error;
pub mod inspect;
pub mod report;

pub use config::*;
pub use error::*;
pub use inspect::*;
pub use report::*;
