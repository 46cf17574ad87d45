pub mod amp;
pub mod device;
pub mod error;
pub mod file_type;
pub mod header;
pub mod range;
pub mod storage;
pub mod taxonomy;
pub mod trigger;

pub use amp::*;
pub use device::*;
pub use error::*;
pub use file_type::*;
pub use header::*;
pub use range::*;
pub use storage::*;
pub use taxonomy::*;
pub use trigger::*;
