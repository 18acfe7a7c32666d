pub mod bitstream;
pub mod ec;
pub mod error;
pub mod iter;
pub mod metadata;
pub mod size;

pub use bitstream::*;
pub use ec::*;
pub use error::*;
pub use iter::*;
pub use metadata::*;
pub use size::*;
