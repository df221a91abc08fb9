pub mod error;
pub mod persist;
pub mod result;
pub mod visitor;

pub use error::*;
pub use persist::*;
pub use result::*;
pub use visitor::*;
