pub mod error;
pub mod value;

pub use error::{Result, RowError};
pub use value::{Representation, Value};
