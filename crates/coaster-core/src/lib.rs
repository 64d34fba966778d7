pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{CoasterError, Result};
pub use tolerance::{Tolerance, EPSILON};
pub use traits::Validate;
