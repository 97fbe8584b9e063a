pub mod error;

pub use error::{ContextError, Result};
