pub mod error;
pub mod lock_utils;

pub use error::TaskTreeError;
