//! [`Database`]-related implementations.

use derive_more::{Display, Error as StdError};

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, StdError)]
#[display("{message}")]
pub struct Error {
    /// Description of the failed operation.
    pub message: String,
}
