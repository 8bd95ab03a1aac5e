//! Core error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error("unknown selector operator \"{operator}\"")]
    UnknownOperator { operator: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
