//! Errors from the whole interpret pipeline.

use avm_assembler::AsmError;
use avm_common::ErrorKind;
use avm_vm::RuntimeError;
use thiserror::Error;

/// An assembly or a runtime failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Assembly(#[from] AsmError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Assembly(e) => e.kind(),
            Error::Runtime(e) => e.kind(),
        }
    }

    /// True for errors raised before execution started.
    pub fn is_assembly(&self) -> bool {
        matches!(self, Error::Assembly(_))
    }
}
