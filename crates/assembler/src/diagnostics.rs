//! Error policy shared by the tokenizer and the parser.

use crate::error::AsmError;

/// How assembly errors are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop at the first error.
    #[default]
    FailFast,
    /// Record every error, recover at the next line, and keep going.
    Collect,
}

/// Accumulates assembly errors according to an [`ErrorMode`].
///
/// Both stages report through the same value, so fail-fast and collect
/// share one code path: [`Diagnostics::report`] returns the error back in
/// fail-fast mode (callers propagate it with `?`) and records it in collect
/// mode (callers recover and continue).
#[derive(Debug, Default)]
pub struct Diagnostics {
    mode: ErrorMode,
    errors: Vec<AsmError>,
}

impl Diagnostics {
    pub fn new(mode: ErrorMode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Report an error.
    ///
    /// # Errors
    ///
    /// Returns `err` itself in [`ErrorMode::FailFast`].
    pub fn report(&mut self, err: AsmError) -> Result<(), AsmError> {
        match self.mode {
            ErrorMode::FailFast => Err(err),
            ErrorMode::Collect => {
                self.errors.push(err);
                Ok(())
            }
        }
    }

    /// Errors recorded so far (always empty in fail-fast mode).
    pub fn errors(&self) -> &[AsmError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Yield `value` if nothing was recorded, otherwise every recorded error.
    pub fn finish<T>(self, value: T) -> Result<T, Vec<AsmError>> {
        if self.has_errors() {
            Err(self.errors)
        } else {
            Ok(value)
        }
    }
}
