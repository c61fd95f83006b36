//! External scorer interface.

use crate::error::FogError;

/// Narrow capability for evaluating externally supplied objective or
/// constraint functions.
///
/// Implementations own the whole lifecycle of the foreign runtime (one-time
/// initialization, one-time finalization, scoped acquisition of the runtime
/// handle); the numeric core only ever sees this single entry point. Calls are
/// blocking, not reentrant, must not be issued concurrently against the same
/// runtime handle, and are never retried after a failure.
pub trait ExternalScorer {
    /// Calls `function` from `module` with the given real-valued arguments and
    /// returns the produced score.
    fn evaluate(&self, module: &str, function: &str, args: &[f64]) -> Result<f64, FogError>;
}
