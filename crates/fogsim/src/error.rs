//! Error taxonomy shared by performance models, allocation solvers and the
//! external scorer bridge.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FogError {
    /// Invalid model parameters, e.g. a non-positive service rate or a request
    /// for positive load with zero capacity.
    #[error("domain error: {0}")]
    Domain(String),
    /// No VM count within the search bound meets the target delay.
    /// This is a normal solver outcome, not a fatal failure.
    #[error("not feasible: {0}")]
    NotFeasible(String),
    /// Non-finite or negative sample values coming from upstream models.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// External scorer failed. Foreign runtime state is not safely reusable
    /// after a failed call, so these errors are never retried.
    #[error("foreign call error: {0}")]
    ForeignCall(String),
}
