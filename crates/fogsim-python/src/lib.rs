//! Python-backed external scorer.
//!
//! Evaluates scoring functions defined in Python modules through an embedded
//! interpreter. The interpreter is initialized once per process (pyo3
//! `auto-initialize`) and finalized at process exit; the GIL is acquired for
//! the duration of each call, so calls are blocking and must not be issued
//! concurrently.

use pyo3::prelude::*;
use pyo3::types::PyTuple;

use fogsim::error::FogError;
use fogsim::scorer::ExternalScorer;

#[cfg(test)]
mod tests;

pub struct PyScorer;

impl PyScorer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for PyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalScorer for PyScorer {
    fn evaluate(&self, module: &str, function: &str, args: &[f64]) -> Result<f64, FogError> {
        Python::with_gil(|py| {
            let py_module = PyModule::import(py, module)
                .map_err(|e| FogError::ForeignCall(format!("can't import module '{}': {}", module, e)))?;
            let py_function = py_module
                .getattr(function)
                .map_err(|e| FogError::ForeignCall(format!("can't find '{}.{}': {}", module, function, e)))?;
            if !py_function.is_callable() {
                return Err(FogError::ForeignCall(format!(
                    "'{}.{}' is not callable",
                    module, function
                )));
            }
            let result = py_function
                .call1(PyTuple::new(py, args))
                .map_err(|e| FogError::ForeignCall(format!("'{}.{}' raised: {}", module, function, e)))?;
            result.extract::<f64>().map_err(|e| {
                FogError::ForeignCall(format!("'{}.{}' returned a non-numeric value: {}", module, function, e))
            })
        })
    }
}
