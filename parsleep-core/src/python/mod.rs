//! Glue between the core types and Python
//!
//! Errors are raised as the exception a Python driver would expect, and Python
//! callables can be used wherever a [`TimeConverter`] is required.

use crate::errors::{BmiError, BmiResult};
use crate::time::{Time, TimeConverter};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

impl From<BmiError> for PyErr {
    fn from(value: BmiError) -> Self {
        let message = value.to_string();
        match value {
            BmiError::ConfigIo { .. } => PyIOError::new_err(message),
            BmiError::NotInitialized
            | BmiError::TimeConversionUnavailable(_)
            | BmiError::TimeConversion(_)
            | BmiError::NoEndTime => PyRuntimeError::new_err(message),
            _ => PyValueError::new_err(message),
        }
    }
}

/// Wrapper to use a Python callable, such as a driver's `get_unixtime`, as a [`TimeConverter`]
///
/// The callable is invoked with a single float timestep and must return a number.
#[derive(Debug)]
pub struct PythonTimeConverter {
    pub callable: Py<PyAny>,
}

impl PythonTimeConverter {
    pub fn new(callable: Py<PyAny>) -> Self {
        Self { callable }
    }
}

impl TimeConverter for PythonTimeConverter {
    fn unixtime(&self, timestep: Time) -> BmiResult<Time> {
        Python::with_gil(|py| {
            self.callable
                .bind(py)
                .call1((timestep,))
                .and_then(|result| result.extract::<Time>())
                .map_err(|e| BmiError::TimeConversion(e.to_string()))
        })
    }
}
