//! Python bindings for the workload components
//!
//! The classes exposed here follow the method names of the Python BMI so that
//! they can be handed directly to a Python driver.

use crate::components::SleepModel;
use numpy::{PyArray1, PyArrayMethods, PyReadonlyArray1};
use parsleep_core::bmi::Bmi;
use parsleep_core::config::Config;
use parsleep_core::python::PythonTimeConverter;
use parsleep_core::time::Time;
use parsleep_core::FloatValue;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;
use pyo3::{pymodule, Bound, PyResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Python wrapper for [`SleepModel`]
///
/// Example:
///     model = ParallelisationSleep(time_stepped=True, get_unixtime=get_unixtime)
///     model.initialize("sleep.json")
///     model.update()
#[pyclass]
#[pyo3(name = "ParallelisationSleep")]
#[derive(Debug)]
pub struct PySleepModel(pub SleepModel);

#[pymethods]
impl PySleepModel {
    #[new]
    #[pyo3(signature = (time_stepped=false, get_unixtime=None))]
    fn new(time_stepped: bool, get_unixtime: Option<Py<PyAny>>) -> Self {
        let mut model = if time_stepped {
            SleepModel::time_stepped()
        } else {
            SleepModel::basic()
        };
        if let Some(callable) = get_unixtime {
            model.set_time_converter(Arc::new(PythonTimeConverter::new(callable)));
        }
        Self(model)
    }

    fn initialize(&mut self, config_file: PathBuf) -> PyResult<()> {
        Ok(self.0.initialize(&config_file)?)
    }

    /// Initialise from a dictionary instead of a configuration file
    fn initialize_config(&mut self, config: Bound<'_, PyAny>) -> PyResult<()> {
        let config: Config = pythonize::depythonize_bound(config)
            .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
        Ok(self.0.initialize_with(config)?)
    }

    /// Sleep for one step
    ///
    /// The GIL is released while sleeping so other Python threads can progress.
    fn update(&mut self, py: Python<'_>) -> PyResult<()> {
        let model = &mut self.0;
        py.allow_threads(|| model.update())?;
        Ok(())
    }

    fn get_component_name(&self) -> String {
        self.0.get_component_name().to_string()
    }

    fn get_output_var_names<'py>(&self, py: Python<'py>) -> Bound<'py, PyTuple> {
        PyTuple::new_bound(py, self.0.get_output_var_names())
    }

    fn get_var_units(&self, var_name: &str) -> PyResult<String> {
        Ok(self.0.get_var_units(var_name)?.to_string())
    }

    fn get_value<'py>(
        &self,
        var_name: &str,
        dest: Bound<'py, PyArray1<FloatValue>>,
    ) -> PyResult<Bound<'py, PyArray1<FloatValue>>> {
        {
            let mut view = dest
                .try_readwrite()
                .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
            self.0.get_value(var_name, view.as_array_mut())?;
        }
        Ok(dest)
    }

    fn set_value(&mut self, var_name: &str, src: PyReadonlyArray1<FloatValue>) -> PyResult<()> {
        Ok(self.0.set_value(var_name, src.as_array())?)
    }

    fn get_start_time(&self) -> PyResult<Time> {
        Ok(self.0.get_start_time()?)
    }

    fn get_end_time(&self) -> PyResult<Time> {
        Ok(self.0.get_end_time()?)
    }

    #[getter]
    fn current_timestep(&self) -> PyResult<Time> {
        Ok(self.0.current_timestep()?)
    }

    #[getter]
    fn sleepiness(&self) -> PyResult<FloatValue> {
        Ok(self.0.sleepiness()?)
    }

    fn __repr__(&self) -> String {
        format!("ParallelisationSleep(bound={:?})", self.0.bound())
    }
}

#[pymodule]
pub fn components(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySleepModel>()?;
    Ok(())
}
