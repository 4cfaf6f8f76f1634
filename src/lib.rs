//! Workload models for exercising parallel Basic Model Interface runners
//!
//! The Rust API lives in [`parsleep_core`] and [`parsleep_components`]; this crate also builds the
//! `parsleep._lib` Python extension module.

use pyo3::prelude::*;
use pyo3::wrap_pymodule;

pub use parsleep_components;
pub use parsleep_core;

#[pymodule]
#[pyo3(name = "_lib")]
fn parsleep(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_wrapped(wrap_pymodule!(parsleep_components::python::components))?;

    set_path(m, "parsleep._lib.components", "components")?;

    Ok(())
}

/// Register a submodule in `sys.modules` so that it can be imported by its dotted path
fn set_path(m: &Bound<'_, PyModule>, path: &str, module: &str) -> PyResult<()> {
    let submodule = m.getattr(module)?;
    m.py()
        .import_bound("sys")?
        .getattr("modules")?
        .set_item(path, submodule)
}
