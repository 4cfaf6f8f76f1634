//! The Basic Model Interface
//!
//! A [`Bmi`] is the set of operations an external driver uses to run a model:
//! it is initialised once from a configuration file, advanced with repeated calls
//! to [`Bmi::update`], and queried or modified through string-keyed variables.
//!
//! Implementations are registered with `typetag` so that boxed models can be
//! serialised by drivers that need to ship them between processes.

use crate::config::{read_config, Config};
use crate::errors::BmiResult;
use crate::time::Time;
use crate::FloatValue;
use ndarray::{ArrayView1, ArrayViewMut1};
use std::fmt::Debug;
use std::path::Path;

/// Operations required of a model driven by a BMI runner
#[typetag::serde]
pub trait Bmi: Debug + Send + Sync {
    /// Load the configuration file at `config_file` and initialise the model from it
    fn initialize(&mut self, config_file: &Path) -> BmiResult<()> {
        let config = read_config(config_file)?;
        self.initialize_with(config)
    }

    /// Initialise the model from an already loaded configuration
    fn initialize_with(&mut self, config: Config) -> BmiResult<()>;

    /// Advance the model by a single step
    fn update(&mut self) -> BmiResult<()>;

    /// Human-readable name of the model
    fn get_component_name(&self) -> &str;

    /// Names of the variables the model declares as outputs
    fn get_output_var_names(&self) -> &[&str];

    /// Units of a variable
    fn get_var_units(&self, name: &str) -> BmiResult<&str>;

    /// Copy the current value of a variable into `dest`
    ///
    /// Returns `dest` so that callers can chain on the filled buffer.
    fn get_value<'a>(
        &self,
        name: &str,
        dest: ArrayViewMut1<'a, FloatValue>,
    ) -> BmiResult<ArrayViewMut1<'a, FloatValue>>;

    /// Overwrite a variable with values from `src`
    fn set_value(&mut self, name: &str, src: ArrayView1<FloatValue>) -> BmiResult<()>;

    /// Start of the simulation in seconds since the Unix epoch
    fn get_start_time(&self) -> BmiResult<Time>;

    /// End of the simulation in seconds since the Unix epoch
    fn get_end_time(&self) -> BmiResult<Time>;
}
