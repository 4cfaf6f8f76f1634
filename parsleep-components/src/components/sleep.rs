//! Parallelisation sleep model
//!
//! A placeholder model whose only work is to sleep for a configurable amount of
//! wall-clock time on every update. It is used as a synthetic workload when
//! exercising drivers that run many models in parallel.

use log::{debug, info, trace, warn};
use ndarray::{ArrayView1, ArrayViewMut1};
use parsleep_core::bmi::Bmi;
use parsleep_core::config::Config;
use parsleep_core::errors::{BmiError, BmiResult};
use parsleep_core::time::{Time, TimeConverter};
use parsleep_core::FloatValue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const COMPONENT_NAME: &str = "Parallelisation Sleep";
/// Name of the variable holding the per-step delay
pub const VAR_SLEEP: &str = "sleep";
pub const VAR_SLEEP_UNIT: &str = "s";
/// Configuration key of the per-step delay
pub const CONFIG_SLEEPINESS: &str = "sleepiness";

/// Timestep at which a bounded model starts
pub const START_TIME: Time = 0.0;
/// Default final timestep of a bounded model
pub const END_TIMESTEP: Time = 20_000_000.0;

// Declared for compatibility with the hydrological models this workload stands in for.
// No accessor serves it.
static OUTPUT_VAR_NAMES: [&str; 1] = ["discharge"];

/// Parameters for the sleep model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepParameters {
    /// Wall-clock time spent in each update
    /// unit: s
    pub sleepiness: FloatValue,
}

impl SleepParameters {
    pub fn new(sleepiness: FloatValue) -> BmiResult<Self> {
        let parameters = Self { sleepiness };
        parameters.delay()?;
        Ok(parameters)
    }

    /// Extract the parameters from a model configuration
    pub fn from_config(config: &Config) -> BmiResult<Self> {
        Self::new(config.get_float(CONFIG_SLEEPINESS)?)
    }

    /// Delay applied by each update
    ///
    /// Fails if the sleepiness is negative, not finite or too large to represent.
    pub fn delay(&self) -> BmiResult<Duration> {
        let sleepiness = self.sleepiness;
        Duration::try_from_secs_f64(sleepiness).map_err(|e| BmiError::InvalidValue {
            name: CONFIG_SLEEPINESS.to_string(),
            reason: format!("{sleepiness} is not a valid number of seconds ({e})"),
        })
    }
}

/// Whether the model stops stepping after a fixed number of timesteps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepBound {
    /// Every update sleeps
    Unbounded,
    /// Updates sleep until the timestep counter reaches `end_timestep`
    Bounded { end_timestep: Time },
}

impl StepBound {
    /// Whether a model at `timestep` has finished stepping
    pub fn is_done(&self, timestep: Time) -> bool {
        match self {
            StepBound::Unbounded => false,
            StepBound::Bounded { end_timestep } => timestep >= *end_timestep,
        }
    }
}

impl Default for StepBound {
    fn default() -> Self {
        StepBound::Bounded {
            end_timestep: END_TIMESTEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Stepping,
    Done,
}

/// State created by initialisation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SleepState {
    config: Config,
    parameters: SleepParameters,
    current_timestep: Time,
}

/// Model that sleeps for `sleepiness` seconds per update
///
/// With [`StepBound::Unbounded`] every update sleeps.
/// With [`StepBound::Bounded`] each update advances the timestep counter by
/// `sleepiness` and updates become no-ops once the counter reaches the end timestep.
///
/// Start and end times are converted to unix time by an attached [`TimeConverter`].
/// The converter is supplied by the driver and is not serialised with the model.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SleepModel {
    bound: StepBound,
    state: Option<SleepState>,
    #[serde(skip)]
    time_converter: Option<Arc<dyn TimeConverter>>,
}

impl SleepModel {
    pub fn new(bound: StepBound) -> Self {
        Self {
            bound,
            state: None,
            time_converter: None,
        }
    }

    /// A model that sleeps on every update
    pub fn basic() -> Self {
        Self::new(StepBound::Unbounded)
    }

    /// A model that stops sleeping once [`END_TIMESTEP`] is reached
    pub fn time_stepped() -> Self {
        Self::new(StepBound::default())
    }

    pub fn with_time_converter(mut self, time_converter: Arc<dyn TimeConverter>) -> Self {
        self.set_time_converter(time_converter);
        self
    }

    pub fn set_time_converter(&mut self, time_converter: Arc<dyn TimeConverter>) {
        self.time_converter = Some(time_converter);
    }

    pub fn bound(&self) -> StepBound {
        self.bound
    }

    pub fn config(&self) -> BmiResult<&Config> {
        Ok(&self.state()?.config)
    }

    pub fn sleepiness(&self) -> BmiResult<FloatValue> {
        Ok(self.state()?.parameters.sleepiness)
    }

    pub fn current_timestep(&self) -> BmiResult<Time> {
        Ok(self.state()?.current_timestep)
    }

    pub fn status(&self) -> BmiResult<StepStatus> {
        if self.bound.is_done(self.current_timestep()?) {
            Ok(StepStatus::Done)
        } else {
            Ok(StepStatus::Stepping)
        }
    }

    fn state(&self) -> BmiResult<&SleepState> {
        self.state.as_ref().ok_or(BmiError::NotInitialized)
    }

    fn state_mut(&mut self) -> BmiResult<&mut SleepState> {
        self.state.as_mut().ok_or(BmiError::NotInitialized)
    }

    fn to_unixtime(&self, timestep: Time) -> BmiResult<Time> {
        match &self.time_converter {
            Some(converter) => converter.unixtime(timestep),
            None => Err(BmiError::TimeConversionUnavailable(timestep)),
        }
    }
}

#[typetag::serde]
impl Bmi for SleepModel {
    fn initialize_with(&mut self, config: Config) -> BmiResult<()> {
        let parameters = SleepParameters::from_config(&config)?;
        if self.state.is_some() {
            warn!("{} is being initialized a second time", COMPONENT_NAME);
        }
        info!(
            "Initialized {} with a sleepiness of {}s ({:?})",
            COMPONENT_NAME, parameters.sleepiness, self.bound
        );

        self.state = Some(SleepState {
            config,
            parameters,
            current_timestep: START_TIME,
        });
        Ok(())
    }

    fn update(&mut self) -> BmiResult<()> {
        let bound = self.bound;
        let state = self.state_mut()?;

        if bound.is_done(state.current_timestep) {
            trace!(
                "Timestep {} is past the end, skipping",
                state.current_timestep
            );
            return Ok(());
        }

        let delay = state.parameters.delay()?;
        debug!(
            "Sleeping for {:?} at timestep {}",
            delay, state.current_timestep
        );
        thread::sleep(delay);
        state.current_timestep += state.parameters.sleepiness;

        if bound.is_done(state.current_timestep) {
            info!(
                "{} reached its end at timestep {}",
                COMPONENT_NAME, state.current_timestep
            );
        }
        Ok(())
    }

    fn get_component_name(&self) -> &str {
        COMPONENT_NAME
    }

    fn get_output_var_names(&self) -> &[&str] {
        &OUTPUT_VAR_NAMES
    }

    fn get_var_units(&self, name: &str) -> BmiResult<&str> {
        match name {
            VAR_SLEEP => Ok(VAR_SLEEP_UNIT),
            _ => Err(BmiError::UnknownVariable(name.to_string())),
        }
    }

    fn get_value<'a>(
        &self,
        name: &str,
        mut dest: ArrayViewMut1<'a, FloatValue>,
    ) -> BmiResult<ArrayViewMut1<'a, FloatValue>> {
        match name {
            VAR_SLEEP => {
                dest.fill(self.sleepiness()?);
                Ok(dest)
            }
            _ => Err(BmiError::UnknownVariable(name.to_string())),
        }
    }

    fn set_value(&mut self, name: &str, src: ArrayView1<FloatValue>) -> BmiResult<()> {
        if name != VAR_SLEEP {
            return Err(BmiError::UnsupportedVariable(name.to_string()));
        }
        let state = self.state_mut()?;
        let value = src
            .first()
            .copied()
            .ok_or_else(|| BmiError::EmptyBuffer(name.to_string()))?;

        state.parameters = SleepParameters::new(value)?;
        debug!("Set {} to {}{}", name, value, VAR_SLEEP_UNIT);
        Ok(())
    }

    fn get_start_time(&self) -> BmiResult<Time> {
        self.to_unixtime(START_TIME)
    }

    fn get_end_time(&self) -> BmiResult<Time> {
        match self.bound {
            StepBound::Unbounded => Err(BmiError::NoEndTime),
            StepBound::Bounded { end_timestep } => self.to_unixtime(end_timestep),
        }
    }
}
