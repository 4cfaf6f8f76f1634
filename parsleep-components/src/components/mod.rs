mod sleep;

pub use sleep::{
    SleepModel, SleepParameters, StepBound, StepStatus, COMPONENT_NAME, CONFIG_SLEEPINESS,
    END_TIMESTEP, START_TIME, VAR_SLEEP, VAR_SLEEP_UNIT,
};
