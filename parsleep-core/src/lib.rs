pub mod bmi;
pub mod config;
pub mod python;
pub mod time;

pub mod errors;

/// Value type exchanged through model variables
pub type FloatValue = f64;
