//! Driver-level tests for the sleep workload.
//!
//! These tests use the model only through the `Bmi` trait, the way a coupling
//! framework would.

use is_close::is_close;
use ndarray::{array, Array1};
use parsleep_components::components::{SleepModel, StepBound, END_TIMESTEP};
use parsleep_core::bmi::Bmi;
use parsleep_core::config::Config;
use parsleep_core::errors::BmiError;
use parsleep_core::time::EpochConverter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Configuration file in the temp directory that is removed when dropped
struct TempConfig(PathBuf);

impl TempConfig {
    fn new(name: &str, contents: &str) -> Self {
        let file_name = format!("parsleep-driver-{}-{}", std::process::id(), name);
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, contents).unwrap();
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempConfig {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_initialize_from_json_file() {
        let config = TempConfig::new("scenario.json", r#"{"sleepiness": 0.1}"#);
        let mut model: Box<dyn Bmi> = Box::new(SleepModel::time_stepped());

        model.initialize(config.path()).unwrap();
        assert_eq!(model.get_component_name(), "Parallelisation Sleep");

        let start = Instant::now();
        model.update().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));

        let mut buffer = Array1::zeros(1);
        model.get_value("sleep", buffer.view_mut()).unwrap();
        assert!(is_close!(buffer[0], 0.1));
    }

    #[test]
    fn test_initialize_from_toml_file() {
        let config = TempConfig::new(
            "scenario.toml",
            "sleepiness = 0.0\nprecipitation_file = \"p.nc\"\n",
        );
        let mut model = SleepModel::basic();

        model.initialize(config.path()).unwrap();
        assert_eq!(model.sleepiness().unwrap(), 0.0);
        assert_eq!(model.config().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_key_in_file() {
        let config = TempConfig::new("missing.json", r#"{"sleep": 0.1}"#);
        let mut model = SleepModel::basic();

        assert!(matches!(
            model.initialize(config.path()),
            Err(BmiError::MissingConfigKey(_))
        ));
    }

    #[test]
    fn test_unreadable_file() {
        let mut model = SleepModel::basic();
        let path = std::env::temp_dir().join("parsleep-driver-missing-config.json");

        let result = model.initialize(&path);
        assert!(matches!(result, Err(BmiError::ConfigIo { .. })));
        // Error messages name the offending file
        let message = result.unwrap_err().to_string();
        assert!(message.contains("parsleep-driver-missing-config.json"));
    }
}

mod variables {
    use super::*;

    #[test]
    fn test_error_messages_name_the_variable() {
        let mut model = SleepModel::basic();
        model
            .initialize_with(Config::new().with_value("sleepiness", 0.1))
            .unwrap();

        let err = model.get_var_units("discharge").unwrap_err();
        assert_eq!(err.to_string(), "Unknown variable discharge");

        let err = model
            .set_value("discharge", array![1.0].view())
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot set value of var discharge");
    }
}

mod serialisation {
    use super::*;

    #[test]
    fn test_roundtrip_boxed_model() {
        let mut model = SleepModel::new(StepBound::Bounded { end_timestep: 1.0 });
        model
            .initialize_with(Config::new().with_value("sleepiness", 0.01))
            .unwrap();
        model.update().unwrap();

        let boxed: Box<dyn Bmi> = Box::new(model);
        let serialised = serde_json::to_string(&boxed).unwrap();
        let deserialised: Box<dyn Bmi> = serde_json::from_str(&serialised).unwrap();

        assert_eq!(serde_json::to_string(&deserialised).unwrap(), serialised);
        let mut buffer = Array1::zeros(1);
        deserialised.get_value("sleep", buffer.view_mut()).unwrap();
        assert_eq!(buffer[0], 0.01);
    }

    #[test]
    fn test_time_converter_is_not_serialised() {
        let model = SleepModel::time_stepped()
            .with_time_converter(Arc::new(EpochConverter::default()));
        assert_eq!(model.get_end_time().unwrap(), END_TIMESTEP);

        let serialised = serde_json::to_string(&model).unwrap();
        let deserialised: SleepModel = serde_json::from_str(&serialised).unwrap();
        assert!(matches!(
            deserialised.get_end_time(),
            Err(BmiError::TimeConversionUnavailable(_))
        ));
    }
}

mod parallel {
    use super::*;

    /// Models share no state so a driver can step them from separate threads.
    #[test]
    fn test_models_sleep_concurrently() {
        let sleepiness = 0.2;
        let n_models = 4;

        let start = Instant::now();
        let handles: Vec<_> = (0..n_models)
            .map(|_| {
                thread::spawn(move || {
                    let mut model = SleepModel::basic();
                    model
                        .initialize_with(Config::new().with_value("sleepiness", sleepiness))
                        .unwrap();
                    model.update().unwrap();
                    model.current_timestep().unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(is_close!(handle.join().unwrap(), sleepiness));
        }
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_secs_f64(sleepiness));
        assert!(
            elapsed < Duration::from_secs_f64(sleepiness * n_models as f64),
            "Models did not overlap, took {:?}",
            elapsed
        );
    }
}
