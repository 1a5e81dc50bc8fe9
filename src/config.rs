//! Configuration for which sensors to stream and how.

use crate::error::Error;
use crate::registry::{Profile, Sensor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Streaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sensors to bind and stream.
    pub enable: Vec<Sensor>,

    /// Read cadence for poll-mode sensors.
    #[serde(with = "duration_millis")]
    pub polling_interval: Duration,

    /// Capacity of every field's history window.
    pub window_size: usize,

    /// Emit a `<sensor>_mean` sample alongside each reading.
    pub mean: bool,

    /// Emit a `<sensor>_stddev` sample alongside each reading.
    pub stddev: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable: vec![Sensor::Accelerometer, Sensor::Gyroscope, Sensor::Magnetometer],
            polling_interval: Duration::from_millis(500),
            window_size: 64,
            mean: false,
            stddev: false,
        }
    }
}

impl Config {
    /// Build a configuration from sensor stream names.
    ///
    /// Fails with [`Error::UnknownSensor`] for any name outside the known
    /// set, before any transport interaction.
    pub fn with_sensors<'a, I>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let enable = names
            .into_iter()
            .map(|name| Sensor::from_name(name).ok_or_else(|| Error::UnknownSensor(name.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            enable,
            ..Self::default()
        })
    }

    /// Check this configuration against a board profile.
    ///
    /// Every enabled sensor must exist in the profile's descriptor table,
    /// and the window must be able to hold at least one sample.
    pub fn validate(&self, profile: Profile) -> Result<(), Error> {
        if self.window_size == 0 {
            return Err(Error::InvalidWindowSize);
        }
        for &sensor in &self.enable {
            if profile.descriptor(sensor).is_none() {
                return Err(Error::UnknownSensor(sensor.as_str().to_string()));
            }
        }
        Ok(())
    }
}

/// Serde support for millisecond-denominated durations.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_firmware_sketch() {
        let config = Config::default();
        assert_eq!(
            config.enable,
            vec![Sensor::Accelerometer, Sensor::Gyroscope, Sensor::Magnetometer]
        );
        assert_eq!(config.polling_interval, Duration::from_millis(500));
        assert_eq!(config.window_size, 64);
        assert!(!config.mean);
        assert!(!config.stddev);
    }

    #[test]
    fn test_with_sensors_parses_names() {
        let config = Config::with_sensors(["temperature", "humidity"]).unwrap();
        assert_eq!(config.enable, vec![Sensor::Temperature, Sensor::Humidity]);
    }

    #[test]
    fn test_with_sensors_rejects_unknown_name() {
        let err = Config::with_sensors(["accelerometer", "foo"]).unwrap_err();
        match err {
            Error::UnknownSensor(name) => assert_eq!(name, "foo"),
            other => panic!("expected UnknownSensor, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_sensor_absent_from_profile() {
        let config = Config::with_sensors(["microphone"]).unwrap();
        assert!(config.validate(Profile::Nano33BleSense).is_ok());

        let err = config.validate(Profile::Nano33Ble).unwrap_err();
        assert!(matches!(err, Error::UnknownSensor(name) if name == "microphone"));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = Config {
            window_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(Profile::Nano33BleSense),
            Err(Error::InvalidWindowSize)
        ));
    }

    #[test]
    fn test_polling_interval_serializes_as_millis() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["polling_interval"], 500);

        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back.polling_interval, Duration::from_millis(500));
    }
}
