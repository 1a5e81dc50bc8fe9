//! Events emitted on the board's stream, and the sample payloads they carry.
//!
//! The event names mirror the board's original named-event surface so that
//! serialized output stays interoperable: lifecycle events use the
//! [`CONNECTED`], [`DISCONNECTED`], and [`ERROR`] names, each sensor stream
//! uses its sensor name, and aggregate streams append [`SUFFIX_MEAN`] or
//! [`SUFFIX_STDDEV`].

use crate::error::Error;
use crate::registry::Sensor;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;

/// Lifecycle event name: the link was established.
pub const CONNECTED: &str = "connected";
/// Lifecycle event name: the link was lost (emitted once per session).
pub const DISCONNECTED: &str = "disconnected";
/// Lifecycle event name: a streaming-time error.
pub const ERROR: &str = "error";
/// Suffix appended to a sensor name for its rolling-mean stream.
pub const SUFFIX_MEAN: &str = "_mean";
/// Suffix appended to a sensor name for its rolling-stddev stream.
pub const SUFFIX_STDDEV: &str = "_stddev";

/// An ordered mapping of field name to value, one per decoded buffer.
///
/// Field order matches the sensor's wire layout. Serializes as a JSON map
/// in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    fields: Vec<(&'static str, f64)>,
}

impl Sample {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: &'static str, value: f64) {
        self.fields.push((name, value));
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.fields.iter().copied()
    }
}

impl Serialize for Sample {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Everything the board publishes on its event stream.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// The link is up and all enabled sensors are streaming.
    Connected { device_id: String },
    /// The link ended; emitted exactly once per session.
    Disconnected { device_id: String },
    /// A streaming-time error. The affected sample is dropped; other
    /// sensors and subsequent buffers are unaffected.
    Error(Error),
    /// A decoded sensor buffer.
    Reading { sensor: Sensor, sample: Sample },
    /// Rolling mean over the sensor's current window (when enabled).
    Mean { sensor: Sensor, sample: Sample },
    /// Rolling sample standard deviation (when enabled).
    StdDev { sensor: Sensor, sample: Sample },
}

impl BoardEvent {
    /// The named-event identifier for this event, matching the original
    /// stream names (`"accelerometer"`, `"accelerometer_mean"`, ...).
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            BoardEvent::Connected { .. } => Cow::Borrowed(CONNECTED),
            BoardEvent::Disconnected { .. } => Cow::Borrowed(DISCONNECTED),
            BoardEvent::Error(_) => Cow::Borrowed(ERROR),
            BoardEvent::Reading { sensor, .. } => Cow::Borrowed(sensor.as_str()),
            BoardEvent::Mean { sensor, .. } => {
                Cow::Owned(format!("{}{}", sensor.as_str(), SUFFIX_MEAN))
            }
            BoardEvent::StdDev { sensor, .. } => {
                Cow::Owned(format!("{}{}", sensor.as_str(), SUFFIX_STDDEV))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xyz_sample() -> Sample {
        let mut sample = Sample::with_capacity(3);
        sample.insert("x", 1.0);
        sample.insert("y", 2.0);
        sample.insert("z", 3.0);
        sample
    }

    #[test]
    fn test_sample_preserves_layout_order() {
        let sample = xyz_sample();
        let names: Vec<_> = sample.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(sample.get("y"), Some(2.0));
        assert_eq!(sample.get("w"), None);
    }

    #[test]
    fn test_sample_serializes_as_map() {
        let json = serde_json::to_string(&xyz_sample()).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"z":3.0}"#);
    }

    #[test]
    fn test_event_names() {
        let sample = xyz_sample();
        assert_eq!(
            BoardEvent::Reading {
                sensor: Sensor::Accelerometer,
                sample: sample.clone(),
            }
            .name(),
            "accelerometer"
        );
        assert_eq!(
            BoardEvent::Mean {
                sensor: Sensor::Gyroscope,
                sample: sample.clone(),
            }
            .name(),
            "gyroscope_mean"
        );
        assert_eq!(
            BoardEvent::StdDev {
                sensor: Sensor::Orientation,
                sample,
            }
            .name(),
            "orientation_stddev"
        );
        assert_eq!(
            BoardEvent::Connected {
                device_id: "aa:bb".into()
            }
            .name(),
            "connected"
        );
    }
}
