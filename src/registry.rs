//! Sensor identifiers, characteristic descriptors, and per-board profiles.
//!
//! Each board family ships a fixed table of characteristics. A descriptor
//! records everything needed to bind and decode one sensor: the GATT UUID
//! (passed to the transport verbatim, never interpreted here), whether the
//! firmware notifies on change or must be polled, and the ordered field
//! layout of its buffers.

use crate::codec::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// GATT service UUID advertised by the Nano 33 BLE sensor sketch.
pub const SERVICE_UUID: &str = "e905de3e-0000-44de-92c4-bb6e04fb0212";

/// The closed set of sensors across both board families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensor {
    Accelerometer,
    Gyroscope,
    Magnetometer,
    Orientation,
    Light,
    Color,
    Proximity,
    Gesture,
    Pressure,
    Temperature,
    Humidity,
    Microphone,
}

impl Sensor {
    /// The event/stream name for this sensor.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sensor::Accelerometer => "accelerometer",
            Sensor::Gyroscope => "gyroscope",
            Sensor::Magnetometer => "magnetometer",
            Sensor::Orientation => "orientation",
            Sensor::Light => "light",
            Sensor::Color => "color",
            Sensor::Proximity => "proximity",
            Sensor::Gesture => "gesture",
            Sensor::Pressure => "pressure",
            Sensor::Temperature => "temperature",
            Sensor::Humidity => "humidity",
            Sensor::Microphone => "microphone",
        }
    }

    /// Parse a sensor from its stream name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "accelerometer" => Some(Sensor::Accelerometer),
            "gyroscope" => Some(Sensor::Gyroscope),
            "magnetometer" => Some(Sensor::Magnetometer),
            "orientation" => Some(Sensor::Orientation),
            "light" => Some(Sensor::Light),
            "color" => Some(Sensor::Color),
            "proximity" => Some(Sensor::Proximity),
            "gesture" => Some(Sensor::Gesture),
            "pressure" => Some(Sensor::Pressure),
            "temperature" => Some(Sensor::Temperature),
            "humidity" => Some(Sensor::Humidity),
            "microphone" => Some(Sensor::Microphone),
            _ => None,
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a characteristic delivers its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The firmware notifies on every new value.
    Notify,
    /// The value must be actively read on an interval.
    Poll,
}

/// Static metadata for one sensor characteristic.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub sensor: Sensor,
    /// Characteristic UUID, passed through to the transport.
    pub uuid: &'static str,
    pub delivery: Delivery,
    /// Ordered field layout; decode order is field order.
    pub layout: &'static [FieldType],
    /// Field names, same length and order as `layout`.
    pub fields: &'static [&'static str],
}

const XYZ: &[&str] = &["x", "y", "z"];
const FLOAT32_X3: &[FieldType] = &[FieldType::Float32, FieldType::Float32, FieldType::Float32];

/// Microphone buffers carry 32 one-byte amplitude slots.
const MIC_LAYOUT: &[FieldType] = &[FieldType::UInt8; 32];
const MIC_FIELDS: &[&str] = &[
    "a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "aA", "aB", "aC", "aD", "aE",
    "aF", "b0", "b1", "b2", "b3", "b4", "b5", "b6", "b7", "b8", "b9", "bA", "bB", "bC", "bD",
    "bE", "bF",
];

const ACCELEROMETER: Descriptor = Descriptor {
    sensor: Sensor::Accelerometer,
    uuid: "e905de3e-3001-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: FLOAT32_X3,
    fields: XYZ,
};

const GYROSCOPE: Descriptor = Descriptor {
    sensor: Sensor::Gyroscope,
    uuid: "e905de3e-3002-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: FLOAT32_X3,
    fields: XYZ,
};

const MAGNETOMETER: Descriptor = Descriptor {
    sensor: Sensor::Magnetometer,
    uuid: "e905de3e-3003-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: FLOAT32_X3,
    fields: XYZ,
};

const ORIENTATION: Descriptor = Descriptor {
    sensor: Sensor::Orientation,
    uuid: "e905de3e-3004-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: FLOAT32_X3,
    fields: &["heading", "pitch", "roll"],
};

const LIGHT: Descriptor = Descriptor {
    sensor: Sensor::Light,
    uuid: "e905de3e-2001-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: &[FieldType::UInt16],
    fields: &["ambient"],
};

const COLOR: Descriptor = Descriptor {
    sensor: Sensor::Color,
    uuid: "e905de3e-2002-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: &[FieldType::UInt16, FieldType::UInt16, FieldType::UInt16],
    fields: &["r", "g", "b"],
};

const PROXIMITY: Descriptor = Descriptor {
    sensor: Sensor::Proximity,
    uuid: "e905de3e-2003-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: &[FieldType::UInt8],
    fields: &["proximity"],
};

const GESTURE: Descriptor = Descriptor {
    sensor: Sensor::Gesture,
    uuid: "e905de3e-2004-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: &[FieldType::UInt8],
    fields: &["gesture"],
};

const PRESSURE: Descriptor = Descriptor {
    sensor: Sensor::Pressure,
    uuid: "e905de3e-4001-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Poll,
    layout: &[FieldType::Float32],
    fields: &["pressure"],
};

const TEMPERATURE: Descriptor = Descriptor {
    sensor: Sensor::Temperature,
    uuid: "e905de3e-4002-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Poll,
    layout: &[FieldType::Float32],
    fields: &["temperature"],
};

const HUMIDITY: Descriptor = Descriptor {
    sensor: Sensor::Humidity,
    uuid: "e905de3e-4003-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Poll,
    layout: &[FieldType::Float32],
    fields: &["humidity"],
};

const MICROPHONE: Descriptor = Descriptor {
    sensor: Sensor::Microphone,
    uuid: "e905de3e-5001-44de-92c4-bb6e04fb0212",
    delivery: Delivery::Notify,
    layout: MIC_LAYOUT,
    fields: MIC_FIELDS,
};

/// Characteristic table for the plain Nano 33 BLE (IMU only).
static NANO33_BLE: &[Descriptor] = &[ACCELEROMETER, GYROSCOPE, MAGNETOMETER, ORIENTATION];

/// Characteristic table for the Nano 33 BLE Sense (full suite).
static NANO33_BLE_SENSE: &[Descriptor] = &[
    ACCELEROMETER,
    GYROSCOPE,
    MAGNETOMETER,
    ORIENTATION,
    LIGHT,
    COLOR,
    PROXIMITY,
    GESTURE,
    PRESSURE,
    TEMPERATURE,
    HUMIDITY,
    MICROPHONE,
];

/// A board family and its fixed descriptor table.
///
/// The two variants run the same sketch family and share the service UUID;
/// the Sense board additionally exposes the environmental, optical, and
/// microphone characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    Nano33Ble,
    Nano33BleSense,
}

impl Profile {
    /// The service UUID used for device discovery.
    pub const fn service_uuid(self) -> &'static str {
        SERVICE_UUID
    }

    /// All characteristics this board exposes.
    pub fn descriptors(self) -> &'static [Descriptor] {
        match self {
            Profile::Nano33Ble => NANO33_BLE,
            Profile::Nano33BleSense => NANO33_BLE_SENSE,
        }
    }

    /// Look up a sensor's descriptor, or `None` if this board lacks it.
    pub fn descriptor(self, sensor: Sensor) -> Option<&'static Descriptor> {
        self.descriptors().iter().find(|d| d.sensor == sensor)
    }
}
