//! Error taxonomy for configuration, connect, and streaming failures.

use crate::codec::DecodeError;
use crate::registry::Sensor;
use crate::stats::StatsError;
use crate::transport::TransportError;
use std::fmt;

/// Errors surfaced by the board client.
///
/// Configuration and connect-time variants are returned synchronously from
/// the failing call. Streaming-time variants (`Decode`, `Statistics`, and
/// transport read failures) are delivered as
/// [`BoardEvent::Error`](crate::event::BoardEvent::Error) without tearing
/// down the session or unrelated sensors.
///
/// A failed device discovery is not represented here: `connect` reports it
/// as `Ok(None)` so the caller can retry.
#[derive(Debug, Clone)]
pub enum Error {
    /// No Bluetooth interface is present. Fatal to connect; no retry is
    /// attempted by this crate.
    TransportUnavailable,
    /// The configuration names a sensor this board profile does not have.
    UnknownSensor(String),
    /// The configured window size is zero.
    InvalidWindowSize,
    /// The connected device lacks an expected characteristic. All sensors
    /// share one link, so this aborts the whole connect sequence.
    CharacteristicMissing { sensor: Sensor, uuid: &'static str },
    /// A raw buffer was shorter than the sensor's layout. The sample is
    /// dropped; the stream continues.
    Decode { sensor: Sensor, source: DecodeError },
    /// A requested aggregate could not be computed yet; recovers once
    /// enough samples accumulate.
    Statistics { sensor: Sensor, source: StatsError },
    /// The transport collaborator failed.
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TransportUnavailable => write!(f, "no Bluetooth interface available"),
            Error::UnknownSensor(name) => write!(f, "unknown sensor: {name}"),
            Error::InvalidWindowSize => write!(f, "window size must be at least 1"),
            Error::CharacteristicMissing { sensor, uuid } => {
                write!(f, "device is missing characteristic {uuid} for {sensor}")
            }
            Error::Decode { sensor, source } => {
                write!(f, "failed to decode {sensor} buffer: {source}")
            }
            Error::Statistics { sensor, source } => {
                write!(f, "statistics unavailable for {sensor}: {source}")
            }
            Error::Transport(source) => source.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<TransportError> for Error {
    fn from(source: TransportError) -> Self {
        Error::Transport(source)
    }
}
