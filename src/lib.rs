//! nano33-ble - typed sensor streams for the Arduino Nano 33 BLE family.
//!
//! This library exposes the sensor suite of the Nano 33 BLE and Nano 33 BLE
//! Sense boards as named, typed data streams with optional rolling
//! statistics. The BLE stack itself is a collaborator behind the
//! [`transport`] traits; this crate owns characteristic decoding, bounded
//! per-field history, aggregate computation, and event publication.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          nano33-ble                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────┐   ┌───────────┐   ┌─────────┐ │
//! │  │ Transport │──▶│  Codec   │──▶│  Windows  │──▶│  Events │ │
//! │  │ (traits)  │   │ (decode) │   │ (history) │   │ (mpsc)  │ │
//! │  └───────────┘   └──────────┘   └───────────┘   └─────────┘ │
//! │        ▲                                                     │
//! │        │          ┌───────────────────────┐                  │
//! │        └──────────│ Board (coordinator)   │                  │
//! │                   │  bind / stream / tear │                  │
//! │                   └───────────────────────┘                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use nano33_ble::{Board, Config, Profile};
//!
//! let config = Config::with_sensors(["accelerometer", "gyroscope"]).unwrap();
//! let board = Board::new(Profile::Nano33BleSense, config).unwrap();
//! assert_eq!(board.config().enable.len(), 2);
//! ```
//!
//! Connecting takes any [`transport::Transport`] implementation and yields
//! an event stream plus a session handle:
//!
//! ```text
//! match board.connect(&transport).await? {
//!     Some((mut events, handle)) => {
//!         while let Some(event) = events.recv().await { /* ... */ }
//!     }
//!     None => { /* no matching device; retry if desired */ }
//! }
//! ```

pub mod board;
pub mod codec;
pub mod config;
pub mod error;
pub mod event;
pub mod registry;
pub mod stats;
pub mod transport;

// Re-export key types at crate root for convenience
pub use board::{Board, BoardHandle, EventReceiver};
pub use codec::{decode_fields, DecodeError, FieldType};
pub use config::Config;
pub use error::Error;
pub use event::{BoardEvent, Sample, CONNECTED, DISCONNECTED, ERROR, SUFFIX_MEAN, SUFFIX_STDDEV};
pub use registry::{Delivery, Descriptor, Profile, Sensor, SERVICE_UUID};
pub use stats::{SampleWindow, StatsError};
pub use transport::{Channel, Device, Session, Transport, TransportError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
