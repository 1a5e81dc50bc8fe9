//! Transport capability traits consumed by the acquisition coordinator.
//!
//! The BLE stack itself (adapter discovery, pairing, GATT resolution,
//! notification plumbing) lives behind these traits. The crate only needs
//! three capabilities: subscribe to raw buffers for a characteristic, read a
//! characteristic's current buffer on demand, and learn that the link
//! dropped. UUIDs are passed through verbatim and never interpreted here.

use async_trait::async_trait;
use std::fmt;
use tokio::sync::{mpsc, watch};

/// A failure reported by the transport collaborator.
#[derive(Debug, Clone)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Entry point to the wireless stack.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Whether a usable radio/interface is present.
    async fn is_available(&self) -> Result<bool, TransportError>;

    /// Discover a device advertising `service_uuid`.
    ///
    /// `Ok(None)` means discovery completed without a match (or the user
    /// cancelled selection); it is a recoverable outcome, not a failure.
    async fn request_device(
        &self,
        service_uuid: &str,
    ) -> Result<Option<Box<dyn Device>>, TransportError>;
}

/// A discovered device that has not been connected yet.
#[async_trait]
pub trait Device: Send + Sync {
    /// Stable identifier for the device (address or platform id).
    fn id(&self) -> String;

    /// Establish the link and resolve the primary service.
    async fn open(&self) -> Result<Box<dyn Session>, TransportError>;
}

/// An open link to a device.
#[async_trait]
pub trait Session: Send + Sync {
    /// Resolve a characteristic by UUID. Fails if the device lacks it.
    async fn characteristic(&self, uuid: &str) -> Result<Box<dyn Channel>, TransportError>;

    /// A receiver that flips to `true` once when the link is lost.
    fn disconnects(&self) -> watch::Receiver<bool>;
}

/// A resolved characteristic channel.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Subscribe to raw buffer notifications (push delivery).
    ///
    /// The subscription is released by the transport when the session ends;
    /// the receiver then closes.
    async fn subscribe(&self) -> Result<mpsc::Receiver<Vec<u8>>, TransportError>;

    /// Read the characteristic's current buffer (poll delivery).
    async fn read_once(&self) -> Result<Vec<u8>, TransportError>;
}
