//! The acquisition coordinator: binds enabled sensors to the transport,
//! decodes incoming buffers, maintains per-field history, and publishes
//! everything on a single event stream.
//!
//! Per sensor the lifecycle is bind -> stream -> tear down. Notify-mode
//! sensors stream from a transport subscription; poll-mode sensors read on
//! a recurring interval. Each sensor's history is owned exclusively by its
//! streaming task, so samples for one buffer are always fully processed
//! (reading, then mean, then stddev) before the next buffer is touched and
//! no locking is needed.

use crate::codec::decode_fields;
use crate::config::Config;
use crate::error::Error;
use crate::event::{BoardEvent, Sample};
use crate::registry::{Delivery, Descriptor, Profile};
use crate::stats::{SampleWindow, StatsError};
use crate::transport::{Channel, Session, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Receiving end of the board's event stream.
pub type EventReceiver = mpsc::UnboundedReceiver<BoardEvent>;

/// A board client for one device profile and configuration.
///
/// `Board` itself holds no link state; [`Board::connect`] produces an event
/// stream and a [`BoardHandle`] per session, so a board can be reconnected
/// after a disconnect.
#[derive(Debug)]
pub struct Board {
    profile: Profile,
    config: Config,
}

impl Board {
    /// Create a board client, validating the configuration against the
    /// profile's descriptor table.
    ///
    /// Naming a sensor the profile lacks fails here with
    /// [`Error::UnknownSensor`], before any transport interaction.
    pub fn new(profile: Profile, config: Config) -> Result<Self, Error> {
        config.validate(profile)?;
        Ok(Self { profile, config })
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discover, connect, bind every enabled sensor, and start streaming.
    ///
    /// Returns `Ok(None)` when discovery finds no matching device; the
    /// caller may retry. All other failures abort the whole sequence:
    /// every enabled sensor shares one physical link, so partial
    /// enablement is not supported.
    ///
    /// On success the returned receiver yields a
    /// [`BoardEvent::Connected`] first, then sensor readings (and, when
    /// enabled, mean/stddev samples in that order per buffer), and finally
    /// a single [`BoardEvent::Disconnected`].
    pub async fn connect(
        &self,
        transport: &dyn Transport,
    ) -> Result<Option<(EventReceiver, BoardHandle)>, Error> {
        if !transport.is_available().await? {
            return Err(Error::TransportUnavailable);
        }

        let device = match transport.request_device(self.profile.service_uuid()).await? {
            Some(device) => device,
            None => {
                debug!(service = self.profile.service_uuid(), "no matching device found");
                return Ok(None);
            }
        };
        let device_id = device.id();
        let session = device.open().await?;
        let link_drop = session.disconnects();

        // Bind every enabled sensor before any streaming starts; one
        // missing characteristic aborts the whole connect sequence.
        let mut bound: Vec<(&'static Descriptor, Box<dyn Channel>)> =
            Vec::with_capacity(self.config.enable.len());
        for &sensor in &self.config.enable {
            let descriptor = self
                .profile
                .descriptor(sensor)
                .ok_or_else(|| Error::UnknownSensor(sensor.as_str().to_string()))?;
            let channel = session
                .characteristic(descriptor.uuid)
                .await
                .map_err(|_| Error::CharacteristicMissing {
                    sensor,
                    uuid: descriptor.uuid,
                })?;
            debug!(sensor = %sensor, uuid = descriptor.uuid, "characteristic bound");
            bound.push((descriptor, channel));
        }

        let (events, event_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        for (descriptor, channel) in bound {
            let worker =
                SensorWorker::new(descriptor, &self.config, events.clone(), shutdown_rx.clone());
            match descriptor.delivery {
                Delivery::Notify => {
                    let buffers = channel.subscribe().await?;
                    tokio::spawn(worker.run_notify(channel, buffers));
                }
                Delivery::Poll => {
                    tokio::spawn(worker.run_poll(channel, self.config.polling_interval));
                }
            }
        }

        let connected = Arc::new(AtomicBool::new(true));
        let (request_tx, request_rx) = watch::channel(false);
        tokio::spawn(supervise(
            link_drop,
            request_rx,
            shutdown_tx,
            events.clone(),
            device_id.clone(),
            connected.clone(),
        ));

        let _ = events.send(BoardEvent::Connected {
            device_id: device_id.clone(),
        });

        Ok(Some((
            event_rx,
            BoardHandle {
                request: request_tx,
                connected,
                device_id,
                _session: session,
            },
        )))
    }
}

/// Handle to a live session.
///
/// Dropping the handle also ends the session: it owns the transport
/// session and the teardown trigger.
pub struct BoardHandle {
    request: watch::Sender<bool>,
    connected: Arc<AtomicBool>,
    device_id: String,
    _session: Box<dyn Session>,
}

impl std::fmt::Debug for BoardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardHandle")
            .field("connected", &self.connected)
            .field("device_id", &self.device_id)
            .finish_non_exhaustive()
    }
}

impl BoardHandle {
    /// Tear down the session: cancel every poll timer and emit a single
    /// `disconnected` event. Calling this more than once is a no-op.
    pub fn disconnect(&self) {
        let _ = self.request.send(true);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Identifier of the device this session is bound to.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

/// Waits for either a transport-side link drop or an explicit disconnect
/// request, then broadcasts shutdown to the sensor workers and emits the
/// session's one `disconnected` event.
async fn supervise(
    mut link_drop: watch::Receiver<bool>,
    mut request: watch::Receiver<bool>,
    shutdown: watch::Sender<bool>,
    events: mpsc::UnboundedSender<BoardEvent>,
    device_id: String,
    connected: Arc<AtomicBool>,
) {
    loop {
        tokio::select! {
            changed = link_drop.changed() => {
                if changed.is_err() || *link_drop.borrow() {
                    break;
                }
            }
            changed = request.changed() => {
                if changed.is_err() || *request.borrow() {
                    break;
                }
            }
        }
    }

    connected.store(false, Ordering::SeqCst);
    let _ = shutdown.send(true);
    debug!(device_id = %device_id, "session torn down");
    let _ = events.send(BoardEvent::Disconnected { device_id });
}

/// Per-sensor streaming state: one history window per field plus the
/// aggregate flags. Owned by exactly one task.
struct SensorWorker {
    descriptor: &'static Descriptor,
    windows: Vec<SampleWindow>,
    mean: bool,
    stddev: bool,
    events: mpsc::UnboundedSender<BoardEvent>,
    shutdown: watch::Receiver<bool>,
}

impl SensorWorker {
    fn new(
        descriptor: &'static Descriptor,
        config: &Config,
        events: mpsc::UnboundedSender<BoardEvent>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let windows = descriptor
            .fields
            .iter()
            .map(|_| SampleWindow::new(config.window_size))
            .collect();
        Self {
            descriptor,
            windows,
            mean: config.mean,
            stddev: config.stddev,
            events,
            shutdown,
        }
    }

    /// Stream a notify-mode sensor until shutdown or the subscription
    /// closes. The channel is kept alive for the lifetime of the stream.
    async fn run_notify(mut self, _channel: Box<dyn Channel>, mut buffers: mpsc::Receiver<Vec<u8>>) {
        debug!(sensor = %self.descriptor.sensor, "notification stream started");
        loop {
            tokio::select! {
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                buffer = buffers.recv() => {
                    match buffer {
                        Some(buffer) => self.handle_buffer(&buffer),
                        None => break,
                    }
                }
            }
        }
        debug!(sensor = %self.descriptor.sensor, "notification stream stopped");
    }

    /// Stream a poll-mode sensor: read the characteristic once per
    /// interval until shutdown. The interval is owned by this task and
    /// released exactly once when the task exits; further shutdown signals
    /// find no timer to release.
    async fn run_poll(mut self, channel: Box<dyn Channel>, period: Duration) {
        let start = tokio::time::Instant::now() + period;
        let mut ticker = tokio::time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!(sensor = %self.descriptor.sensor, ?period, "polling started");
        loop {
            tokio::select! {
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    match channel.read_once().await {
                        Ok(buffer) => self.handle_buffer(&buffer),
                        Err(source) => {
                            warn!(sensor = %self.descriptor.sensor, %source, "poll read failed");
                            let _ = self.events.send(BoardEvent::Error(Error::Transport(source)));
                        }
                    }
                }
            }
        }
        debug!(sensor = %self.descriptor.sensor, "polling stopped");
    }

    /// Process one raw buffer: decode, append to history, then emit the
    /// reading and any enabled aggregates, in that fixed order.
    fn handle_buffer(&mut self, buffer: &[u8]) {
        let sensor = self.descriptor.sensor;

        let values = match decode_fields(buffer, self.descriptor.layout) {
            Ok(values) => values,
            Err(source) => {
                // Malformed sample: report and drop, keep streaming.
                warn!(sensor = %sensor, %source, "dropping malformed buffer");
                let _ = self
                    .events
                    .send(BoardEvent::Error(Error::Decode { sensor, source }));
                return;
            }
        };

        let mut reading = Sample::with_capacity(values.len());
        for ((window, &name), value) in self
            .windows
            .iter_mut()
            .zip(self.descriptor.fields.iter())
            .zip(values)
        {
            window.push(value);
            reading.insert(name, value);
        }
        let _ = self.events.send(BoardEvent::Reading {
            sensor,
            sample: reading,
        });

        if self.mean {
            match self.aggregate(|window| window.mean()) {
                Ok(sample) => {
                    let _ = self.events.send(BoardEvent::Mean { sensor, sample });
                }
                Err(source) => {
                    let _ = self
                        .events
                        .send(BoardEvent::Error(Error::Statistics { sensor, source }));
                }
            }
        }

        if self.stddev {
            match self.aggregate(|window| window.std_dev()) {
                Ok(sample) => {
                    let _ = self.events.send(BoardEvent::StdDev { sensor, sample });
                }
                Err(source) => {
                    let _ = self
                        .events
                        .send(BoardEvent::Error(Error::Statistics { sensor, source }));
                }
            }
        }
    }

    /// Compute one aggregate value per field over the current windows.
    fn aggregate<F>(&self, compute: F) -> Result<Sample, StatsError>
    where
        F: Fn(&SampleWindow) -> Result<f64, StatsError>,
    {
        let mut sample = Sample::with_capacity(self.windows.len());
        for (window, &name) in self.windows.iter().zip(self.descriptor.fields.iter()) {
            sample.insert(name, compute(window)?);
        }
        Ok(sample)
    }
}
