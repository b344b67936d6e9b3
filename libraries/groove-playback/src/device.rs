//! Platform-agnostic playback device trait
//!
//! Abstracts the vendor playback SDK (a browser player, a native Connect
//! device, a test fake) behind the calls the bridge needs.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::events::DeviceEventSender;

/// Callback the device uses to fetch a fresh credential
pub type TokenSupplier = Arc<dyn Fn() -> String + Send + Sync>;

/// Device construction parameters
#[derive(Clone)]
pub struct DeviceOptions {
    /// Name shown in device pickers
    pub name: String,

    /// Initial volume, 0.0-1.0
    pub volume: f32,

    /// Credential callback, called whenever the device needs a token
    pub token_supplier: TokenSupplier,
}

impl fmt::Debug for DeviceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceOptions")
            .field("name", &self.name)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}

/// Remote playback device
///
/// Implementors push notifications through the `DeviceEventSender` they were
/// built with; the methods below are the direct device calls.
#[async_trait]
pub trait PlaybackDevice: Send {
    /// Connect to the playback service
    ///
    /// # Returns
    /// * `Ok(true)` - Connection accepted; readiness follows as an event
    /// * `Ok(false)` - Connection refused
    /// * `Err(_)` - Connection failed
    async fn connect(&mut self) -> Result<bool>;

    /// Release the connection; no events are emitted afterwards
    async fn disconnect(&mut self);

    /// Resume the paused item
    async fn resume(&mut self) -> Result<()>;

    /// Skip to the next item
    async fn next_track(&mut self) -> Result<()>;

    /// Skip to the previous item
    async fn previous_track(&mut self) -> Result<()>;

    /// Seek within the current item
    async fn seek(&mut self, position_ms: u64) -> Result<()>;

    /// Set device volume, 0.0-1.0
    async fn set_volume(&mut self, level: f32) -> Result<()>;
}

/// Builds devices for the bridge
///
/// The bridge owns device lifetime: it builds one on `initialize` and drops it
/// on teardown.
pub trait DeviceFactory: Send + Sync {
    /// Build a device that reports through `events`
    fn create(&self, options: DeviceOptions, events: DeviceEventSender) -> Box<dyn PlaybackDevice>;
}

impl<F> DeviceFactory for F
where
    F: Fn(DeviceOptions, DeviceEventSender) -> Box<dyn PlaybackDevice> + Send + Sync,
{
    fn create(&self, options: DeviceOptions, events: DeviceEventSender) -> Box<dyn PlaybackDevice> {
        self(options, events)
    }
}
