//! Groove Playback
//!
//! Player-side state for Groove: the bridge to a remote playback device, the
//! local queue/selection store, and the reconciled view model the player bar
//! renders.
//!
//! This crate provides:
//! - `PlaybackBridge`: device lifecycle, readiness, command relay, error slot
//! - `QueueStore`: local selection, queue and play flag
//! - `reconcile`: one provenance (remote, local or empty) for the player bar
//! - `PlayerController`: user intents routed to the bridge or the store
//! - Track-list rows and screen routing for page views
//!
//! # Architecture
//!
//! Nothing here speaks HTTP or touches a vendor SDK directly. The device is a
//! `PlaybackDevice` built by a `DeviceFactory`; play/pause requests go through
//! `groove_core::Transport`. Both are supplied by the host.
//!
//! # Example: Local selection
//!
//! ```rust
//! use groove_core::Track;
//! use groove_playback::{reconcile, PlayerDisplay, QueueStore, VolumeControl};
//!
//! let mut store = QueueStore::new();
//! store.select_track(Track::from_label("t1", "Song", "Artist", "Album", "3:45"));
//!
//! // No device: the local selection is shown, starting at 0:00
//! let provenance = reconcile(None, false, &store);
//! let display = PlayerDisplay::build(&provenance, &VolumeControl::default(), false).unwrap();
//!
//! assert_eq!(display.title, "Song");
//! assert_eq!(display.elapsed, "0:00");
//! assert_eq!(display.total, "3:45");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bridge;
pub mod controller;
pub mod device;
pub mod display;
mod error;
pub mod events;
mod queue;
pub mod state;
pub mod types;
pub mod views;
mod volume;

// Public exports
pub use bridge::{PlaybackBridge, RemoteSnapshot};
pub use controller::{plan_toggle, seek_position_ms, PlayerController, ToggleAction};
pub use device::{DeviceFactory, DeviceOptions, PlaybackDevice, TokenSupplier};
pub use display::{PlayerDisplay, Source};
pub use error::{PlaybackError, Result};
pub use events::{DeviceEvent, DeviceEventSender, DeviceState};
pub use queue::QueueStore;
pub use state::{reconcile, LocalState, PlaybackState, Provenance, RemoteState};
pub use types::{BridgeConfig, Direction};
pub use views::{play_collection, track_rows, Screen, TrackRow};
pub use volume::VolumeControl;
