//! Groove CLI Library
//!
//! Terminal front end for the Groove backend: sign in, search, and drive one
//! of the account's playback devices.
//!
//! This library exposes the components used by the `groove` binary for testing.

pub mod config;
pub mod device;
pub mod render;

pub use self::config::{ConfigError, GrooveConfig};
pub use self::device::AccountDevice;
