//! Groove Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for Groove.
//!
//! This crate provides the building blocks shared by the playback layer and the
//! backend client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Collection`, `UserProfile`
//! - **Collaborator Traits**: `Transport` (play/pause relay), `TokenStore` (token persistence)
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use groove_core::{Track, time::format_time};
//!
//! let track = Track::new("t1", "Blinding Lights", "The Weeknd", "After Hours", 200_040)
//!     .with_source_uri("spotify:track:0VjIjW4GlUZAMYd2vXMi3b");
//!
//! assert_eq!(format_time(track.duration_ms()), "3:20");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{PlayRequest, TokenStore, Transport, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use types::{Collection, CollectionKind, Image, Track, UserProfile};
