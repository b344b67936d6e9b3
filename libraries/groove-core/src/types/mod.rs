//! Domain types

mod collection;
mod track;
mod user;

pub use collection::{Collection, CollectionKind};
pub use track::Track;
pub use user::{Image, UserProfile};
