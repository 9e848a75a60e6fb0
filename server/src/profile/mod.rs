//! Stored player profiles.
//!
//! Every world and every group keeps one profile per player. Capturing copies
//! live state into a profile; loading copies it back onto the player.

pub mod models;
pub mod sharing;
pub mod store;

pub use models::{ContainerKey, PlayerProfile};
pub use sharing::{capture_categories, load_categories};
pub use store::{InMemoryProfileStore, ProfileStore};
