//! World and group contexts.
//!
//! A world belongs to zero, one, or several groups. Each group shares a
//! configured set of categories between its member worlds.

pub mod group;
pub mod world;

pub use group::{GroupMembership, GroupRegistry, WorldGroup, DEFAULT_GROUP};
pub use world::{WorldContext, WorldRegistry};
