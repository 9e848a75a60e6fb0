//! Worldshare Server
//!
//! Decides which parts of a player's state follow them between worlds.
//! Worlds are organized into groups that share selected categories of
//! player state; everything a group does not share stays with the world.

pub mod bypass;
pub mod config;
pub mod context;
pub mod error;
pub mod player;
pub mod profile;
pub mod share;
pub mod transition;
