//! Share categories and their set algebra.
//!
//! - Built-in categories: fixed bitflags with stable config names
//! - Custom categories: registered at runtime with a capture/apply handler
//! - Share sets: what a world or group shares, and what a transition moves

pub mod builtin;
pub mod category;
pub mod configured;
pub mod registry;
pub mod set;

pub use builtin::Sharables;
pub use category::ShareCategory;
pub use configured::{is_all_keyword, ConfiguredShares, ALL_KEYWORDS};
pub use registry::{CategoryHandler, CategoryRegistry};
pub use set::ShareSet;
