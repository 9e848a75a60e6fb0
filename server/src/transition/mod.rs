//! World transitions.
//!
//! A player moving between worlds saves state to the source side and loads
//! state from the destination side. [`TransitionResolver`] decides which
//! categories go where; [`ShareService`] validates, resolves and applies.

pub mod outcome;
pub mod request;
pub mod resolver;
pub mod service;

pub use outcome::{ProfileTouch, TransitionOutcome};
pub use request::{Cause, TransitionRequest};
pub use resolver::TransitionResolver;
pub use service::{HandlingListener, ShareService};
