//! Resource guard: the first stage of every pipeline call.
//!
//! [`check`] rejects inputs that could exhaust the parser or the rewrite
//! engine and returns a sanitized [`SafeInput`]. [`Deadline`] carries the
//! wall-clock budget started here through the remaining stages.

pub mod config;
pub mod deadline;
pub mod error;
pub mod guard;
pub mod sanitize;
pub mod scan;

pub use config::GuardConfig;
pub use deadline::{Deadline, DeadlineExceeded, DEFAULT_BUDGET};
pub use error::{BombReason, SecurityViolation};
pub use guard::{check, SafeInput};
pub use scan::InputProfile;
