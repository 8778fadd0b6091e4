//! Orchestration services for the hotline intake engine.
//!
//! Leaves first: the content filter and rate limiter gate submissions,
//! the ticketing module formats numbers over the sequencer port, and the
//! intake workflow and status machine tie everything together behind the
//! domain ports.

pub mod content_filter;
pub mod intake;
pub mod locks;
pub mod moderation;
pub mod rate_limiter;
pub mod status;
pub mod ticketing;

pub use content_filter::Verdict;
pub use intake::{IncomingAttachment, IntakeWorkflow, Submission, SubmitOutcome};
pub use moderation::ModerationNotifier;
pub use rate_limiter::{Gate, RateLimiter, DEFAULT_COOLDOWN};
pub use status::StatusMachine;
