//! Transport-facing adapters: event wire types, the dispatcher, the
//! localized reply catalog, and the webhook router.

pub mod catalog;
pub mod dispatch;
pub mod events;
pub mod metrics;
pub mod outbox;
pub mod router;

pub use dispatch::Dispatcher;
pub use events::{ChatEvent, EventAttachment, Reply};
pub use metrics::Metrics;
pub use router::{router, AppState};
