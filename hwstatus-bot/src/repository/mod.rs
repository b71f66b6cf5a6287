//! Repository layer
//!
//! Repositories are the seams between the poller and the two upstream APIs.
//! They are trait-based so the poller can be driven by fakes in tests.

mod homeworks;
mod notifications;

// Re-export traits
pub use homeworks::HomeworkSource;
pub use notifications::{NotifyError, Notifier};

// Re-export implementations
pub use notifications::TelegramNotifier;
