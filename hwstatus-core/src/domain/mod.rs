//! Core domain types
//!
//! The homework record as reported by the review service, and the closed set
//! of review statuses the notifier knows how to phrase.

pub mod homework;
