//! Scheduler layer for the bot
//!
//! This layer drives the fetch, validate, notify, sleep cycle and owns the
//! poll cursor between cycles.

pub mod poller;

pub use poller::StatusPoller;
