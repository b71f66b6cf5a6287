//! hwstatus Core
//!
//! Core types and abstractions for the homework status notifier.
//!
//! This crate contains:
//! - Domain types: homework records, review statuses and their verdicts
//! - DTOs: the status API envelope and the chat message payloads
//!
//! Nothing here performs I/O; the client and bot crates feed raw JSON in.

pub mod domain;
pub mod dto;
pub mod error;

pub use error::SchemaError;
