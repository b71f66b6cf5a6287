//! Data Transfer Objects
//!
//! Wire shapes of the two upstream APIs: the homework status envelope
//! returned by the review service and the message payloads exchanged with
//! the chat bot API.

pub mod envelope;
pub mod message;
