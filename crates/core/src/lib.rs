//! Domain and state logic for the UTE Zone admin console.
//!
//! Everything in this crate is pure: no HTTP, no timers, no terminal.
//! The `utezone-client` crate talks to the REST API and the
//! `utezone-console` crate wires both together with the async runtime.

pub mod carousel;
pub mod chatbot;
pub mod entities;
pub mod error;
pub mod moderation;
pub mod notifications;
pub mod pagination;
pub mod types;
