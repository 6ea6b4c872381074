//! REST client for the UTE Zone platform API.
//!
//! Every endpoint speaks the uniform `{result, data, message}` envelope;
//! API-level failures (`result: false`) are returned to the caller for
//! toasting, never raised as errors. Only transport and decoding problems
//! surface as [`ClientError`].

pub mod auth;
pub mod chatbot;
pub mod entities;
pub mod error;
pub mod http;
pub mod models;
pub mod moderation;
pub mod notifications;

pub use error::ClientError;
pub use http::{ApiClient, Envelope, GENERIC_FAILURE_MESSAGE};
