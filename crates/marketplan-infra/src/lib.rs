//! Infrastructure layer for the marketing plan webhook.
//!
//! Contains implementations of the port traits defined in `marketplan-core`:
//! a chat-completion generation client and the content-bridge publisher,
//! both over reqwest. Also loads the service configuration and the
//! environment-held credentials.

pub mod bridge;
pub mod config;
pub mod generation;
pub mod secret;

#[cfg(test)]
pub(crate) mod test_support;
