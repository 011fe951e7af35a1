//! Environment-held credentials.
//!
//! Secrets are read once at startup and handed to the clients at
//! construction time; nothing reads the environment on the request path.
//!
//! Key resolution:
//! - `OPENAI_API_KEY` -- bearer credential for the generation provider
//! - `GIBLINK_BRIDGE_SECRET_KEY` -- shared secret for the content bridge
//!
//! Empty values and values that are not valid Unicode count as absent.

use secrecy::SecretString;

/// Environment variable holding the generation provider API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable holding the bridge shared secret.
pub const BRIDGE_SECRET_KEY: &str = "GIBLINK_BRIDGE_SECRET_KEY";

/// Secrets needed by the outbound clients.
///
/// Does NOT derive Debug; the values are only exposed when building request
/// headers.
#[derive(Default)]
pub struct Credentials {
    pub openai_api_key: Option<SecretString>,
    pub bridge_secret: Option<SecretString>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from)
        };

        Self {
            openai_api_key: secret(OPENAI_API_KEY),
            bridge_secret: secret(BRIDGE_SECRET_KEY),
        }
    }
}
