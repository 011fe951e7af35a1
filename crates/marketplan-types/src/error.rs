use thiserror::Error;

/// Errors from the text-generation provider call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("generation provider credential is not configured")]
    MissingCredential,

    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation request timed out")]
    Timeout,

    #[error("generation provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected generation response shape: {0}")]
    MalformedResponse(String),
}

/// Errors from the content-bridge publish call.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("bridge URL is not configured")]
    MissingUrl,

    #[error("bridge secret is not configured")]
    MissingSecret,

    #[error("bridge request failed: {0}")]
    Transport(String),

    #[error("bridge request timed out")]
    Timeout,

    #[error("bridge returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Configuration problems detected before any request is served.
///
/// These never abort the process. They are logged and reported through the
/// readiness endpoint instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupError {
    #[error("required setting '{0}' is missing")]
    MissingSetting(&'static str),

    #[error("setting '{name}' is invalid: {message}")]
    InvalidSetting { name: &'static str, message: String },

    #[error("config file '{path}' could not be loaded: {message}")]
    ConfigFile { path: String, message: String },
}

/// Errors from validating an inbound form body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form body must be a JSON object")]
    NotAnObject,

    #[error("field '{field}' has an unsupported value shape")]
    UnsupportedValue { field: String },
}
