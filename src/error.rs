/// Gate construction errors.
///
/// Runtime refresh failures never surface here: they collapse into the
/// fail-closed sign-in redirect (see
/// [`RefreshResult`](crate::refresh::RefreshResult)), so the only fallible
/// surface is configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GateError {
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}
