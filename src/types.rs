use serde::Deserialize;

/// Bearer credentials read from the request's cookies.
///
/// Both tokens are opaque strings issued by the backend. The gate never
/// parses or validates their contents; presence is the only signal it
/// acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Short-lived bearer credential sent to the backend API.
    pub access_token: Option<String>,
    /// Longer-lived credential exchanged once for a new token pair.
    pub refresh_token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }

    #[must_use]
    pub fn has_access(&self) -> bool {
        self.access_token.is_some()
    }

    #[must_use]
    pub fn has_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}

/// Fresh token pair from a successful refresh.
///
/// Deserializes directly from the refresh endpoint's success body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
