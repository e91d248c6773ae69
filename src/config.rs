use std::time::Duration;

use url::Url;

use crate::classify::RouteClassifier;
use crate::error::GateError;

/// Shared gate settings used by both config and runtime state.
#[derive(Clone)]
pub(crate) struct GateSettings {
    pub(crate) locales: Vec<String>,
    pub(crate) default_locale: String,
    pub(crate) auth_routes: Vec<String>,
    pub(crate) public_routes: Vec<String>,
    pub(crate) secure_cookies: bool,
    pub(crate) signin_route: String,
    pub(crate) refresh_timeout: Duration,
}

impl GateSettings {
    fn defaults() -> Self {
        Self {
            locales: vec!["en".into(), "id".into()],
            default_locale: "id".into(),
            auth_routes: vec!["/signin".into(), "/signup".into()],
            public_routes: vec!["/".into()],
            secure_cookies: true,
            signin_route: "/signin".into(),
            refresh_timeout: Duration::from_secs(5),
        }
    }

    pub(crate) fn classifier(&self) -> RouteClassifier {
        RouteClassifier::new(
            self.locales.clone(),
            self.default_locale.clone(),
            self.auth_routes.clone(),
            self.public_routes.clone(),
        )
    }
}

/// Gate configuration.
///
/// Required field (`backend_url`) is a constructor parameter — no runtime
/// "missing field" errors.
///
/// Use [`from_env()`](GateConfig::from_env) for convention-based setup, or
/// [`new()`](GateConfig::new) with `with_*` methods for full control.
pub struct GateConfig {
    pub(crate) backend_url: Url,
    pub(crate) settings: GateSettings,
}

impl GateConfig {
    /// Create config with the required backend base URL.
    ///
    /// All optional fields use sensible defaults. Override with `with_*`
    /// methods.
    #[must_use]
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            settings: GateSettings::defaults(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `BACKEND_URL`: base URL of the backend API (refresh target)
    ///
    /// # Optional env vars
    /// - `APP_ENV`: `"production"` enables the `Secure` cookie flag
    /// - `LOCALES`: comma-separated supported locales (default `en,id`)
    /// - `DEFAULT_LOCALE`: fallback locale (default `id`)
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Config`] if `BACKEND_URL` is missing or invalid.
    pub fn from_env() -> Result<Self, GateError> {
        let backend_url_str = std::env::var("BACKEND_URL")
            .map_err(|_| GateError::Config("BACKEND_URL is required".into()))?;
        let backend_url: Url = backend_url_str
            .parse()
            .map_err(|e| GateError::Config(format!("BACKEND_URL: {e}")))?;

        let production = matches!(std::env::var("APP_ENV").as_deref(), Ok("production"));

        let mut config = Self::new(backend_url).with_secure_cookies(production);

        if let Ok(locales) = std::env::var("LOCALES") {
            config = config
                .with_locales(locales.split(',').map(|l| l.trim().to_string()).collect());
        }
        if let Ok(default_locale) = std::env::var("DEFAULT_LOCALE") {
            config = config.with_default_locale(default_locale);
        }

        Ok(config)
    }

    /// Supported locale prefixes (first path segment).
    #[must_use]
    pub fn with_locales(mut self, locales: Vec<String>) -> Self {
        self.settings.locales = locales;
        self
    }

    /// Locale assumed for paths with no recognized prefix.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.settings.default_locale = locale.into();
        self
    }

    /// Locale-stripped templates for sign-in/sign-up forms.
    #[must_use]
    pub fn with_auth_routes(mut self, routes: Vec<String>) -> Self {
        self.settings.auth_routes = routes;
        self
    }

    /// Locale-stripped templates for routes that never gate.
    #[must_use]
    pub fn with_public_routes(mut self, routes: Vec<String>) -> Self {
        self.settings.public_routes = routes;
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    /// Locale-stripped path of the sign-in form, used as the redirect target.
    #[must_use]
    pub fn with_signin_route(mut self, route: impl Into<String>) -> Self {
        self.settings.signin_route = route.into();
        self
    }

    /// Upper bound on the refresh call; the gate must not hold request
    /// latency hostage to a slow backend.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.settings.refresh_timeout = timeout;
        self
    }

    /// Refresh endpoint derived from the backend base URL.
    pub(crate) fn refresh_url(&self) -> Result<Url, GateError> {
        let base = self.backend_url.as_str().trim_end_matches('/');
        format!("{base}/auth/refresh")
            .parse()
            .map_err(|e| GateError::Config(format!("refresh endpoint: {e}")))
    }
}
