use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::config::{GateConfig, GateSettings};
use crate::cookies;
use crate::error::GateError;
use crate::gate::{GateOutcome, SessionGate};
use crate::refresh::{HttpRefresher, Refresher};

/// Locale resolved by the gate, inserted into request extensions for the
/// downstream locale router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

/// Shared state for the gate middleware.
pub struct GateState<R = HttpRefresher> {
    pub(crate) gate: Arc<SessionGate<R>>,
    pub(crate) settings: GateSettings,
}

// Manual Clone: avoid derive adding an `R: Clone` bound.
impl<R> Clone for GateState<R> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl GateState<HttpRefresher> {
    /// Build production state: the gate backed by the HTTP refresher.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Config`] if the refresh endpoint URL cannot be
    /// derived from the configured backend URL.
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        let refresher =
            HttpRefresher::new(config.refresh_url()?, config.settings.refresh_timeout);
        Ok(Self::with_refresher(config, refresher))
    }
}

impl<R: Refresher> GateState<R> {
    /// Build state with an injected refresher (tests, custom transports).
    #[must_use]
    pub fn with_refresher(config: GateConfig, refresher: R) -> Self {
        let classifier = config.settings.classifier();
        Self {
            gate: Arc::new(SessionGate::new(classifier, refresher)),
            settings: config.settings,
        }
    }
}

/// The gate middleware.
///
/// Classifies the path, resolves the outcome, applies cookie side effects,
/// and either forwards to the downstream locale router (`next`) or
/// short-circuits with a redirect. Stateless across requests; if the client
/// aborts, dropping this future aborts any in-flight refresh call.
///
/// Attach with `axum::middleware::from_fn_with_state(state, gate_request::<HttpRefresher>)`.
pub async fn gate_request<R: Refresher>(
    State(state): State<GateState<R>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let session = cookies::session_from_jar(&jar);
    let outcome = state.gate.resolve(&path, &session).await;

    match outcome {
        GateOutcome::Continue { locale } => {
            request.extensions_mut().insert(ResolvedLocale(locale));
            next.run(request).await
        }
        GateOutcome::ContinueWithNewSession { locale, tokens } => {
            tracing::debug!(path = %path, "session refreshed");
            let (access, refresh) =
                cookies::session_cookies(&tokens, state.settings.secure_cookies);
            request.extensions_mut().insert(ResolvedLocale(locale));
            let response = next.run(request).await;
            (jar.add(access).add(refresh), response).into_response()
        }
        GateOutcome::RedirectToSignin { locale, callback } => {
            let target = signin_url(&locale, &state.settings.signin_route, &callback);
            let (clear_access, clear_refresh) = cookies::clear_session_cookies();
            (
                jar.add(clear_access).add(clear_refresh),
                Redirect::to(&target),
            )
                .into_response()
        }
        GateOutcome::RedirectHome { locale } => Redirect::to(&format!("/{locale}")).into_response(),
    }
}

fn signin_url(locale: &str, signin_route: &str, callback: &str) -> String {
    let encoded = urlencoding::encode(callback);
    format!("/{locale}{signin_route}?callbackUrl={encoded}")
}
