use crate::classify::RouteClassifier;
use crate::refresh::{Refresher, RefreshResult};
use crate::types::{Session, TokenPair};

/// Terminal decision for one request.
///
/// Exactly one variant is produced per request; there are no other states
/// and no loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Hand the request to the locale router unchanged.
    Continue { locale: String },
    /// Hand the request on, with a fresh token pair to set as cookies on the
    /// response.
    ContinueWithNewSession { locale: String, tokens: TokenPair },
    /// Send the user to sign-in; `callback` is the originally requested path
    /// with the locale prefix stripped, so the UI can return them after
    /// manual sign-in. Both token cookies are cleared.
    RedirectToSignin { locale: String, callback: String },
    /// An already-authenticated user hit a sign-in/sign-up form; send them to
    /// the locale root instead.
    RedirectHome { locale: String },
}

/// The request-gating decision engine.
///
/// Stateless across requests: each call computes a fresh transition from
/// `(classification, session)`. The only suspend point is the single refresh
/// call in the final guard.
pub struct SessionGate<R> {
    classifier: RouteClassifier,
    refresher: R,
}

impl<R: Refresher> SessionGate<R> {
    #[must_use]
    pub fn new(classifier: RouteClassifier, refresher: R) -> Self {
        Self {
            classifier,
            refresher,
        }
    }

    #[must_use]
    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    /// Decide the fate of one request.
    ///
    /// Guards are evaluated in order; the first match wins:
    /// 1. access token on an auth route → home
    /// 2. public route → continue, regardless of token state
    /// 3. no credentials at all → sign-in, no network call
    /// 4. access token present → continue (validity is the backend's concern)
    /// 5. refresh token only → one refresh attempt; failure falls closed to
    ///    sign-in
    pub async fn resolve(&self, path: &str, session: &Session) -> GateOutcome {
        let route = self.classifier.classify(path);

        if session.has_access() && route.is_auth_route {
            return GateOutcome::RedirectHome {
                locale: route.locale.to_owned(),
            };
        }

        if route.is_public_route {
            return GateOutcome::Continue {
                locale: route.locale.to_owned(),
            };
        }

        match (&session.access_token, &session.refresh_token) {
            (Some(_), _) => GateOutcome::Continue {
                locale: route.locale.to_owned(),
            },
            (None, None) => GateOutcome::RedirectToSignin {
                locale: route.locale.to_owned(),
                callback: route.rest.to_owned(),
            },
            (None, Some(refresh_token)) => match self.refresher.refresh(refresh_token).await {
                RefreshResult::Success(tokens) => GateOutcome::ContinueWithNewSession {
                    locale: route.locale.to_owned(),
                    tokens,
                },
                RefreshResult::Failure => GateOutcome::RedirectToSignin {
                    locale: route.locale.to_owned(),
                    callback: route.rest.to_owned(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Scripted refresher that counts calls.
    struct MockRefresher {
        result: RefreshResult,
        calls: AtomicUsize,
    }

    impl MockRefresher {
        fn succeeding() -> Self {
            Self {
                result: RefreshResult::Success(TokenPair {
                    access: "a2".into(),
                    refresh: "r2".into(),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: RefreshResult::Failure,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Refresher for MockRefresher {
        async fn refresh(&self, _refresh_token: &str) -> RefreshResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn gate(refresher: MockRefresher) -> SessionGate<MockRefresher> {
        let classifier = RouteClassifier::new(
            vec!["en".into(), "id".into()],
            "id".into(),
            vec!["/signin".into(), "/signup".into()],
            vec!["/".into(), "/about".into()],
        );
        SessionGate::new(classifier, refresher)
    }

    fn with_access() -> Session {
        Session::new(Some("a1".into()), None)
    }

    fn with_refresh_only() -> Session {
        Session::new(None, Some("r1".into()))
    }

    #[tokio::test]
    async fn authenticated_user_on_auth_route_goes_home() {
        let gate = gate(MockRefresher::failing());
        for path in ["/en/signin", "/id/signup", "/signin"] {
            let outcome = gate.resolve(path, &with_access()).await;
            let locale = if path.starts_with("/en") { "en" } else { "id" };
            assert_eq!(
                outcome,
                GateOutcome::RedirectHome {
                    locale: locale.into()
                },
                "path {path}"
            );
        }
    }

    #[tokio::test]
    async fn public_route_continues_regardless_of_tokens() {
        let gate = gate(MockRefresher::failing());
        for session in [Session::default(), with_access(), with_refresh_only()] {
            let outcome = gate.resolve("/en/about", &session).await;
            assert_eq!(outcome, GateOutcome::Continue { locale: "en".into() });
        }
        // Even a refresh-only session must not trigger a refresh on a public
        // route.
        assert_eq!(gate.refresher.calls(), 0);
    }

    #[tokio::test]
    async fn no_credentials_redirects_without_network_call() {
        let gate = gate(MockRefresher::succeeding());
        let outcome = gate.resolve("/en/items/42", &Session::default()).await;
        assert_eq!(
            outcome,
            GateOutcome::RedirectToSignin {
                locale: "en".into(),
                callback: "/items/42".into(),
            }
        );
        assert_eq!(gate.refresher.calls(), 0);
    }

    #[tokio::test]
    async fn access_token_is_trusted_on_protected_routes() {
        let gate = gate(MockRefresher::failing());
        let outcome = gate.resolve("/en/items", &with_access()).await;
        assert_eq!(outcome, GateOutcome::Continue { locale: "en".into() });
        assert_eq!(gate.refresher.calls(), 0);
    }

    #[tokio::test]
    async fn refresh_success_continues_with_new_tokens() {
        let gate = gate(MockRefresher::succeeding());
        let outcome = gate.resolve("/en/items", &with_refresh_only()).await;
        assert_eq!(
            outcome,
            GateOutcome::ContinueWithNewSession {
                locale: "en".into(),
                tokens: TokenPair {
                    access: "a2".into(),
                    refresh: "r2".into(),
                },
            }
        );
        assert_eq!(gate.refresher.calls(), 1);
    }

    #[tokio::test]
    async fn refresh_failure_falls_closed_to_signin() {
        let gate = gate(MockRefresher::failing());
        let outcome = gate.resolve("/en/items", &with_refresh_only()).await;
        assert_eq!(
            outcome,
            GateOutcome::RedirectToSignin {
                locale: "en".into(),
                callback: "/items".into(),
            }
        );
        assert_eq!(gate.refresher.calls(), 1);
    }

    #[tokio::test]
    async fn callback_is_locale_stripped_path() {
        let gate = gate(MockRefresher::failing());
        for (path, callback) in [
            ("/dashboard", "/dashboard"),
            ("/id/dashboard", "/dashboard"),
            ("/en/items/42", "/items/42"),
        ] {
            let outcome = gate.resolve(path, &Session::default()).await;
            match outcome {
                GateOutcome::RedirectToSignin { callback: c, .. } => {
                    assert_eq!(c, callback, "path {path}");
                }
                other => panic!("expected sign-in redirect, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn default_locale_applies_on_locale_less_paths() {
        let gate = gate(MockRefresher::failing());
        let outcome = gate.resolve("/dashboard", &with_access()).await;
        assert_eq!(outcome, GateOutcome::Continue { locale: "id".into() });
    }
}
