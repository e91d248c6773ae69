/// Locale-aware route classifier.
///
/// Holds the static routing configuration: the supported locale list, the
/// default locale, and the auth/public route templates. Classification is a
/// pure function of the request path.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    locales: Vec<String>,
    default_locale: String,
    auth_routes: Vec<String>,
    public_routes: Vec<String>,
}

/// Classification of one request path.
///
/// Borrows the locale from the classifier and the stripped path from the
/// request, so classifying allocates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteClassification<'a> {
    /// Active locale; the configured default when the path carries no
    /// recognized prefix.
    pub locale: &'a str,
    /// Path with any supported locale prefix stripped. Never empty — a bare
    /// `/{locale}` classifies as `/`.
    pub rest: &'a str,
    /// Path is a sign-in/sign-up form.
    pub is_auth_route: bool,
    /// Path never gates, regardless of token state.
    pub is_public_route: bool,
}

impl RouteClassifier {
    #[must_use]
    pub fn new(
        locales: Vec<String>,
        default_locale: String,
        auth_routes: Vec<String>,
        public_routes: Vec<String>,
    ) -> Self {
        Self {
            locales,
            default_locale,
            auth_routes,
            public_routes,
        }
    }

    /// Classify a request path.
    ///
    /// An unrecognized locale prefix does not error here; the path is treated
    /// as locale-less and left for the downstream locale router to reject.
    #[must_use]
    pub fn classify<'a>(&'a self, path: &'a str) -> RouteClassification<'a> {
        let (locale, rest) = self.split_locale(path);
        RouteClassification {
            locale,
            rest,
            is_auth_route: matches_any(&self.auth_routes, rest),
            is_public_route: matches_any(&self.public_routes, rest),
        }
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Split `/{locale}/rest` into `(locale, /rest)` when the first segment
    /// is a supported locale (case-insensitive); otherwise assume the default
    /// locale and keep the path intact.
    fn split_locale<'a>(&'a self, path: &'a str) -> (&'a str, &'a str) {
        let Some(tail) = path.strip_prefix('/') else {
            return (self.default_locale.as_str(), "/");
        };
        let seg_end = tail.find('/').unwrap_or(tail.len());
        let segment = &tail[..seg_end];
        if let Some(locale) = self
            .locales
            .iter()
            .find(|l| l.eq_ignore_ascii_case(segment))
        {
            let rest = &tail[seg_end..];
            return (locale.as_str(), if rest.is_empty() { "/" } else { rest });
        }
        (self.default_locale.as_str(), path)
    }
}

fn matches_any(templates: &[String], rest: &str) -> bool {
    templates.iter().any(|t| matches_template(t, rest))
}

/// `rest` matches a template when it equals it case-insensitively or extends
/// it with a `/`-separated suffix.
fn matches_template(template: &str, rest: &str) -> bool {
    let Some(head) = rest.get(..template.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(template)
        && matches!(rest.as_bytes().get(template.len()), None | Some(b'/'))
}
