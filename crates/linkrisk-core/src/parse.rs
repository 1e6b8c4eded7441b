use url::{form_urlencoded, Url};

/// Raised when input cannot be parsed as a URL.
///
/// This is an expected outcome, not a fault: the engine turns it into a
/// maximal-risk result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse '{input}' as a URL")]
pub struct ParseFailure {
    pub input: String,
    #[source]
    pub source: url::ParseError,
}

/// A URL broken into the components the detectors inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredUrl {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: Vec<(String, String)>,
}

impl StructuredUrl {
    /// Parse a raw string with the WHATWG URL algorithm.
    ///
    /// The host is lowercased. Special schemes also get IDNA applied by the
    /// parser, so internationalized hosts surface as `xn--` labels. IPv6
    /// literals keep their brackets. A port equal to the scheme default is
    /// reported as absent.
    pub fn parse(raw: &str) -> Result<Self, ParseFailure> {
        let parsed = Url::parse(raw).map_err(|source| ParseFailure {
            input: raw.to_string(),
            source,
        })?;
        Ok(Self::from_url(&parsed))
    }

    fn from_url(parsed: &Url) -> Self {
        Self {
            scheme: parsed.scheme().to_string(),
            host: parsed.host_str().unwrap_or_default().to_lowercase(),
            port: parsed.port(),
            path: parsed.path().to_string(),
            query: parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit, non-default port. `Some(0)` is a real port, not absence.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query pairs in order of occurrence, duplicates kept.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Non-empty dot-separated host labels.
    pub fn host_labels(&self) -> Vec<&str> {
        self.host.split('.').filter(|l| !l.is_empty()).collect()
    }

    /// Query re-serialized as `application/x-www-form-urlencoded`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}
