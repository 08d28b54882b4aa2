use tracing::debug;
use url::Url;

/// A raw URL coerced into a scheme-qualified, parseable form.
///
/// The full URL string keeps the caller's original spelling (plus the
/// prepended scheme when one was missing); hostname and path come from
/// standard URI parsing. A parse failure yields empty hostname and path
/// rather than an error, so downstream feature extraction stays total.
#[derive(Debug, Clone)]
pub struct NormalizedUrl {
    url: String,
    hostname: String,
    path: String,
}

impl NormalizedUrl {
    pub fn new(raw: &str) -> Self {
        let url = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        };

        let (hostname, path) = match Url::parse(&url) {
            Ok(parsed) => (
                parsed.host_str().unwrap_or("").to_string(),
                parsed.path().to_string(),
            ),
            Err(e) => {
                debug!("URL failed to parse, treating as hostless: {} ({})", url, e);
                (String::new(), String::new())
            }
        };

        Self {
            url,
            hostname,
            path,
        }
    }

    /// Full scheme-qualified URL string
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hostname component, empty if the URL did not parse
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Path component, empty if the URL did not parse
    pub fn path(&self) -> &str {
        &self.path
    }
}
