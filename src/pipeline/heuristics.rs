use tracing::{debug, instrument};

use crate::pipeline::normalizer::NormalizedUrl;
use crate::pipeline::patterns::IPV4_PREFIX_REGEX;
use crate::pipeline::ClassificationResult;

/// Maximum number of dot-separated hostname labels before the nesting is
/// treated as suspicious
const MAX_HOSTNAME_LABELS: usize = 4;

/// Allow-list and keyword list driving the rule-based fallback.
///
/// These are business rules, not derived thresholds; they are injected so
/// deployments can tune them without touching the engine logic.
#[derive(Debug, Clone)]
pub struct HeuristicConfig {
    /// Well-known domains matched exactly or as a parent of the hostname
    pub safe_domains: Vec<String>,

    /// Case-insensitive substrings that mark a URL as suspicious
    pub suspicious_keywords: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            safe_domains: [
                "google.com",
                "microsoft.com",
                "apple.com",
                "amazon.com",
                "facebook.com",
                "twitter.com",
                "instagram.com",
                "linkedin.com",
                "youtube.com",
                "github.com",
                "stackoverflow.com",
                "wikipedia.org",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            suspicious_keywords: [
                "free", "win", "lucky", "prize", "money", "loan", "password", "login", "bank",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Rule-based URL classifier used when no trained model is loaded.
///
/// Deterministic for a fixed config: the same URL always gets the same
/// verdict, with confidence drawn from {0.5, 0.7, 0.8}.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine {
    config: HeuristicConfig,
}

impl HeuristicEngine {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    /// Applies the decision table to a normalized URL.
    ///
    /// Precedence: allow-listed and keyword-free wins, then any suspicious
    /// signal, then the unverifiable default. Never fails.
    #[instrument(skip(self, normalized), fields(url = %normalized.url()))]
    pub fn evaluate(&self, normalized: &NormalizedUrl) -> ClassificationResult {
        let url_lower = normalized.url().to_lowercase();
        let hostname = normalized.hostname();

        let is_allow_listed = self.config.safe_domains.iter().any(|domain| {
            hostname == domain.as_str() || hostname.ends_with(&format!(".{}", domain))
        });

        let has_suspicious_keyword = self
            .config
            .suspicious_keywords
            .iter()
            .any(|keyword| url_lower.contains(keyword.as_str()));

        let has_ip_host = IPV4_PREFIX_REGEX.is_match(hostname);
        let label_count = if hostname.is_empty() {
            0
        } else {
            hostname.split('.').count()
        };

        debug!(
            allow_listed = is_allow_listed,
            suspicious_keyword = has_suspicious_keyword,
            ip_host = has_ip_host,
            label_count,
            "Heuristic signals computed"
        );

        let (is_safe, confidence, details) = if is_allow_listed && !has_suspicious_keyword {
            (
                true,
                0.8,
                "This appears to be a commonly trusted website (fallback check).",
            )
        } else if has_ip_host || label_count > MAX_HOSTNAME_LABELS || has_suspicious_keyword {
            (
                false,
                0.7,
                "This URL has suspicious characteristics. Proceed with caution (fallback check).",
            )
        } else {
            (
                false,
                0.5,
                "Could not verify safety with full model. Proceed with caution (fallback check).",
            )
        };

        ClassificationResult {
            url: normalized.url().to_string(),
            is_safe,
            confidence,
            details: details.to_string(),
        }
    }
}
