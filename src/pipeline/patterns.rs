use once_cell::sync::Lazy;
use regex::Regex;

/// Maximal alphanumeric/underscore runs ("words") in a URL
pub static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Hostname begins with a dotted IPv4-looking literal. Octets are not
/// range-checked and trailing labels are allowed, so "1.2.3.4.evil.com"
/// matches too.
pub static IPV4_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+").unwrap());
