use crate::pipeline::normalizer::NormalizedUrl;
use crate::pipeline::patterns::{IPV4_PREFIX_REGEX, WORD_REGEX};

/// Number of lexical features the classifier was trained on
pub const FEATURE_COUNT: usize = 33;

/// Fixed-schema lexical feature vector for a URL.
///
/// Field order mirrors the training pipeline exactly; `as_array` is the
/// only place that order is spelled out, so the struct stays the single
/// source of truth for the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub length_url: f64,
    pub length_hostname: f64,
    pub ip: f64,
    pub nb_dots: f64,
    pub nb_hyphens: f64,
    pub nb_at: f64,
    pub nb_qm: f64,
    pub nb_and: f64,
    pub nb_or: f64,
    pub nb_eq: f64,
    pub nb_underscore: f64,
    pub nb_tilde: f64,
    pub nb_percent: f64,
    pub nb_slash: f64,
    pub nb_star: f64,
    pub nb_colon: f64,
    pub nb_comma: f64,
    pub nb_semicolon: f64,
    pub nb_dollar: f64,
    pub nb_space: f64,
    pub nb_www: f64,
    pub nb_com: f64,
    pub nb_dslash: f64,
    pub http_in_path: f64,
    pub https_token: f64,
    pub ratio_digits_url: f64,
    pub ratio_digits_host: f64,
    pub nb_redirection: f64,
    pub length_words_raw: f64,
    pub char_repeat: f64,
    pub shortest_word_length: f64,
    pub longest_word_length: f64,
    pub avg_word_length: f64,
}

impl FeatureVector {
    /// Features in the fixed training order, ready for scaling/prediction
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.length_url,
            self.length_hostname,
            self.ip,
            self.nb_dots,
            self.nb_hyphens,
            self.nb_at,
            self.nb_qm,
            self.nb_and,
            self.nb_or,
            self.nb_eq,
            self.nb_underscore,
            self.nb_tilde,
            self.nb_percent,
            self.nb_slash,
            self.nb_star,
            self.nb_colon,
            self.nb_comma,
            self.nb_semicolon,
            self.nb_dollar,
            self.nb_space,
            self.nb_www,
            self.nb_com,
            self.nb_dslash,
            self.http_in_path,
            self.https_token,
            self.ratio_digits_url,
            self.ratio_digits_host,
            self.nb_redirection,
            self.length_words_raw,
            self.char_repeat,
            self.shortest_word_length,
            self.longest_word_length,
            self.avg_word_length,
        ]
    }
}

/// Extracts the 33 lexical features from a normalized URL.
///
/// Pure function of its input: no I/O, no hidden state, identical input
/// always yields an identical vector. Counts are taken over the full
/// scheme-qualified URL string; the path-scoped flags use the parsed path
/// component only.
pub fn extract_features(normalized: &NormalizedUrl) -> FeatureVector {
    let url = normalized.url();
    let hostname = normalized.hostname();
    let path_lower = normalized.path().to_lowercase();

    let url_len = url.chars().count();
    let host_len = hostname.chars().count();

    let digits_url = url.chars().filter(|c| c.is_ascii_digit()).count();
    let digits_host = hostname.chars().filter(|c| c.is_ascii_digit()).count();

    let word_lengths: Vec<usize> = WORD_REGEX
        .find_iter(url)
        .map(|m| m.as_str().chars().count())
        .collect();

    let avg_word_length = if word_lengths.is_empty() {
        0.0
    } else {
        word_lengths.iter().sum::<usize>() as f64 / word_lengths.len() as f64
    };

    FeatureVector {
        length_url: url_len as f64,
        length_hostname: host_len as f64,
        ip: if IPV4_PREFIX_REGEX.is_match(hostname) {
            1.0
        } else {
            0.0
        },
        nb_dots: count_char(url, '.'),
        nb_hyphens: count_char(url, '-'),
        nb_at: count_char(url, '@'),
        nb_qm: count_char(url, '?'),
        nb_and: count_char(url, '&'),
        nb_or: count_char(url, '|'),
        nb_eq: count_char(url, '='),
        nb_underscore: count_char(url, '_'),
        nb_tilde: count_char(url, '~'),
        nb_percent: count_char(url, '%'),
        nb_slash: count_char(url, '/'),
        nb_star: count_char(url, '*'),
        nb_colon: count_char(url, ':'),
        nb_comma: count_char(url, ','),
        nb_semicolon: count_char(url, ';'),
        nb_dollar: count_char(url, '$'),
        nb_space: count_char(url, ' '),
        nb_www: count_substring(url, "www"),
        nb_com: count_substring(url, ".com"),
        nb_dslash: count_substring(url, "//"),
        http_in_path: if path_lower.contains("http") { 1.0 } else { 0.0 },
        https_token: if path_lower.contains("https") { 1.0 } else { 0.0 },
        ratio_digits_url: if url_len == 0 {
            0.0
        } else {
            digits_url as f64 / url_len as f64
        },
        ratio_digits_host: if host_len == 0 {
            0.0
        } else {
            digits_host as f64 / host_len as f64
        },
        // same count as nb_dslash, kept because the model was trained on it
        nb_redirection: count_substring(url, "//"),
        length_words_raw: word_lengths.len() as f64,
        char_repeat: longest_char_run(url) as f64,
        shortest_word_length: word_lengths.iter().min().copied().unwrap_or(0) as f64,
        longest_word_length: word_lengths.iter().max().copied().unwrap_or(0) as f64,
        avg_word_length,
    }
}

fn count_char(s: &str, c: char) -> f64 {
    s.chars().filter(|&x| x == c).count() as f64
}

fn count_substring(s: &str, pat: &str) -> f64 {
    s.matches(pat).count() as f64
}

/// Length of the longest run of one repeated character, 0 for an empty string
fn longest_char_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<char> = None;

    for c in s.chars() {
        if previous == Some(c) {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        if current > longest {
            longest = current;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> FeatureVector {
        extract_features(&NormalizedUrl::new(raw))
    }

    #[test]
    fn test_vector_has_33_finite_fields() {
        let vector = extract("https://www.example.com/path?a=1&b=2");
        let array = vector.as_array();
        assert_eq!(array.len(), FEATURE_COUNT);
        assert!(array.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let normalized = NormalizedUrl::new("https://example.com/a_b-c?x=1");
        assert_eq!(
            extract_features(&normalized).as_array(),
            extract_features(&normalized).as_array()
        );
    }

    #[test]
    fn test_character_counts() {
        let vector = extract("https://a.b.com/x/y?q=1&r=2|3");
        assert_eq!(vector.nb_dots, 2.0);
        assert_eq!(vector.nb_qm, 1.0);
        assert_eq!(vector.nb_and, 1.0);
        assert_eq!(vector.nb_or, 1.0);
        assert_eq!(vector.nb_eq, 2.0);
        // scheme separator plus two path slashes
        assert_eq!(vector.nb_slash, 4.0);
        assert_eq!(vector.nb_colon, 1.0);
        assert_eq!(vector.nb_com, 1.0);
        assert_eq!(vector.nb_dslash, 1.0);
        assert_eq!(vector.nb_redirection, vector.nb_dslash);
    }

    #[test]
    fn test_ip_flag_set_for_dotted_quad_host() {
        assert_eq!(extract("http://1.2.3.4/test").ip, 1.0);
        assert_eq!(extract("http://example.com/test").ip, 0.0);
        // prefix match only: octets are not validated and labels may follow
        assert_eq!(extract("http://1.2.3.4.evil.com/").ip, 1.0);
    }

    #[test]
    fn test_path_scoped_http_flags() {
        let vector = extract("https://example.com/redirect/http/page");
        assert_eq!(vector.http_in_path, 1.0);
        assert_eq!(vector.https_token, 0.0);

        let vector = extract("https://example.com/HTTPS-everywhere");
        assert_eq!(vector.http_in_path, 1.0);
        assert_eq!(vector.https_token, 1.0);
    }

    #[test]
    fn test_digit_ratios_bounded() {
        let vector = extract("http://123.45.67.89/abc123");
        assert!(vector.ratio_digits_url > 0.0 && vector.ratio_digits_url <= 1.0);
        assert!(vector.ratio_digits_host > 0.0 && vector.ratio_digits_host <= 1.0);
    }

    #[test]
    fn test_empty_input_does_not_divide_by_zero() {
        // "" normalizes to "https://" which has no host
        let vector = extract("");
        assert_eq!(vector.length_hostname, 0.0);
        assert_eq!(vector.ratio_digits_url, 0.0);
        assert_eq!(vector.ratio_digits_host, 0.0);
        // the scheme itself still counts as one word
        assert_eq!(vector.length_words_raw, 1.0);
        assert_eq!(vector.shortest_word_length, 5.0);
        assert!(vector.as_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_word_statistics() {
        let vector = extract("https://ab.example.com/path_x");
        // words: https, ab, example, com, path_x
        assert_eq!(vector.length_words_raw, 5.0);
        assert_eq!(vector.shortest_word_length, 2.0);
        assert_eq!(vector.longest_word_length, 7.0);
        assert!((vector.avg_word_length - 23.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_char_repeat_tracks_longest_run() {
        let vector = extract("https://!!!.com");
        assert_eq!(vector.char_repeat, 3.0);
        // alphanumerics on either side of the bangs
        assert_eq!(extract("https://aaaa.com").char_repeat, 4.0);
    }

    #[test]
    fn test_symbol_heavy_url_stays_finite() {
        let vector = extract("http://-!-/-!-");
        // the scheme itself is still a word, everything else is symbols
        assert_eq!(vector.length_words_raw, 1.0);
        assert_eq!(vector.shortest_word_length, 4.0);
        assert!(vector.as_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_www_substring_counted_everywhere() {
        let vector = extract("https://www.wwwshop.com/www");
        assert_eq!(vector.nb_www, 3.0);
    }
}
