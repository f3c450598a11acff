use crate::core::normalizer::normalize_text;
use serde::{Deserialize, Serialize};

/// Qualifier words that may follow a model name without turning it into a
/// different product tier.
pub const DEFAULT_SUFFIXES: [&str; 2] = ["series", "edition"];

fn default_suffixes() -> Vec<String> {
    DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect()
}

/// How a provider decides that a candidate title is the requested model.
///
/// Sources label their products differently, so each provider carries its own
/// policy. In TOML this is written as `policy = "exact"` (optionally with
/// `suffixes = [...]`) or `policy = "substring"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Title equals the query, or the query plus exactly one allow-listed word.
    Exact {
        #[serde(default = "default_suffixes")]
        suffixes: Vec<String>,
    },
    /// Title contains the query, or contains every query token in any order.
    Substring,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Exact {
            suffixes: default_suffixes(),
        }
    }
}

impl MatchPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            MatchPolicy::Exact { .. } => "exact",
            MatchPolicy::Substring => "substring",
        }
    }

    pub fn matches(&self, query: &str, candidate_title: &str) -> bool {
        let query = normalize_text(query);
        // An empty needle would match every title.
        if query.is_empty() {
            return false;
        }
        let title = normalize_text(candidate_title);

        match self {
            MatchPolicy::Exact { suffixes } => {
                if title == query {
                    return true;
                }
                match title.strip_prefix(query.as_str()).and_then(|rest| rest.strip_prefix(' ')) {
                    Some(suffix) if !suffix.contains(' ') => suffixes
                        .iter()
                        .any(|allowed| normalize_text(allowed) == suffix),
                    _ => false,
                }
            }
            MatchPolicy::Substring => {
                title.contains(query.as_str())
                    || query.split(' ').all(|token| title.contains(token))
            }
        }
    }

    /// Returns the first candidate, in provider order, whose title matches.
    pub fn select_first<'a, T, F>(
        &self,
        query: &str,
        candidates: &'a [T],
        title_of: F,
    ) -> Option<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        candidates
            .iter()
            .find(|candidate| self.matches(query, title_of(candidate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_accepts_allowed_suffix_only() {
        let policy = MatchPolicy::default();
        assert!(policy.matches("iPhone 15", "iPhone 15"));
        assert!(policy.matches("iPhone 15", "  IPHONE   15 "));
        assert!(policy.matches("iPhone 15", "iPhone 15 Series"));
        assert!(policy.matches("iPhone 15", "iPhone 15 edition"));
        assert!(!policy.matches("iPhone 15", "iPhone 15 Pro"));
        assert!(!policy.matches("iPhone 15", "iPhone 15X"));
        assert!(!policy.matches("iPhone 15", "iPhone 15 Series Pro"));
        assert!(!policy.matches("iPhone 15", "Apple iPhone 15"));
    }

    #[test]
    fn test_exact_uses_configured_suffixes() {
        let policy = MatchPolicy::Exact {
            suffixes: vec!["5G".to_string()],
        };
        assert!(policy.matches("Galaxy A55", "Galaxy A55 5G"));
        assert!(!policy.matches("Galaxy A55", "Galaxy A55 Series"));
    }

    #[test]
    fn test_substring_matches_contained_query() {
        let policy = MatchPolicy::Substring;
        assert!(policy.matches("Galaxy S24 Ultra", "Samsung Galaxy S24 Ultra 256GB Black"));
        assert!(policy.matches("iPhone 15", "Apple iPhone 15 Pro Max"));
        assert!(!policy.matches("Pixel 9", "Google Pixel 8a"));
    }

    #[test]
    fn test_substring_matches_tokens_in_any_order() {
        let policy = MatchPolicy::Substring;
        assert!(policy.matches("S24 Galaxy", "Samsung Galaxy S24 Ultra"));
        assert!(!policy.matches("S24 Galaxy Fold", "Samsung Galaxy S24 Ultra"));
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        for policy in [MatchPolicy::default(), MatchPolicy::Substring] {
            assert!(!policy.matches("", "iPhone 15"));
            assert!(!policy.matches("   ", "iPhone 15"));
            assert!(!policy.matches("", ""));
        }
    }

    #[test]
    fn test_select_first_keeps_provider_order() {
        let candidates = vec![
            ("Nokia 3310", 1),
            ("Samsung Galaxy S24 Ultra 512GB", 2),
            ("Galaxy S24 Ultra 256GB", 3),
        ];
        let picked = MatchPolicy::Substring
            .select_first("galaxy s24 ultra", &candidates, |c| c.0)
            .unwrap();
        assert_eq!(picked.1, 2);

        assert!(MatchPolicy::default()
            .select_first("galaxy s24 ultra", &candidates, |c| c.0)
            .is_none());
    }

    #[test]
    fn test_policy_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            matching: MatchPolicy,
        }

        let exact: Wrapper = toml::from_str("[matching]\npolicy = \"exact\"\n").unwrap();
        assert_eq!(exact.matching, MatchPolicy::default());

        let custom: Wrapper =
            toml::from_str("[matching]\npolicy = \"exact\"\nsuffixes = [\"5g\"]\n").unwrap();
        assert_eq!(
            custom.matching,
            MatchPolicy::Exact {
                suffixes: vec!["5g".to_string()]
            }
        );

        let loose: Wrapper = toml::from_str("[matching]\npolicy = \"substring\"\n").unwrap();
        assert_eq!(loose.matching, MatchPolicy::Substring);
    }
}
