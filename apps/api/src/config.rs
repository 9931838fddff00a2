use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};

use crate::matching::aggregate::WeightPolicy;

const DEFAULT_MAX_DIFF_WORDS: usize = 2000;
const DEFAULT_ANALYSIS_CACHE_CAPACITY: usize = 256;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on words per side of a diff request; the LCS table is O(m·n).
    pub max_diff_words: usize,
    pub analysis_cache_capacity: usize,
    pub weight_policy: WeightPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_diff_words: DEFAULT_MAX_DIFF_WORDS,
            analysis_cache_capacity: DEFAULT_ANALYSIS_CACHE_CAPACITY,
            weight_policy: WeightPolicy::EvenSplit,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_diff_words: parse_env("MAX_DIFF_WORDS", defaults.max_diff_words)
                .context("MAX_DIFF_WORDS must be a non-negative integer")?,
            analysis_cache_capacity: parse_env(
                "ANALYSIS_CACHE_CAPACITY",
                defaults.analysis_cache_capacity,
            )
            .context("ANALYSIS_CACHE_CAPACITY must be a non-negative integer")?,
            weight_policy: match std::env::var("SECTION_WEIGHTS") {
                Ok(raw) if !raw.trim().is_empty() => {
                    parse_weight_policy(&raw).context("SECTION_WEIGHTS is malformed")?
                }
                _ => defaults.weight_policy,
            },
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}

/// Parses `label=weight` pairs separated by commas, e.g. `required=70,preferred=30`.
pub fn parse_weight_policy(raw: &str) -> Result<WeightPolicy> {
    let mut weights = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (label, weight) = pair
            .split_once('=')
            .with_context(|| format!("expected label=weight, got '{pair}'"))?;
        let label = label.trim();
        if label.is_empty() {
            bail!("empty section label in '{pair}'");
        }
        let weight: u32 = weight
            .trim()
            .parse()
            .with_context(|| format!("weight for '{label}' is not an integer"))?;
        if weight > 100 {
            bail!("weight for '{label}' exceeds 100");
        }
        weights.insert(label.to_string(), weight);
    }
    if weights.is_empty() {
        bail!("no section weights given");
    }
    Ok(WeightPolicy::Declared(weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight_policy() {
        let policy = parse_weight_policy("required=70, preferred=30").unwrap();
        let WeightPolicy::Declared(weights) = policy else {
            panic!("expected declared weights");
        };
        assert_eq!(weights["required"], 70);
        assert_eq!(weights["preferred"], 30);
    }

    #[test]
    fn test_parse_weight_policy_rejects_garbage() {
        assert!(parse_weight_policy("required").is_err());
        assert!(parse_weight_policy("required=abc").is_err());
        assert!(parse_weight_policy("=40").is_err());
        assert!(parse_weight_policy("required=140").is_err());
        assert!(parse_weight_policy(" , ").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_diff_words, 2000);
        assert_eq!(config.weight_policy, WeightPolicy::EvenSplit);
    }
}
