// src/config.rs
//! Service configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::analysis::multiscale::DEFAULT_SCALES;
use crate::errors::PictoscopeError;

/// Settings the analysis engine needs, independent of the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Square targets for multi-scale statistics.
    pub scales: Vec<u32>,
    pub provider_timeout: Duration,
    /// Images analyzed at once by a batch.
    pub batch_concurrency: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scales: DEFAULT_SCALES.to_vec(),
            provider_timeout: Duration::from_millis(10_000),
            batch_concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: String,
    pub redis_url: String,
    /// Largest accepted width or height, in pixels.
    pub max_dimension: u32,
    pub max_upload_bytes: usize,
    pub report_ttl_secs: u64,
    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Environment Variables
    /// - `PICTOSCOPE_BIND` (default `0.0.0.0:8080`)
    /// - `PICTOSCOPE_REDIS_URL` (default `redis://127.0.0.1:6379`)
    /// - `PICTOSCOPE_MAX_DIMENSION` (default 8192)
    /// - `PICTOSCOPE_MAX_UPLOAD_BYTES` (default 50 MiB)
    /// - `PICTOSCOPE_PROVIDER_TIMEOUT_MS` (default 10000)
    /// - `PICTOSCOPE_BATCH_CONCURRENCY` (default 4)
    /// - `PICTOSCOPE_REPORT_TTL_SECS` (default 86400)
    /// - `PICTOSCOPE_SCALES` (default `50,100,200`)
    pub fn from_env() -> Result<Self, PictoscopeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PictoscopeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AnalyzerConfig::default();

        let scales = match lookup("PICTOSCOPE_SCALES") {
            Some(raw) => parse_scales(&raw)?,
            None => defaults.scales,
        };
        let timeout_ms: u64 = parse_or(&lookup, "PICTOSCOPE_PROVIDER_TIMEOUT_MS", 10_000)?;
        let batch_concurrency: usize = parse_or(&lookup, "PICTOSCOPE_BATCH_CONCURRENCY", 4)?;
        if batch_concurrency == 0 {
            return Err(PictoscopeError::Config(
                "PICTOSCOPE_BATCH_CONCURRENCY must be at least 1".to_string(),
            ));
        }
        let max_dimension: u32 = parse_or(&lookup, "PICTOSCOPE_MAX_DIMENSION", 8192)?;
        if max_dimension == 0 {
            return Err(PictoscopeError::Config(
                "PICTOSCOPE_MAX_DIMENSION must be positive".to_string(),
            ));
        }

        Ok(Self {
            bind: lookup("PICTOSCOPE_BIND").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            redis_url: lookup("PICTOSCOPE_REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            max_dimension,
            max_upload_bytes: parse_or(&lookup, "PICTOSCOPE_MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
            report_ttl_secs: parse_or(&lookup, "PICTOSCOPE_REPORT_TTL_SECS", 86_400)?,
            analyzer: AnalyzerConfig {
                scales,
                provider_timeout: Duration::from_millis(timeout_ms),
                batch_concurrency,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, PictoscopeError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PictoscopeError::Config(format!("{} has an invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

fn parse_scales(raw: &str) -> Result<Vec<u32>, PictoscopeError> {
    let scales = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(PictoscopeError::Config(format!(
                "PICTOSCOPE_SCALES contains an invalid scale '{}'",
                s
            ))),
        })
        .collect::<Result<Vec<u32>, _>>()?;

    if scales.is_empty() {
        return Err(PictoscopeError::Config(
            "PICTOSCOPE_SCALES must list at least one scale".to_string(),
        ));
    }
    Ok(scales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.max_dimension, 8192);
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.report_ttl_secs, 86_400);
        assert_eq!(config.analyzer, AnalyzerConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("PICTOSCOPE_BIND", "127.0.0.1:9000"),
            ("PICTOSCOPE_SCALES", "64, 128"),
            ("PICTOSCOPE_PROVIDER_TIMEOUT_MS", "250"),
            ("PICTOSCOPE_BATCH_CONCURRENCY", "2"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.analyzer.scales, vec![64, 128]);
        assert_eq!(config.analyzer.provider_timeout, Duration::from_millis(250));
        assert_eq!(config.analyzer.batch_concurrency, 2);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for pairs in [
            [("PICTOSCOPE_MAX_DIMENSION", "huge")],
            [("PICTOSCOPE_BATCH_CONCURRENCY", "0")],
            [("PICTOSCOPE_SCALES", "50,zero")],
            [("PICTOSCOPE_SCALES", " , ")],
        ] {
            let result = Config::from_lookup(lookup(&pairs));
            assert!(matches!(result, Err(PictoscopeError::Config(_))), "{:?}", pairs);
        }
    }
}
