use crate::domain::error::DomainError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WATCHLIST: &str = "./watchlist.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub watchlist_path: PathBuf,
    /// Per-symbol provider timeout; `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            watchlist_path: PathBuf::from(DEFAULT_WATCHLIST),
            fetch_timeout: Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)),
            color: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = lookup("STOCKDASH_WATCHLIST").filter(|p| !p.trim().is_empty()) {
            settings.watchlist_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("STOCKDASH_FETCH_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DomainError::Config(format!(
                    "STOCKDASH_FETCH_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            settings.fetch_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            settings.color = false;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, DomainError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.watchlist_path, PathBuf::from("./watchlist.json"));
        assert_eq!(s.fetch_timeout, Some(Duration::from_secs(10)));
        assert!(s.color);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("STOCKDASH_WATCHLIST", "/tmp/wl.json"),
            ("STOCKDASH_FETCH_TIMEOUT_SECS", "3"),
            ("NO_COLOR", "1"),
        ])
        .unwrap();
        assert_eq!(s.watchlist_path, PathBuf::from("/tmp/wl.json"));
        assert_eq!(s.fetch_timeout, Some(Duration::from_secs(3)));
        assert!(!s.color);
    }

    #[test]
    fn test_empty_no_color_keeps_color() {
        assert!(settings(&[("NO_COLOR", "")]).unwrap().color);
        assert!(!settings(&[("NO_COLOR", "0")]).unwrap().color);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let s = settings(&[("STOCKDASH_FETCH_TIMEOUT_SECS", "0")]).unwrap();
        assert_eq!(s.fetch_timeout, None);
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = settings(&[("STOCKDASH_FETCH_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
