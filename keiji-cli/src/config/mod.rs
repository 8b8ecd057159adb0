//! Backend connection settings and overridable validation limits
//!
//! There are no config files: the backend endpoint comes from the
//! environment, and the validation limits come from the backend settings
//! table with built-in defaults as fallback.

use anyhow::{Context, Result};

/// Connection details for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL (e.g., "https://xyz.supabase.co")
    pub base_url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
}

impl BackendConfig {
    /// Read `SIGNAGE_URL` / `SIGNAGE_API_KEY` from the environment,
    /// loading a `.env` file if one is present
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("SIGNAGE_URL")
            .context("SIGNAGE_URL is not set. Point it at the backend base URL.")?;
        let api_key = std::env::var("SIGNAGE_API_KEY")
            .context("SIGNAGE_API_KEY is not set. Use the project API key.")?;
        Ok(Self { base_url, api_key })
    }
}

/// Validation limits, overridable via the backend settings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Maximum on-screen seconds for a poster (`display_time_max`)
    pub display_time_max: u32,
    /// Maximum characters per remarks line (`remarks_chars_per_line`)
    pub remarks_chars_per_line: usize,
    /// Maximum remarks lines (`remarks_max_lines`)
    pub remarks_max_lines: usize,
    /// Maximum notice text characters (`notice_text_max_chars`)
    pub notice_text_max_chars: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            display_time_max: 30,
            remarks_chars_per_line: 25,
            remarks_max_lines: 5,
            notice_text_max_chars: 200,
        }
    }
}

impl ValidationLimits {
    /// Apply one settings row. Unknown keys and unparsable values are
    /// ignored so a malformed settings table never blocks entry.
    pub fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "display_time_max" => {
                // Zero would leave no valid display time at all
                if let Ok(v) = value.trim().parse() {
                    if v >= 1 {
                        self.display_time_max = v;
                    }
                }
            }
            "remarks_chars_per_line" => {
                if let Ok(v) = value.trim().parse() {
                    self.remarks_chars_per_line = v;
                }
            }
            "remarks_max_lines" => {
                if let Ok(v) = value.trim().parse() {
                    self.remarks_max_lines = v;
                }
            }
            "notice_text_max_chars" => {
                if let Ok(v) = value.trim().parse() {
                    self.notice_text_max_chars = v;
                }
            }
            _ => log::debug!("ignoring unknown setting: {}", key),
        }
    }

    /// Build limits from settings rows, starting from the defaults
    pub fn from_settings<'a, I>(settings: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut limits = Self::default();
        for (key, value) in settings {
            limits.apply_setting(key, value);
        }
        limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ValidationLimits::default();
        assert_eq!(limits.display_time_max, 30);
        assert_eq!(limits.remarks_chars_per_line, 25);
        assert_eq!(limits.remarks_max_lines, 5);
        assert_eq!(limits.notice_text_max_chars, 200);
    }

    #[test]
    fn test_settings_override_defaults() {
        let limits = ValidationLimits::from_settings(vec![
            ("display_time_max", "15"),
            ("notice_text_max_chars", "120"),
        ]);
        assert_eq!(limits.display_time_max, 15);
        assert_eq!(limits.notice_text_max_chars, 120);
        assert_eq!(limits.remarks_max_lines, 5);
    }

    #[test]
    fn test_unknown_keys_and_bad_values_are_ignored() {
        let limits = ValidationLimits::from_settings(vec![
            ("unknown_key", "42"),
            ("display_time_max", "not-a-number"),
        ]);
        assert_eq!(limits, ValidationLimits::default());
    }

    #[test]
    fn test_zero_display_time_max_is_ignored() {
        let limits = ValidationLimits::from_settings(vec![("display_time_max", "0")]);
        assert_eq!(limits.display_time_max, 30);
    }
}
