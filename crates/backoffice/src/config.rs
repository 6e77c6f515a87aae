//! Console configuration loaded from environment variables.

use domain::Role;

/// Console configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default `"info"`)
/// - `BACKOFFICE_LOG_FORMAT`: `"json"` for JSON log lines, anything else for text
/// - `BACKOFFICE_CURRENCY`: symbol prefixed to amounts (default `"₹"`)
/// - `BACKOFFICE_ROLE`: `"admin"` or `"sales"` (default `"admin"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_json: bool,
    pub currency_symbol: String,
    pub role: Role,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            log_json: var("BACKOFFICE_LOG_FORMAT")
                .is_some_and(|format| format.eq_ignore_ascii_case("json")),
            currency_symbol: var("BACKOFFICE_CURRENCY").unwrap_or(defaults.currency_symbol),
            // An unrecognised role gets the narrower permissions.
            role: var("BACKOFFICE_ROLE")
                .map(|role| role.parse().unwrap_or(Role::Sales))
                .unwrap_or(defaults.role),
        }
    }

    /// Formats an amount for display, e.g. `"₹12.34"`.
    pub fn format_amount(&self, amount: domain::Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            currency_symbol: "₹".to_string(),
            role: Role::Admin,
        }
    }
}
