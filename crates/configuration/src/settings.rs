use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub source: SourceSettings,
    pub analytics: AnalyticsSettings,
}

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound on uploaded file size, in megabytes.
    pub upload_limit_mb: usize,
}

/// The layout of the uploaded fund export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Rows of preamble above the two header rows. The Morningstar export
    /// carries seven rows of banner text before the headers.
    pub preamble_rows: usize,
    /// The static column holding the fund name.
    pub name_column: String,
    /// The marker the source uses for section-divider rows.
    pub sentinel: String,
    /// `chrono` format of the date-column headers.
    pub date_format: String,
}

/// Defaults applied by the calculation endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Annual risk-free rate in percent, used when a request does not supply
    /// its own.
    pub risk_free_rate: f64,
    /// Default rolling-return window, in months.
    pub rolling_window_months: usize,
    /// Default trailing lookback for the correlation matrix, in months.
    pub correlation_months: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upload_limit_mb: 50,
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            preamble_rows: 7,
            name_column: "Group/Investment".to_string(),
            sentinel: "Local Funds".to_string(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            rolling_window_months: 12,
            correlation_months: 36,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.upload_limit_mb == 0 {
            return Err(ConfigError::ValidationError(
                "server.upload_limit_mb must be at least 1".to_string(),
            ));
        }
        if self.source.name_column.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.name_column must not be empty".to_string(),
            ));
        }
        if self.analytics.rolling_window_months == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.rolling_window_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
