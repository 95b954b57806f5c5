use once_cell::sync::Lazy;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// How report and dashboard amounts are presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub currency: String,
    pub display_scale: u32,
    pub rounding: DisplayRounding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayRounding {
    HalfUp,
    HalfEven,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub default_filter: String,
    pub trace_calculations: bool,
}

impl ReportConfig {
    /// Round an amount for display; stored values stay unrounded
    pub fn round(&self, amount: Decimal) -> Decimal {
        let strategy = match self.rounding {
            DisplayRounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            DisplayRounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        };
        amount.round_dp_with_strategy(self.display_scale, strategy)
    }

    pub fn format(&self, amount: Decimal) -> String {
        let rounded = self.round(amount);
        format!("{:.*} {}", self.display_scale as usize, rounded, self.currency)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            display_scale: 2,
            rounding: DisplayRounding::HalfEven,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Report overrides
        if let Ok(v) = env::var("REPORT_CURRENCY") {
            if !v.trim().is_empty() {
                self.report.currency = v.trim().to_uppercase();
            }
        }
        if let Ok(v) = env::var("REPORT_DISPLAY_SCALE") {
            self.report.display_scale = v.parse().unwrap_or(self.report.display_scale);
        }
        if let Ok(v) = env::var("REPORT_ROUNDING") {
            self.report.rounding = match v.to_lowercase().as_str() {
                "half_up" | "halfup" => DisplayRounding::HalfUp,
                "half_even" | "halfeven" | "bankers" => DisplayRounding::HalfEven,
                _ => self.report.rounding,
            };
        }

        // Logging overrides
        if let Ok(v) = env::var("LOG_FILTER") {
            self.logging.default_filter = v;
        }
        if let Ok(v) = env::var("LOG_TRACE_CALCULATIONS") {
            self.logging.trace_calculations = v.parse().unwrap_or(self.logging.trace_calculations);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            report: ReportConfig {
                currency: "USD".to_string(),
                display_scale: 2,
                rounding: DisplayRounding::HalfUp,
            },
            logging: LoggingConfig {
                default_filter: "promoter_payouts=debug".to_string(),
                trace_calculations: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            report: ReportConfig::default(),
            logging: LoggingConfig {
                default_filter: "promoter_payouts=info".to_string(),
                trace_calculations: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            report: ReportConfig::default(),
            logging: LoggingConfig {
                default_filter: "promoter_payouts=warn".to_string(),
                trace_calculations: false,
            },
        }
    }

    /// Effective filter directive for the log subscriber
    pub fn log_filter(&self) -> String {
        if self.logging.trace_calculations {
            format!("{},promoter_payouts::payout=trace", self.logging.default_filter)
        } else {
            self.logging.default_filter.clone()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.report.rounding, DisplayRounding::HalfUp);
        assert!(config.logging.trace_calculations);
        assert!(config.log_filter().contains("promoter_payouts::payout=trace"));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.report.rounding, DisplayRounding::HalfEven);
        assert_eq!(config.report.display_scale, 2);
        assert_eq!(config.log_filter(), "promoter_payouts=warn");
    }

    #[test]
    fn rounding_strategies_differ_on_midpoint() {
        let mut report = ReportConfig::default();
        assert_eq!(report.round(Decimal::new(1125, 3)), Decimal::new(112, 2));
        report.rounding = DisplayRounding::HalfUp;
        assert_eq!(report.round(Decimal::new(1125, 3)), Decimal::new(113, 2));
    }

    #[test]
    fn format_pads_to_scale() {
        let report = ReportConfig::default();
        assert_eq!(report.format(Decimal::from(20)), "20.00 USD");
        assert_eq!(report.format(Decimal::new(-305, 1)), "-30.50 USD");
    }
}
