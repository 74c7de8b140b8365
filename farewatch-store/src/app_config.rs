use chrono::NaiveTime;
use farewatch_core::{CoreError, CoreResult};
use farewatch_shared::{RouteConfig, SearchSettings};
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub snapshots: SnapshotConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
    /// Daily trigger, 24-hour `HH:MM` local time
    #[serde(default = "default_daily_at")]
    pub daily_at: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_daily_at() -> String { "09:00".to_string() }
fn default_poll_interval() -> u64 { 60 }

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: default_daily_at(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl ScheduleConfig {
    pub fn trigger_time(&self) -> CoreResult<NaiveTime> {
        NaiveTime::parse_from_str(self.daily_at.trim(), "%H:%M").map_err(|_| {
            CoreError::ConfigurationError(format!(
                "schedule.daily_at '{}' is not a 24-hour HH:MM time",
                self.daily_at
            ))
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

fn default_snapshot_path() -> PathBuf { PathBuf::from("logs/flight_data.json") }

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { path: default_snapshot_path() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,
    #[serde(default = "default_summary_base_url")]
    pub summary_base_url: String,
    #[serde(default = "default_summary_model")]
    pub summary_model: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_search_base_url() -> String { "https://test.api.amadeus.com".to_string() }
fn default_summary_base_url() -> String { "https://api.mistral.ai".to_string() }
fn default_summary_model() -> String { "mistral-medium".to_string() }
fn default_request_timeout() -> u64 { 30 }

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            search_base_url: default_search_base_url(),
            summary_base_url: default_summary_base_url(),
            summary_model: default_summary_model(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
}

fn default_smtp_host() -> String { "smtp.gmail.com".to_string() }
fn default_smtp_port() -> u16 { 587 }

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

fn default_dashboard_port() -> u16 { 8501 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { port: default_dashboard_port() }
    }
}

impl Config {
    /// Load and validate configuration. Any problem here is fatal at startup.
    pub fn load() -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FAREWATCH__SCHEDULE__DAILY_AT=07:30` sets `schedule.daily_at`
            .add_source(
                config::Environment::with_prefix("FAREWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        Self::finish(s)
    }

    /// Build from an in-memory TOML document
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(config_error)?;

        Self::finish(s)
    }

    fn finish(s: config::Config) -> CoreResult<Self> {
        let config: Config = s.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the agent cannot run with. All problems are
    /// reported together.
    pub fn validate(&self) -> CoreResult<()> {
        let mut problems = Vec::new();

        if self.routes.is_empty() {
            problems.push("no routes configured".to_string());
        }

        let mut names = HashSet::new();
        for route in &self.routes {
            if route.name.trim().is_empty() {
                problems.push("route with empty name".to_string());
            } else if !names.insert(route.name.as_str()) {
                problems.push(format!("duplicate route name '{}'", route.name));
            }
            if route.from_city.trim().is_empty() || route.to_city.trim().is_empty() {
                problems.push(format!("route '{}' is missing a city code", route.name));
            }
            if let Some(return_date) = route.return_date {
                if return_date < route.departure_date {
                    problems.push(format!(
                        "route '{}' returns ({}) before it departs ({})",
                        route.name, return_date, route.departure_date
                    ));
                }
            }
        }

        if self.search.max_results == 0 {
            problems.push("search.max_results must be positive".to_string());
        }
        if self.search.adults == 0 {
            problems.push("search.adults must be positive".to_string());
        }
        if self.search.top_n == 0 {
            problems.push("search.top_n must be positive".to_string());
        }
        if let Err(e) = self.schedule.trigger_time() {
            problems.push(e.to_string());
        }
        if self.schedule.poll_interval_secs == 0 {
            problems.push("schedule.poll_interval_secs must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::ConfigurationError(problems.join("; ")))
        }
    }
}

fn config_error(e: config::ConfigError) -> CoreError {
    CoreError::ConfigurationError(e.to_string())
}
