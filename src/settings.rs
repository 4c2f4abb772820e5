use std::env;

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;
use validator::Validate;

const DEFAULT_CONFIG: &str = include_str!("../config/config.yaml");

/// How scores are printed by the tool
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Bare tokens, e.g. `Infinity`
    #[default]
    Text,
    /// JSON encoding, e.g. `"Infinity"`
    Json,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub log_level: String,
    #[serde(default)]
    pub output: OutputFormat,
    /// Messages for errors that happened while loading the configuration.
    /// The logger is not configured yet at that point, so they are logged later.
    #[serde(default, skip)]
    pub load_errors: Vec<LogMsg>,
}

impl Settings {
    pub fn new(custom_config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut load_errors = vec![];
        let config_exists = |path: &str| File::with_name(path).collect().is_ok();

        if let Some(path) = custom_config_path.as_deref() {
            if !config_exists(path) {
                load_errors.push(LogMsg::Error(format!(
                    "Config file via --config-path is not found: {path}"
                )));
            }
        }

        let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_path_env = format!("config/{env}");

        // Missing main or env config files are only worth a warning
        load_errors.extend(
            ["config/config", &config_path_env]
                .into_iter()
                .filter(|path| !config_exists(*path))
                .map(|path| LogMsg::Warn(format!("Config file not found: {path}"))),
        );

        let mut config = Config::builder()
            // Start with compile-time base config
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml))
            .add_source(File::with_name("config/config").required(false))
            .add_source(File::with_name(&config_path_env).required(false))
            // Local config, not tracked in git
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = custom_config_path {
            config = config.add_source(File::with_name(&path).required(false));
        }

        // E.g.: `SCORE_TOOL__OUTPUT=json score-tool decode 1` prints JSON
        config = config.add_source(Environment::with_prefix("SCORE_TOOL").separator("__"));

        let mut settings: Settings = config.build()?.try_deserialize()?;
        settings.load_errors.extend(load_errors);
        Ok(settings)
    }

    pub fn validate_and_warn(&self) {
        self.load_errors.iter().for_each(LogMsg::log);
        if let Err(ref errs) = self.validate() {
            log::warn!("Settings configuration file has validation errors: {errs}");
        }
    }
}

#[derive(Clone, Debug)]
pub enum LogMsg {
    Warn(String),
    Error(String),
}

impl LogMsg {
    fn log(&self) {
        match self {
            Self::Warn(msg) => log::warn!("{msg}"),
            Self::Error(msg) => log::error!("{msg}"),
        }
    }
}
