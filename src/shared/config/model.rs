use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub ingest: IngestConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct IngestConfig {
    /// Field delimiter of the raw measurement file.
    pub delimiter: char,
    /// Lines per chunk for the chunk-oriented engines.
    pub chunk_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub data_dir: String,
    /// Also persist the mart as an Arrow IPC file next to the CSV.
    #[serde(default)]
    pub write_arrow: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
    /// Per-run audit trail (one CSV row per driver transition).
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_audit_enabled() -> bool {
    true
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("STATIONMART_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
