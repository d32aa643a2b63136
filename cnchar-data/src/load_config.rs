/// `load_config` module: loads a YAML config file into the core [`Config`].
///
/// Every section and every field is optional; anything omitted keeps the built-in
/// default (`./draw`, `./voice`, `./voice_data.json`, ...). CLI flags are applied on
/// top of the loaded values by [`crate::cli::run`].
///
/// Accepted shape:
///
/// ```yaml
/// draw:
///   input_dir: ./draw
///   output_file: ./draw_data.json
/// voice:
///   input_dir: ./voice
///   output_file: ./voice_data.json
///   restore_dir: ./restored
/// minify:
///   input_file: ./voice_data.json
///   output_file: ./voice_data.min.json
/// ```
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use cnchar_data_core::config::Config;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is a valid config with every default.
    if config_content.trim().is_empty() {
        return Ok(Config::default());
    }

    match serde_yaml::from_str::<Config>(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
