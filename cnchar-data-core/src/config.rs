//! Explicit per-run configuration. Every field defaults to the fixed path the
//! original build steps used, so an empty config reproduces them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub extension: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./draw"),
            output_file: PathBuf::from("./draw_data.json"),
            extension: "json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub extension: String,
    /// Where the `restore` command writes clips.
    pub restore_dir: PathBuf,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./voice"),
            output_file: PathBuf::from("./voice_data.json"),
            extension: "mp3".to_string(),
            restore_dir: PathBuf::from("./restored"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    pub input_file: PathBuf,
    /// `None` writes next to the input as `<stem>.min.<ext>`.
    pub output_file: Option<PathBuf>,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("./voice_data.json"),
            output_file: None,
        }
    }
}

/// All sections of a config file; each may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub draw: DrawConfig,
    pub voice: VoiceConfig,
    pub minify: MinifyConfig,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(
            draw_input = %self.draw.input_dir.display(),
            voice_input = %self.voice.input_dir.display(),
            minify_input = %self.minify.input_file.display(),
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}
