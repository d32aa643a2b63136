use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A full config overrides every section.
#[test]
fn test_load_config_success_all_sections() {
    let config_yaml = r#"
draw:
  input_dir: ./data/draw
  output_file: ./out/draw_data.json
voice:
  input_dir: ./data/voice
  output_file: ./out/voice_data.json
  extension: wav
  restore_dir: ./out/restored
minify:
  input_file: ./out/voice_data.json
  output_file: ./out/voice.min.json
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config =
        cnchar_data::load_config::load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.draw.input_dir, PathBuf::from("./data/draw"));
    assert_eq!(config.draw.output_file, PathBuf::from("./out/draw_data.json"));
    assert_eq!(config.draw.extension, "json");
    assert_eq!(config.voice.extension, "wav");
    assert_eq!(config.voice.restore_dir, PathBuf::from("./out/restored"));
    assert_eq!(
        config.minify.output_file,
        Some(PathBuf::from("./out/voice.min.json"))
    );
}

/// Omitted sections and fields keep the built-in paths.
#[test]
fn test_load_config_partial_sections_keep_defaults() {
    let config_yaml = r#"
voice:
  input_dir: ./clips
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = cnchar_data::load_config::load_config(config_file.path())
        .expect("Partial config should load");

    assert_eq!(config.voice.input_dir, PathBuf::from("./clips"));
    assert_eq!(config.voice.output_file, PathBuf::from("./voice_data.json"));
    assert_eq!(config.voice.extension, "mp3");
    assert_eq!(config.draw.input_dir, PathBuf::from("./draw"));
    assert_eq!(config.minify.input_file, PathBuf::from("./voice_data.json"));
    assert!(config.minify.output_file.is_none());
}

/// An empty file is accepted as "all defaults".
#[test]
fn test_load_config_empty_file_is_default() {
    let config_file = NamedTempFile::new().expect("temp file");

    let config = cnchar_data::load_config::load_config(config_file.path())
        .expect("Empty config should load");
    assert_eq!(config, cnchar_data_core::config::Config::default());
}

/// If the config file is not valid YAML, load_config errors and reports as such.
#[test]
fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"draw: [:::").unwrap();

    let err = cnchar_data::load_config::load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
fn test_load_config_errors_for_missing_file() {
    let err = cnchar_data::load_config::load_config("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
