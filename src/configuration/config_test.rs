use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() -> Result<()> {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>()?;

    assert_eq!(doc["backend"].as_str(), Some("groq"));
    assert_eq!(doc["port"].as_integer(), Some(3000));
    assert_eq!(doc["temperature"].as_float(), Some(0.4));
    assert!(doc.get("groq-token").is_none());
    assert!(res.contains("# groq-token = \"\""));
    assert!(res.contains("[possible values: groq, openai]"));

    return Ok(());
}

#[test]
fn it_writes_every_key_except_config_file() {
    let res = Config::serialize_default(cli::build());
    assert!(!res.contains("config-file"));
    assert!(res.contains("transcription-model = \"whisper-large-v3\""));
    assert!(res.contains("interview-role = \"Software Engineer\""));
}

#[test]
fn it_uses_kebab_case_keys() {
    assert_eq!(ConfigKey::GroqURL.to_string(), "groq-url");
    assert_eq!(ConfigKey::OpenaiToken.to_string(), "openai-token");
    assert_eq!(
        ConfigKey::BackendHealthCheckTimeout.to_string(),
        "backend-health-check-timeout"
    );
}

#[test]
fn it_loads_values_from_toml() -> Result<()> {
    Config::load_toml(
        &cli::build(),
        r#"
transcription-language = "de"
resume-max-chars = 4000
"#,
    )?;

    assert_eq!(Config::get(ConfigKey::TranscriptionLanguage), "de");
    assert_eq!(Config::get_parsed::<usize>(ConfigKey::ResumeMaxChars)?, 4000);

    return Ok(());
}

#[test]
fn it_fails_on_invalid_possible_values() {
    let res = Config::load_toml(&cli::build(), "backend = \"gemini\"");
    assert!(res.is_err());
}

#[test]
fn it_fails_on_unsupported_value_types() {
    let res = Config::load_toml(&cli::build(), "interview-role = [\"a\", \"b\"]");
    assert!(res.is_err());
}

#[test]
fn it_fails_to_parse_invalid_numbers() {
    let res = Config::load_toml(&cli::build(), "max-upload-bytes = \"lots\"");
    assert!(res.is_ok());
    assert!(Config::get_parsed::<usize>(ConfigKey::MaxUploadBytes).is_err());
}
