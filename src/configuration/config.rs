#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::BackendName;
use crate::domain::models::InterviewSettings;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Backend,
    BackendHealthCheckTimeout,
    ConfigFile,
    FeedbackModel,
    GroqToken,
    GroqURL,
    Host,
    InterviewRole,
    MaxUploadBytes,
    Model,
    OpenaiToken,
    OpenaiURL,
    Port,
    RequestTimeout,
    ResumeMaxChars,
    Temperature,
    TranscriptionLanguage,
    TranscriptionModel,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    /// Reads a numeric key, naming the key in the error when the value does
    /// not parse.
    pub fn get_parsed<T: std::str::FromStr>(key: ConfigKey) -> Result<T> {
        let val = Config::get(key);
        if let Ok(res) = val.parse::<T>() {
            return Ok(res);
        }

        bail!(format!("Config key '{key}' has an invalid value: {val}"));
    }

    pub fn interview_settings() -> Result<InterviewSettings> {
        return Ok(InterviewSettings {
            role: Config::get(ConfigKey::InterviewRole),
            model: Config::get(ConfigKey::Model),
            temperature: Config::get_parsed::<f32>(ConfigKey::Temperature)?,
            feedback_model: Config::get(ConfigKey::FeedbackModel),
            transcription_model: Config::get(ConfigKey::TranscriptionModel),
            transcription_language: Config::get(ConfigKey::TranscriptionLanguage),
            resume_max_chars: Config::get_parsed::<usize>(ConfigKey::ResumeMaxChars)?,
        });
    }

    pub fn default(key: ConfigKey) -> String {
        let default_backend = BackendName::Groq.to_string();
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return env::temp_dir())
            .join("mockinterview/config.toml");

        let res = match key {
            ConfigKey::Backend => &default_backend,
            ConfigKey::BackendHealthCheckTimeout => "1000",
            ConfigKey::FeedbackModel => "llama-3.1-8b-instant",
            ConfigKey::GroqToken => "",
            ConfigKey::GroqURL => "https://api.groq.com/openai",
            ConfigKey::Host => "127.0.0.1",
            ConfigKey::InterviewRole => "Software Engineer",
            ConfigKey::MaxUploadBytes => "26214400",
            ConfigKey::Model => "llama-3.1-8b-instant",
            ConfigKey::OpenaiToken => "",
            ConfigKey::OpenaiURL => "https://api.openai.com",
            ConfigKey::Port => "3000",
            ConfigKey::RequestTimeout => "60000",
            ConfigKey::ResumeMaxChars => "0",
            ConfigKey::Temperature => "0.4",
            ConfigKey::TranscriptionLanguage => "en",
            ConfigKey::TranscriptionModel => "whisper-large-v3",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        // Groq's own SDKs read this variable, so honour it as a fallback.
        if let Ok(token) = env::var("GROQ_API_KEY") {
            Config::set(ConfigKey::GroqToken, &token);
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        if fs::try_exists(&config_file).await.unwrap_or(false) {
            let toml_str = fs::read_to_string(&config_file).await?;
            Config::load_toml(&cmd, &toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            backend = %Config::get(ConfigKey::Backend),
            host = %Config::get(ConfigKey::Host),
            port = %Config::get(ConfigKey::Port),
            model = %Config::get(ConfigKey::Model),
            feedback_model = %Config::get(ConfigKey::FeedbackModel),
            transcription_model = %Config::get(ConfigKey::TranscriptionModel),
            "config"
        );

        return Ok(());
    }

    fn load_toml(cmd: &Command, toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            if let Some(val) = doc.get(&key.to_string()) {
                // Use clap value parsers to do validation.
                let mut possible_values = vec![];
                if let Some(arg) = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                {
                    possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<String>>();
                }

                if let Some(val_int) = val.as_integer() {
                    Config::set(key, &val_int.to_string());
                } else if let Some(val_float) = val.as_float() {
                    Config::set(key, &val_float.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    if !possible_values.is_empty()
                        && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                    }
                    Config::set(key, val_str);
                } else {
                    bail!(format!(
                        "config.toml has an unsupported value type for key '{key}'"
                    ));
                }
            }
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() || val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
