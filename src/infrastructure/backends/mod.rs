#[cfg(test)]
#[path = "backends_test.rs"]
mod tests;

pub mod openai;
use std::sync::Arc;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> Result<BackendBox> {
        let (url, token) = match name {
            BackendName::Groq => (
                Config::get(ConfigKey::GroqURL),
                Config::get(ConfigKey::GroqToken),
            ),
            BackendName::OpenAI => (
                Config::get(ConfigKey::OpenaiURL),
                Config::get(ConfigKey::OpenaiToken),
            ),
        };

        let backend = openai::OpenAI::new(
            name,
            &url,
            &token,
            &Config::get(ConfigKey::BackendHealthCheckTimeout),
            Config::get_parsed::<u64>(ConfigKey::RequestTimeout)?,
        )?;

        return Ok(Arc::new(backend));
    }
}
