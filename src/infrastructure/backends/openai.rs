#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::models::AudioClip;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::ChatMessage;
use crate::domain::models::CompletionPrompt;

/// Hosted APIs that answer their index with 404s. These are not probed during
/// health checks.
const OFFICIAL_URLS: [&str; 2] = ["https://api.openai.com", "https://api.groq.com/openai"];

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Model {
    id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ModelListResponse {
    data: Vec<Model>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    _type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for any API that follows OpenAI's chat completion and audio
/// transcription routes. Groq exposes the same routes under `/openai`.
pub struct OpenAI {
    name: BackendName,
    url: String,
    token: String,
    timeout: String,
    client: reqwest::Client,
}

impl OpenAI {
    pub fn new(
        name: BackendName,
        url: &str,
        token: &str,
        timeout: &str,
        request_timeout: u64,
    ) -> Result<OpenAI> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(request_timeout))
            .build()?;

        return Ok(OpenAI {
            name,
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout: timeout.to_string(),
            client,
        });
    }
}

#[async_trait]
impl Backend for OpenAI {
    fn name(&self) -> BackendName {
        return self.name;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let name = self.name;
        if self.url.is_empty() {
            bail!(format!("{name} URL is not defined"));
        }
        if self.token.is_empty() {
            bail!(format!("{name} token is not defined"));
        }

        if OFFICIAL_URLS.contains(&self.url.as_str()) {
            return Ok(());
        }

        let res = self
            .client
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, backend = %name, "Backend is not reachable");
                bail!(format!("{name} is not reachable"));
            }
        };

        if status >= 400 {
            tracing::error!(status = status, backend = %name, "Backend health check failed");
            bail!(format!("{name} health check failed"));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        let res = self
            .client
            .get(format!("{url}/v1/models", url = self.url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<ModelListResponse>()
            .await?;

        let mut models: Vec<String> = res
            .data
            .iter()
            .map(|model| {
                return model.id.to_string();
            })
            .collect();

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<String> {
        let mut response_format = None;
        if prompt.json_response {
            response_format = Some(ResponseFormat {
                _type: "json_object".to_string(),
            });
        }

        let req = CompletionRequest {
            model: prompt.model,
            messages: prompt.messages,
            temperature: prompt.temperature,
            response_format,
            stream: false,
        };

        let res = self
            .client
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .bearer_auth(&self.token)
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                backend = %self.name,
                "Failed to make completion request"
            );
            bail!(format!(
                "Failed to make completion request to {}, status {}",
                self.name,
                status.as_u16()
            ));
        }

        let ores = res.json::<CompletionResponse>().await?;
        tracing::debug!(body = ?ores, "Completion response");

        let content = ores
            .choices
            .into_iter()
            .next()
            .and_then(|choice| return choice.message.content);

        match content {
            Some(text) => return Ok(text),
            None => bail!(format!("{} returned a completion without content", self.name)),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn transcribe(&self, clip: AudioClip) -> Result<String> {
        let file = multipart::Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.mime_type)?;

        let form = multipart::Form::new()
            .part("file", file)
            .text("model", clip.model)
            .text("language", clip.language)
            .text("response_format", "json");

        let res = self
            .client
            .post(format!("{url}/v1/audio/transcriptions", url = self.url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                backend = %self.name,
                "Failed to make transcription request"
            );
            bail!(format!(
                "Failed to make transcription request to {}, status {}",
                self.name,
                status.as_u16()
            ));
        }

        let tres = res.json::<TranscriptionResponse>().await?;

        return Ok(tres.text);
    }
}
