#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::DocumentExtractorBox;
use crate::domain::models::InterviewError;
use crate::domain::models::InterviewSettings;
use crate::domain::models::Message;
use crate::domain::models::Upload;
use crate::domain::services::FeedbackSynthesizer;
use crate::domain::services::Interviewer;
use crate::domain::services::ResumeReader;
use crate::domain::services::Transcriber;

const RESUME_FIELD: &str = "resume";
const AUDIO_FIELD: &str = "audio";
const TOO_LARGE_MESSAGE: &str = "File too large";
const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Shared, read-only services. Nothing here changes between requests.
#[derive(Clone)]
pub struct AppState {
    backend_name: BackendName,
    interviewer: Arc<Interviewer>,
    feedback: Arc<FeedbackSynthesizer>,
    resumes: Arc<ResumeReader>,
    transcriber: Arc<Transcriber>,
}

impl AppState {
    pub fn new(
        backend: BackendBox,
        extractor: DocumentExtractorBox,
        settings: InterviewSettings,
    ) -> AppState {
        return AppState {
            backend_name: backend.name(),
            interviewer: Arc::new(Interviewer::new(backend.clone(), settings.clone())),
            feedback: Arc::new(FeedbackSynthesizer::new(
                backend.clone(),
                settings.clone(),
            )),
            resumes: Arc::new(ResumeReader::new(extractor)),
            transcriber: Arc::new(Transcriber::new(backend, settings)),
        };
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationRequest {
    #[serde(default)]
    history: Vec<Message>,
    #[serde(default)]
    resume_text: String,
}

#[derive(Debug, Serialize)]
struct TextResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct ReplyResponse {
    reply: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Client errors keep their own message. Everything else collapses into
    /// the endpoint's generic failure message.
    fn from_interview(err: InterviewError, failure_message: &'static str) -> ApiError {
        if let InterviewError::InputMissing(message) = err {
            tracing::warn!(error = message, "Rejected request");
            return ApiError {
                status: StatusCode::BAD_REQUEST,
                message,
            };
        }

        tracing::error!(error = %err, "{failure_message}");
        return ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: failure_message,
        };
    }

    fn from_multipart(err: MultipartError, missing_message: &'static str) -> ApiError {
        tracing::warn!(error = %err, "Failed to read multipart body");
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError {
                status,
                message: TOO_LARGE_MESSAGE,
            };
        }

        return ApiError {
            status,
            message: missing_message,
        };
    }

    fn from_json(rejection: JsonRejection) -> ApiError {
        tracing::warn!(error = %rejection, "Rejected request body");
        let status = rejection.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError {
                status,
                message: TOO_LARGE_MESSAGE,
            };
        }

        return ApiError {
            status,
            message: INVALID_BODY_MESSAGE,
        };
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        return (self.status, Json(json!({ "error": self.message }))).into_response();
    }
}

/// Reads the first file in `field_name`. A request that is not multipart at
/// all is treated like a form without the field.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
    field_name: &str,
    missing_message: &'static str,
) -> Result<Option<Upload>, ApiError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Request is not multipart");
            return Ok(None);
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(err) => return Err(ApiError::from_multipart(err, missing_message)),
        };

        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().map(|name| return name.to_string());
        let content_type = field.content_type().map(|mime| return mime.to_string());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return Err(ApiError::from_multipart(err, missing_message)),
        };

        return Ok(Some(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
}

async fn upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let upload = read_upload(multipart, RESUME_FIELD, "No file uploaded").await?;
    let text = state
        .resumes
        .read(upload)
        .await
        .map_err(|err| return ApiError::from_interview(err, "Failed to process resume"))?;

    return Ok(Json(TextResponse { text }));
}

async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let upload = read_upload(multipart, AUDIO_FIELD, "No audio provided").await?;
    let text = state
        .transcriber
        .transcribe(upload)
        .await
        .map_err(|err| return ApiError::from_interview(err, "Transcription failed"))?;

    return Ok(Json(TextResponse { text }));
}

async fn chat(
    State(state): State<AppState>,
    req: Result<Json<ConversationRequest>, JsonRejection>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let Json(req) = req.map_err(|rejection| return ApiError::from_json(rejection))?;
    let reply = state
        .interviewer
        .next_reply(&req.history, &req.resume_text)
        .await
        .map_err(|err| return ApiError::from_interview(err, "AI Error - Check TPD Limits"))?;

    return Ok(Json(ReplyResponse { reply }));
}

async fn feedback(
    State(state): State<AppState>,
    req: Result<Json<ConversationRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = req.map_err(|rejection| return ApiError::from_json(rejection))?;
    let report = state
        .feedback
        .synthesize(&req.history, &req.resume_text)
        .await
        .map_err(|err| return ApiError::from_interview(err, "Feedback Generation Failed"))?;

    return Ok(Json(report));
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    return Json(json!({
        "status": "ok",
        "backend": state.backend_name.to_string(),
        "version": env!("CARGO_PKG_VERSION"),
    }));
}

fn routes() -> Router<AppState> {
    return Router::new()
        .route("/upload-resume", post(upload_resume))
        .route("/transcribe", post(transcribe))
        .route("/chat", post(chat))
        .route("/feedback", post(feedback))
        .route("/health", get(health));
}

/// Routes are mounted at the root and under `/api`, which is where the web
/// client calls them.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    return Router::new()
        .merge(routes())
        .nest("/api", routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Interview server shutting down gracefully");
}

pub async fn serve(
    state: AppState,
    host: &str,
    port: u16,
    max_upload_bytes: usize,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(
        backend = %state.backend_name,
        "Interview server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(state, max_upload_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    return Ok(());
}
