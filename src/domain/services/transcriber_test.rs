use std::sync::Arc;

use anyhow::Result;
use mockito::Matcher;

use super::Transcriber;
use crate::domain::models::BackendName;
use crate::domain::models::InterviewError;
use crate::domain::models::InterviewSettings;
use crate::domain::models::Upload;
use crate::infrastructure::backends::openai::OpenAI;

fn transcriber(url: &str) -> Transcriber {
    let backend = OpenAI::new(BackendName::Groq, url, "abc", "200", 2000).unwrap();
    return Transcriber::new(Arc::new(backend), InterviewSettings::default());
}

#[test]
fn it_defaults_file_name_and_mime_type() {
    let clip = transcriber("http://localhost").to_clip(Upload {
        file_name: Some("".to_string()),
        content_type: None,
        bytes: vec![1],
    });

    assert_eq!(clip.file_name, "audio.wav");
    assert_eq!(clip.mime_type, "audio/wav");
    assert_eq!(clip.model, "whisper-large-v3");
    assert_eq!(clip.language, "en");
}

#[test]
fn it_keeps_uploaded_file_name() {
    let clip = transcriber("http://localhost").to_clip(Upload {
        file_name: Some("answer.webm".to_string()),
        content_type: Some("audio/webm".to_string()),
        bytes: vec![1],
    });

    assert_eq!(clip.file_name, "answer.webm");
    assert_eq!(clip.mime_type, "audio/webm");
}

#[tokio::test]
async fn it_fails_without_audio() {
    let res = transcriber("http://localhost").transcribe(None).await;
    assert!(matches!(res, Err(InterviewError::InputMissing("No audio provided"))));

    let res = transcriber("http://localhost")
        .transcribe(Some(Upload::default()))
        .await;
    assert!(matches!(res, Err(InterviewError::InputMissing("No audio provided"))));
}

#[tokio::test]
async fn it_transcribes_uploads() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/audio/transcriptions")
        .match_body(Matcher::Regex(r#"name="language"\r\n\r\nen"#.to_string()))
        .with_status(200)
        .with_body(r#"{"text":"I led the Kafka migration."}"#)
        .create();

    let res = transcriber(&server.url())
        .transcribe(Some(Upload {
            file_name: None,
            content_type: None,
            bytes: vec![82, 73, 70, 70],
        }))
        .await?;
    mock.assert();

    assert_eq!(res, "I led the Kafka migration.".to_string());

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_backend_failures() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/audio/transcriptions")
        .with_status(503)
        .create();

    let res = transcriber(&server.url())
        .transcribe(Some(Upload {
            file_name: None,
            content_type: None,
            bytes: vec![1],
        }))
        .await;
    mock.assert();

    assert!(matches!(res, Err(InterviewError::UpstreamFailure(_))));
}
