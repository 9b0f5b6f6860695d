use std::sync::Arc;

use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::feedback_fixture;
use test_utils::resume_fixture;

use super::parse_report;
use super::FeedbackSynthesizer;
use crate::domain::models::feedback_schema;
use crate::domain::models::BackendName;
use crate::domain::models::FeedbackReport;
use crate::domain::models::InterviewError;
use crate::domain::models::InterviewSettings;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::infrastructure::backends::openai::OpenAI;

fn synthesizer(url: &str) -> FeedbackSynthesizer {
    let backend = OpenAI::new(BackendName::Groq, url, "abc", "200", 2000).unwrap();
    return FeedbackSynthesizer::new(Arc::new(backend), InterviewSettings::default());
}

fn completion(content: &str) -> String {
    return json!({ "choices": [{ "message": { "content": content } }] }).to_string();
}

fn transcript() -> Vec<Message> {
    return vec![
        Message::new(Sender::User, "Hi."),
        Message::new(Sender::Ai, "Welcome! What is your core stack?"),
        Message::new(Sender::User, "Rust and Kafka."),
    ];
}

#[tokio::test]
async fn it_returns_well_formed_reports() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({
                "model": "llama-3.1-8b-instant",
                "response_format": { "type": "json_object" },
            })),
            Matcher::Regex("Rust and Kafka".to_string()),
            Matcher::Regex("Acme Payments".to_string()),
        ]))
        .with_status(200)
        .with_body(completion(feedback_fixture()))
        .create();

    let res = synthesizer(&server.url())
        .synthesize(&transcript(), resume_fixture())
        .await?;
    mock.assert();

    let report_keys = [
        "overall_score",
        "detailed_metrics",
        "section_analysis",
        "strengths",
        "areas_for_improvement",
        "critical_missing_points",
        "hiring_verdict",
        "summary",
    ];
    let keys = res.as_object().unwrap().keys().collect::<Vec<&String>>();
    assert_eq!(keys.len(), report_keys.len());
    for key in report_keys {
        assert!(feedback_schema().contains(&format!("\"{key}\":")));
        assert!(res.get(key).is_some(), "missing {key}");
    }

    let report = FeedbackReport::from_value(&res)?;
    for (_, score) in report.scores() {
        assert!(score <= 100);
    }

    insta::assert_json_snapshot!(res["detailed_metrics"], @r###"
    {
      "communication_clarity": 85,
      "experience_relevance": 80,
      "problem_solving": 74,
      "technical_depth": 72
    }
    "###);

    return Ok(());
}

#[tokio::test]
async fn it_rejects_malformed_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("Sure! Here is the feedback: {\"overall_score\": 80"))
        .create();

    let res = synthesizer(&server.url())
        .synthesize(&transcript(), resume_fixture())
        .await;
    mock.assert();

    assert!(matches!(
        res,
        Err(InterviewError::MalformedUpstreamResponse(_))
    ));
}

#[tokio::test]
async fn it_surfaces_backend_failures() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .create();

    let res = synthesizer(&server.url())
        .synthesize(&transcript(), resume_fixture())
        .await;
    mock.assert();

    assert!(matches!(res, Err(InterviewError::UpstreamFailure(_))));
}

#[test]
fn it_passes_through_reports_with_the_wrong_shape() -> Result<()> {
    let res = parse_report(r#"{"score": "great", "verdict": "Hire"}"#)?;

    assert_eq!(res, json!({ "score": "great", "verdict": "Hire" }));

    return Ok(());
}

#[test]
fn it_rejects_json_that_is_not_an_object() {
    for reply in ["[1, 2, 3]", "\"Hire\"", "42", "null"] {
        let res = parse_report(reply);
        assert!(matches!(
            res,
            Err(InterviewError::MalformedUpstreamResponse(_))
        ));
    }
}

#[test]
fn it_trims_whitespace_around_reports() -> Result<()> {
    let res = parse_report(&format!("\n  {}\n", feedback_fixture()))?;
    assert_eq!(res["hiring_verdict"], json!("Hire"));

    return Ok(());
}
