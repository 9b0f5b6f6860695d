use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use super::truncate_resume;
use super::ResumeReader;
use crate::domain::models::DocumentExtractor;
use crate::domain::models::InterviewError;
use crate::domain::models::Upload;

struct PlainText {}

impl DocumentExtractor for PlainText {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        return Ok(String::from_utf8(bytes.to_vec())?);
    }
}

struct Broken {}

impl DocumentExtractor for Broken {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String> {
        bail!("corrupt xref table");
    }
}

fn upload(text: &str) -> Upload {
    return Upload {
        file_name: Some("resume.pdf".to_string()),
        content_type: Some("application/pdf".to_string()),
        bytes: text.as_bytes().to_vec(),
    };
}

#[test]
fn it_keeps_resumes_when_unlimited() {
    assert_eq!(truncate_resume("abcdef", 0), "abcdef");
}

#[test]
fn it_truncates_resumes() {
    assert_eq!(truncate_resume("abcdef", 3), "abc");
    assert_eq!(truncate_resume("abc", 3), "abc");
    assert_eq!(truncate_resume("ab", 3), "ab");
}

#[test]
fn it_truncates_on_char_boundaries() {
    assert_eq!(truncate_resume("Zürich café", 2), "Zü");
    assert_eq!(truncate_resume("日本語のテキスト", 3), "日本語");
}

#[tokio::test]
async fn it_reads_uploaded_resumes() -> Result<()> {
    let reader = ResumeReader::new(Arc::new(PlainText {}));
    let res = reader.read(Some(upload("Jane Doe"))).await?;

    assert_eq!(res, "Jane Doe".to_string());

    return Ok(());
}

#[tokio::test]
async fn it_fails_without_an_upload() {
    let reader = ResumeReader::new(Arc::new(PlainText {}));

    let res = reader.read(None).await;
    assert!(matches!(res, Err(InterviewError::InputMissing("No file uploaded"))));

    let res = reader.read(Some(Upload::default())).await;
    assert!(matches!(res, Err(InterviewError::InputMissing("No file uploaded"))));
}

#[tokio::test]
async fn it_surfaces_extraction_failures() {
    let reader = ResumeReader::new(Arc::new(Broken {}));
    let res = reader.read(Some(upload("garbage"))).await;

    assert!(matches!(res, Err(InterviewError::UpstreamFailure(_))));
}
