#[cfg(test)]
#[path = "pdf_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::DocumentExtractor;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Default)]
pub struct Pdf {}

impl DocumentExtractor for Pdf {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        if !bytes.starts_with(PDF_MAGIC) {
            bail!("Uploaded file is not a PDF");
        }

        let pages = match pdf_extract::extract_text_from_mem_by_pages(bytes) {
            Ok(pages) => pages,
            Err(err) => {
                tracing::error!(error = %err, "Failed to extract PDF text");
                bail!(format!("Failed to extract PDF text: {err}"));
            }
        };

        if pages.is_empty() {
            bail!("PDF has no readable pages");
        }

        // Text is read page by page, so each page starts on a new line.
        let text = pages
            .iter()
            .map(|page| return page.trim())
            .filter(|page| return !page.is_empty())
            .collect::<Vec<&str>>()
            .join("\n");

        return Ok(text);
    }
}
