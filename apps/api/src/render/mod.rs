// Document Renderer: resume document → draw operations → paginated lines → PDF bytes.
// Pure and synchronous. Callers on the async runtime must use spawn_blocking.

pub mod document;
pub mod font_metrics;
pub mod layout;
pub mod pdf;

use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::models::resume::ResumeDocument;

pub use layout::PageGeometry;
pub use pdf::{LopdfBackend, PdfBackend};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Malformed document: required field `personalInfo.{field}` is missing")]
    MalformedDocument { field: &'static str },

    #[error("Render sink failure: {0}")]
    SinkFailure(#[from] std::io::Error),

    #[error("PDF encoding failed: {0}")]
    Encoding(String),
}

/// What a successful render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub pages: usize,
    pub lines: usize,
}

/// Renders `doc` onto `geometry` and writes the encoded document to `sink`.
///
/// Nothing reaches the sink if the document is malformed. A sink failure is
/// returned as-is and never retried.
pub fn render_resume(
    doc: &ResumeDocument,
    geometry: &PageGeometry,
    backend: &dyn PdfBackend,
    sink: &mut dyn Write,
) -> Result<RenderStats, RenderError> {
    let ops = document::compose(doc)?;
    let pages = layout::lay_out(&ops, geometry);

    let stats = RenderStats {
        pages: pages.len(),
        lines: pages.iter().map(|p| p.lines.len()).sum(),
    };

    backend.write_pdf(&doc.title, &pages, geometry, sink)?;

    debug!(
        "Rendered resume '{}': {} ops, {} pages, {} lines",
        doc.title,
        ops.len(),
        stats.pages,
        stats.lines
    );
    Ok(stats)
}

/// Renders `doc` with the default `lopdf` backend into an in-memory buffer.
pub fn render_pdf(doc: &ResumeDocument, geometry: &PageGeometry) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::new();
    render_resume(doc, geometry, &LopdfBackend, &mut buffer)?;
    Ok(buffer)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, PersonalInfo, Skill, SkillLevel};

    fn sample_doc() -> ResumeDocument {
        ResumeDocument {
            title: "Backend CV".to_string(),
            personal_info: PersonalInfo {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                email: Some("ada@example.com".to_string()),
                phone: Some("555-0100".to_string()),
                summary: Some("Analyst of engines.".to_string()),
                ..Default::default()
            },
            experience: vec![Experience {
                company: "Analytical Engine Co".to_string(),
                position: "Programmer".to_string(),
                start_date: "1842".to_string(),
                end_date: Some("1843".to_string()),
                current: false,
                description: "Wrote the first published algorithm.".to_string(),
                achievements: vec!["Computed Bernoulli numbers".to_string()],
            }],
            skills: vec![Skill {
                name: "Mathematics".to_string(),
                level: SkillLevel::Expert,
                category: "Technical".to_string(),
            }],
            ..Default::default()
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_render_is_byte_identical_across_runs() {
        let doc = sample_doc();
        let first = render_pdf(&doc, &PageGeometry::a4()).unwrap();
        let second = render_pdf(&doc, &PageGeometry::a4()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rendered_pdf_contains_sections() {
        let bytes = render_pdf(&sample_doc(), &PageGeometry::a4()).unwrap();
        assert!(contains(&bytes, b"(Ada Lovelace) Tj"));
        assert!(contains(&bytes, b"(Professional Summary) Tj"));
        assert!(contains(&bytes, b"(Professional Experience) Tj"));
        // Parenthesis escaping is the encoder's business; only check the words.
        assert!(contains(&bytes, b"Mathematics"));
        assert!(contains(&bytes, b"Expert"));
        assert!(!contains(&bytes, b"(Education) Tj"));
        assert!(!contains(&bytes, b"(Projects) Tj"));
    }

    #[test]
    fn test_malformed_document_writes_nothing() {
        let mut doc = sample_doc();
        doc.personal_info.first_name = None;
        let mut sink = Vec::new();
        let result = render_resume(&doc, &PageGeometry::a4(), &LopdfBackend, &mut sink);
        assert!(matches!(
            result,
            Err(RenderError::MalformedDocument { field: "firstName" })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_long_document_paginates() {
        let mut doc = sample_doc();
        let entry = doc.experience[0].clone();
        doc.experience = std::iter::repeat(entry).take(40).collect();

        let mut sink = Vec::new();
        let stats = render_resume(&doc, &PageGeometry::a4(), &LopdfBackend, &mut sink).unwrap();
        assert!(stats.pages > 1, "expected several pages, got {}", stats.pages);
        assert!(contains(&sink, format!("/Count {}", stats.pages).as_bytes()));
    }

    #[test]
    fn test_closed_sink_surfaces_as_sink_failure() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::ConnectionReset.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = render_resume(&sample_doc(), &PageGeometry::a4(), &LopdfBackend, &mut Closed);
        assert!(matches!(result, Err(RenderError::SinkFailure(_))));
    }
}
