//! PDF backend: encodes laid-out pages as PDF bytes.
//!
//! The renderer only talks to the `PdfBackend` trait. `LopdfBackend` builds the
//! object graph with `lopdf` using the three standard Helvetica faces, so no
//! font program is embedded and output is byte-for-byte deterministic.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::render::font_metrics::{get_metrics, FontFace};
use crate::render::layout::{LaidOutPage, PageGeometry, PlacedLine};
use crate::render::RenderError;

const PRODUCER: &str = "CVForge";

/// Pages in, bytes out.
pub trait PdfBackend: Send + Sync {
    fn write_pdf(
        &self,
        title: &str,
        pages: &[LaidOutPage],
        geometry: &PageGeometry,
        sink: &mut dyn Write,
    ) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    fn write_pdf(
        &self,
        title: &str,
        pages: &[LaidOutPage],
        geometry: &PageGeometry,
        sink: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let mut document = build_document(title, pages, geometry)?;

        // Serialize fully before touching the sink so encoder failures and
        // sink failures stay distinguishable.
        let mut buffer = Vec::new();
        document
            .save_to(&mut buffer)
            .map_err(|e| RenderError::Encoding(e.to_string()))?;

        sink.write_all(&buffer)?;
        sink.flush()?;
        Ok(())
    }
}

fn build_document(
    title: &str,
    pages: &[LaidOutPage],
    geometry: &PageGeometry,
) -> Result<Document, RenderError> {
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in FontFace::ALL {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = document.add_object(dictionary! { "Font" => fonts });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, geometry);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encoding(e.to_string()))?;
        let content_id = document.add_object(Stream::new(lopdf::Dictionary::new(), encoded));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let info_id = document.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::String(to_win_ansi(PRODUCER), StringFormat::Literal),
    });
    document.trailer.set("Info", info_id);

    Ok(document)
}

fn page_content(page: &LaidOutPage, geometry: &PageGeometry) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 4);
    for line in &page.lines {
        push_line(&mut operations, line, geometry);
    }
    Content { operations }
}

fn push_line(operations: &mut Vec<Operation>, line: &PlacedLine, geometry: &PageGeometry) {
    if line.text.is_empty() {
        return;
    }
    let baseline = line.y + get_metrics(line.face).ascender_em * line.size;
    let pdf_y = geometry.height - baseline;

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![
            Object::Name(line.face.resource_name().as_bytes().to_vec()),
            line.size.into(),
        ],
    ));
    operations.push(Operation::new("Td", vec![line.x.into(), pdf_y.into()]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// Maps text to WinAnsiEncoding bytes. Latin-1 passes through, the common
/// typographic punctuation gets its WinAnsi slot, everything else becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_line_page(text: &str) -> LaidOutPage {
        LaidOutPage {
            lines: vec![PlacedLine {
                text: text.to_string(),
                face: FontFace::Bold,
                size: 24.0,
                x: 50.0,
                y: 50.0,
            }],
        }
    }

    fn encode(pages: &[LaidOutPage]) -> Vec<u8> {
        let mut out = Vec::new();
        LopdfBackend
            .write_pdf("Test", pages, &PageGeometry::a4(), &mut out)
            .unwrap();
        out
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_output_is_a_pdf() {
        let bytes = encode(&[one_line_page("Ada Lovelace")]);
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_text_is_written_uncompressed() {
        let bytes = encode(&[one_line_page("Ada Lovelace")]);
        assert!(contains(&bytes, b"(Ada Lovelace) Tj"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
    }

    #[test]
    fn test_page_count_matches_input() {
        let bytes = encode(&[one_line_page("one"), one_line_page("two")]);
        assert!(contains(&bytes, b"/Count 2"));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let pages = [one_line_page("Same every time")];
        assert_eq!(encode(&pages), encode(&pages));
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(to_win_ansi("• ok"), vec![0x95, b' ', b'o', b'k']);
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("日"), vec![b'?']);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let result = LopdfBackend.write_pdf(
            "Test",
            &[one_line_page("x")],
            &PageGeometry::a4(),
            &mut BrokenPipe,
        );
        assert!(matches!(result, Err(RenderError::SinkFailure(_))));
    }
}
