//! Document assembly: translated pages in, a single .docx out.
//!
//! Assembly is split into two stages so the structure is testable without
//! unzipping OOXML:
//!
//! 1. [`plan_document`] — a pure function from the per-file, per-page
//!    structure to a flat list of [`Block`]s (headings, paragraphs, page
//!    breaks) in final document order.
//! 2. [`render_docx`] — mechanical mapping of blocks onto docx-rs
//!    paragraphs, serialised into an in-memory buffer.
//!
//! Document-wide defaults are fixed (Calibri, 11 pt); styling is not a
//! configuration surface of this pipeline.

use crate::error::PipelineError;
use crate::output::TranslatedFile;
use crate::pipeline::normalize::split_paragraphs;
use docx_rs::{BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use std::io::Cursor;
use tracing::debug;

/// Document-wide default font family.
const DEFAULT_FONT: &str = "Calibri";
/// Document-wide default font size, in half-points (11 pt).
const DEFAULT_SIZE_HALF_POINTS: usize = 22;

/// One element of the output document, in final order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Level-1 heading: source file name.
    FileHeading(String),
    /// Level-2 heading: `"Page {n}"`.
    PageHeading(String),
    /// One body paragraph.
    Paragraph(String),
    /// Hard page break terminating a file's section.
    PageBreak,
}

/// Lay out the document: for each file a level-1 heading, for each page a
/// level-2 heading followed by its paragraphs (split on blank-line
/// boundaries, empty segments dropped), and a page break after each file.
///
/// File and page order are taken as given — the caller already holds them
/// in upload/extraction order and nothing here reorders.
pub fn plan_document(files: &[TranslatedFile]) -> Vec<Block> {
    let mut blocks = Vec::new();
    for file in files {
        blocks.push(Block::FileHeading(file.name.clone()));
        for page in &file.pages {
            blocks.push(Block::PageHeading(page.label.clone()));
            for paragraph in split_paragraphs(&page.text) {
                blocks.push(Block::Paragraph(paragraph.to_string()));
            }
        }
        blocks.push(Block::PageBreak);
    }
    blocks
}

/// Serialise blocks into a .docx byte buffer.
pub fn render_docx(blocks: &[Block]) -> Result<Vec<u8>, PipelineError> {
    let mut docx = Docx::new()
        .default_fonts(RunFonts::new().ascii(DEFAULT_FONT))
        .default_size(DEFAULT_SIZE_HALF_POINTS)
        .add_style(heading_style("Heading1", "Heading 1", 32))
        .add_style(heading_style("Heading2", "Heading 2", 26));

    for block in blocks {
        let paragraph = match block {
            Block::FileHeading(text) => Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(text.as_str())),
            Block::PageHeading(text) => Paragraph::new()
                .style("Heading2")
                .add_run(Run::new().add_text(text.as_str())),
            Block::Paragraph(text) => Paragraph::new().add_run(Run::new().add_text(text.as_str())),
            Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| PipelineError::DocxBuild {
            detail: e.to_string(),
        })?;

    let bytes = buffer.into_inner();
    debug!(blocks = blocks.len(), bytes = bytes.len(), "document rendered");
    Ok(bytes)
}

/// Plan and render in one step.
pub fn build_docx(files: &[TranslatedFile]) -> Result<Vec<u8>, PipelineError> {
    render_docx(&plan_document(files))
}

fn heading_style(id: &str, name: &str, size_half_points: usize) -> Style {
    Style::new(id, StyleType::Paragraph)
        .name(name)
        .size(size_half_points)
        .bold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TranslatedPage;

    fn page(n: usize, text: &str) -> TranslatedPage {
        TranslatedPage {
            page_num: n,
            label: format!("Page {n}"),
            text: text.to_string(),
            placeholder: false,
            retries: 0,
        }
    }

    #[test]
    fn round_trip_block_order() {
        let files = vec![
            TranslatedFile {
                name: "F1".into(),
                pages: vec![page(1, "A"), page(2, "B")],
            },
            TranslatedFile {
                name: "F2".into(),
                pages: vec![page(1, "C")],
            },
        ];

        assert_eq!(
            plan_document(&files),
            vec![
                Block::FileHeading("F1".into()),
                Block::PageHeading("Page 1".into()),
                Block::Paragraph("A".into()),
                Block::PageHeading("Page 2".into()),
                Block::Paragraph("B".into()),
                Block::PageBreak,
                Block::FileHeading("F2".into()),
                Block::PageHeading("Page 1".into()),
                Block::Paragraph("C".into()),
                Block::PageBreak,
            ]
        );
    }

    #[test]
    fn blank_line_boundary_yields_two_paragraphs() {
        let files = vec![TranslatedFile {
            name: "F".into(),
            pages: vec![page(1, "Para one\n\nPara two")],
        }];

        let blocks = plan_document(&files);
        let paragraphs: Vec<&Block> = blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .collect();
        assert_eq!(
            paragraphs,
            vec![
                &Block::Paragraph("Para one".into()),
                &Block::Paragraph("Para two".into()),
            ]
        );
    }

    #[test]
    fn empty_page_text_emits_heading_but_no_paragraphs() {
        let files = vec![TranslatedFile {
            name: "F".into(),
            pages: vec![page(1, "")],
        }];

        assert_eq!(
            plan_document(&files),
            vec![
                Block::FileHeading("F".into()),
                Block::PageHeading("Page 1".into()),
                Block::PageBreak,
            ]
        );
    }

    #[test]
    fn every_file_section_ends_with_a_page_break() {
        let files = vec![
            TranslatedFile {
                name: "a.pdf".into(),
                pages: vec![page(1, "x")],
            },
            TranslatedFile {
                name: "b.pdf".into(),
                pages: vec![],
            },
        ];
        let blocks = plan_document(&files);
        let breaks = blocks.iter().filter(|b| **b == Block::PageBreak).count();
        assert_eq!(breaks, 2);
        assert_eq!(blocks.last(), Some(&Block::PageBreak));
    }

    #[test]
    fn rendered_docx_is_a_zip_container() {
        let files = vec![TranslatedFile {
            name: "F".into(),
            pages: vec![page(1, "Hello")],
        }];
        let bytes = build_docx(&files).unwrap();
        // OOXML is a zip archive; PK\x03\x04 is the local-file magic.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn empty_input_still_renders() {
        let bytes = build_docx(&[]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
