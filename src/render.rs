use std::io::Cursor;

use docx_rs::{
    read_docx, DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild, Style, StyleType,
};

use crate::convert::ConvertError;
use crate::models::Block;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const LIST_BULLET_STYLE: &str = "ListBullet";
const LIST_NUMBER_STYLE: &str = "ListNumber";

// Half-points, so 32 is 16pt.
const HEADING_SIZES: [usize; 4] = [32, 26, 24, 22];

/// Build the document: one level-1 heading naming `title`, then one
/// paragraph per block in order.
pub fn render_docx(title: &str, blocks: &[Block]) -> Result<Vec<u8>, ConvertError> {
    let mut docx = with_styles(Docx::new()).add_paragraph(heading(1, title));

    for block in blocks {
        let text = block.display_text();
        let paragraph = match block {
            Block::Heading { level, .. } => heading(*level, &text),
            Block::Bullet(_) => plain(&text).style(LIST_BULLET_STYLE),
            Block::Numbered { .. } => plain(&text).style(LIST_NUMBER_STYLE),
            Block::Paragraph(_) | Block::Media { .. } => plain(&text),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ConvertError::Render(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Text of every body paragraph of a DOCX, one per line.
pub fn preview_text(docx: &[u8]) -> Result<String, ConvertError> {
    let docx = read_docx(docx).map_err(|e| ConvertError::Render(format!("{:?}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn with_styles(mut docx: Docx) -> Docx {
    for (idx, size) in HEADING_SIZES.iter().enumerate() {
        let level = idx + 1;
        docx = docx.add_style(
            Style::new(format!("Heading{}", level), StyleType::Paragraph)
                .name(format!("Heading {}", level))
                .size(*size)
                .bold(),
        );
    }
    docx.add_style(Style::new(LIST_BULLET_STYLE, StyleType::Paragraph).name("List Bullet"))
        .add_style(Style::new(LIST_NUMBER_STYLE, StyleType::Paragraph).name("List Number"))
}

fn heading(level: u8, text: &str) -> Paragraph {
    plain(text).style(&format!("Heading{}", level))
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut parts = Vec::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }
    parts.join("")
}
