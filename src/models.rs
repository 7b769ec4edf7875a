use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
        }
    }
}

/// One unit of output content in the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullet(String),
    Numbered { index: usize, text: String },
    Media { kind: MediaKind, src: Option<String> },
}

impl Block {
    /// The single line this block contributes to the document.
    pub fn display_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph(text) => text.clone(),
            Block::Bullet(text) => format!("• {}", text),
            Block::Numbered { index, text } => format!("{}. {}", index, text),
            Block::Media { kind, src } => {
                let label = kind.label();
                match src {
                    Some(src) => format!("[{} Placeholder: {}]", label, src),
                    None => format!("[{} Placeholder: {} URL]", label, label),
                }
            }
        }
    }
}
