use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::convert::Generated;
use crate::render::DOCX_MIME;

const APP_TITLE: &str = "Rapid Web Scraper to DOCX";

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
input[type=text]{width:100%;padding:.4rem;box-sizing:border-box}\
textarea{width:100%;height:300px;box-sizing:border-box}\
.error{color:#b00020}.success{color:#1b5e20}";

/// The input form, optionally prefilled and with an error line above it.
pub fn form_page(url: &str, error: Option<&str>) -> String {
    let error = error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
        .unwrap_or_default();
    layout(&format!("{}{}", form(url), error))
}

/// Form, success line, read-only preview and a download link carrying the
/// document itself.
pub fn result_page(url: &str, generated: &Generated) -> String {
    let name = escape_html(&generated.file_name);
    let body = format!(
        concat!(
            "{form}",
            r#"<p class="success">DOCX file '{name}' generated successfully!</p>"#,
            r#"<p>{count} blocks extracted from {title}.</p>"#,
            r#"<label for="preview">DOCX Content</label>"#,
            r#"<textarea id="preview" readonly>{preview}</textarea>"#,
            r#"<p><a href="data:{mime};base64,{data}" download="{name}">Download DOCX</a></p>"#,
        ),
        form = form(url),
        name = name,
        count = generated.blocks.len(),
        title = escape_html(&generated.title),
        preview = escape_html(&generated.preview),
        mime = DOCX_MIME,
        data = STANDARD.encode(&generated.docx),
    );
    layout(&body)
}

fn form(url: &str) -> String {
    format!(
        concat!(
            r#"<form method="post" action="/generate">"#,
            r#"<label for="url">Enter the URL of the webpage to scrape</label>"#,
            r#"<input type="text" id="url" name="url" value="{}">"#,
            r#"<p><button type="submit">Generate and View DOCX</button></p>"#,
            "</form>",
        ),
        escape_html(url)
    )
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{style}</style></head><body><h1>{title}</h1>{body}</body></html>",
        title = APP_TITLE,
        style = STYLE,
        body = body
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Block;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(escape_html("bücher • 日本 & co"), "bücher • 日本 &amp; co");
    }

    #[test]
    fn form_shows_escaped_error_and_value() {
        let html = form_page("\"><script>", Some("Please enter a valid URL."));
        assert!(html.contains(r#"<p class="error">Please enter a valid URL.</p>"#));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn result_embeds_document_for_download() {
        let generated = Generated {
            file_name: "example_com.docx".into(),
            title: "example.com".into(),
            blocks: vec![Block::Paragraph("a < b".into())],
            docx: b"PK\x03\x04".to_vec(),
            preview: "example.com\na < b".into(),
        };
        let html = result_page("https://example.com", &generated);

        assert!(html.contains("DOCX file 'example_com.docx' generated successfully!"));
        assert!(html.contains("<textarea id=\"preview\" readonly>example.com\na &lt; b</textarea>"));
        assert!(html.contains(&format!("data:{};base64,UEsDBA==", DOCX_MIME)));
        assert!(html.contains(r#"download="example_com.docx""#));
    }
}
