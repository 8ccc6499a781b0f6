use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Parser, TagEnd};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use scraper::{Html, Selector};

use crate::{clean_text, ExtractionError};

/// Reads a source document and returns its normalised text.
///
/// Supports plain text, Markdown, HTML and `.docx`; PDF requires the `pdf` feature.
pub async fn extract_text(path: impl AsRef<Path>) -> Result<String, ExtractionError> {
    let path = path.as_ref().to_path_buf();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    tracing::info!(path = %path.display(), "extracting text");
    let raw = match extension.as_str() {
        "txt" | "text" => read_to_string(&path).await?,
        "md" | "markdown" => markdown_to_text(&read_to_string(&path).await?),
        "html" | "htm" => html_to_text(&read_to_string(&path).await?),
        "docx" => blocking(path.clone(), docx_to_text).await?,
        "pdf" => blocking(path.clone(), pdf_to_text).await?,
        _ => return Err(ExtractionError::Unsupported { path, extension }),
    };

    Ok(clean_text(&raw))
}

async fn read_to_string(path: &Path) -> Result<String, ExtractionError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ExtractionError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn blocking(
    path: PathBuf,
    parse: fn(&Path) -> Result<String, ExtractionError>,
) -> Result<String, ExtractionError> {
    let task_path = path.clone();
    tokio::task::spawn_blocking(move || parse(&task_path))
        .await
        .map_err(|err| ExtractionError::Parse {
            path,
            reason: err.to_string(),
        })?
}

fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push('\n'),
            _ => {}
        }
    }
    out
}

fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    match Selector::parse("body") {
        Ok(body) => document
            .select(&body)
            .flat_map(|el| el.text())
            .collect::<Vec<_>>()
            .join(" "),
        Err(_) => document.root_element().text().collect::<Vec<_>>().join(" "),
    }
}

fn docx_to_text(path: &Path) -> Result<String, ExtractionError> {
    let parse_err = |reason: String| ExtractionError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|source| ExtractionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|err| parse_err(err.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|err| parse_err(err.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|err| parse_err(err.to_string()))?;

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(tag)) if tag.name().as_ref() == b"w:t" => in_text = true,
            Ok(XmlEvent::End(tag)) if tag.name().as_ref() == b"w:t" => in_text = false,
            Ok(XmlEvent::End(tag)) if tag.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
            }
            Ok(XmlEvent::Empty(tag)) if tag.name().as_ref() == b"w:tab" => current.push(' '),
            Ok(XmlEvent::Text(text)) if in_text => {
                let text = text.unescape().map_err(|err| parse_err(err.to_string()))?;
                current.push_str(&text);
            }
            Ok(XmlEvent::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(parse_err(err.to_string())),
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(feature = "pdf")]
fn pdf_to_text(path: &Path) -> Result<String, ExtractionError> {
    pdf_extract::extract_text(path).map_err(|err| ExtractionError::Parse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

#[cfg(not(feature = "pdf"))]
fn pdf_to_text(path: &Path) -> Result<String, ExtractionError> {
    Err(ExtractionError::Unsupported {
        path: path.to_path_buf(),
        extension: "pdf (enable the `pdf` feature)".to_string(),
    })
}
