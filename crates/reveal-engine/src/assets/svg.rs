// assets/svg.rs
//
// Turns fetched SVG text into the markup mounted on the stage: isolates the
// root <svg>, makes it cover the viewport, hides every layer up front and
// counts the layers the revealer will animate.

use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};

use crate::api::config::RevealConfig;
use crate::api::error::ParseError;

/// CSS selector matching layer elements: rects filled with a pattern reference.
pub const LAYER_SELECTOR: &str = r#"rect[fill^="url("]"#;

/// Fit applied to the root so the collage covers the viewport without letterboxing.
pub const COVER_ASPECT_RATIO: &str = "xMidYMid slice";

const ASPECT_RATIO_ATTR: &[u8] = b"preserveAspectRatio";

/// Layer predicate, equivalent to `LAYER_SELECTOR`.
pub fn is_layer(tag: &str, fill: Option<&str>) -> bool {
    tag == "rect" && fill.is_some_and(|fill| fill.starts_with("url("))
}

/// SVG markup ready to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSvg {
    /// The root `<svg>` element, serialized.
    pub markup: String,
    /// Number of layer elements inside the root.
    pub layer_count: usize,
}

/// Style rule inserted as the root's first child.
pub fn hidden_layer_css(reveal: &RevealConfig) -> String {
    format!(
        "\n  {LAYER_SELECTOR} {{\n    opacity: 0;\n    transition: opacity {}s {};\n  }}\n",
        reveal.fade_secs, reveal.fade_easing
    )
}

/// Extract and prepare the first `<svg>` element of `text`.
///
/// Anything before the root (XML prolog, doctype, comments, wrappers) and
/// anything after its closing tag is dropped.
pub fn prepare_svg(text: &str, reveal: &RevealConfig) -> Result<PreparedSvg, ParseError> {
    let mut reader = Reader::from_str(text);
    // Bare `&` in text is common in exported SVGs and browsers accept it.
    reader.config_mut().allow_dangling_amp = true;
    let mut writer = Writer::new(Vec::with_capacity(text.len() + 128));
    let css = hidden_layer_css(reveal);

    // Element depth inside the root; 0 means outside of it.
    let mut depth = 0usize;
    let mut found = false;
    let mut layer_count = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| ParseError::Malformed {
            position: reader.error_position(),
            message: e.to_string(),
        })?;
        let position = reader.buffer_position();

        match event {
            Event::Eof => break,
            Event::Start(elem) if depth == 0 => {
                if is_svg(&elem) {
                    found = true;
                    depth = 1;
                    write_root_open(&mut writer, &elem, &css, position)?;
                }
            }
            Event::Empty(elem) if depth == 0 => {
                if is_svg(&elem) {
                    found = true;
                    write_root_open(&mut writer, &elem, &css, position)?;
                    write(
                        &mut writer,
                        Event::End(BytesEnd::new(element_name(&elem))),
                        position,
                    )?;
                }
            }
            Event::Start(elem) => {
                depth += 1;
                layer_count += usize::from(matches_layer(&elem));
                write(&mut writer, Event::Start(elem), position)?;
            }
            Event::Empty(elem) => {
                layer_count += usize::from(matches_layer(&elem));
                write(&mut writer, Event::Empty(elem), position)?;
            }
            Event::End(elem) if depth > 0 => {
                depth -= 1;
                write(&mut writer, Event::End(elem), position)?;
            }
            other if depth > 0 => write(&mut writer, other, position)?,
            _ => {}
        }

        if found && depth == 0 {
            break;
        }
    }

    if !found {
        return Err(ParseError::NoRootElement);
    }
    if depth > 0 {
        return Err(ParseError::Malformed {
            position: reader.buffer_position(),
            message: "unclosed <svg> element".to_string(),
        });
    }

    let markup = String::from_utf8(writer.into_inner()).map_err(|e| ParseError::Malformed {
        position: e.utf8_error().valid_up_to() as u64,
        message: e.to_string(),
    })?;
    log::debug!("prepared SVG root with {} layers", layer_count);

    Ok(PreparedSvg {
        markup,
        layer_count,
    })
}

// HTML parsing lowercases tag names, so `<SVG>` and `<RECT>` match too.
fn is_svg(elem: &BytesStart<'_>) -> bool {
    elem.local_name().as_ref().eq_ignore_ascii_case(b"svg")
}

fn element_name(elem: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(elem.name().as_ref()).into_owned()
}

fn matches_layer(elem: &BytesStart<'_>) -> bool {
    let tag = String::from_utf8_lossy(elem.local_name().as_ref()).to_ascii_lowercase();
    let fill = elem
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"fill")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned());
    is_layer(&tag, fill.as_deref())
}

/// Root start tag with the cover fit applied, followed by the hiding style.
fn write_root_open(
    writer: &mut Writer<Vec<u8>>,
    elem: &BytesStart<'_>,
    css: &str,
    position: u64,
) -> Result<(), ParseError> {
    let mut root = BytesStart::new(element_name(elem));
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| ParseError::Malformed {
            position,
            message: e.to_string(),
        })?;
        if attr.key.as_ref() != ASPECT_RATIO_ATTR {
            root.push_attribute(attr);
        }
    }
    root.push_attribute(("preserveAspectRatio", COVER_ASPECT_RATIO));

    write(writer, Event::Start(root), position)?;
    write(writer, Event::Start(BytesStart::new("style")), position)?;
    write(writer, Event::Text(BytesText::from_escaped(css)), position)?;
    write(writer, Event::End(BytesEnd::new("style")), position)
}

/// `position` is the reader offset just past the event being written.
fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>, position: u64) -> Result<(), ParseError> {
    writer.write_event(event).map_err(|e| ParseError::Malformed {
        position,
        message: e.to_string(),
    })
}
