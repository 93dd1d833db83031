use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::RacunError;

/// Attributes of an element as `(local name, unescaped value)` pairs.
pub type Attributes = Vec<(String, String)>;

/// Receives structural callbacks from [`walk`].
///
/// `path` holds the local names (namespace prefix stripped) of all open
/// elements, ending with the element the callback is about.
pub trait XmlSink {
    fn open(&mut self, _path: &[String], _attrs: &Attributes) {}

    /// `text` is the element's own text content, trimmed.
    fn close(&mut self, path: &[String], text: &str);
}

pub(crate) fn malformed(e: impl std::fmt::Display) -> RacunError {
    RacunError::MalformedDocument(e.to_string())
}

/// Walk `xml`, reporting every element to `sink`.
///
/// Fails on XML syntax errors, mismatched or unclosed elements and
/// documents without a root element.
pub fn walk<S: XmlSink>(xml: &str, sink: &mut S) -> Result<(), RacunError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(local_name(&e)?);
                texts.push(String::new());
                seen_root = true;
                sink.open(&path, &attributes(&e)?);
            }
            Ok(Event::Empty(e)) => {
                path.push(local_name(&e)?);
                seen_root = true;
                sink.open(&path, &attributes(&e)?);
                sink.close(&path, "");
                path.pop();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(malformed)?;
                if let Some(buf) = texts.last_mut() {
                    buf.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e).map_err(malformed)?;
                if let Some(buf) = texts.last_mut() {
                    buf.push_str(text);
                }
            }
            Ok(Event::End(_)) => {
                let text = texts.pop().unwrap_or_default();
                sink.close(&path, text.trim());
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(RacunError::MalformedDocument(format!(
                    "XML parse error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(RacunError::MalformedDocument(format!(
            "unexpected end of document inside <{open}>"
        )));
    }
    if !seen_root {
        return Err(RacunError::MalformedDocument(
            "document has no root element".into(),
        ));
    }
    Ok(())
}

fn local_name(e: &BytesStart<'_>) -> Result<String, RacunError> {
    std::str::from_utf8(e.local_name().as_ref())
        .map(str::to_string)
        .map_err(malformed)
}

fn attributes(e: &BytesStart<'_>) -> Result<Attributes, RacunError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(malformed)?
            .to_string();
        let value = attr.unescape_value().map_err(malformed)?.into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

/// Value of the attribute with local name `key`.
pub fn attr<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Whether any open element on `path` has local name `name`.
pub fn within(path: &[String], name: &str) -> bool {
    path.iter().any(|p| p == name)
}

/// Local name of the element `depth` levels above the current one
/// (0 = current element), or `""` above the root.
pub fn ancestor(path: &[String], depth: usize) -> &str {
    path.len()
        .checked_sub(depth + 1)
        .map(|i| path[i].as_str())
        .unwrap_or("")
}

/// Store `text` in `slot` unless a value was already captured.
pub fn first(slot: &mut Option<String>, text: &str) {
    if slot.is_none() {
        *slot = Some(text.to_string());
    }
}
