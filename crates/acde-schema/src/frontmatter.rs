//! # Front-Matter Parsing
//!
//! A document starts with a header block delimited by `---` lines, holding
//! a YAML mapping, followed by free-form body text:
//!
//! ```text
//! ---
//! description: "Generate an SCD2 merge"
//! mode: agent
//! ---
//!
//! Body text...
//! ```
//!
//! Extraction and decoding are separate steps. [`split_header`] only finds
//! the delimiters and never fails; [`decode_header`] turns the enclosed text
//! into a mapping or a typed [`ParseError`]. [`parse_document`] composes the
//! two.

use acde_core::ParseError;
use serde_yaml::{Mapping, Value};

/// The delimiter line.
pub const MARKER: &str = "---";

/// A document split at its header delimiters, without decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSplit<'a> {
    /// Text between the opening and closing marker lines.
    pub header: &'a str,
    /// Everything after the closing marker line.
    pub body: &'a str,
}

/// A document read from disk, with its header decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub raw_header: String,
    /// `None` when the document has no header block.
    pub metadata: Option<Mapping>,
    pub body: String,
}

fn is_marker(line: &str) -> bool {
    line.trim_end() == MARKER
}

/// Locate the header block anchored at the start of `text`.
///
/// Returns `None` if the first line is not a marker or no closing marker
/// follows. Marker lines may carry trailing whitespace, including the `\r`
/// of a CRLF line ending.
pub fn split_header(text: &str) -> Option<HeaderSplit<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (first, after_open) = text.split_once('\n')?;
    if !is_marker(first) {
        return None;
    }

    let mut offset = 0;
    let mut remaining = after_open;
    loop {
        let (line, rest, terminated) = match remaining.split_once('\n') {
            Some((line, rest)) => (line, rest, true),
            None => (remaining, "", false),
        };
        if is_marker(line) {
            let header = &after_open[..offset];
            return Some(HeaderSplit {
                header: header.strip_suffix('\n').unwrap_or(header),
                body: rest,
            });
        }
        if !terminated {
            return None;
        }
        offset += line.len() + 1;
        remaining = rest;
    }
}

/// Decode header text into a mapping.
///
/// # Errors
///
/// - `ParseError::InvalidYaml` with the decoder's message if the text is
///   not valid YAML (including duplicate keys).
/// - `ParseError::Empty` if it decodes to null.
/// - `ParseError::NotAMapping` for any other non-mapping value.
pub fn decode_header(raw: &str) -> Result<Mapping, ParseError> {
    let blank = raw.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Err(ParseError::Empty);
    }

    let value: Value =
        serde_yaml::from_str(raw).map_err(|e| ParseError::InvalidYaml(e.to_string()))?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Err(ParseError::Empty),
        other => Err(ParseError::NotAMapping {
            found: yaml_kind(&other),
        }),
    }
}

/// Split and decode a whole document.
///
/// A missing header is not an error: `metadata` is `None` and the body is
/// the full text.
pub fn parse_document(text: &str) -> Result<ParsedDocument, ParseError> {
    match split_header(text) {
        None => Ok(ParsedDocument {
            raw_header: String::new(),
            metadata: None,
            body: text.to_string(),
        }),
        Some(split) => {
            let metadata = decode_header(split.header)?;
            Ok(ParsedDocument {
                raw_header: split.header.to_string(),
                metadata: Some(metadata),
                body: split.body.to_string(),
            })
        }
    }
}

/// Whether a metadata value counts as present.
///
/// Null, `false`, zero, NaN and the empty string are absent. Sequences and
/// mappings are present even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Human-readable YAML kind of a value.
pub fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Render a mapping key as a field name. YAML allows non-string keys.
pub fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => format!("<{}>", yaml_kind(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\ndescription: \"Build a DAG\"\nmode: agent\n---\n\n# Body\n";

    #[test]
    fn splits_header_and_body() {
        let split = split_header(DOC).unwrap();
        assert_eq!(split.header, "description: \"Build a DAG\"\nmode: agent");
        assert_eq!(split.body, "\n# Body\n");
    }

    #[test]
    fn no_opening_marker_means_no_header() {
        assert!(split_header("# Title\n---\na: 1\n---\n").is_none());
        assert!(split_header("").is_none());
        assert!(split_header("---").is_none());
    }

    #[test]
    fn unterminated_header_means_no_header() {
        assert!(split_header("---\na: 1\nb: 2\n").is_none());
    }

    #[test]
    fn marker_must_be_alone_on_its_line() {
        assert!(split_header("--- a: 1\n---\n").is_none());
        // `----` is not a marker, so the block never closes.
        assert!(split_header("---\na: 1\n----\n").is_none());
    }

    #[test]
    fn tolerates_crlf_and_trailing_spaces() {
        let split = split_header("---  \r\na: 1\r\n--- \r\nbody\r\n").unwrap();
        assert_eq!(split.header, "a: 1\r");
        assert_eq!(split.body, "body\r\n");
        let mapping = decode_header(split.header).unwrap();
        assert_eq!(mapping.get("a"), Some(&Value::from(1)));
    }

    #[test]
    fn closing_marker_at_end_of_file() {
        let split = split_header("---\na: 1\n---").unwrap();
        assert_eq!(split.header, "a: 1");
        assert_eq!(split.body, "");
    }

    #[test]
    fn leading_bom_is_ignored() {
        assert!(split_header("\u{feff}---\na: 1\n---\n").is_some());
    }

    #[test]
    fn decodes_mapping() {
        let mapping = decode_header("name: x\nrules:\n  - one\n  - two").unwrap();
        assert_eq!(mapping.len(), 2);
        assert!(mapping.get("rules").unwrap().is_sequence());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = decode_header("name: [unclosed").unwrap_err();
        assert!(matches!(err, ParseError::InvalidYaml(_)), "{err}");
    }

    #[test]
    fn duplicate_keys_are_parse_error() {
        let err = decode_header("name: a\nname: b").unwrap_err();
        assert!(matches!(err, ParseError::InvalidYaml(_)), "{err}");
    }

    #[test]
    fn non_mapping_is_parse_error() {
        assert_eq!(
            decode_header("- a\n- b").unwrap_err(),
            ParseError::NotAMapping { found: "sequence" }
        );
        assert_eq!(
            decode_header("just text").unwrap_err(),
            ParseError::NotAMapping { found: "string" }
        );
        assert_eq!(decode_header("").unwrap_err(), ParseError::Empty);
        assert_eq!(decode_header("# only a comment").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn parse_document_without_header() {
        let doc = parse_document("# Just a body\n").unwrap();
        assert!(doc.metadata.is_none());
        assert_eq!(doc.body, "# Just a body\n");
        assert!(doc.raw_header.is_empty());
    }

    #[test]
    fn parse_document_with_header() {
        let doc = parse_document(DOC).unwrap();
        let metadata = doc.metadata.unwrap();
        assert_eq!(metadata.get("mode"), Some(&Value::from("agent")));
        assert_eq!(doc.body, "\n# Body\n");
    }

    #[test]
    fn truthiness() {
        let falsy = ["null", "false", "0", "0.0", ".nan", "''"];
        for text in falsy {
            let value: Value = serde_yaml::from_str(text).unwrap();
            assert!(!is_truthy(&value), "{text} should be falsy");
        }
        let truthy = ["true", "1", "-2.5", "x", "[]", "{}", "'0'", "!custom ok"];
        for text in truthy {
            let value: Value = serde_yaml::from_str(text).unwrap();
            assert!(is_truthy(&value), "{text} should be truthy");
        }
    }

    #[test]
    fn key_names() {
        assert_eq!(key_name(&Value::from("tools")), "tools");
        assert_eq!(key_name(&Value::from(3)), "3");
        assert_eq!(key_name(&Value::Bool(true)), "true");
    }
}
