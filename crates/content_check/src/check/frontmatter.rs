//! Leading metadata block extraction.

use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};

const FRONTMATTER_DELIM: &str = "---";
const FRONTMATTER_END_ALT: &str = "...";

/// Why a metadata block could not be extracted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExtractError {
    /// Opening `---` without a closing delimiter.
    Unterminated,
    /// Block text is not valid YAML.
    Yaml(String),
    /// Block parsed, but its root is not a mapping.
    NotAMapping,
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Unterminated => f.write_str("missing metadata block end delimiter"),
            ExtractError::Yaml(message) => write!(f, "invalid metadata block: {message}"),
            ExtractError::NotAMapping => f.write_str("metadata block must be a mapping"),
        }
    }
}

/// A split source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Extracted<'a> {
    /// Parsed block. Empty when the file has no block at all.
    pub metadata: Value,
    /// Everything after the block. Not interpreted.
    pub body: &'a str,
}

/// Split `text` into its parsed metadata block and body.
///
/// A file that does not open with `---` has an empty block, which schema validation then
/// rejects field by field.
pub fn split_frontmatter(text: &str) -> Result<Extracted<'_>, ExtractError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (first, mut rest) = next_line(text);
    if first.trim_end() != FRONTMATTER_DELIM {
        return Ok(Extracted {
            metadata: Value::Object(Map::new()),
            body: text,
        });
    }

    let block_start = text.len() - rest.len();
    loop {
        if rest.is_empty() {
            return Err(ExtractError::Unterminated);
        }
        let line_start = text.len() - rest.len();
        let (line, after) = next_line(rest);
        let marker = line.trim_end();
        if marker == FRONTMATTER_DELIM || marker == FRONTMATTER_END_ALT {
            let raw = &text[block_start..line_start];
            let metadata = parse_block(raw)?;
            return Ok(Extracted {
                metadata,
                body: after,
            });
        }
        rest = after;
    }
}

fn parse_block(raw: &str) -> Result<Value, ExtractError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let value: Value =
        serde_yaml::from_str(raw).map_err(|err| ExtractError::Yaml(err.to_string()))?;
    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(Map::new())),
        _ => Err(ExtractError::NotAMapping),
    }
}

/// Return the first line (without its terminator) and the remainder.
fn next_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(idx) => (text[..idx].trim_end_matches('\r'), &text[idx + 1..]),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_yaml_block_from_body() {
        let text = "---\nslug: faq\ntitle:\n  en: FAQ\n  ru: ЧаВо\nkeywords:\n  en: [help, faq]\ncreated: 2024-01-15\n---\n# Heading\n\nBody.\n";
        let extracted = split_frontmatter(text).expect("extract");
        assert_eq!(
            extracted.metadata,
            json!({
                "slug": "faq",
                "title": { "en": "FAQ", "ru": "ЧаВо" },
                "keywords": { "en": ["help", "faq"] },
                "created": "2024-01-15"
            })
        );
        assert_eq!(extracted.body, "# Heading\n\nBody.\n");
    }

    #[test]
    fn handles_crlf_and_bom() {
        let text = "\u{feff}---\r\nslug: faq\r\n---\r\nBody";
        let extracted = split_frontmatter(text).expect("extract");
        assert_eq!(extracted.metadata, json!({ "slug": "faq" }));
        assert_eq!(extracted.body, "Body");
    }

    #[test]
    fn missing_block_yields_empty_mapping() {
        let extracted = split_frontmatter("# Just a heading\n").expect("extract");
        assert_eq!(extracted.metadata, json!({}));
        assert_eq!(extracted.body, "# Just a heading\n");
    }

    #[test]
    fn empty_block_yields_empty_mapping() {
        let extracted = split_frontmatter("---\n---\nbody").expect("extract");
        assert_eq!(extracted.metadata, json!({}));
        assert_eq!(extracted.body, "body");
    }

    #[test]
    fn unterminated_block_is_an_error() {
        assert_eq!(
            split_frontmatter("---\nslug: faq\n"),
            Err(ExtractError::Unterminated)
        );
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = split_frontmatter("---\nslug: [faq\n---\n").expect_err("bad yaml");
        assert!(matches!(err, ExtractError::Yaml(_)), "unexpected: {err:?}");
    }

    #[test]
    fn scalar_block_is_not_a_mapping() {
        assert_eq!(
            split_frontmatter("---\njust text\n---\n"),
            Err(ExtractError::NotAMapping)
        );
    }
}
