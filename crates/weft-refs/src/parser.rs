//! Left-to-right reference scanner.
//!
//! Reference syntax:
//!
//! ```text
//! {{ref:key=<key-text>}}
//! {{ref:key=<key-text>,op=<hex-operator>}}
//! ```
//!
//! The `key=` field is mandatory and must be non-empty; `op=` is optional
//! and inherits the containing record's operator when absent. A marker
//! that is unterminated or whose fields do not parse is treated as plain
//! text and skipped — malformed markers are never an error.

use weft_types::OperatorId;

use crate::types::Reference;

/// The token that opens every reference.
const REF_OPEN: &str = "{{ref:";
/// The token that closes every reference.
const REF_CLOSE: &str = "}}";

/// Detects and extracts embedded references.
pub struct ReferenceParser;

impl ReferenceParser {
    /// Cheap syntactic check for the reference marker.
    ///
    /// This is the fast path that lets resolution skip plain content
    /// entirely. When it returns `false`, [`Self::parse_references`]
    /// returns an empty list; the converse does not hold (a present but
    /// malformed marker parses to nothing).
    pub fn contains_references(content: &str) -> bool {
        content.contains(REF_OPEN)
    }

    /// Extract references in document order.
    ///
    /// Spans index the original `content` and are non-overlapping and
    /// strictly increasing, so a splice pass can rebuild the content in a
    /// single left-to-right sweep.
    pub fn parse_references(content: &str) -> Vec<Reference> {
        let mut references = Vec::new();
        let mut cursor = 0;

        while let Some(open_offset) = content[cursor..].find(REF_OPEN) {
            let start = cursor + open_offset;
            let body_start = start + REF_OPEN.len();

            let Some(close_offset) = content[body_start..].find(REF_CLOSE) else {
                // Unterminated marker: nothing after it can close either.
                break;
            };
            let body_end = body_start + close_offset;
            let end = body_end + REF_CLOSE.len();

            if let Some(reference) = Self::parse_body(&content[body_start..body_end]) {
                references.push(Reference {
                    key: reference.0,
                    operator: reference.1,
                    span: start..end,
                });
            }
            cursor = end;
        }

        references
    }

    /// Parse a marker body (`key=B,op=0xaa`) into `(key, operator)`.
    fn parse_body(body: &str) -> Option<(String, Option<OperatorId>)> {
        let mut key = None;
        let mut operator = None;

        for field in body.split(',') {
            let (name, value) = field.split_once('=')?;
            match name {
                "key" => {
                    if value.is_empty() || key.is_some() {
                        return None;
                    }
                    key = Some(value.to_string());
                }
                "op" => {
                    if operator.is_some() {
                        return None;
                    }
                    operator = Some(OperatorId::from_hex(value).ok()?);
                }
                _ => return None,
            }
        }

        key.map(|k| (k, operator))
    }
}
