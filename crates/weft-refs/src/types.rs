use std::ops::Range;

use serde::{Deserialize, Serialize};
use weft_types::OperatorId;

/// An embedded pointer found inside assembled content.
///
/// A reference carries enough to re-fetch its target (`key`, `operator`)
/// and enough to splice the resolved value back into the parent content
/// (`span`, indexing the *original* content string).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Key text of the target record, exactly as written in the content.
    pub key: String,
    /// Identity of the target record's writer. `None` means the reference
    /// inherits the operator of the record that contains it.
    pub operator: Option<OperatorId>,
    /// Byte span of the full reference text within the original content.
    pub span: Range<usize>,
}

impl Reference {
    /// The operator this reference targets, falling back to `inherited`
    /// when the reference does not name one.
    pub fn target_operator<'a>(&'a self, inherited: &'a OperatorId) -> &'a OperatorId {
        self.operator.as_ref().unwrap_or(inherited)
    }

    /// The reference's original text within `content`.
    ///
    /// Callers pass the same content string the reference was parsed from;
    /// the span is meaningless against any other string.
    pub fn original_text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.span.clone()]
    }
}
