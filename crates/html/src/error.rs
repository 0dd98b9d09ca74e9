//! Parse errors for tokenization and tree building.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    UnterminatedComment,
    UnterminatedTag,
    UnterminatedAttributeValue,
    /// The tree would need more nodes than a [`crate::NodeId`] can address.
    TooManyNodes,
}

/// Input that is not well-formed enough to build a tree from.
///
/// For tokenizer errors `position` is the byte offset where the offending construct starts;
/// for [`ParseErrorCode::TooManyNodes`] it is the index of the first token that did not fit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{code} at {} {position}", position_unit(.code))]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(code: ParseErrorCode, position: usize) -> Self {
        Self { code, position }
    }
}

fn position_unit(code: &ParseErrorCode) -> &'static str {
    match code {
        ParseErrorCode::TooManyNodes => "token",
        _ => "byte",
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseErrorCode::UnterminatedComment => "unterminated comment",
            ParseErrorCode::UnterminatedTag => "unterminated tag",
            ParseErrorCode::UnterminatedAttributeValue => "unterminated attribute value",
            ParseErrorCode::TooManyNodes => "too many nodes",
        })
    }
}
