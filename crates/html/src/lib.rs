pub mod traverse;

mod dom_builder;
mod entities;
mod error;
mod tokenizer;
mod types;

use memchr::{memchr, memchr2};

/// Parse `input` into a read-only [`Document`].
///
/// Attribute values and text are entity-decoded in the tree; the raw text is untouched, so
/// callers that patch the source must re-encode what they look for.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let tokens = tokenize(input)?;
    build_dom(tokens)
}

/// ASCII case-insensitive substring test. An empty needle always matches.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    let n = needle.len();
    if n == 0 {
        return true;
    }
    let hay_len = hay.len();
    if hay_len < n {
        return false;
    }
    let first = needle[0];
    let (a, b) = if first.is_ascii_alphabetic() {
        (first.to_ascii_lowercase(), first.to_ascii_uppercase())
    } else {
        (first, first)
    };
    let mut i = 0;
    while i + n <= hay_len {
        let rel = if a == b {
            memchr(a, &hay[i..])
        } else {
            memchr2(a, b, &hay[i..])
        };
        let Some(rel) = rel else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay_len && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}

pub use crate::dom_builder::build_dom;
pub use crate::error::{ParseError, ParseErrorCode};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Document, Node, NodeId, NodeKind, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ignore_ascii_case_matches_anywhere() {
        assert!(contains_ignore_ascii_case("/img/TWITTER-icon.png", "twitter"));
        assert!(contains_ignore_ascii_case("fb-ico.svg", "fb-ico"));
        assert!(contains_ignore_ascii_case("x", ""));
        assert!(!contains_ignore_ascii_case("tw", "twitter"));
        assert!(!contains_ignore_ascii_case("instagrm.png", "instagram"));
    }

    #[test]
    fn contains_ignore_ascii_case_retries_after_partial_match() {
        assert!(contains_ignore_ascii_case("ttwitwitter", "twitter"));
        assert!(contains_ignore_ascii_case("footer.HTML.ejs", "html"));
    }

    #[test]
    fn parse_propagates_tokenizer_errors() {
        let err = parse("<a href='x>").unwrap_err();
        assert_eq!(err.code, ParseErrorCode::UnterminatedAttributeValue);
        assert_eq!(err.to_string(), "unterminated attribute value at byte 8");
    }

    #[test]
    fn too_many_nodes_reports_the_token_index() {
        let err = ParseError::new(ParseErrorCode::TooManyNodes, 12);
        assert_eq!(err.to_string(), "too many nodes at token 12");
    }
}
