//! Simplified HTML tokenizer with a constrained, practical tag-name character set.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`, starting with a letter.
//! Attribute names use the same ASCII character class; other bytes inside a tag are skipped.
//!
//! This is not a full HTML5 tokenizer. It is tolerant of template syntax in text (a `<` that
//! does not open a tag, such as `<%= x %>`, stays text) but rejects constructs that run off the
//! end of the input: unterminated comments, tags, and quoted attribute values.
use crate::entities::decode_entities;
use crate::error::{ParseError, ParseErrorCode};
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(close_tag[0] == b'<' && close_tag[1] == b'/');
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            // Only ASCII whitespace is accepted between the name and `>`.
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[inline]
fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

/// Byte length of the UTF-8 sequence whose lead byte is at `i`.
fn char_len_at(input: &str, i: usize) -> usize {
    input[i..].chars().next().map_or(1, char::len_utf8)
}

/// Tokenizes `input` into an owned token stream.
///
/// Tag and attribute names are lowercased; attribute values and text are entity-decoded,
/// except the bodies of `script` and `style`, which are kept raw. Repeated attributes on one
/// tag keep their first occurrence.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Invariant: we scan by byte, but any slice endpoints must be UTF-8 char boundaries.
    // We only cut slices at ASCII structural bytes or after whole characters.
    let mut text_start = 0;

    while i < len {
        let Some(rel) = memchr(b'<', &bytes[i..]) else {
            break;
        };
        i += rel;

        let opens_markup = match bytes.get(i + 1) {
            Some(b) if b.is_ascii_alphabetic() => true,
            Some(b'!') => true,
            Some(b'/') => bytes.get(i + 2).is_some_and(|b| b.is_ascii_alphabetic()),
            _ => false,
        };
        if !opens_markup {
            i += 1;
            continue;
        }

        push_text(&mut out, &input[text_start..i]);
        let tag_start = i;

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            // Scan for the comment terminator once per comment (linear in comment length).
            let Some(end) = input[body_start..].find(HTML_COMMENT_END) else {
                return Err(ParseError::new(ParseErrorCode::UnterminatedComment, tag_start));
            };
            out.push(Token::Comment(input[body_start..body_start + end].to_string()));
            i = body_start + end + HTML_COMMENT_END.len();
            text_start = i;
            continue;
        }

        if bytes[i + 1] == b'!' {
            // `<!doctype ...>` and bogus declarations such as `<![CDATA[...]]>`.
            let Some(end) = memchr(b'>', &bytes[i..]) else {
                return Err(ParseError::new(ParseErrorCode::UnterminatedTag, tag_start));
            };
            let body = &input[i + 2..i + end];
            if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
                out.push(Token::Doctype(body.trim().to_string()));
            } else {
                out.push(Token::Comment(body.to_string()));
            }
            i += end + 1;
            text_start = i;
            continue;
        }

        if bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            let Some(rel_end) = memchr(b'>', &bytes[j..]) else {
                return Err(ParseError::new(ParseErrorCode::UnterminatedTag, tag_start));
            };
            out.push(Token::EndTag(name));
            i = j + rel_end + 1;
            text_start = i;
            continue;
        }

        // start tag
        let start = i + 1;
        let mut k = start;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        let name = input[start..k].to_ascii_lowercase();
        let mut attributes: Vec<(String, Option<String>)> = Vec::new();
        let mut self_closing = false;
        let mut closed = false;

        let skip_whitespace = |k: &mut usize| {
            while *k < len && bytes[*k].is_ascii_whitespace() {
                *k += 1;
            }
        };

        loop {
            skip_whitespace(&mut k);
            if k >= len {
                break;
            }
            if bytes[k] == b'>' {
                k += 1;
                closed = true;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    closed = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            let name_start = k;
            while k < len && is_name_char(bytes[k]) {
                k += 1;
            }
            if name_start == k {
                k += char_len_at(input, k);
                continue;
            }
            let attribute_name = input[name_start..k].to_ascii_lowercase();

            skip_whitespace(&mut k);
            let value = if k < len && bytes[k] == b'=' {
                k += 1;
                skip_whitespace(&mut k);
                if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                    let quote = bytes[k];
                    let quote_at = k;
                    let vstart = k + 1;
                    let Some(rel_end) = memchr(quote, &bytes[vstart..]) else {
                        return Err(ParseError::new(
                            ParseErrorCode::UnterminatedAttributeValue,
                            quote_at,
                        ));
                    };
                    k = vstart + rel_end + 1;
                    Some(decode_entities(&input[vstart..vstart + rel_end]))
                } else {
                    let vstart = k;
                    while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        k += 1;
                    }
                    Some(decode_entities(&input[vstart..k]))
                }
            } else {
                None
            };

            if !attributes.iter().any(|(existing, _)| *existing == attribute_name) {
                attributes.push((attribute_name, value));
            }
        }

        if !closed {
            return Err(ParseError::new(ParseErrorCode::UnterminatedTag, tag_start));
        }
        if is_void_element(&name) {
            self_closing = true;
        }

        let rawtext_close = match name.as_str() {
            "script" => Some(SCRIPT_CLOSE_TAG),
            "style" => Some(STYLE_CLOSE_TAG),
            _ => None,
        };

        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });
        i = k;
        text_start = i;

        if let Some(close_tag) = rawtext_close {
            if let Some((rel_start, rel_end)) = find_rawtext_close_tag(&input[k..], close_tag) {
                let raw = &input[k..k + rel_start];
                if !raw.is_empty() {
                    out.push(Token::Text(raw.to_string()));
                }
                out.push(Token::EndTag(name));
                i = k + rel_end;
                text_start = i;
            } else {
                // If the rawtext close tag is missing, emit an implicit end tag and
                // treat the remainder as rawtext content.
                let raw = &input[k..];
                if !raw.is_empty() {
                    out.push(Token::Text(raw.to_string()));
                }
                out.push(Token::EndTag(name));
                return Ok(out);
            }
        }
    }

    push_text(&mut out, &input[text_start..]);
    Ok(out)
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    out.push(Token::Text(decode_entities(raw)));
}
