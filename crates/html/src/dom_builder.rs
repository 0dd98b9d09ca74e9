use crate::error::{ParseError, ParseErrorCode};
use crate::tokenizer::is_void_element;
use crate::types::{Document, NodeId, NodeKind, Token};

/// Builds a [`Document`] from a token stream.
///
/// Comments and doctypes are dropped. End tags close the nearest open element with the same
/// name (and everything opened after it); an end tag with no matching open element is ignored.
/// Elements still open at the end of input are closed implicitly.
///
/// Only void elements, and elements inside `svg`/`math`, are closed by a trailing `/>`; on any
/// other element the slash is ignored. Adjacent text runs are joined into one text node unless
/// a comment separated them.
pub fn build_dom(tokens: Vec<Token>) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    let mut open_elements: Vec<(NodeId, String)> = Vec::new();
    let mut after_comment = false;

    for (index, token) in tokens.into_iter().enumerate() {
        let parent = open_elements
            .last()
            .map_or(NodeId::ROOT, |(id, _)| *id);
        let too_many = || ParseError::new(ParseErrorCode::TooManyNodes, index);
        match token {
            Token::Doctype(_) => {}
            Token::Comment(_) => after_comment = true,
            Token::Text(text) => {
                if text.is_empty() {
                    continue;
                }
                if after_comment || !doc.extend_last_text(parent, &text) {
                    doc.append_child(parent, NodeKind::Text { text })
                        .ok_or_else(too_many)?;
                }
                after_comment = false;
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let foreign = name == "svg"
                    || name == "math"
                    || open_elements
                        .iter()
                        .any(|(_, open)| open == "svg" || open == "math");
                let id = doc
                    .append_child(
                        parent,
                        NodeKind::Element {
                            name: name.clone(),
                            attributes,
                        },
                    )
                    .ok_or_else(too_many)?;
                after_comment = false;
                if !(is_void_element(&name) || (self_closing && foreign)) {
                    open_elements.push((id, name));
                }
            }
            Token::EndTag(name) => {
                if let Some(pos) = open_elements
                    .iter()
                    .rposition(|(_, open)| open.eq_ignore_ascii_case(&name))
                {
                    open_elements.truncate(pos);
                } else {
                    log::trace!("ignoring stray end tag </{name}>");
                }
            }
        }
    }

    Ok(doc)
}
