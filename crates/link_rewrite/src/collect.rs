use html::Document;
use html::traverse::descendants;

use crate::matchers::match_node;
use crate::types::LinkFinding;

/// Collect every link finding in `doc`, in document order.
///
/// The walk is exhaustive: a match never stops the descent, so several links inside one
/// container (a row of social icons) are all found.
pub fn collect_links(doc: &Document) -> Vec<LinkFinding> {
    let mut out = Vec::new();
    for id in descendants(doc, doc.root()) {
        match_node(doc, id, &mut out);
    }
    out
}

/// Collect findings across several documents, concatenated in input order.
pub fn collect_links_all<'a, I>(docs: I) -> Vec<LinkFinding>
where
    I: IntoIterator<Item = &'a Document>,
{
    docs.into_iter().flat_map(collect_links).collect()
}
