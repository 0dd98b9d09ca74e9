use html::traverse::ancestors;
use html::{Document, NodeId};

/// Nearest `a` element at or above `node`, or `None` once the root is reached.
pub fn resolve_anchor(doc: &Document, node: NodeId) -> Option<NodeId> {
    ancestors(doc, node).find(|id| doc.node(*id).is_element_named("a"))
}

/// `href` of the nearest enclosing anchor, if the anchor exists and carries a non-empty one.
pub fn anchor_href(doc: &Document, node: NodeId) -> Option<&str> {
    let anchor = resolve_anchor(doc, node)?;
    doc.node(anchor).attr("href").filter(|href| !href.is_empty())
}
