use crate::{Document, NodeId};

/// Pre-order (document order) walk over `start` and everything below it.
///
/// Uses an explicit stack so arbitrarily deep documents cannot overflow the call stack.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Push children in reverse so they're visited in original order.
        self.stack
            .extend(self.doc.node(id).children().iter().rev().copied());
        Some(id)
    }
}

pub fn descendants(doc: &Document, start: NodeId) -> Descendants<'_> {
    Descendants {
        doc,
        stack: vec![start],
    }
}

/// Walk from `start` (inclusive) up through parent lookups to the root (inclusive).
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.parent(id);
        Some(id)
    }
}

pub fn ancestors(doc: &Document, start: NodeId) -> Ancestors<'_> {
    Ancestors {
        doc,
        next: Some(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn descendants_visit_every_node_once_in_document_order() {
        let doc = parse("<div><p>a</p><p>b<i>c</i></p></div>d").unwrap();
        let visited: Vec<NodeId> = descendants(&doc, doc.root()).collect();
        assert_eq!(visited.len(), doc.len());

        let texts: Vec<&str> = visited
            .iter()
            .filter_map(|id| doc.node(*id).text())
            .collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn ancestors_end_at_root() {
        let doc = parse("<a href=x><b>t</b></a>").unwrap();
        let a = doc.node(doc.root()).children()[0];
        let b = doc.node(a).children()[0];
        let t = doc.node(b).children()[0];

        let chain: Vec<NodeId> = ancestors(&doc, t).collect();
        assert_eq!(chain, [t, b, a, doc.root()]);
    }
}
