//! Per-node link heuristics.
//!
//! Icon links are recognised from an `img` inside the anchor, by `src` substrings or an exact
//! `alt`. Text links are recognised from a text node whose trimmed, lowercased content is an
//! exact label. Every heuristic then extracts the `href` of the nearest enclosing anchor.

use html::{Document, Node, NodeId, contains_ignore_ascii_case};

use crate::anchor::anchor_href;
use crate::types::{LinkFinding, LinkKind};

const PRIVACY_POLICY_LABEL: &str = "privacy policy";
const STATE_CONTRACTOR_LABEL: &str = "state contractor license information";

fn img_src_contains(node: &Node, needles: &[&str]) -> bool {
    node.is_element_named("img")
        && node
            .attr("src")
            .is_some_and(|src| needles.iter().any(|n| contains_ignore_ascii_case(src, n)))
}

fn img_alt_is(node: &Node, expected: &str) -> bool {
    node.is_element_named("img")
        && node
            .attr("alt")
            .is_some_and(|alt| alt.eq_ignore_ascii_case(expected))
}

fn text_is_label(node: &Node, label: &str) -> bool {
    node.text()
        .is_some_and(|text| text.trim().to_lowercase() == label)
}

/// Whether `node` looks like the marker for `kind`, before any anchor lookup.
pub fn triggers(kind: LinkKind, node: &Node) -> bool {
    match kind {
        LinkKind::Twitter => img_src_contains(node, &["twitter"]),
        LinkKind::Facebook => {
            img_src_contains(node, &["fb-ico", "facebook"]) || img_alt_is(node, "facebook")
        }
        LinkKind::Instagram => {
            img_src_contains(node, &["ig-ico", "instagram"]) || img_alt_is(node, "instagram")
        }
        LinkKind::Linkedin => {
            img_src_contains(node, &["li-ico", "linkedin"]) || img_alt_is(node, "linkedin")
        }
        LinkKind::PrivacyPolicy => text_is_label(node, PRIVACY_POLICY_LABEL),
        LinkKind::StateContractor => text_is_label(node, STATE_CONTRACTOR_LABEL),
    }
}

/// Runs the matcher for `kind` on `node`.
///
/// A trigger without a usable enclosing anchor is a resolution miss: it is logged and yields
/// nothing.
pub fn match_kind(doc: &Document, node: NodeId, kind: LinkKind) -> Option<LinkFinding> {
    if !triggers(kind, doc.node(node)) {
        return None;
    }
    let Some(href) = anchor_href(doc, node) else {
        log::debug!("{kind} marker at node {} has no enclosing anchor href", node.0);
        return None;
    };
    log::trace!("{kind} link found: {href}");
    Some(LinkFinding {
        kind,
        href: href.to_string(),
    })
}

/// Runs every matcher on `node`, appending findings to `out`.
pub fn match_node(doc: &Document, node: NodeId, out: &mut Vec<LinkFinding>) {
    out.extend(
        LinkKind::ALL
            .into_iter()
            .filter_map(|kind| match_kind(doc, node, kind)),
    );
}
