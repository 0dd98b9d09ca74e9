use std::borrow::Cow;

use crate::config::ReplacementTable;
use crate::types::LinkFinding;

/// Re-encode a tree-decoded `href` into the form the raw markup spells it in.
pub fn normalize_href(href: &str) -> Cow<'_, str> {
    if href.contains('&') {
        Cow::Owned(href.replace('&', "&amp;"))
    } else {
        Cow::Borrowed(href)
    }
}

/// Substitute each finding's `href` in `raw` with its configured replacement.
///
/// Findings apply in order, each against the text produced by the previous ones. Every
/// occurrence of a normalized `href` is replaced, including occurrences outside the matched
/// anchor. A finding whose `href` is not present is skipped.
pub fn apply_patches(raw: &str, findings: &[LinkFinding], table: &ReplacementTable) -> String {
    let mut text = raw.to_string();
    for finding in findings {
        let needle = normalize_href(&finding.href);
        if !text.contains(needle.as_ref()) {
            log::debug!(
                "{} href {:?} not found in source, skipping",
                finding.kind,
                needle
            );
            continue;
        }
        text = text.replace(needle.as_ref(), table.get(finding.kind));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LinkKind;

    fn finding(kind: LinkKind, href: &str) -> LinkFinding {
        LinkFinding {
            kind,
            href: href.to_string(),
        }
    }

    #[test]
    fn normalize_reencodes_ampersands_only() {
        assert_eq!(normalize_href("a&b&c"), "a&amp;b&amp;c");
        assert!(matches!(normalize_href("/plain"), Cow::Borrowed("/plain")));
    }

    #[test]
    fn replaces_the_encoded_form_in_raw_text() {
        let raw = r#"<a href="a&amp;b">Privacy Policy</a>"#;
        let table = ReplacementTable::default().with(LinkKind::PrivacyPolicy, "/new");
        let out = apply_patches(raw, &[finding(LinkKind::PrivacyPolicy, "a&b")], &table);
        assert_eq!(out, r#"<a href="/new">Privacy Policy</a>"#);
    }

    #[test]
    fn skips_missing_hrefs_and_keeps_earlier_patches() {
        let raw = r#"<a href="/tw">x</a><a href="/fb">y</a>"#;
        let table = ReplacementTable::default()
            .with(LinkKind::Twitter, "/t2")
            .with(LinkKind::Facebook, "/f2");
        let findings = [
            finding(LinkKind::Twitter, "/tw"),
            finding(LinkKind::Instagram, "/not-there"),
            finding(LinkKind::Facebook, "/fb"),
        ];
        assert_eq!(
            apply_patches(raw, &findings, &table),
            r#"<a href="/t2">x</a><a href="/f2">y</a>"#
        );
    }

    #[test]
    fn replacement_is_global_across_the_document() {
        let raw = r#"<a href="/p">Privacy Policy</a><link rel="x" href="/p">"#;
        let table = ReplacementTable::default().with(LinkKind::PrivacyPolicy, "/privacy");
        let out = apply_patches(raw, &[finding(LinkKind::PrivacyPolicy, "/p")], &table);
        assert_eq!(
            out,
            r#"<a href="/privacy">Privacy Policy</a><link rel="x" href="/privacy">"#
        );
    }

    #[test]
    fn empty_replacement_blanks_the_href() {
        let raw = r#"<a href="https://twitter.com/acme"><img src="tw.png"></a>"#;
        let out = apply_patches(
            raw,
            &[finding(LinkKind::Twitter, "https://twitter.com/acme")],
            &ReplacementTable::default(),
        );
        assert_eq!(out, r#"<a href=""><img src="tw.png"></a>"#);
    }

    #[test]
    fn no_findings_returns_raw_text() {
        let raw = "<p>  untouched\r\n</p>";
        assert_eq!(apply_patches(raw, &[], &ReplacementTable::default()), raw);
    }
}
