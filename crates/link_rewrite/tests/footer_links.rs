use link_rewrite::{
    LinkFinding, LinkKind, Outcome, ReplacementTable, apply_patches, collect_links,
    rewrite_document,
};

const FOOTER: &str = r#"<!DOCTYPE html>
<html>
<body>
  <!-- social row -->
  <div class="social">
    <a href="https://twitter.com/acme?ref=footer&amp;lang=en" target="_blank">
      <img src="<%= cdn %>/icons/twitter-icon.png" alt="Twitter">
    </a>
    <a href="https://www.facebook.com/acme"><img src="/icons/fb-ico.png" alt="Facebook"></a>
    <a href="https://instagram.com/acme"><img src="/icons/IG-ICO.png"></a>
  </div>
  <p class="legal">
    <a href="/legal/privacy.html">
      Privacy Policy
    </a> |
    <a href="https://cslb.ca.gov/OnlineServices/CheckLicenseII/LicenseDetail.aspx?LicNum=1&amp;x=2">State Contractor License Information</a>
  </p>
  <img src="/icons/facebook-badge.png" alt="Facebook">
</body>
</html>
"#;

fn table() -> ReplacementTable {
    ReplacementTable::default()
        .with(LinkKind::Twitter, "https://x.com/acme")
        .with(LinkKind::Facebook, "https://facebook.com/acme-new")
        .with(LinkKind::Instagram, "https://instagram.com/acme-new")
        .with(LinkKind::PrivacyPolicy, "https://acme.example/privacy")
        .with(LinkKind::StateContractor, "https://acme.example/license")
}

#[test]
fn footer_yields_one_finding_per_anchored_link() {
    let doc = html::parse(FOOTER).expect("footer parses");
    let findings = collect_links(&doc);
    assert_eq!(
        findings,
        [
            LinkFinding {
                kind: LinkKind::Twitter,
                href: "https://twitter.com/acme?ref=footer&lang=en".to_string(),
            },
            LinkFinding {
                kind: LinkKind::Facebook,
                href: "https://www.facebook.com/acme".to_string(),
            },
            LinkFinding {
                kind: LinkKind::Instagram,
                href: "https://instagram.com/acme".to_string(),
            },
            LinkFinding {
                kind: LinkKind::PrivacyPolicy,
                href: "/legal/privacy.html".to_string(),
            },
            LinkFinding {
                kind: LinkKind::StateContractor,
                href: "https://cslb.ca.gov/OnlineServices/CheckLicenseII/LicenseDetail.aspx?LicNum=1&x=2"
                    .to_string(),
            },
        ],
        "the unanchored facebook badge must not produce a finding"
    );
}

#[test]
fn footer_rewrite_touches_only_hrefs() {
    let (findings, outcome) = rewrite_document(FOOTER, &table()).unwrap();
    assert_eq!(findings.len(), 5);

    let expected = FOOTER
        .replace(
            "https://twitter.com/acme?ref=footer&amp;lang=en",
            "https://x.com/acme",
        )
        .replace(
            "https://www.facebook.com/acme",
            "https://facebook.com/acme-new",
        )
        .replace(
            "https://instagram.com/acme\"",
            "https://instagram.com/acme-new\"",
        )
        .replace("/legal/privacy.html", "https://acme.example/privacy")
        .replace(
            "https://cslb.ca.gov/OnlineServices/CheckLicenseII/LicenseDetail.aspx?LicNum=1&amp;x=2",
            "https://acme.example/license",
        );
    assert_eq!(outcome, Outcome::Rewritten(expected));
}

#[test]
fn twitter_icon_scenario_rewrites_only_the_href_value() {
    let raw = r#"<a href="http://x.com/tw"><img src="twitter-icon.png" alt="Twitter"></a>"#;
    let table = ReplacementTable::default().with(LinkKind::Twitter, "http://new.example/tw");
    let (_, outcome) = rewrite_document(raw, &table).unwrap();
    assert_eq!(
        outcome,
        Outcome::Rewritten(
            r#"<a href="http://new.example/tw"><img src="twitter-icon.png" alt="Twitter"></a>"#
                .to_string()
        )
    );
}

#[test]
fn decoded_ampersand_matches_encoded_source() {
    let raw = r#"<a href="a&amp;b">privacy policy</a>"#;
    let doc = html::parse(raw).unwrap();
    let findings = collect_links(&doc);
    assert_eq!(findings[0].href, "a&b");

    let table = ReplacementTable::default().with(LinkKind::PrivacyPolicy, "/p");
    assert_eq!(
        apply_patches(raw, &findings, &table),
        r#"<a href="/p">privacy policy</a>"#
    );
}

#[test]
fn second_pass_with_blank_replacements_is_a_no_op() {
    let blank = ReplacementTable::default();
    let doc = html::parse(FOOTER).unwrap();
    let findings = collect_links(&doc);

    let once = apply_patches(FOOTER, &findings, &blank);
    let twice = apply_patches(&once, &findings, &blank);
    assert_eq!(once, twice);

    let (refound, outcome) = rewrite_document(&once, &blank).unwrap();
    assert!(refound.is_empty(), "blanked links must not match again: {refound:?}");
    assert_eq!(outcome, Outcome::Unchanged);
}

#[test]
fn shared_href_is_rewritten_everywhere() {
    let raw = r#"<a href="/legal">Privacy Policy</a>
<a href="/legal">Terms of Use</a>"#;
    let table = ReplacementTable::default().with(LinkKind::PrivacyPolicy, "/privacy");
    let (_, outcome) = rewrite_document(raw, &table).unwrap();
    assert_eq!(
        outcome,
        Outcome::Rewritten(
            "<a href=\"/privacy\">Privacy Policy</a>\n<a href=\"/privacy\">Terms of Use</a>"
                .to_string()
        )
    );
}

#[test]
fn anchors_the_parser_must_not_lose() {
    let cases = [
        (
            "<a href=https://acme.example/privacy/>Privacy Policy</a>",
            "https://acme.example/privacy/",
        ),
        (r#"<a href="/privacy"/>Privacy Policy</a>"#, "/privacy"),
        (r#"<a href="/privacy">Privacy </span>Policy</a>"#, "/privacy"),
    ];
    for (markup, href) in cases {
        let doc = html::parse(markup).expect("markup parses");
        assert_eq!(
            collect_links(&doc),
            [LinkFinding {
                kind: LinkKind::PrivacyPolicy,
                href: href.to_string(),
            }],
            "markup: {markup}"
        );
    }
}

#[test]
fn comment_inside_label_prevents_a_match() {
    let doc = html::parse(r#"<a href="/privacy">Privacy <!-- x -->Policy</a>"#).unwrap();
    assert!(collect_links(&doc).is_empty());
}
