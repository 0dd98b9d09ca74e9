use std::fmt;
use std::path::PathBuf;

/// The closed set of links the matchers recognise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    PrivacyPolicy,
    StateContractor,
}

impl LinkKind {
    pub const ALL: [LinkKind; 6] = [
        LinkKind::Twitter,
        LinkKind::Facebook,
        LinkKind::Instagram,
        LinkKind::Linkedin,
        LinkKind::PrivacyPolicy,
        LinkKind::StateContractor,
    ];

    /// Key used for this kind in replacement configuration.
    pub fn key(self) -> &'static str {
        match self {
            LinkKind::Twitter => "twitter",
            LinkKind::Facebook => "facebook",
            LinkKind::Instagram => "instagram",
            LinkKind::Linkedin => "linkedin",
            LinkKind::PrivacyPolicy => "privacyPolicy",
            LinkKind::StateContractor => "stateContractor",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A matched link: its kind and the decoded `href` of the enclosing anchor. `href` is never
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkFinding {
    pub kind: LinkKind,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Rewritten(String),
    Unchanged,
}

/// Result of running one document through collect + patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub findings: usize,
    pub outcome: Outcome,
}

impl DocumentResult {
    pub fn is_rewritten(&self) -> bool {
        matches!(self.outcome, Outcome::Rewritten(_))
    }
}
