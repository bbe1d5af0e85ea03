//! Identity and role of the person viewing a list.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::record::lenient::{self, Fields};
use crate::record::{Listing, RecordId};

/// Platform role of the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum Role {
    /// Not signed in.
    #[default]
    Guest,
    /// Job seeker.
    Student,
    /// Posts jobs on behalf of a company.
    Recruiter,
    /// Platform administrator; sees everything.
    Admin,
}

impl Role {
    /// Parse a role name. Unknown names map to [`Role::Guest`], the least
    /// privileged role.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Self::Student,
            "recruiter" => Self::Recruiter,
            "admin" => Self::Admin,
            _ => Self::Guest,
        }
    }

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Student => "student",
            Self::Recruiter => "recruiter",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Value> for Role {
    fn from(value: Value) -> Self {
        Self::parse(&lenient::text(value))
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

/// Page-selected scoping mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum ScopeMode {
    /// Global browsing.
    #[default]
    Browse,
    /// Dashboard view restricted to the viewer's own records.
    OwnOnly,
}

impl ScopeMode {
    /// Parse a mode name. `own-only`, `own_only`, and `ownOnly` all select
    /// [`ScopeMode::OwnOnly`]; anything else is [`ScopeMode::Browse`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let folded: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if folded == "ownonly" {
            Self::OwnOnly
        } else {
            Self::Browse
        }
    }

    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::OwnOnly => "own-only",
        }
    }
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ScopeMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Value> for ScopeMode {
    fn from(value: Value) -> Self {
        Self::parse(&lenient::text(value))
    }
}

impl From<ScopeMode> for String {
    fn from(value: ScopeMode) -> Self {
        value.as_str().to_owned()
    }
}

/// Who is looking at a list, and in which mode.
///
/// # Examples
///
/// ```
/// use crackit_views::{Role, ScopeMode, ViewerContext};
///
/// let recruiter = ViewerContext::signed_in("r1", Role::Recruiter).with_mode(ScopeMode::OwnOnly);
/// assert_eq!(recruiter.id().map(|id| id.as_str()), Some("r1"));
///
/// let guest = ViewerContext::guest();
/// assert!(guest.id().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerContext {
    id: Option<RecordId>,
    role: Role,
    mode: ScopeMode,
}

/// Decodes a session payload; `_id` wins over `id`, and `null` or unknown
/// values read as an anonymous browsing guest.
impl<'de> Deserialize<'de> for ViewerContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Fields::deserialize(deserializer)?;
        let id = fields.take(&lenient::ID_KEYS);
        Ok(Self {
            id: (!id.is_null()).then(|| RecordId::from(id)),
            role: Role::from(fields.take(&["role"])),
            mode: ScopeMode::from(fields.take(&["mode"])),
        })
    }
}

impl ViewerContext {
    /// Anonymous viewer.
    #[must_use]
    pub fn guest() -> Self {
        Self::default()
    }

    /// Authenticated viewer with the given identity and role.
    #[must_use]
    pub fn signed_in(id: impl Into<RecordId>, role: Role) -> Self {
        Self {
            id: Some(id.into()),
            role,
            mode: ScopeMode::Browse,
        }
    }

    /// Viewer with an optional identity, as resolved by the session layer.
    #[must_use]
    pub const fn new(id: Option<RecordId>, role: Role, mode: ScopeMode) -> Self {
        Self { id, role, mode }
    }

    /// Replace the scope mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ScopeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Viewer identity; blank identities read as anonymous.
    #[must_use]
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    /// Viewer role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Scope mode selected by the page.
    #[must_use]
    pub const fn mode(&self) -> ScopeMode {
        self.mode
    }

    /// Returns `true` when the viewer may see every record regardless of
    /// privacy.
    #[must_use]
    pub const fn sees_everything(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns `true` when both the viewer and the record carry a usable
    /// identity and they are equal.
    #[must_use]
    pub fn owns<R: Listing>(&self, record: &R) -> bool {
        match (self.id(), record.owner_id()) {
            (Some(viewer), Some(owner)) => viewer == owner,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Role parsing and ownership checks.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::record::{NewsletterDraft, NewsletterRecord, OwnerRef};

    fn article_by(owner: &str) -> NewsletterRecord {
        NewsletterRecord::new(NewsletterDraft {
            created_by: OwnerRef::new(owner, "Author"),
            ..NewsletterDraft::default()
        })
    }

    #[rstest]
    #[case("guest", Role::Guest)]
    #[case("Student", Role::Student)]
    #[case("recruiter", Role::Recruiter)]
    #[case("ADMIN", Role::Admin)]
    #[case("superuser", Role::Guest)]
    fn roles_parse_with_least_privilege_fallback(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(Role::parse(raw), expected);
    }

    #[rstest]
    #[case("own-only", ScopeMode::OwnOnly)]
    #[case("own_only", ScopeMode::OwnOnly)]
    #[case("ownOnly", ScopeMode::OwnOnly)]
    #[case("browse", ScopeMode::Browse)]
    #[case("mine", ScopeMode::Browse)]
    fn modes_parse(#[case] raw: &str, #[case] expected: ScopeMode) {
        assert_eq!(ScopeMode::parse(raw), expected);
    }

    #[rstest]
    #[case(ViewerContext::signed_in("u1", Role::Student), true)]
    #[case(ViewerContext::signed_in("u2", Role::Student), false)]
    #[case(ViewerContext::signed_in("", Role::Student), false)]
    #[case(ViewerContext::guest(), false)]
    fn ownership_requires_matching_identity(
        #[case] viewer: ViewerContext,
        #[case] expected: bool,
    ) {
        assert_eq!(viewer.owns(&article_by("u1")), expected);
    }

    #[test]
    fn blank_owner_is_never_matched_by_blank_viewer() {
        let viewer = ViewerContext::signed_in(" ", Role::Student);
        assert!(!viewer.owns(&article_by(" ")));
    }

    #[test]
    fn viewer_decodes_from_session_payload() {
        let viewer: ViewerContext = serde_json::from_value(
            json!({ "_id": "u9", "id": "u9-virtual", "role": "admin", "mode": "own_only" }),
        )
        .expect("viewer decodes");
        assert_eq!(viewer.id().map(RecordId::as_str), Some("u9"));
        assert!(viewer.sees_everything());
        assert_eq!(viewer.mode(), ScopeMode::OwnOnly);
    }

    #[rstest]
    #[case(json!({ "id": "u1", "role": null, "mode": null }))]
    #[case(json!({ "id": "u1", "role": 7, "mode": ["own-only"] }))]
    #[case(json!({ "id": "u1" }))]
    fn null_or_malformed_role_and_mode_read_as_defaults(#[case] payload: Value) {
        let viewer: ViewerContext = serde_json::from_value(payload).expect("viewer decodes");
        assert_eq!(viewer.id().map(RecordId::as_str), Some("u1"));
        assert_eq!(viewer.role(), Role::Guest);
        assert_eq!(viewer.mode(), ScopeMode::Browse);
    }

    #[test]
    fn null_identity_is_anonymous() {
        let viewer: ViewerContext =
            serde_json::from_value(json!({ "id": null, "role": "student" }))
                .expect("viewer decodes");
        assert!(viewer.id().is_none());
        assert_eq!(viewer.role(), Role::Student);
    }
}
