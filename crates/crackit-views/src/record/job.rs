//! Job posting snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::{self, Fields};
use super::{CompanyRef, Listing, OwnerRef, RecordId, RecordKind, usable_owner};

/// Searchable text fields of a [`JobRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    /// Posting title.
    Title,
    /// Free-text description.
    Description,
    /// Location text, e.g. `"Remote"` or a city.
    Location,
    /// Name of the hiring company.
    CompanyName,
    /// Employment type, e.g. `"Full-time"`.
    JobType,
}

/// Opaque application entry; only the number of entries is meaningful here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationRef(serde_json::Value);

impl ApplicationRef {
    /// Wrap a backend application payload.
    #[must_use]
    pub const fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}

/// Input payload for [`JobRecord::new`].
///
/// Used by callers that build snapshots in code rather than decoding them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDraft {
    /// Backend identifier.
    pub id: RecordId,
    /// Posting title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Location text.
    pub location: String,
    /// Hiring company.
    pub company: CompanyRef,
    /// Employment type.
    pub job_type: String,
    /// Salary magnitude, if advertised.
    pub salary: Option<f64>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Recruiter that posted the job.
    pub created_by: Option<OwnerRef>,
    /// Applications received so far.
    pub applications: Vec<ApplicationRef>,
}

/// Job posting as received from the backend.
///
/// ## Invariants
/// - Job postings are never private; visibility is governed solely by the
///   viewer's role and scope mode.
/// - `salary` is finite when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    id: RecordId,
    title: String,
    description: String,
    location: String,
    company: CompanyRef,
    job_type: String,
    salary: Option<f64>,
    created_at: Option<DateTime<Utc>>,
    created_by: Option<OwnerRef>,
    applications: Vec<ApplicationRef>,
}

/// Decodes leniently: `_id` wins over `id`, camelCase keys win over their
/// snake_case spellings, and malformed fields fall back to defaults.
impl<'de> Deserialize<'de> for JobRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Fields::deserialize(deserializer)?;
        Ok(Self {
            id: RecordId::from(fields.take(&lenient::ID_KEYS)),
            title: lenient::text(fields.take(&["title"])),
            description: lenient::text(fields.take(&["description"])),
            location: lenient::text(fields.take(&["location"])),
            company: CompanyRef::from(fields.take(&["company"])),
            job_type: lenient::text(fields.take(&["jobType", "job_type"])),
            salary: lenient::salary(&fields.take(&["salary"])),
            created_at: lenient::timestamp(&fields.take(&["createdAt", "created_at"])),
            created_by: lenient::owner(fields.take(&["createdBy", "created_by"])),
            applications: lenient::sequence(fields.take(&["applications"])),
        })
    }
}

impl JobRecord {
    /// Construct a snapshot from a draft. Non-finite salaries are dropped.
    #[must_use]
    pub fn new(draft: JobDraft) -> Self {
        Self::from(draft)
    }

    /// Posting title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Location text.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Hiring company.
    #[must_use]
    pub const fn company(&self) -> &CompanyRef {
        &self.company
    }

    /// Employment type.
    #[must_use]
    pub fn job_type(&self) -> &str {
        self.job_type.as_str()
    }

    /// Recruiter that posted the job, when the backend included it.
    #[must_use]
    pub const fn created_by(&self) -> Option<&OwnerRef> {
        self.created_by.as_ref()
    }

    /// Applications received so far.
    #[must_use]
    pub fn applications(&self) -> &[ApplicationRef] {
        self.applications.as_slice()
    }

    /// Number of applications, as shown on listing cards.
    #[must_use]
    pub fn applicant_count(&self) -> usize {
        self.applications.len()
    }
}

impl From<JobDraft> for JobRecord {
    fn from(draft: JobDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            company: draft.company,
            job_type: draft.job_type,
            salary: draft.salary.filter(|salary| salary.is_finite()),
            created_at: draft.created_at,
            created_by: draft.created_by,
            applications: draft.applications,
        }
    }
}

impl Listing for JobRecord {
    type Field = JobField;

    const KIND: RecordKind = RecordKind::Job;

    const SEARCH_FIELDS: &'static [JobField] = &[
        JobField::Title,
        JobField::Description,
        JobField::Location,
        JobField::CompanyName,
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field_text(&self, field: JobField) -> &str {
        match field {
            JobField::Title => self.title(),
            JobField::Description => self.description(),
            JobField::Location => self.location(),
            JobField::CompanyName => self.company.name(),
            JobField::JobType => self.job_type(),
        }
    }

    fn owner_id(&self) -> Option<&RecordId> {
        self.created_by.as_ref().and_then(usable_owner)
    }

    fn is_private(&self) -> bool {
        false
    }

    fn category(&self) -> Option<&str> {
        Some(self.job_type())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn salary(&self) -> Option<f64> {
        self.salary
    }
}

#[cfg(test)]
mod tests {
    //! Decoding of backend job payloads.

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_populated_backend_payload() {
        let job: JobRecord = serde_json::from_value(json!({
            "_id": "j1",
            "title": "Backend Engineer",
            "description": "Rust services",
            "location": "Pune",
            "company": { "_id": "c1", "name": "Acme" },
            "jobType": "Full-time",
            "salary": 18,
            "createdAt": "2024-01-01T09:00:00.000Z",
            "created_by": { "_id": "r1", "fullname": "Grace Hopper" },
            "applications": ["a1", "a2", "a3"]
        }))
        .expect("job decodes");

        assert_eq!(job.id().as_str(), "j1");
        assert_eq!(job.company().name(), "Acme");
        assert_eq!(job.job_type(), "Full-time");
        assert_eq!(job.salary(), Some(18.0));
        assert_eq!(
            job.created_at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single()
        );
        assert_eq!(job.owner_id().map(RecordId::as_str), Some("r1"));
        assert_eq!(job.applicant_count(), 3);
    }

    #[test]
    fn sparse_payload_degrades_to_defaults() {
        let job: JobRecord = serde_json::from_value(json!({
            "id": 3,
            "title": null,
            "company": null,
            "applications": null
        }))
        .expect("job decodes");

        assert_eq!(job.id().as_str(), "3");
        assert_eq!(job.title(), "");
        assert_eq!(job.field_text(JobField::CompanyName), "");
        assert_eq!(job.category(), Some(""));
        assert_eq!(job.salary(), None);
        assert_eq!(job.created_at(), None);
        assert!(job.owner_id().is_none());
        assert_eq!(job.applicant_count(), 0);
    }

    #[test]
    fn duplicate_key_spellings_prefer_the_backend_names() {
        let job: JobRecord = serde_json::from_value(json!({
            "_id": "j1",
            "id": "j1-virtual",
            "title": "Backend Engineer",
            "jobType": "Full-time",
            "job_type": "Part-time",
            "createdAt": "2024-01-01",
            "created_at": "2023-06-01",
            "createdBy": null,
            "created_by": "r1"
        }))
        .expect("job decodes");

        assert_eq!(job.id().as_str(), "j1");
        assert_eq!(job.job_type(), "Full-time");
        assert_eq!(
            job.created_at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single()
        );
        assert_eq!(job.owner_id().map(RecordId::as_str), Some("r1"));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(serde_json::from_value::<JobRecord>(json!("j1")).is_err());
    }

    #[test]
    fn drafts_drop_non_finite_salaries() {
        let job = JobRecord::new(JobDraft {
            salary: Some(f64::NAN),
            ..JobDraft::default()
        });
        assert_eq!(job.salary(), None);
    }

    #[test]
    fn jobs_are_never_private() {
        let job: JobRecord =
            serde_json::from_value(json!({ "id": 1, "isPrivate": true })).expect("job decodes");
        assert!(!job.is_private());
    }
}
