pub mod blog;
pub mod comment;
pub mod job;
pub mod screen;
pub mod team;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use blog::BlogDetails;
pub use comment::BlogComment;
pub use job::JobPosting;
pub use team::TeamMember;

/// A REST collection managed through the admin panel.
pub trait Resource: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static {
    /// Collection path relative to the API base, e.g. `post_jobs/`.
    const COLLECTION: &'static str;
    const LABEL: &'static str;

    /// Required-field check run before any write.
    fn validate(&self) -> Vec<FieldError>;

    /// One line for list output.
    fn summary(&self) -> String;

    /// Every field as `(label, value)`, in display order, for the details view.
    fn details(&self) -> Vec<(&'static str, String)>;

    /// Copy fields the backend owns (never sent on writes) from `previous`.
    fn keep_read_only(&mut self, _previous: &Self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub(crate) fn require(errors: &mut Vec<FieldError>, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field: field.to_string(),
            message: format!("{} is required.", label),
        });
    }
}

/// A stored item: server id plus the entity's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<R> {
    pub id: i64,
    #[serde(flatten)]
    pub fields: R,
}
