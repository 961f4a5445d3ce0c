use serde::{Deserialize, Serialize};

use super::{require, FieldError, Resource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub job_description: String,
    pub requirements: String,
    pub salary: String,
}

impl Resource for JobPosting {
    const COLLECTION: &'static str = "post_jobs/";
    const LABEL: &'static str = "Job";

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "job_title", "Job title", &self.job_title);
        require(&mut errors, "company", "Company", &self.company);
        errors
    }

    fn summary(&self) -> String {
        let mut line = format!("{} @ {}", self.job_title, self.company);
        if !self.location.is_empty() {
            line.push_str(&format!(" - {}", self.location));
        }
        if !self.salary.is_empty() {
            line.push_str(&format!(" ({})", self.salary));
        }
        line
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Job title", self.job_title.clone()),
            ("Company", self.company.clone()),
            ("Location", self.location.clone()),
            ("Description", self.job_description.clone()),
            ("Requirements", self.requirements.clone()),
            ("Salary", self.salary.clone()),
        ]
    }
}
