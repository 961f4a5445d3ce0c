use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{require, FieldError, Resource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogComment {
    #[serde(deserialize_with = "id_as_string")]
    pub blog_id: String,
    pub name: String,
    pub email_id: String,
    pub comment: String,
}

/// The backend stores `blog_id` as a number but forms post it as a string.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a blog id, got {}",
            other
        ))),
    }
}

impl BlogComment {
    /// Same blog, whitespace aside; `"3"` matches `3`.
    pub fn is_for_blog(&self, blog_id: &str) -> bool {
        self.blog_id.trim() == blog_id.trim()
    }
}

impl Resource for BlogComment {
    const COLLECTION: &'static str = "blog_comments/";
    const LABEL: &'static str = "Comment";

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "blog_id", "Blog", &self.blog_id);
        require(&mut errors, "name", "Name", &self.name);
        require(&mut errors, "email_id", "Email", &self.email_id);
        require(&mut errors, "comment", "Comment", &self.comment);
        errors
    }

    fn summary(&self) -> String {
        format!("[blog {}] {} <{}>: {}", self.blog_id, self.name, self.email_id, self.comment)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Blog", self.blog_id.clone()),
            ("Name", self.name.clone()),
            ("Email", self.email_id.clone()),
            ("Comment", self.comment.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Record;

    #[test]
    fn every_field_required() {
        assert_eq!(BlogComment::default().validate().len(), 4);
    }

    #[test]
    fn numeric_and_string_blog_ids_decode() {
        let comments: Vec<Record<BlogComment>> = serde_json::from_str(
            r#"[
                {"id":1,"blog_id":3,"name":"Ana","email_id":"a@x.io","comment":"Nice","created_at":"2024-05-01"},
                {"id":2,"blog_id":"7","name":"Raj","email_id":"r@x.io","comment":"Thanks"},
                {"id":3,"blog_id":null,"name":"Lee","email_id":"l@x.io","comment":"?"}
            ]"#,
        )
        .unwrap();
        assert_eq!(comments[0].fields.blog_id, "3");
        assert_eq!(comments[1].fields.blog_id, "7");
        assert_eq!(comments[2].fields.blog_id, "");
        assert!(comments[0].fields.is_for_blog("3"));
        assert!(!comments[1].fields.is_for_blog("3"));
    }

    #[test]
    fn object_blog_id_is_rejected() {
        let err = serde_json::from_str::<BlogComment>(r#"{"blog_id":{"id":3}}"#).unwrap_err();
        assert!(err.to_string().contains("expected a blog id"));
    }
}
