use std::fmt::Write;

use serde::Deserialize;

use super::{BlogComment, Record};

/// Read-only endpoint for one published post.
pub const DETAILS_COLLECTION: &str = "blog_details/";

/// A published post as `blog_details/<id>/` returns it. Every field may be absent or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlogDetails {
    pub heading: Option<String>,
    pub sub_heading: Option<String>,
    pub seo_title: Option<String>,
    pub meta_description: Option<String>,
    pub feature_image: Option<String>,
    pub image_alt_text: Option<String>,
    pub full_description: Option<String>,
    pub tags: Option<String>,
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

impl BlogDetails {
    /// SEO title, falling back to the heading.
    pub fn title(&self) -> &str {
        match text(&self.seo_title) {
            "" => text(&self.heading),
            t => t,
        }
    }

    /// Comma-separated tags, trimmed, blanks dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        text(&self.tags)
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Post header, body and its comments as plain text.
    pub fn report(&self, id: i64, comments: &[&Record<BlogComment>]) -> String {
        let mut out = String::new();
        let heading = match text(&self.heading) {
            "" => "(untitled)",
            h => h,
        };
        let _ = writeln!(out, "Blog {}: {}", id, heading);
        if !text(&self.sub_heading).is_empty() {
            let _ = writeln!(out, "{}", text(&self.sub_heading));
        }
        let _ = writeln!(out, "SEO title: {}", self.title());
        let description = match text(&self.meta_description) {
            "" => text(&self.sub_heading),
            d => d,
        };
        let _ = writeln!(out, "Meta description: {}", description);
        if !text(&self.feature_image).is_empty() {
            let _ = writeln!(
                out,
                "Image: {} \"{}\"",
                text(&self.feature_image),
                text(&self.image_alt_text)
            );
        }
        let tags = self.tag_list();
        if !tags.is_empty() {
            let _ = writeln!(out, "Tags: {}", tags.join(", "));
        }
        if !text(&self.full_description).is_empty() {
            let _ = writeln!(out, "\n{}", text(&self.full_description));
        }

        let _ = write!(out, "\n{} Comments", comments.len());
        for c in comments {
            let _ = write!(out, "\n  #{} {} <{}>: {}", c.id, c.fields.name, c.fields.email_id, c.fields.comment);
        }
        out
    }
}
