use serde::{Deserialize, Serialize};

use super::rows::Metadata;

/// One body segment of an imported post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub subtitle: String,
    pub text: String,
    pub image: Option<String>,
    pub alt_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Submission-ready blog post assembled from one CSV import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDocument {
    pub title: String,
    pub meta_title: String,
    pub meta_description: String,
    pub introduction: String,
    pub description: Vec<ContentSection>,
    pub conclusion: String,
    pub social_links: Vec<SocialLink>,
}

/// Combine classified metadata, sections and extracted links.
pub fn assemble(
    metadata: &Metadata,
    description: Vec<ContentSection>,
    social_links: Vec<SocialLink>,
) -> BlogDocument {
    BlogDocument {
        title: metadata.title.clone(),
        meta_title: metadata.meta_title.clone(),
        meta_description: metadata.meta_description.clone(),
        introduction: metadata.introduction.clone(),
        description,
        conclusion: metadata.conclusion.clone(),
        social_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys_and_null_image() {
        let doc = BlogDocument {
            title: "Trip".into(),
            description: vec![ContentSection {
                subtitle: "Day 1".into(),
                text: "Saw the sights".into(),
                image: None,
                alt_text: String::new(),
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["title"], "Trip");
        assert_eq!(json["metaTitle"], "");
        assert!(json["socialLinks"].as_array().unwrap().is_empty());
        assert!(json["description"][0]["image"].is_null());
        assert_eq!(json["description"][0]["altText"], "");
    }
}
