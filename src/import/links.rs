use std::sync::LazyLock;

use regex::Regex;

use super::document::SocialLink;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Label for every extracted link; the source text carries no platform identity.
pub const SOCIAL_PLATFORM: &str = "Social Media";

/// Pull every http(s) URL out of free text, in order, duplicates kept.
pub fn extract(text: &str) -> Vec<SocialLink> {
    URL_RE
        .find_iter(text)
        .map(|m| SocialLink {
            platform: SOCIAL_PLATFORM.to_string(),
            url: m.as_str().to_string(),
        })
        .collect()
}
