use tracing::debug;

use super::document::ContentSection;
use super::table::RawRow;

pub const TITLE: &str = "Title";
pub const META_TITLE: &str = "MetaTitle";
pub const META_DESCRIPTION: &str = "MetaDescription";
pub const INTRODUCTION: &str = "Introduction";
pub const SUBTITLE: &str = "Subtitle";
pub const TEXT: &str = "Text";
pub const IMAGE_PATH: &str = "ImagePath";
pub const ALT_TEXT: &str = "AltText";
pub const CONCLUSION: &str = "Conclusion";
pub const SOCIAL_MEDIA: &str = "SocialMedia";

/// Document-level fields. Always read from the first data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub meta_title: String,
    pub meta_description: String,
    pub introduction: String,
    pub conclusion: String,
    pub social_media: String,
}

pub fn metadata(rows: &[RawRow]) -> Metadata {
    let Some(first) = rows.first() else {
        return Metadata::default();
    };
    Metadata {
        title: first.get(TITLE).to_string(),
        meta_title: first.get(META_TITLE).to_string(),
        meta_description: first.get(META_DESCRIPTION).to_string(),
        introduction: first.get(INTRODUCTION).to_string(),
        conclusion: first.get(CONCLUSION).to_string(),
        social_media: first.get(SOCIAL_MEDIA).to_string(),
    }
}

/// Rows with both a subtitle and body text, in input order. Others are dropped.
pub fn content_sections(rows: &[RawRow]) -> Vec<ContentSection> {
    let sections: Vec<ContentSection> = rows
        .iter()
        .filter(|row| !row.get(SUBTITLE).trim().is_empty() && !row.get(TEXT).trim().is_empty())
        .map(|row| ContentSection {
            subtitle: row.get(SUBTITLE).to_string(),
            text: row.get(TEXT).to_string(),
            image: normalize_image(row.get(IMAGE_PATH)),
            alt_text: row.get(ALT_TEXT).to_string(),
        })
        .collect();

    debug!(
        "Kept {} of {} rows as sections",
        sections.len(),
        rows.len()
    );
    sections
}

/// Relative paths become root-relative; blank means no image.
fn normalize_image(raw: &str) -> Option<String> {
    let path = raw.trim();
    if path.is_empty() {
        None
    } else if path.starts_with('/') || path.starts_with("http://") || path.starts_with("https://") {
        Some(path.to_string())
    } else {
        Some(format!("/{}", path))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn metadata_from_first_row_only() {
        let rows = vec![
            row(&[(TITLE, "First"), (CONCLUSION, "End"), (SOCIAL_MEDIA, "https://a.com")]),
            row(&[(TITLE, "Second"), (META_TITLE, "ignored")]),
        ];
        let meta = metadata(&rows);
        assert_eq!(meta.title, "First");
        assert_eq!(meta.meta_title, "");
        assert_eq!(meta.conclusion, "End");
        assert_eq!(meta.social_media, "https://a.com");
    }

    #[test]
    fn metadata_of_nothing_is_empty() {
        assert_eq!(metadata(&[]), Metadata::default());
    }

    #[test]
    fn metadata_keeps_values_verbatim() {
        let meta = metadata(&[row(&[(TITLE, "  padded  ")])]);
        assert_eq!(meta.title, "  padded  ");
    }

    #[test]
    fn sections_need_subtitle_and_text() {
        let rows = vec![
            row(&[(SUBTITLE, "A"), (TEXT, "a body")]),
            row(&[(SUBTITLE, ""), (TEXT, "orphan text")]),
            row(&[(SUBTITLE, "No body"), (TEXT, "   ")]),
            row(&[(SUBTITLE, "B"), (TEXT, "b body")]),
        ];
        let sections = content_sections(&rows);
        let subtitles: Vec<&str> = sections.iter().map(|s| s.subtitle.as_str()).collect();
        assert_eq!(subtitles, vec!["A", "B"]);
    }

    #[test]
    fn image_paths() {
        assert_eq!(normalize_image("img1.jpg").as_deref(), Some("/img1.jpg"));
        assert_eq!(normalize_image("  pics/a.png ").as_deref(), Some("/pics/a.png"));
        assert_eq!(normalize_image("/already/rooted.png").as_deref(), Some("/already/rooted.png"));
        assert_eq!(
            normalize_image("https://cdn.example/a.png").as_deref(),
            Some("https://cdn.example/a.png")
        );
        assert_eq!(normalize_image(""), None);
        assert_eq!(normalize_image("   "), None);
    }

    #[test]
    fn section_fields() {
        let rows = vec![row(&[
            (SUBTITLE, "Day 1"),
            (TEXT, "Saw the sights"),
            (IMAGE_PATH, "img1.jpg"),
            (ALT_TEXT, "alt1"),
        ])];
        let s = &content_sections(&rows)[0];
        assert_eq!(s.image.as_deref(), Some("/img1.jpg"));
        assert_eq!(s.alt_text, "alt1");

        let bare = content_sections(&[row(&[(SUBTITLE, "x"), (TEXT, "y")])]);
        assert_eq!(bare[0].image, None);
        assert_eq!(bare[0].alt_text, "");
    }
}
