pub mod document;
pub mod links;
pub mod rows;
pub mod session;
pub mod table;

use tracing::info;

use document::BlogDocument;
use table::RawRow;

/// Four-step pipeline: CSV text → rows → metadata + sections → links → document.
pub fn import_text(text: &str) -> BlogDocument {
    let rows = table::parse_rows(text);
    build_document(&rows)
}

/// Assemble a fresh document from already-parsed rows.
pub fn build_document(rows: &[RawRow]) -> BlogDocument {
    let metadata = rows::metadata(rows);
    let sections = rows::content_sections(rows);
    let social_links = links::extract(&metadata.social_media);

    info!(
        "Assembled blog \"{}\": {} rows, {} sections, {} social links",
        metadata.title,
        rows.len(),
        sections.len(),
        social_links.len()
    );

    document::assemble(&metadata, sections, social_links)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::document::ContentSection;
    use super::links::SOCIAL_PLATFORM;
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.csv", name)).unwrap()
    }

    #[test]
    fn trip_scenario() {
        let doc = import_text(&fixture("trip"));
        assert_eq!(doc.title, "Trip");
        assert_eq!(doc.meta_title, "T");
        assert_eq!(doc.meta_description, "D");
        assert_eq!(doc.introduction, "Intro");
        assert_eq!(
            doc.description,
            vec![ContentSection {
                subtitle: "Day 1".into(),
                text: "Saw the sights".into(),
                image: Some("/img1.jpg".into()),
                alt_text: "alt1".into(),
            }]
        );
        assert_eq!(doc.conclusion, "Great trip");
        assert_eq!(doc.social_links.len(), 1);
        assert_eq!(doc.social_links[0].platform, SOCIAL_PLATFORM);
        assert_eq!(doc.social_links[0].url, "https://x.com/travel");
    }

    #[test]
    fn header_only_yields_empty_document() {
        let doc = import_text(&fixture("header_only"));
        assert_eq!(doc, BlogDocument::default());
        assert!(doc.description.is_empty());
        assert!(doc.social_links.is_empty());
    }

    #[test]
    fn empty_file_yields_empty_document() {
        assert_eq!(import_text(""), BlogDocument::default());
    }

    #[test]
    fn lisbon_multi_row() {
        let doc = import_text(&fixture("lisbon"));
        assert_eq!(doc.title, "Lisbon in Five Days");
        assert_eq!(doc.meta_description, "Where to eat, stay and wander");
        assert_eq!(doc.conclusion, "Go in spring.");

        let subtitles: Vec<&str> = doc.description.iter().map(|s| s.subtitle.as_str()).collect();
        assert_eq!(subtitles, vec!["Arrival", "Tram 28", "Belem"]);
        assert_eq!(doc.description[0].image.as_deref(), Some("/lisbon/arrival.jpg"));
        assert_eq!(doc.description[1].text, "Ride it early, it gets \"packed\" by ten.");
        assert_eq!(doc.description[1].image, None);
        assert_eq!(doc.description[2].text, "Pasteis, the monastery,\nand the tower.");
        assert_eq!(doc.description[2].image.as_deref(), Some("/static/belem.png"));

        // links come from the first row only, duplicates kept
        let urls: Vec<&str> = doc.social_links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://instagram.com/wander",
                "https://x.com/wander",
                "https://instagram.com/wander",
            ]
        );
    }

    #[test]
    fn assembling_twice_gives_equal_but_distinct_documents() {
        let rows = table::parse_rows(&fixture("lisbon"));
        let a = build_document(&rows);
        let b = build_document(&rows);
        assert_eq!(a, b);
        assert!(!std::ptr::eq(a.description.as_ptr(), b.description.as_ptr()));
        assert!(!std::ptr::eq(a.social_links.as_ptr(), b.social_links.as_ptr()));
    }
}
