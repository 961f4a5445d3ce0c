use std::fmt::Write;

use crate::import::document::BlogDocument;

/// Read-only text rendering of an imported post, in page order.
pub fn render(doc: &BlogDocument) -> String {
    let mut out = String::new();
    let title = if doc.title.is_empty() { "(untitled)" } else { doc.title.as_str() };
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out, "Meta title:       {}", or_dash(&doc.meta_title));
    let _ = writeln!(out, "Meta description: {}", or_dash(&doc.meta_description));

    if !doc.introduction.is_empty() {
        let _ = writeln!(out, "\n{}", doc.introduction);
    }

    for (i, section) in doc.description.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, section.subtitle);
        if let Some(image) = &section.image {
            if section.alt_text.is_empty() {
                let _ = writeln!(out, "   [image: {}]", image);
            } else {
                let _ = writeln!(out, "   [image: {} \"{}\"]", image, section.alt_text);
            }
        }
        for line in section.text.lines() {
            let _ = writeln!(out, "   {}", line);
        }
    }

    if !doc.conclusion.is_empty() {
        let _ = writeln!(out, "\n{}", doc.conclusion);
    }

    if !doc.social_links.is_empty() {
        let _ = writeln!(out, "\n--- Social ---");
        for link in &doc.social_links {
            let _ = writeln!(out, "  {}: {}", link.platform, link.url);
        }
    }

    let _ = write!(
        out,
        "\n{} sections | {} social links",
        doc.description.len(),
        doc.social_links.len()
    );
    out
}

/// The exact payload the submit call would send.
pub fn to_json(doc: &BlogDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::import_text;

    #[test]
    fn renders_trip() {
        let csv = std::fs::read_to_string("tests/fixtures/trip.csv").unwrap();
        let text = render(&import_text(&csv));
        assert!(text.starts_with("Trip\n====\n"));
        assert!(text.contains("Meta title:       T"));
        assert!(text.contains("1. Day 1\n   [image: /img1.jpg \"alt1\"]\n   Saw the sights"));
        assert!(text.contains("Social Media: https://x.com/travel"));
        assert!(text.ends_with("1 sections | 1 social links"));
    }

    #[test]
    fn renders_empty_document() {
        let text = render(&BlogDocument::default());
        assert!(text.starts_with("(untitled)"));
        assert!(text.contains("Meta description: -"));
        assert!(!text.contains("--- Social ---"));
    }

    #[test]
    fn json_payload_uses_wire_names() {
        let json = to_json(&BlogDocument::default()).unwrap();
        assert!(json.contains("\"metaDescription\""));
        assert!(json.contains("\"socialLinks\""));
    }
}
