use serde::{Deserialize, Serialize};

use super::{require, FieldError, Resource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub position: String,
    pub description: String,
    /// Image URL as stored by the backend. Read-only here: uploads happen elsewhere,
    /// so it is never part of a write body.
    #[serde(skip_serializing)]
    pub image: Option<String>,
}

impl Resource for TeamMember {
    const COLLECTION: &'static str = "teams/";
    const LABEL: &'static str = "Team member";

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", "Name", &self.name);
        require(&mut errors, "position", "Position", &self.position);
        errors
    }

    fn summary(&self) -> String {
        format!("{}, {}", self.name, self.position)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Position", self.position.clone()),
            ("Description", self.description.clone()),
            ("Image", self.image.clone().unwrap_or_default()),
        ]
    }

    fn keep_read_only(&mut self, previous: &Self) {
        self.image = previous.image.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_is_optional() {
        let member = TeamMember {
            name: "Priya".into(),
            position: "Designer".into(),
            ..Default::default()
        };
        assert!(member.validate().is_empty());
        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("image").is_none());
    }

    #[test]
    fn image_is_read_but_never_written() {
        let member: TeamMember = serde_json::from_str(
            r#"{"name":"Priya","position":"Lead","image":"https://cdn.example/p.png"}"#,
        )
        .unwrap();
        assert_eq!(member.image.as_deref(), Some("https://cdn.example/p.png"));
        assert_eq!(member.details()[3], ("Image", "https://cdn.example/p.png".to_string()));
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json, serde_json::json!({"name":"Priya","position":"Lead","description":""}));
    }

    #[test]
    fn blank_position_rejected() {
        let member = TeamMember {
            name: "Priya".into(),
            position: "  ".into(),
            ..Default::default()
        };
        let errors = member.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "position: Position is required.");
    }
}
