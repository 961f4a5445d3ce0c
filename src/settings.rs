use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::import::document::SocialLink;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown footer category '{0}'")]
    UnknownCategory(String),
    #[error("unknown setting '{0}'")]
    UnknownField(String),
    #[error("'{0}' not found")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Url,
}

/// A labelled value with an editor hint, used for SEO and tracking entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingField {
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    pub value: String,
    #[serde(default)]
    pub note: String,
}

impl SettingField {
    fn new(label: &str, kind: FieldKind, value: &str, note: &str) -> Self {
        Self {
            label: label.to_string(),
            kind,
            value: value.to_string(),
            note: note.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Seo,
    Tracking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub site_title: String,
    pub company_name: String,
    pub site_description: String,
    pub logo_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub business_address: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            site_title: "Your Website Title".into(),
            company_name: "Your Company Name".into(),
            site_description: "Brief description of your website".into(),
            logo_url: "https://example.com/logo.png".into(),
            contact_email: "contact@example.com".into(),
            contact_phone: "+1 (555) 123-4567".into(),
            business_address: "123 Main Street, City, State, ZIP".into(),
        }
    }
}

impl GeneralSettings {
    fn slot(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "site_title" => Some(&mut self.site_title),
            "company_name" => Some(&mut self.company_name),
            "site_description" => Some(&mut self.site_description),
            "logo_url" => Some(&mut self.logo_url),
            "contact_email" => Some(&mut self.contact_email),
            "contact_phone" => Some(&mut self.contact_phone),
            "business_address" => Some(&mut self.business_address),
            _ => None,
        }
    }
}

/// Site-wide settings: general info, menus, social links, SEO and tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub general: GeneralSettings,
    pub menu: Vec<String>,
    pub footer: BTreeMap<String, Vec<String>>,
    pub social_links: Vec<SocialLink>,
    pub seo: Vec<SettingField>,
    pub tracking: Vec<SettingField>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        let link = |platform: &str, url: &str| SocialLink {
            platform: platform.into(),
            url: url.into(),
        };

        Self {
            general: GeneralSettings::default(),
            menu: strings(&[
                "Home",
                "Destinations",
                "International",
                "Domestic",
                "Blog",
                "About",
                "Contact",
            ]),
            footer: BTreeMap::from([
                (
                    "Quick Links".to_string(),
                    strings(&["Privacy Policy", "Terms of Service", "Sitemap"]),
                ),
                (
                    "Services".to_string(),
                    strings(&["Tour Packages", "Hotel Bookings", "Travel Insurance"]),
                ),
                (
                    "Support".to_string(),
                    strings(&["FAQ", "Contact Us", "Help Center"]),
                ),
            ]),
            social_links: vec![
                link("Facebook", "https://facebook.com/yourpage"),
                link("Instagram", "https://instagram.com/youraccount"),
                link("Twitter", "https://twitter.com/youraccount"),
                link("LinkedIn", "https://linkedin.com/company/yourcompany"),
                link("YouTube", "https://youtube.com/channel/yourchannel"),
            ],
            seo: vec![
                SettingField::new(
                    "Default Meta Title",
                    FieldKind::Text,
                    "Default title for search engines",
                    "Recommended: 50-60 characters",
                ),
                SettingField::new(
                    "Default Meta Description",
                    FieldKind::Textarea,
                    "Default description for search engines",
                    "Recommended: 150-160 characters",
                ),
                SettingField::new(
                    "Default Keywords",
                    FieldKind::Text,
                    "keyword1, keyword2, keyword3",
                    "",
                ),
                SettingField::new(
                    "Default OG Image",
                    FieldKind::Url,
                    "https://example.com/default-og-image.jpg",
                    "Recommended size: 1200x630px",
                ),
            ],
            tracking: vec![
                SettingField::new(
                    "Google Analytics ID",
                    FieldKind::Text,
                    "G-XXXXXXXXXX or UA-XXXXXXXXX-X",
                    "",
                ),
                SettingField::new("Google Ads ID", FieldKind::Text, "AW-XXXXXXXXX", ""),
                SettingField::new("Facebook Pixel ID", FieldKind::Text, "XXXXXXXXXXXXXXX", ""),
                SettingField::new(
                    "Custom Head Scripts",
                    FieldKind::Textarea,
                    "<script>/* Custom scripts in <head> */</script>",
                    "Scripts added here will be inserted in the <head> section",
                ),
                SettingField::new(
                    "Custom Body Scripts",
                    FieldKind::Textarea,
                    "<script>/* Custom scripts before </body> */</script>",
                    "Scripts added here will be inserted before closing </body>",
                ),
            ],
            updated_at: None,
        }
    }
}

impl SiteSettings {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Stamp `updated_at` and write pretty JSON, creating parent directories.
    pub fn save(&mut self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        self.updated_at = Some(Utc::now());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(write_err)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn set_general(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let slot = self
            .general
            .slot(key)
            .ok_or_else(|| SettingsError::UnknownField(key.to_string()))?;
        *slot = value.to_string();
        Ok(())
    }

    pub fn add_menu_item(&mut self, item: &str) {
        self.menu.push(item.to_string());
    }

    pub fn rename_menu_item(&mut self, old: &str, new: &str) -> Result<(), SettingsError> {
        let slot = self
            .menu
            .iter_mut()
            .find(|m| m.as_str() == old)
            .ok_or_else(|| SettingsError::NotFound(old.to_string()))?;
        *slot = new.to_string();
        Ok(())
    }

    /// Removes every entry equal to `item`.
    pub fn remove_menu_item(&mut self, item: &str) -> Result<(), SettingsError> {
        let before = self.menu.len();
        self.menu.retain(|m| m != item);
        if self.menu.len() == before {
            return Err(SettingsError::NotFound(item.to_string()));
        }
        Ok(())
    }

    pub fn add_footer_item(&mut self, category: &str, item: &str) -> Result<(), SettingsError> {
        self.footer
            .get_mut(category)
            .ok_or_else(|| SettingsError::UnknownCategory(category.to_string()))?
            .push(item.to_string());
        Ok(())
    }

    pub fn remove_footer_item(&mut self, category: &str, item: &str) -> Result<(), SettingsError> {
        let items = self
            .footer
            .get_mut(category)
            .ok_or_else(|| SettingsError::UnknownCategory(category.to_string()))?;
        let idx = items
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| SettingsError::NotFound(item.to_string()))?;
        items.remove(idx);
        Ok(())
    }

    /// Update the link for `platform`, or append a new one.
    pub fn set_social_link(&mut self, platform: &str, url: &str) {
        match self.social_links.iter_mut().find(|l| l.platform == platform) {
            Some(link) => link.url = url.to_string(),
            None => self.social_links.push(SocialLink {
                platform: platform.to_string(),
                url: url.to_string(),
            }),
        }
    }

    pub fn remove_social_link(&mut self, platform: &str) -> Result<(), SettingsError> {
        let idx = self
            .social_links
            .iter()
            .position(|l| l.platform == platform)
            .ok_or_else(|| SettingsError::NotFound(platform.to_string()))?;
        self.social_links.remove(idx);
        Ok(())
    }

    fn group_mut(&mut self, group: FieldGroup) -> &mut Vec<SettingField> {
        match group {
            FieldGroup::Seo => &mut self.seo,
            FieldGroup::Tracking => &mut self.tracking,
        }
    }

    /// Update the field labelled `label`, or append it. `None` leaves kind/note untouched.
    pub fn set_field(
        &mut self,
        group: FieldGroup,
        label: &str,
        value: &str,
        kind: Option<FieldKind>,
        note: Option<&str>,
    ) {
        let fields = self.group_mut(group);
        match fields.iter_mut().find(|f| f.label == label) {
            Some(field) => {
                field.value = value.to_string();
                if let Some(kind) = kind {
                    field.kind = kind;
                }
                if let Some(note) = note {
                    field.note = note.to_string();
                }
            }
            None => fields.push(SettingField::new(
                label,
                kind.unwrap_or_default(),
                value,
                note.unwrap_or(""),
            )),
        }
    }

    pub fn remove_field(&mut self, group: FieldGroup, label: &str) -> Result<(), SettingsError> {
        let fields = self.group_mut(group);
        let idx = fields
            .iter()
            .position(|f| f.label == label)
            .ok_or_else(|| SettingsError::NotFound(label.to_string()))?;
        fields.remove(idx);
        Ok(())
    }
}

// ── Tests ──
