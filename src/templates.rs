//! Template System - theme presets, widget presets and saved documents
//!
//! Applying a preset always copies. Every instantiated widget gets fresh ids
//! on its nested buttons and detail rows, so two widgets made from the same
//! preset never share an identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::{
    new_id, ButtonGroupWidget, ButtonStyle, ButtonVariant, EmailConfig, KeyValueItem,
    MeetingWidget, NoticeVariant, NoticeWidget, Theme, Widget, WidgetKind, WidgetType,
};
use crate::{AnnounceError, Result};

pub type TemplateId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    /// Carries the `type` tag of the widget it produces.
    pub default_data: WidgetKind,
}

impl WidgetTemplate {
    pub fn widget_type(&self) -> Option<WidgetType> {
        self.default_data.widget_type()
    }

    /// A new widget built from this preset, with fresh ids throughout.
    pub fn instantiate(&self) -> Widget {
        Widget {
            id: String::new(),
            kind: self.default_data.clone(),
        }
        .with_fresh_ids()
    }
}

/// A preset file on disk holds either kind of preset.
#[derive(Deserialize)]
#[serde(untagged)]
enum PresetFile {
    Theme(ThemeTemplate),
    Widget(WidgetTemplate),
}

fn theme_preset(id: &str, name: &str, description: &str, colors: [&str; 5], radius: &str) -> ThemeTemplate {
    let [primary, secondary, accent, background, text] = colors;
    ThemeTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        theme: Theme {
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
            accent_color: accent.to_string(),
            background_color: background.to_string(),
            text_color: text.to_string(),
            border_radius: radius.to_string(),
            ..Theme::default()
        },
    }
}

pub fn builtin_themes() -> Vec<ThemeTemplate> {
    vec![
        ThemeTemplate {
            id: "cap-default".to_string(),
            name: "CAP Default".to_string(),
            description: "Civil Air Patrol colors".to_string(),
            theme: Theme::default(),
        },
        theme_preset(
            "modern-blue",
            "Modern Blue",
            "Clean blue theme",
            ["#2563eb", "#60a5fa", "#1e40af", "#ffffff", "#1f2937"],
            "12px",
        ),
        theme_preset(
            "forest-green",
            "Forest Green",
            "Nature-inspired theme",
            ["#166534", "#86efac", "#15803d", "#ffffff", "#1f2937"],
            "8px",
        ),
        theme_preset(
            "sunset-orange",
            "Sunset Orange",
            "Warm and inviting",
            ["#ea580c", "#fdba74", "#c2410c", "#ffffff", "#1f2937"],
            "10px",
        ),
    ]
}

fn detail(key: &str, value: &str) -> KeyValueItem {
    KeyValueItem {
        id: new_id(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn button(text: &str, variant: ButtonVariant) -> ButtonStyle {
    ButtonStyle {
        id: new_id(),
        text: text.to_string(),
        url: String::new(),
        variant,
    }
}

pub fn builtin_widgets() -> Vec<WidgetTemplate> {
    vec![
        WidgetTemplate {
            id: "meeting-standard".to_string(),
            name: "Standard Meeting".to_string(),
            description: "Meeting with location, time, and details".to_string(),
            default_data: WidgetKind::Meeting(MeetingWidget {
                title: "Meeting Title".to_string(),
                details: vec![
                    detail("Location", "TBA"),
                    detail("UOD", "TBA"),
                    detail("Details", "TBA"),
                ],
                buttons: vec![],
            }),
        },
        WidgetTemplate {
            id: "meeting-virtual".to_string(),
            name: "Virtual Meeting".to_string(),
            description: "Online meeting with join link".to_string(),
            default_data: WidgetKind::Meeting(MeetingWidget {
                title: "Virtual Meeting".to_string(),
                details: vec![
                    detail("Location", "Virtual"),
                    detail("UOD", "Civilian"),
                    detail("Time", "TBA"),
                ],
                buttons: vec![button("Join Meeting", ButtonVariant::Primary)],
            }),
        },
        WidgetTemplate {
            id: "notice-no-meeting".to_string(),
            name: "No Meeting Notice".to_string(),
            description: "Notice for cancelled meetings".to_string(),
            default_data: WidgetKind::Notice(NoticeWidget {
                content: "NO MEETING".to_string(),
                variant: NoticeVariant::Warning,
            }),
        },
        WidgetTemplate {
            id: "cta-buttons".to_string(),
            name: "Call to Action".to_string(),
            description: "Group of action buttons".to_string(),
            default_data: WidgetKind::ButtonGroup(ButtonGroupWidget {
                buttons: vec![
                    button("Learn More", ButtonVariant::Primary),
                    button("Register", ButtonVariant::Accent),
                ],
            }),
        },
    ]
}

/// Template registry - theme and widget presets in display order
pub struct TemplateRegistry {
    themes: Vec<ThemeTemplate>,
    widgets: Vec<WidgetTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            themes: vec![],
            widgets: vec![],
        }
    }

    pub fn with_builtins() -> Self {
        Self {
            themes: builtin_themes(),
            widgets: builtin_widgets(),
        }
    }

    /// Built-in presets plus every parseable `*.json` preset in `dir`.
    /// A file whose id matches an existing preset replaces it.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut registry = Self::with_builtins();
        if !dir.exists() {
            return Ok(registry);
        }

        let io_err = |source| AnnounceError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths: Vec<_> = fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(io_err)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |e| e == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<PresetFile>(&content).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(PresetFile::Theme(t)) => registry.register_theme(t),
                Ok(PresetFile::Widget(w)) => registry.register_widget(w),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "skipping unreadable preset");
                }
            }
        }
        Ok(registry)
    }

    pub fn theme(&self, id: &str) -> Option<&ThemeTemplate> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetTemplate> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn themes(&self) -> &[ThemeTemplate] {
        &self.themes
    }

    pub fn widgets(&self) -> &[WidgetTemplate] {
        &self.widgets
    }

    pub fn register_theme(&mut self, template: ThemeTemplate) {
        match self.themes.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.themes.push(template),
        }
    }

    pub fn register_widget(&mut self, template: WidgetTemplate) {
        match self.widgets.iter_mut().find(|w| w.id == template.id) {
            Some(existing) => *existing = template,
            None => self.widgets.push(template),
        }
    }

    /// Copy of `config` with its theme replaced by the preset.
    pub fn apply_theme(&self, id: &str, config: &EmailConfig) -> Result<EmailConfig> {
        let preset = self
            .theme(id)
            .ok_or_else(|| AnnounceError::TemplateNotFound(id.to_string()))?;
        Ok(EmailConfig {
            theme: preset.theme.clone(),
            ..config.clone()
        })
    }

    pub fn instantiate_widget(&self, id: &str) -> Result<Widget> {
        self.widget(id)
            .map(WidgetTemplate::instantiate)
            .ok_or_else(|| AnnounceError::TemplateNotFound(id.to_string()))
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// --- Saved documents ---

/// A whole document saved under a name for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: EmailConfig,
    #[serde(default = "Utc::now", deserialize_with = "lenient_timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Older libraries stored a locale date string such as `10/16/2026`.
mod lenient_timestamp {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

    /// RFC 3339 or a bare date; anything unreadable becomes the load time.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw.as_str().and_then(parse).unwrap_or_else(|| {
            tracing::warn!(created_at = %raw, "unreadable template date, using now");
            Utc::now()
        }))
    }

    fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

/// User-saved templates; serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateLibrary {
    templates: Vec<SavedTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates(&self) -> &[SavedTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Store a copy of `config` under `name`. Name and description are trimmed.
    pub fn save(&mut self, name: &str, description: &str, config: &EmailConfig) -> Result<&SavedTemplate> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AnnounceError::EmptyTemplateName);
        }
        let saved = SavedTemplate {
            id: new_id(),
            name: name.to_string(),
            description: description.trim().to_string(),
            config: config.clone(),
            created_at: Utc::now(),
        };
        tracing::debug!(id = %saved.id, name = %saved.name, "saved template");
        let index = self.templates.len();
        self.templates.push(saved);
        Ok(&self.templates[index])
    }

    /// A fresh copy of the saved document.
    pub fn load(&self, id: &str) -> Result<EmailConfig> {
        self.get(id)
            .map(|t| t.config.clone())
            .ok_or_else(|| AnnounceError::TemplateNotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() != before
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.templates)?)
    }

    /// Merge templates from an exported library. Each imported entry gets a
    /// new id so it cannot collide with an existing one. Returns the count.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(AnnounceError::InvalidLibrary(
                "expected a JSON array of templates".to_string(),
            ));
        }
        let imported: Vec<SavedTemplate> = serde_json::from_value(value)?;
        let count = imported.len();
        self.templates.extend(imported.into_iter().map(|t| SavedTemplate {
            id: new_id(),
            ..t
        }));
        tracing::debug!(count, "imported templates");
        Ok(count)
    }
}
