//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations against a whole document.
//! Only `Error` violations block a checked compile.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::model::{ButtonStyle, EmailConfig, Widget, WidgetKind, IMAGE_WIDTHS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    /// Where in the document, e.g. `theme.primaryColor` or `sections[0].widgets[2]`.
    pub location: String,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<ValidationViolation>) -> Self {
        let valid = !violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);
        Self { valid, violations }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, config: &EmailConfig) -> Vec<ValidationViolation>;
}

/// Visit every widget with its location path.
fn each_widget<'a>(config: &'a EmailConfig) -> impl Iterator<Item = (String, &'a Widget)> {
    config.sections.iter().enumerate().flat_map(|(s, section)| {
        section
            .widgets
            .iter()
            .enumerate()
            .map(move |(w, widget)| (format!("sections[{s}].widgets[{w}]"), widget))
    })
}

// --- Concrete Rules ---

/// A widget tag outside the known set means the producer is out of date or
/// the data is corrupt.
pub struct UnknownWidgetRule;

impl ValidationRule for UnknownWidgetRule {
    fn name(&self) -> &'static str { "unknown_widget" }

    fn validate(&self, config: &EmailConfig) -> Vec<ValidationViolation> {
        each_widget(config)
            .filter(|(_, widget)| widget.kind == WidgetKind::Unknown)
            .map(|(location, widget)| ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: format!("Widget '{}' has an unrecognized type", widget.id),
                location,
                remediation: vec!["Remove the widget or re-create it with a supported type".to_string()],
            })
            .collect()
    }
}

pub struct ColorFormatRule;

impl ColorFormatRule {
    fn check(&self, location: String, value: &str) -> Option<ValidationViolation> {
        if Rgb::parse(value).is_some() {
            return None;
        }
        Some(ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Warning,
            message: format!("'{}' is not a hex color; derived shades will be skipped", value),
            location,
            remediation: vec!["Use a #RRGGBB color".to_string()],
        })
    }
}

impl ValidationRule for ColorFormatRule {
    fn name(&self) -> &'static str { "color_format" }

    fn validate(&self, config: &EmailConfig) -> Vec<ValidationViolation> {
        let theme = &config.theme;
        let theme_colors = [
            ("primaryColor", &theme.primary_color),
            ("secondaryColor", &theme.secondary_color),
            ("accentColor", &theme.accent_color),
            ("backgroundColor", &theme.background_color),
            ("textColor", &theme.text_color),
        ];

        let mut violations: Vec<_> = theme_colors
            .iter()
            .filter_map(|(field, value)| self.check(format!("theme.{field}"), value))
            .collect();

        for (s, section) in config.sections.iter().enumerate() {
            if let Some(color) = section.border_color.as_deref().filter(|c| !c.is_empty()) {
                violations.extend(self.check(format!("sections[{s}].borderColor"), color));
            }
        }

        violations
    }
}

pub struct ImageWidthRule;

impl ValidationRule for ImageWidthRule {
    fn name(&self) -> &'static str { "image_width" }

    fn validate(&self, config: &EmailConfig) -> Vec<ValidationViolation> {
        each_widget(config)
            .filter_map(|(location, widget)| match &widget.kind {
                WidgetKind::Image(image) => {
                    let width = image.requested_width()?;
                    if IMAGE_WIDTHS.contains(&width.trim()) {
                        return None;
                    }
                    Some(ValidationViolation {
                        rule: self.name().to_string(),
                        severity: ViolationSeverity::Warning,
                        message: format!("Image width '{}' is not a supported size", width),
                        location,
                        remediation: vec![format!("Use one of {}", IMAGE_WIDTHS.join(", "))],
                    })
                }
                _ => None,
            })
            .collect()
    }
}

pub struct EmptyLinkRule;

impl EmptyLinkRule {
    fn violation(&self, location: String, label: &str) -> ValidationViolation {
        ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Info,
            message: format!("'{}' has no link target", label),
            location,
            remediation: vec!["Fill in the URL before sending".to_string()],
        }
    }

    fn check_buttons(&self, location: &str, buttons: &[ButtonStyle]) -> Vec<ValidationViolation> {
        buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.url.trim().is_empty())
            .map(|(i, b)| self.violation(format!("{location}.buttons[{i}]"), &b.text))
            .collect()
    }
}

impl ValidationRule for EmptyLinkRule {
    fn name(&self) -> &'static str { "empty_link" }

    fn validate(&self, config: &EmailConfig) -> Vec<ValidationViolation> {
        let mut violations = vec![];
        for (location, widget) in each_widget(config) {
            match &widget.kind {
                WidgetKind::Button(b) if b.url.trim().is_empty() => {
                    violations.push(self.violation(location, &b.text));
                }
                WidgetKind::ButtonGroup(g) => violations.extend(self.check_buttons(&location, &g.buttons)),
                WidgetKind::Meeting(m) => violations.extend(self.check_buttons(&location, &m.buttons)),
                _ => {}
            }
        }
        violations
    }
}

/// Validator orchestrates rules
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule + Send + Sync>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(UnknownWidgetRule),
                Box::new(ColorFormatRule),
                Box::new(ImageWidthRule),
                Box::new(EmptyLinkRule),
            ],
        }
    }

    pub fn validate(&self, config: &EmailConfig) -> ValidationResult {
        let violations = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(config))
            .collect();
        ValidationResult::from_violations(violations)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ButtonWidget, ImageWidget, Section, Theme, Widget, WidgetType};

    fn config_with(widgets: Vec<Widget>) -> EmailConfig {
        let mut section = Section::new();
        section.widgets = widgets;
        EmailConfig {
            sections: vec![section],
            ..EmailConfig::default()
        }
    }

    #[test]
    fn test_default_document_is_clean() {
        let result = Validator::new().validate(&EmailConfig::default());
        assert!(result.valid);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_unknown_widget_is_error() {
        let config = config_with(vec![
            Widget::new(WidgetType::Divider),
            Widget {
                id: "bad".to_string(),
                kind: WidgetKind::Unknown,
            },
        ]);
        let result = Validator::new().validate(&config);
        assert!(!result.valid);
        let error = result.errors().next().unwrap();
        assert_eq!(error.rule, "unknown_widget");
        assert_eq!(error.location, "sections[0].widgets[1]");
    }

    #[test]
    fn test_bad_color_is_warning_only() {
        let config = EmailConfig {
            theme: Theme {
                accent_color: "crimson".to_string(),
                ..Theme::default()
            },
            ..EmailConfig::default()
        };
        let result = Validator::new().validate(&config);
        assert!(result.valid);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location, "theme.accentColor");
        assert_eq!(result.violations[0].severity, ViolationSeverity::Warning);
    }

    #[test]
    fn test_image_width_outside_set() {
        let config = config_with(vec![Widget {
            id: "img".to_string(),
            kind: WidgetKind::Image(ImageWidget {
                url: "https://img.example/a.png".to_string(),
                alt: None,
                width: Some("60%".to_string()),
            }),
        }]);
        let result = Validator::new().validate(&config);
        assert!(result.valid);
        assert_eq!(result.violations[0].rule, "image_width");
    }

    #[test]
    fn test_empty_button_url_is_info() {
        let config = config_with(vec![Widget {
            id: "b".to_string(),
            kind: WidgetKind::Button(ButtonWidget {
                text: "Register".to_string(),
                ..Default::default()
            }),
        }]);
        let result = Validator::new().validate(&config);
        assert!(result.valid);
        assert_eq!(result.violations[0].severity, ViolationSeverity::Info);
        assert!(result.violations[0].message.contains("Register"));
    }
}
