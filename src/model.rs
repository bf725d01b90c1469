//! Document Model - Themes, Sections, Widgets
//!
//! Pure data. The JSON layout uses camelCase field names and a `type` tag on
//! widgets. Missing fields fall back to defaults rather than failing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fresh identifier for a document entity.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub border_radius: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#001489".to_string(),
            secondary_color: "#FFCD00".to_string(),
            accent_color: "#BA0C2F".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#333333".to_string(),
            font_family: "'Ubuntu', Arial, sans-serif".to_string(),
            border_radius: "8px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    pub title: String,
    pub subtitle: String,
    pub show_gradient: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterConfig {
    pub content: String,
    pub show_gradient_border: bool,
}

/// Root aggregate and the sole input to compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub footer: FooterConfig,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            header: HeaderConfig {
                title: "Squadron Announcements".to_string(),
                subtitle: "Civil Air Patrol - Heartland Composite Squadron".to_string(),
                show_gradient: true,
            },
            footer: FooterConfig {
                content: "Remember to \"Reply All\" if you have questions or need clarification on anything listed above.".to_string(),
                show_gradient_border: true,
            },
            theme: Theme::default(),
            sections: vec![],
        }
    }
}

impl EmailConfig {
    pub fn widget_count(&self) -> usize {
        self.sections.iter().map(|s| s.widgets.len()).sum()
    }
}

/// A titled, ordered group of widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Editor-only; ignored when compiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl Section {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            title: "New Section".to_string(),
            widgets: vec![],
            border_color: None,
            collapsed: Some(false),
        }
    }

    /// Underline color: the section's own border color, else the theme secondary.
    pub fn resolved_border_color<'a>(&'a self, theme: &'a Theme) -> &'a str {
        non_empty(self.border_color.as_deref()).unwrap_or(&theme.secondary_color)
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

// --- Widgets ---

/// The closed set of widget kinds, in editor menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetType {
    Meeting,
    Text,
    Heading,
    Button,
    ButtonGroup,
    List,
    Notice,
    Divider,
    Video,
    Map,
    Image,
}

impl WidgetType {
    pub const ALL: [WidgetType; 11] = [
        WidgetType::Meeting,
        WidgetType::Text,
        WidgetType::Heading,
        WidgetType::Button,
        WidgetType::ButtonGroup,
        WidgetType::List,
        WidgetType::Notice,
        WidgetType::Divider,
        WidgetType::Video,
        WidgetType::Map,
        WidgetType::Image,
    ];

    /// Wire tag, as it appears in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::Meeting => "meeting",
            WidgetType::Text => "text",
            WidgetType::Heading => "heading",
            WidgetType::Button => "button",
            WidgetType::ButtonGroup => "buttonGroup",
            WidgetType::List => "list",
            WidgetType::Notice => "notice",
            WidgetType::Divider => "divider",
            WidgetType::Video => "video",
            WidgetType::Map => "map",
            WidgetType::Image => "image",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WidgetType::Meeting => "Meeting",
            WidgetType::Text => "Text",
            WidgetType::Heading => "Heading",
            WidgetType::Button => "Button",
            WidgetType::ButtonGroup => "Buttons",
            WidgetType::List => "List",
            WidgetType::Notice => "Notice",
            WidgetType::Divider => "Divider",
            WidgetType::Video => "Video",
            WidgetType::Map => "Map",
            WidgetType::Image => "Image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

/// Widget payload, tagged by `type`.
///
/// Tags outside the known set land in `Unknown`, which renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetKind {
    Text(TextWidget),
    Heading(HeadingWidget),
    Button(ButtonWidget),
    ButtonGroup(ButtonGroupWidget),
    List(ListWidget),
    Divider,
    Notice(NoticeWidget),
    Meeting(MeetingWidget),
    Video(VideoWidget),
    Map(MapWidget),
    Image(ImageWidget),
    #[serde(other)]
    Unknown,
}

impl WidgetKind {
    /// Blank payload for a widget kind, matching what the editor starts with.
    pub fn default_for(widget_type: WidgetType) -> Self {
        match widget_type {
            WidgetType::Text => WidgetKind::Text(TextWidget::default()),
            WidgetType::Heading => WidgetKind::Heading(HeadingWidget::default()),
            WidgetType::Button => WidgetKind::Button(ButtonWidget {
                text: "Button".to_string(),
                ..Default::default()
            }),
            WidgetType::ButtonGroup => WidgetKind::ButtonGroup(ButtonGroupWidget::default()),
            WidgetType::List => WidgetKind::List(ListWidget {
                items: vec![],
                ordered: Some(false),
            }),
            WidgetType::Divider => WidgetKind::Divider,
            WidgetType::Notice => WidgetKind::Notice(NoticeWidget::default()),
            WidgetType::Meeting => WidgetKind::Meeting(MeetingWidget::default()),
            WidgetType::Video => WidgetKind::Video(VideoWidget::default()),
            WidgetType::Map => WidgetKind::Map(MapWidget::default()),
            WidgetType::Image => WidgetKind::Image(ImageWidget::default()),
        }
    }

    /// `None` for an unrecognized tag.
    pub fn widget_type(&self) -> Option<WidgetType> {
        match self {
            WidgetKind::Text(_) => Some(WidgetType::Text),
            WidgetKind::Heading(_) => Some(WidgetType::Heading),
            WidgetKind::Button(_) => Some(WidgetType::Button),
            WidgetKind::ButtonGroup(_) => Some(WidgetType::ButtonGroup),
            WidgetKind::List(_) => Some(WidgetType::List),
            WidgetKind::Divider => Some(WidgetType::Divider),
            WidgetKind::Notice(_) => Some(WidgetType::Notice),
            WidgetKind::Meeting(_) => Some(WidgetType::Meeting),
            WidgetKind::Video(_) => Some(WidgetType::Video),
            WidgetKind::Map(_) => Some(WidgetType::Map),
            WidgetKind::Image(_) => Some(WidgetType::Image),
            WidgetKind::Unknown => None,
        }
    }
}

impl Widget {
    pub fn new(widget_type: WidgetType) -> Self {
        Self {
            id: new_id(),
            kind: WidgetKind::default_for(widget_type),
        }
    }

    pub fn widget_type(&self) -> Option<WidgetType> {
        self.kind.widget_type()
    }

    /// Copy of this widget with a fresh id on the widget and on every
    /// nested button, list item and detail row.
    pub fn with_fresh_ids(&self) -> Self {
        let mut kind = self.kind.clone();
        match &mut kind {
            WidgetKind::ButtonGroup(w) => rekey_buttons(&mut w.buttons),
            WidgetKind::Meeting(w) => {
                rekey_buttons(&mut w.buttons);
                for detail in &mut w.details {
                    detail.id = new_id();
                }
            }
            WidgetKind::List(w) => {
                for item in &mut w.items {
                    item.id = new_id();
                }
            }
            _ => {}
        }
        Self { id: new_id(), kind }
    }
}

fn rekey_buttons(buttons: &mut [ButtonStyle]) {
    for button in buttons {
        button.id = new_id();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextWidget {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_italic: Option<bool>,
}

impl TextWidget {
    pub fn resolved_bold(&self) -> bool {
        self.is_bold.unwrap_or(false)
    }

    pub fn resolved_italic(&self) -> bool {
        self.is_italic.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingWidget {
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonWidget {
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonGroupWidget {
    pub buttons: Vec<ButtonStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListWidget {
    pub items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
}

impl ListWidget {
    pub fn resolved_ordered(&self) -> bool {
        self.ordered.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeWidget {
    pub content: String,
    pub variant: NoticeVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingWidget {
    pub title: String,
    pub details: Vec<KeyValueItem>,
    pub buttons: Vec<ButtonStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoWidget {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl VideoWidget {
    pub fn resolved_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapWidget {
    pub embed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MapWidget {
    pub fn resolved_title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }
}

/// Widths offered by the editor for images.
pub const IMAGE_WIDTHS: [&str; 4] = ["100%", "75%", "50%", "25%"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageWidget {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl ImageWidget {
    /// The width as written, if any.
    pub fn requested_width(&self) -> Option<&str> {
        non_empty(self.width.as_deref())
    }

    /// Only the supported sizes reach the output; anything else is full width.
    pub fn resolved_width(&self) -> &'static str {
        self.requested_width()
            .and_then(|w| IMAGE_WIDTHS.iter().copied().find(|&size| size == w.trim()))
            .unwrap_or(IMAGE_WIDTHS[0])
    }

    pub fn resolved_alt(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }
}

// --- Nested items ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonStyle {
    pub id: String,
    pub text: String,
    pub url: String,
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListItem {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValueItem {
    pub id: String,
    pub key: String,
    pub value: String,
}

// --- Variant strings ---
//
// Stored as written so unknown values survive a load/save cycle; each one
// resolves to a fixed tone when rendered.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Accent,
    Outline,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    Primary,
    Secondary,
    Accent,
    Outline,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Accent => "accent",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Other(s) => s,
        }
    }

    /// Unrecognized variants style as primary.
    pub fn tone(&self) -> ButtonTone {
        match self {
            ButtonVariant::Primary | ButtonVariant::Other(_) => ButtonTone::Primary,
            ButtonVariant::Secondary => ButtonTone::Secondary,
            ButtonVariant::Accent => ButtonTone::Accent,
            ButtonVariant::Outline => ButtonTone::Outline,
        }
    }
}

impl From<String> for ButtonVariant {
    fn from(value: String) -> Self {
        match value.as_str() {
            "primary" => ButtonVariant::Primary,
            "secondary" => ButtonVariant::Secondary,
            "accent" => ButtonVariant::Accent,
            "outline" => ButtonVariant::Outline,
            _ => ButtonVariant::Other(value),
        }
    }
}

impl From<ButtonVariant> for String {
    fn from(value: ButtonVariant) -> Self {
        match value {
            ButtonVariant::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NoticeVariant {
    #[default]
    Info,
    Warning,
    Success,
    Danger,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Info,
    Warning,
    Success,
    Danger,
}

impl NoticeVariant {
    pub fn as_str(&self) -> &str {
        match self {
            NoticeVariant::Info => "info",
            NoticeVariant::Warning => "warning",
            NoticeVariant::Success => "success",
            NoticeVariant::Danger => "danger",
            NoticeVariant::Other(s) => s,
        }
    }

    /// Unrecognized variants style as info.
    pub fn tone(&self) -> NoticeTone {
        match self {
            NoticeVariant::Info | NoticeVariant::Other(_) => NoticeTone::Info,
            NoticeVariant::Warning => NoticeTone::Warning,
            NoticeVariant::Success => NoticeTone::Success,
            NoticeVariant::Danger => NoticeTone::Danger,
        }
    }
}

impl From<String> for NoticeVariant {
    fn from(value: String) -> Self {
        match value.as_str() {
            "info" => NoticeVariant::Info,
            "warning" => NoticeVariant::Warning,
            "success" => NoticeVariant::Success,
            "danger" => NoticeVariant::Danger,
            _ => NoticeVariant::Other(value),
        }
    }
}

impl From<NoticeVariant> for String {
    fn from(value: NoticeVariant) -> Self {
        match value {
            NoticeVariant::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeadingLevel {
    #[default]
    H3,
    H4,
    Other(String),
}

impl HeadingLevel {
    pub fn as_str(&self) -> &str {
        match self {
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::Other(s) => s,
        }
    }

    /// Element name to emit; unrecognized levels render as `h3`.
    pub fn tag(&self) -> &'static str {
        match self {
            HeadingLevel::H4 => "h4",
            HeadingLevel::H3 | HeadingLevel::Other(_) => "h3",
        }
    }
}

impl From<String> for HeadingLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "h3" => HeadingLevel::H3,
            "h4" => HeadingLevel::H4,
            _ => HeadingLevel::Other(value),
        }
    }
}

impl From<HeadingLevel> for String {
    fn from(value: HeadingLevel) -> Self {
        match value {
            HeadingLevel::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
