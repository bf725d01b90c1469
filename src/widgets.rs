//! Widget Renderers - one pure function per widget kind
//!
//! Every user string goes through `escape_html`. Theme tokens are trusted CSS
//! and inserted verbatim.

use crate::color::{adjust, to_rgba};
use crate::escape::escape_html;
use crate::model::{
    ButtonGroupWidget, ButtonStyle, ButtonTone, ButtonVariant, ButtonWidget, HeadingWidget,
    ImageWidget, ListWidget, MapWidget, MeetingWidget, NoticeTone, NoticeWidget, TextWidget,
    Theme, VideoWidget, Widget, WidgetKind,
};

const SHADOW_ALPHA: f32 = 0.3;

/// Render one widget. Unrecognized tags render as an empty fragment.
pub fn render_widget(widget: &Widget, theme: &Theme) -> String {
    match &widget.kind {
        WidgetKind::Text(w) => render_text(w, theme),
        WidgetKind::Heading(w) => render_heading(w, theme),
        WidgetKind::Button(w) => render_button(w, theme),
        WidgetKind::ButtonGroup(w) => render_button_group(w, theme),
        WidgetKind::List(w) => render_list(w, theme),
        WidgetKind::Divider => render_divider(theme),
        WidgetKind::Notice(w) => render_notice(w, theme),
        WidgetKind::Meeting(w) => render_meeting(w, theme),
        WidgetKind::Video(w) => render_video(w, theme),
        WidgetKind::Map(w) => render_map(w, theme),
        WidgetKind::Image(w) => render_image(w, theme),
        WidgetKind::Unknown => {
            tracing::warn!(widget_id = %widget.id, "skipping widget with unrecognized type");
            String::new()
        }
    }
}

/// Inline CSS for a button pill.
pub fn button_style(variant: &ButtonVariant, theme: &Theme) -> String {
    let base = format!(
        "display: inline-block; padding: 12px 24px; font-size: 0.95em; font-weight: 600; \
         text-decoration: none; border-radius: 6px; transition: all 0.3s ease; cursor: pointer; \
         border: none; text-align: center; font-family: {};",
        theme.font_family
    );

    match variant.tone() {
        ButtonTone::Primary => filled_button(&base, &theme.primary_color, 30, "#fff"),
        ButtonTone::Secondary => filled_button(&base, &theme.secondary_color, 20, "#333"),
        ButtonTone::Accent => filled_button(&base, &theme.accent_color, 20, "#fff"),
        ButtonTone::Outline => format!(
            "{base} background: transparent; border: 2px solid {primary}; color: {primary};",
            primary = theme.primary_color
        ),
    }
}

fn filled_button(base: &str, color: &str, lift: i32, text_color: &str) -> String {
    format!(
        "{base} background: linear-gradient(135deg, {color} 0%, {end} 100%); color: {text_color}; \
         box-shadow: 0 4px 12px {shadow};",
        end = adjust(color, lift),
        shadow = to_rgba(color, SHADOW_ALPHA),
    )
}

fn button_link(text: &str, url: &str, variant: &ButtonVariant, theme: &Theme) -> String {
    format!(
        r#"<a href="{}" target="_blank" style="{}">{}</a>"#,
        escape_html(url),
        button_style(variant, theme),
        escape_html(text)
    )
}

fn button_row(buttons: &[ButtonStyle], theme: &Theme) -> String {
    let links: Vec<String> = buttons
        .iter()
        .map(|b| button_link(&b.text, &b.url, &b.variant, theme))
        .collect();
    format!(
        "<div style=\"display: flex; flex-wrap: wrap; gap: 10px; margin-top: 15px;\">\n          {}\n        </div>",
        links.join("\n          ")
    )
}

fn caption(title: Option<&str>) -> String {
    title
        .map(|t| {
            format!(
                r#"<p style="margin: 0 0 10px 0; font-weight: 600;">{}</p>"#,
                escape_html(t)
            )
        })
        .unwrap_or_default()
}

pub fn render_text(widget: &TextWidget, _theme: &Theme) -> String {
    let mut content = escape_html(&widget.content);
    if widget.resolved_bold() {
        content = format!("<strong>{content}</strong>");
    }
    if widget.resolved_italic() {
        content = format!("<em>{content}</em>");
    }
    format!(r#"<p style="margin: 0 0 15px 0;">{content}</p>"#)
}

pub fn render_heading(widget: &HeadingWidget, theme: &Theme) -> String {
    let tag = widget.level.tag();
    let (size, margin) = match tag {
        "h4" => ("1.1em", "20px 0 10px 0"),
        _ => ("1.3em", "0 0 15px 0"),
    };
    format!(
        r#"<{tag} style="color: {}; font-size: {size}; font-weight: 700; margin: {margin};">{}</{tag}>"#,
        theme.primary_color,
        escape_html(&widget.text)
    )
}

pub fn render_button(widget: &ButtonWidget, theme: &Theme) -> String {
    button_link(&widget.text, &widget.url, &widget.variant, theme)
}

pub fn render_button_group(widget: &ButtonGroupWidget, theme: &Theme) -> String {
    if widget.buttons.is_empty() {
        return String::new();
    }
    button_row(&widget.buttons, theme)
}

pub fn render_list(widget: &ListWidget, _theme: &Theme) -> String {
    let tag = if widget.resolved_ordered() { "ol" } else { "ul" };
    let items: Vec<String> = widget
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li style="margin: 10px 0; color: #555;">{}</li>"#,
                escape_html(&item.text)
            )
        })
        .collect();
    format!(
        "<{tag} style=\"margin: 15px 0; padding-left: 25px;\">\n          {}\n        </{tag}>",
        items.join("\n          ")
    )
}

pub fn render_divider(theme: &Theme) -> String {
    format!(
        r#"<hr style="border: none; border-top: 2px solid {}; margin: 25px 0;">"#,
        theme.secondary_color
    )
}

pub fn render_notice(widget: &NoticeWidget, theme: &Theme) -> String {
    // warning and success keep their own palette regardless of theme
    let (background, border, text) = match widget.variant.tone() {
        NoticeTone::Info => ("#e3f2fd", theme.primary_color.as_str(), "#1565c0"),
        NoticeTone::Warning => (
            "linear-gradient(135deg, #fff3cd 0%, #fffbea 100%)",
            theme.secondary_color.as_str(),
            "#856404",
        ),
        NoticeTone::Success => ("#e8f5e9", "#4caf50", "#2e7d32"),
        NoticeTone::Danger => ("#ffebee", theme.accent_color.as_str(), "#c62828"),
    };
    format!(
        "<div style=\"background: {background}; border-left: 5px solid {border}; padding: 25px; \
         margin-bottom: 20px; border-radius: 8px; text-align: center; font-size: 1.2em; \
         font-weight: 700; color: {text}; box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1);\">\n        {}\n      </div>",
        escape_html(&widget.content)
    )
}

pub fn render_meeting(widget: &MeetingWidget, theme: &Theme) -> String {
    let details: Vec<String> = widget
        .details
        .iter()
        .map(|d| {
            format!(
                "<div style=\"margin: 10px 0; font-size: 0.95em;\"><strong style=\"color: #555; \
                 font-weight: 600; min-width: 120px; display: inline-block;\">{}:</strong> {}</div>",
                escape_html(&d.key),
                escape_html(&d.value)
            )
        })
        .collect();
    let buttons = if widget.buttons.is_empty() {
        String::new()
    } else {
        button_row(&widget.buttons, theme)
    };

    format!(
        "<div style=\"background: linear-gradient(135deg, #f9f9f9 0%, #ffffff 100%); \
         border-left: 5px solid {primary}; padding: 25px; margin-bottom: 20px; border-radius: 8px; \
         box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1);\">\n        \
         <h3 style=\"color: {primary}; font-size: 1.4em; font-weight: 700; margin: 0 0 15px 0; \
         display: flex; align-items: center; flex-wrap: wrap; gap: 10px;\">\n          {title}\n        </h3>\n        \
         {details}\n        {buttons}\n      </div>",
        primary = theme.primary_color,
        title = escape_html(&widget.title),
        details = details.join("\n        "),
    )
}

/// Video id from a `youtube.com/watch?v=` or `youtu.be/` link, ending at `&`
/// or whitespace.
pub fn youtube_id(url: &str) -> Option<&str> {
    const PATTERNS: [&str; 2] = ["youtube.com/watch?v=", "youtu.be/"];

    let mut search_from = 0;
    while search_from < url.len() {
        let rest = &url[search_from..];
        let (offset, pattern) = PATTERNS
            .iter()
            .filter_map(|p| rest.find(p).map(|i| (i, *p)))
            .min_by_key(|(i, _)| *i)?;
        let start = search_from + offset + pattern.len();
        let id = url[start..]
            .split(|c: char| c == '&' || c.is_whitespace())
            .next()
            .unwrap_or("");
        if !id.is_empty() {
            return Some(id);
        }
        search_from = search_from + offset + 1;
    }
    None
}

pub fn render_video(widget: &VideoWidget, _theme: &Theme) -> String {
    let title = caption(widget.resolved_title());
    match youtube_id(&widget.url) {
        Some(id) => format!(
            "<div style=\"margin: 20px 0;\">\n        {title}\n        \
             <div style=\"position: relative; padding-bottom: 56.25%; height: 0; overflow: hidden; border-radius: 8px;\">\n          \
             <iframe style=\"position: absolute; top: 0; left: 0; width: 100%; height: 100%; border: none;\" \
             src=\"https://www.youtube.com/embed/{}\" allowfullscreen></iframe>\n        </div>\n      </div>",
            escape_html(id)
        ),
        None => format!(
            "<div style=\"margin: 20px 0;\">\n        {title}\n        \
             <a href=\"{}\" target=\"_blank\" style=\"color: #1976d2;\">Watch Video</a>\n      </div>",
            escape_html(&widget.url)
        ),
    }
}

pub fn render_map(widget: &MapWidget, _theme: &Theme) -> String {
    format!(
        "<div style=\"margin: 20px 0;\">\n        {}\n        \
         <div style=\"border-radius: 8px; overflow: hidden; box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1);\">\n          \
         <iframe style=\"width: 100%; height: 300px; border: none;\" src=\"{}\" allowfullscreen loading=\"lazy\"></iframe>\n        \
         </div>\n      </div>",
        caption(widget.resolved_title()),
        escape_html(&widget.embed_url)
    )
}

pub fn render_image(widget: &ImageWidget, _theme: &Theme) -> String {
    format!(
        "<div style=\"margin: 20px 0; text-align: center;\">\n        \
         <img src=\"{}\" alt=\"{}\" style=\"max-width: {}; height: auto; border-radius: 8px; \
         box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1);\">\n      </div>",
        escape_html(&widget.url),
        escape_html(widget.resolved_alt()),
        widget.resolved_width()
    )
}
