//! Page Assembly - header, sections, footer and the fixed page shell

use crate::color::adjust;
use crate::escape::escape_html;
use crate::model::{EmailConfig, FooterConfig, HeaderConfig, Section, Theme};
use crate::widgets::render_widget;

const FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Ubuntu:wght@400;500;700&display=swap";

pub fn render_section(section: &Section, theme: &Theme) -> String {
    let widgets: Vec<String> = section
        .widgets
        .iter()
        .map(|widget| render_widget(widget, theme))
        .collect();

    format!(
        "<div style=\"margin-bottom: 50px;\">\n      \
         <h2 style=\"color: {}; font-size: 1.8em; font-weight: 700; margin: 0 0 25px 0; \
         padding-bottom: 12px; border-bottom: 4px solid {}; position: relative;\">\n        {}\n      </h2>\n      \n      \
         {}\n    </div>",
        theme.primary_color,
        section.resolved_border_color(theme),
        escape_html(&section.title),
        widgets.join("\n\n      ")
    )
}

pub fn render_header(header: &HeaderConfig, theme: &Theme) -> String {
    let background = if header.show_gradient {
        format!(
            "background: linear-gradient(135deg, {} 0%, {} 100%);",
            theme.primary_color,
            adjust(&theme.primary_color, 30)
        )
    } else {
        format!("background: {};", theme.primary_color)
    };

    format!(
        "<div style=\"{background} color: #fff; padding: 50px 40px; text-align: center; position: relative; \
         overflow: hidden; border-top: 6px solid; border-image: linear-gradient(90deg, {secondary} 0%, \
         {accent} 50%, {secondary} 100%) 1;\">\n      \
         <h1 style=\"font-size: clamp(1.5em, 5vw, 2.8em); margin: 0 0 10px 0; font-weight: 800; \
         text-transform: uppercase; letter-spacing: 2px; text-shadow: 0 2px 8px rgba(0,0,0,0.25), 0 0 2px #fff; \
         line-height: 1.1; color: #fff; background: rgba(0,0,0,0.08); border-radius: 8px; padding: 0.2em 0.5em; \
         display: inline-block; word-break: break-word;\">\n        {title}\n      </h1>\n      \
         <p style=\"font-size: clamp(1em, 2.5vw, 1.3em); font-weight: 500; opacity: 0.98; margin: 0; \
         color: {secondary}; text-shadow: 0 1px 4px rgba(0,0,0,0.18); background: rgba(0,0,0,0.05); \
         border-radius: 6px; padding: 0.15em 0.4em; display: inline-block; word-break: break-word;\">\n        \
         {subtitle}\n      </p>\n    </div>",
        secondary = theme.secondary_color,
        accent = theme.accent_color,
        title = escape_html(&header.title),
        subtitle = escape_html(&header.subtitle),
    )
}

pub fn render_footer(footer: &FooterConfig, theme: &Theme) -> String {
    let border = if footer.show_gradient_border {
        format!(
            "border-top: 6px solid; border-image: linear-gradient(90deg, {} 0%, {} 50%, {} 100%) 1;",
            theme.secondary_color, theme.accent_color, theme.primary_color
        )
    } else {
        format!("border-top: 2px solid {};", theme.primary_color)
    };

    format!(
        "<div style=\"background: linear-gradient(135deg, #f5f5f5 0%, #e8e8e8 100%); padding: 30px; \
         text-align: center; font-size: 1em; color: #666; {border}\">\n    \
         <strong>{}</strong>\n  </div>",
        escape_html(&footer.content)
    )
}

/// The full HTML document for `config`.
pub fn render_document(config: &EmailConfig) -> String {
    let EmailConfig {
        header,
        footer,
        theme,
        sections,
    } = config;

    let body: Vec<String> = sections
        .iter()
        .map(|section| render_section(section, theme))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="preconnect" href="https://fonts.googleapis.com">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
<link href="{FONT_STYLESHEET}" rel="stylesheet">
</head>
<body style="font-family: {font}; background: linear-gradient(135deg, {primary} 0%, {primary_end} 100%); color: {text}; line-height: 1.6; padding: 20px; min-height: 100vh; margin: 0;">

<div style="max-width: 1000px; margin: 0 auto; background: {background}; box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3); border-radius: {radius}; overflow: hidden;">

  {header}

  <div style="padding: 40px;">
    {sections}
  </div>

  {footer}

</div>

</body>
</html>"#,
        title = escape_html(&header.title),
        font = theme.font_family,
        primary = theme.primary_color,
        primary_end = adjust(&theme.primary_color, 40),
        text = theme.text_color,
        background = theme.background_color,
        radius = theme.border_radius,
        header = render_header(header, theme),
        sections = body.join("\n\n    "),
        footer = render_footer(footer, theme),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NoticeVariant, NoticeWidget, Widget, WidgetKind};

    #[test]
    fn test_section_heading_uses_border_color() {
        let mut section = Section::new();
        section.title = "Drill & Ceremonies".to_string();
        section.border_color = Some("#BA0C2F".to_string());
        let html = render_section(&section, &Theme::default());
        assert!(html.contains("border-bottom: 4px solid #BA0C2F;"));
        assert!(html.contains("Drill &amp; Ceremonies"));
    }

    #[test]
    fn test_empty_section_renders_heading_only() {
        let section = Section::new();
        let html = render_section(&section, &Theme::default());
        assert!(html.contains("<h2"));
        assert!(html.contains("New Section"));
        assert_eq!(html.matches("<div").count(), 1);
    }

    #[test]
    fn test_header_flat_vs_gradient() {
        let theme = Theme::default();
        let mut header = HeaderConfig {
            title: "News".to_string(),
            subtitle: "Weekly".to_string(),
            show_gradient: true,
        };
        assert!(render_header(&header, &theme)
            .contains("background: linear-gradient(135deg, #001489 0%, #1e32a7 100%);"));
        header.show_gradient = false;
        let flat = render_header(&header, &theme);
        assert!(flat.starts_with("<div style=\"background: #001489; color: #fff;"));
    }

    #[test]
    fn test_footer_border_toggle() {
        let theme = Theme::default();
        let mut footer = FooterConfig {
            content: "Questions? Reply All".to_string(),
            show_gradient_border: true,
        };
        assert!(render_footer(&footer, &theme).contains("border-image: linear-gradient(90deg, #FFCD00 0%, #BA0C2F 50%, #001489 100%) 1;"));
        footer.show_gradient_border = false;
        assert!(render_footer(&footer, &theme).contains("border-top: 2px solid #001489;"));
    }

    #[test]
    fn test_document_shell() {
        let mut config = EmailConfig::default();
        let mut section = Section::new();
        section.widgets.push(Widget {
            id: "n".to_string(),
            kind: WidgetKind::Notice(NoticeWidget {
                content: "NO MEETING".to_string(),
                variant: NoticeVariant::Warning,
            }),
        });
        config.sections.push(section);

        let html = render_document(&config);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<title>Squadron Announcements</title>"));
        assert!(html.contains("linear-gradient(135deg, #001489 0%, #283cb1 100%)"));
        assert!(html.contains("NO MEETING"));
        assert!(!html.contains("<style"));
        assert!(!html.contains("class="));
    }
}
