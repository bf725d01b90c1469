//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees of compilation.

use announce_core::{
    adjust, compile, compile_checked,
    model::{
        ButtonGroupWidget, ButtonStyle, ButtonVariant, ButtonWidget, HeadingLevel, HeadingWidget,
        ImageWidget, KeyValueItem, ListItem, ListWidget, MapWidget, MeetingWidget, NoticeVariant,
        NoticeWidget, TextWidget, VideoWidget,
    },
    widgets::button_style,
    EmailConfig, Section, Theme, Widget, WidgetKind, WidgetType,
};

fn widget(id: &str, kind: WidgetKind) -> Widget {
    Widget {
        id: id.to_string(),
        kind,
    }
}

fn single_widget_config(w: Widget) -> EmailConfig {
    let mut section = Section::new();
    section.title = "Updates".to_string();
    section.widgets.push(w);
    EmailConfig {
        sections: vec![section],
        ..EmailConfig::default()
    }
}

fn button(text: &str, variant: ButtonVariant) -> ButtonStyle {
    ButtonStyle {
        id: text.to_lowercase(),
        text: text.to_string(),
        url: "https://example.org/signup".to_string(),
        variant,
    }
}

/// One populated widget per kind, paired with a literal its output must contain.
fn sample_widgets() -> Vec<(WidgetType, Widget, &'static str)> {
    WidgetType::ALL
        .iter()
        .map(|&widget_type| {
            let (kind, marker) = match widget_type {
                WidgetType::Text => (
                    WidgetKind::Text(TextWidget {
                        content: "Bring your logbook".to_string(),
                        ..Default::default()
                    }),
                    "Bring your logbook",
                ),
                WidgetType::Heading => (
                    WidgetKind::Heading(HeadingWidget {
                        text: "Upcoming Events".to_string(),
                        level: HeadingLevel::H4,
                    }),
                    "Upcoming Events</h4>",
                ),
                WidgetType::Button => (
                    WidgetKind::Button(ButtonWidget {
                        text: "Sign Up".to_string(),
                        url: "https://example.org/signup".to_string(),
                        variant: ButtonVariant::Accent,
                    }),
                    ">Sign Up</a>",
                ),
                WidgetType::ButtonGroup => (
                    WidgetKind::ButtonGroup(ButtonGroupWidget {
                        buttons: vec![button("Learn More", ButtonVariant::Primary)],
                    }),
                    ">Learn More</a>",
                ),
                WidgetType::List => (
                    WidgetKind::List(ListWidget {
                        items: vec![ListItem {
                            id: "i1".to_string(),
                            text: "Canteen".to_string(),
                        }],
                        ordered: None,
                    }),
                    ">Canteen</li>",
                ),
                WidgetType::Divider => (WidgetKind::Divider, "<hr style="),
                WidgetType::Notice => (
                    WidgetKind::Notice(NoticeWidget {
                        content: "NO MEETING".to_string(),
                        variant: NoticeVariant::Warning,
                    }),
                    "NO MEETING",
                ),
                WidgetType::Meeting => (
                    WidgetKind::Meeting(MeetingWidget {
                        title: "Weekly Meeting".to_string(),
                        details: vec![KeyValueItem {
                            id: "d1".to_string(),
                            key: "UOD".to_string(),
                            value: "Blues".to_string(),
                        }],
                        buttons: vec![],
                    }),
                    "UOD:</strong> Blues",
                ),
                WidgetType::Video => (
                    WidgetKind::Video(VideoWidget {
                        url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                        title: None,
                    }),
                    "youtube.com/embed/dQw4w9WgXcQ",
                ),
                WidgetType::Map => (
                    WidgetKind::Map(MapWidget {
                        embed_url: "https://maps.example/embed?pb=abc".to_string(),
                        title: Some("Find us".to_string()),
                    }),
                    "https://maps.example/embed?pb=abc",
                ),
                WidgetType::Image => (
                    WidgetKind::Image(ImageWidget {
                        url: "https://img.example/patch.png".to_string(),
                        alt: Some("Squadron patch".to_string()),
                        width: Some("25%".to_string()),
                    }),
                    r#"alt="Squadron patch""#,
                ),
            };
            (widget_type, widget(widget_type.as_str(), kind), marker)
        })
        .collect()
}

#[test]
fn invariant_every_widget_type_renders() {
    let samples = sample_widgets();
    assert_eq!(samples.len(), 11);

    for (widget_type, w, marker) in samples {
        assert_eq!(w.widget_type(), Some(widget_type));
        let html = compile(&single_widget_config(w));
        assert!(
            html.contains(marker),
            "{} output is missing {marker:?}",
            widget_type.as_str()
        );
    }
}

#[test]
fn invariant_user_text_is_escaped() {
    let mut config = single_widget_config(widget(
        "t",
        WidgetKind::Text(TextWidget {
            content: r#"<b>"Tom" & 'Jerry'</b>"#.to_string(),
            ..Default::default()
        }),
    ));
    config.header.title = "<script>alert(1)</script>".to_string();
    config.header.subtitle = "a > b".to_string();
    config.footer.content = "<img src=x onerror=y>".to_string();
    config.sections[0].title = "</h2><script>".to_string();

    let html = compile(&config);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"));
    assert!(html.contains("a &gt; b"));
    assert!(html.contains("&lt;img src=x onerror=y&gt;"));
    assert!(!html.contains("<img src=x"));
}

#[test]
fn invariant_urls_cannot_break_attributes() {
    let config = single_widget_config(widget(
        "b",
        WidgetKind::Button(ButtonWidget {
            text: "Go".to_string(),
            url: r#"https://x.example/" onmouseover="steal()"#.to_string(),
            variant: ButtonVariant::Primary,
        }),
    ));
    let html = compile(&config);
    assert!(html.contains(r#"href="https://x.example/&quot; onmouseover=&quot;steal()""#));
    assert!(!html.contains(r#"" onmouseover=""#));
}

#[test]
fn invariant_image_width_cannot_break_style() {
    let config = single_widget_config(widget(
        "img",
        WidgetKind::Image(ImageWidget {
            url: "https://img.example/a.png".to_string(),
            alt: None,
            width: Some(r#"50%" onerror="alert(1)"#.to_string()),
        }),
    ));
    let html = compile(&config);
    assert!(!html.contains(r#"" onerror=""#));
    assert!(!html.contains("alert(1)"));
    assert!(html.contains("max-width: 100%;"));

    assert!(compile_checked(&config).is_ok());
}

#[test]
fn invariant_color_math_clamps() {
    assert_eq!(adjust("#000000", 300), "#ffffff");
    assert_eq!(adjust("#ffffff", -300), "#000000");
    assert_eq!(adjust("#808080", 0), "#808080");
}

#[test]
fn invariant_compile_is_deterministic() {
    let mut config = EmailConfig::default();
    for (_, w, _) in sample_widgets() {
        config.add_section().widgets.push(w);
    }
    let first = compile(&config);
    let second = compile(&config);
    assert_eq!(first, second);
}

#[test]
fn invariant_empty_document_has_header_and_footer() {
    let config = EmailConfig::default();
    let html = compile(&config);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));
    assert!(html.contains("Squadron Announcements"));
    assert!(html.contains("Civil Air Patrol - Heartland Composite Squadron"));
    assert!(html.contains("Remember to &quot;Reply All&quot;"));
    assert!(!html.contains("<h2"));
}

#[test]
fn invariant_youtube_id_stops_at_ampersand() {
    let config = single_widget_config(widget(
        "v",
        WidgetKind::Video(VideoWidget {
            url: "https://www.youtube.com/watch?v=ABC123&t=5".to_string(),
            title: None,
        }),
    ));
    let html = compile(&config);
    assert!(html.contains(r#"src="https://www.youtube.com/embed/ABC123""#));
    assert!(!html.contains("Watch Video"));
}

#[test]
fn invariant_unknown_button_variant_uses_primary() {
    let theme = Theme::default();
    let config = single_widget_config(widget(
        "b",
        WidgetKind::Button(ButtonWidget {
            text: "Go".to_string(),
            url: "https://example.org".to_string(),
            variant: ButtonVariant::Other("sparkly".to_string()),
        }),
    ));
    let html = compile(&config);
    let primary = button_style(&ButtonVariant::Primary, &theme);
    assert!(!primary.is_empty());
    assert!(html.contains(&format!(r#"style="{primary}""#)));
}

#[test]
fn invariant_reordering_only_reorders() {
    let first = widget(
        "a",
        WidgetKind::Text(TextWidget {
            content: "FIRST-BLOCK".to_string(),
            ..Default::default()
        }),
    );
    let second = widget(
        "b",
        WidgetKind::Notice(NoticeWidget {
            content: "SECOND-BLOCK".to_string(),
            variant: NoticeVariant::Info,
        }),
    );

    let mut config = single_widget_config(first.clone());
    config.sections[0].widgets.push(second.clone());
    let forward = compile(&config);

    config.sections[0].widgets = vec![second, first];
    let reversed = compile(&config);

    let pos = |html: &str, needle: &str| html.find(needle).unwrap();
    assert!(pos(&forward, "FIRST-BLOCK") < pos(&forward, "SECOND-BLOCK"));
    assert!(pos(&reversed, "SECOND-BLOCK") < pos(&reversed, "FIRST-BLOCK"));
    assert_eq!(forward.len(), reversed.len());

    let mut a: Vec<char> = forward.chars().collect();
    let mut b: Vec<char> = reversed.chars().collect();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

#[test]
fn invariant_unknown_widget_fails_soft_but_checked_compile_reports_it() {
    let config: EmailConfig = serde_json::from_str(
        r#"{
            "sections": [{
                "id": "s1",
                "title": "Mixed",
                "widgets": [
                    {"id": "w1", "type": "countdown", "until": "2026-01-01"},
                    {"id": "w2", "type": "text", "content": "Still here"}
                ]
            }]
        }"#,
    )
    .unwrap();

    let html = compile(&config);
    assert!(html.contains("Still here"));
    assert!(!html.contains("countdown"));

    let err = compile_checked(&config).unwrap_err();
    assert!(err.to_string().contains("sections[0].widgets[0]"));
}

#[test]
fn invariant_malformed_theme_color_still_renders() {
    let config = EmailConfig {
        theme: Theme {
            primary_color: "navy".to_string(),
            ..Theme::default()
        },
        ..EmailConfig::default()
    };
    let html = compile(&config);
    assert!(html.contains("linear-gradient(135deg, navy 0%, navy 100%)"));
    assert!(html.ends_with("</html>"));
    assert!(compile_checked(&config).is_ok());
}

#[test]
fn invariant_compile_does_not_mutate_input() {
    let config = single_widget_config(Widget::new(WidgetType::Meeting));
    let snapshot = config.clone();
    let _ = compile(&config);
    assert_eq!(config, snapshot);
}
