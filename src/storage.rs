//! Storage - JSON documents and HTML export on disk

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::EmailConfig;
use crate::templates::TemplateLibrary;
use crate::{AnnounceError, Result};

pub const EXPORT_FILENAME: &str = "announcement.html";
pub const EXPORT_MIME: &str = "text/html";
pub const LIBRARY_FILENAME: &str = "email-templates.json";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| AnnounceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AnnounceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| AnnounceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<EmailConfig> {
    read_json(path)
}

pub fn save_config(path: &Path, config: &EmailConfig) -> Result<()> {
    write_json(path, config)
}

/// A missing library file is an empty library.
pub fn load_library(path: &Path) -> Result<TemplateLibrary> {
    if !path.exists() {
        return Ok(TemplateLibrary::new());
    }
    read_json(path)
}

pub fn save_library(path: &Path, library: &TemplateLibrary) -> Result<()> {
    write_json(path, library)
}

/// A compiled page ready to hand to a download or file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlExport {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
}

impl HtmlExport {
    pub fn new(html: String) -> Self {
        Self {
            filename: EXPORT_FILENAME.to_string(),
            mime_type: EXPORT_MIME,
            body: html,
        }
    }

    /// Write into `dir` under the export filename; returns the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        fs::write(&path, &self.body).map_err(|source| AnnounceError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidgetType;

    #[test]
    fn test_config_round_trip_keeps_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EmailConfig::default();
        let section = config.add_section();
        section.border_color = Some("#BA0C2F".to_string());
        section.add_widget(WidgetType::Meeting);

        save_config(&path, &config).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"primaryColor\""));
        assert!(raw.contains("\"showGradientBorder\""));
        assert!(raw.contains("\"borderColor\""));

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_load_sparse_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.json");
        fs::write(&path, r#"{"header": {"title": "Hi"}, "sections": [{"title": "Only"}]}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.header.title, "Hi");
        assert_eq!(config.theme, crate::model::Theme::default());
        assert_eq!(config.sections[0].title, "Only");
        assert!(config.sections[0].widgets.is_empty());
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_config(&missing), Err(AnnounceError::Io { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2").unwrap();
        let err = load_config(&bad).unwrap_err();
        assert!(matches!(err, AnnounceError::Json { ref path, .. } if path == &bad));
    }

    #[test]
    fn test_library_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LIBRARY_FILENAME);
        assert!(load_library(&path).unwrap().is_empty());

        let mut library = TemplateLibrary::new();
        library.save("Weekly", "", &EmailConfig::default()).unwrap();
        save_library(&path, &library).unwrap();
        assert_eq!(load_library(&path).unwrap(), library);
        assert!(fs::read_to_string(&path).unwrap().trim_start().starts_with('['));
    }

    #[test]
    fn test_html_export() {
        let dir = tempfile::tempdir().unwrap();
        let export = HtmlExport::new("<!DOCTYPE html>".to_string());
        assert_eq!(export.mime_type, "text/html");
        let path = export.write_to(dir.path()).unwrap();
        assert!(path.ends_with("announcement.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<!DOCTYPE html>");
    }
}
