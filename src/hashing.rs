//! Hashing System - SHA-256 fingerprints for documents
//!
//! The same config always hashes the same, independent of key order.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::model::EmailConfig;

/// Lowercase hex SHA-256 of a byte string.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data).iter().map(|b| format!("{:02x}", b)).collect()
}

/// Compact JSON with every object's keys in ascending order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut v = serde_json::to_value(value)?;
    sort_keys(&mut v);
    to_string(&v)
}

fn sort_keys(v: &mut Value) {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Fingerprint of a document config. Two documents that differ only in
/// JSON key order hash the same.
pub fn config_hash(config: &EmailConfig) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(config)?.as_bytes()))
}

/// Fingerprint of compiled output.
pub fn content_hash(html: &str) -> String {
    sha256_hex(html.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": {"y": 0, "b": 1}});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":2,"m":{"b":1,"y":0},"z":1}"#);
    }

    #[test]
    fn test_content_hash_known_value() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_config_hash_ignores_key_order() {
        let a: EmailConfig =
            serde_json::from_str(r#"{"header": {"title": "Hi", "subtitle": "There"}, "sections": []}"#).unwrap();
        let b: EmailConfig =
            serde_json::from_str(r#"{"sections": [], "header": {"subtitle": "There", "title": "Hi"}}"#).unwrap();
        assert_eq!(config_hash(&a).unwrap(), config_hash(&b).unwrap());
    }

    #[test]
    fn test_config_hash_tracks_changes() {
        let config = EmailConfig::default();
        let h1 = config_hash(&config).unwrap();
        assert_eq!(h1, config_hash(&config.clone()).unwrap());

        let mut edited = config.clone();
        edited.header.title = "Changed".to_string();
        assert_ne!(h1, config_hash(&edited).unwrap());
    }
}
