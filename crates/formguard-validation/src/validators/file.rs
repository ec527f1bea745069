//! File input validator

use crate::result::ValidationResult;
use crate::rules::{CustomMessages, Rule, RuleChain};
use serde::{Deserialize, Serialize};

/// Metadata of a selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub name: String,
    /// Media type, e.g. `image/png`
    #[serde(rename = "type", default)]
    pub media_type: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
        }
    }
}

/// Rules for [`is_file`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    /// Reject a missing file; on unless turned off
    pub required: bool,
    /// Accepted media types; empty accepts everything
    pub allowed_types: Vec<String>,
    /// Maximum size in bytes (zero disables the check)
    pub max_size: Option<u64>,
    pub custom_message: CustomMessages,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            required: true,
            allowed_types: Vec::new(),
            max_size: None,
            custom_message: CustomMessages::default(),
        }
    }
}

impl FileConfig {
    /// Config with no rules enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a missing file
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Add one accepted media type
    pub fn allow_type(mut self, media_type: impl Into<String>) -> Self {
        self.allowed_types.push(media_type.into());
        self
    }

    /// Replace the accepted media types; empty accepts any type
    pub fn allowed_types<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = media_types.into_iter().map(Into::into).collect();
        self
    }

    /// Largest accepted size in bytes; 0 disables the check
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Override the message reported for `rule`
    pub fn message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.custom_message.insert(rule, message);
        self
    }
}

/// Validate a selected file.
///
/// Rules, in order: `required`, `type`, `size`. A missing file that is not
/// required passes.
pub fn is_file(file: Option<&FileInfo>, config: &FileConfig) -> ValidationResult {
    let max_size = config.max_size.filter(|bytes| *bytes > 0);

    RuleChain::new(&config.custom_message)
        .check(
            Rule::Required,
            || config.required && file.is_none(),
            || "Please select a file.".to_string(),
        )
        .check(
            Rule::Type,
            || {
                !config.allowed_types.is_empty()
                    && file.is_some_and(|file| {
                        !config.allowed_types.iter().any(|allowed| *allowed == file.media_type)
                    })
            },
            || "Invalid file type. Please upload a valid file format.".to_string(),
        )
        .check(
            Rule::Size,
            || max_size.is_some_and(|max| file.is_some_and(|file| file.size > max)),
            || {
                let mebibytes = max_size.unwrap_or_default() as f64 / 1024.0 / 1024.0;
                format!("File size should not exceed {}MB.", mebibytes)
            },
        )
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(size: u64) -> FileInfo {
        FileInfo::new("avatar.png", "image/png", size)
    }

    #[test]
    fn test_required_by_default() {
        assert_eq!(
            is_file(None, &FileConfig::new()).error_message(),
            Some("Please select a file.")
        );
        assert!(is_file(None, &FileConfig::new().required(false)).is_valid());
    }

    #[test]
    fn test_allowed_types() {
        let config = FileConfig::new().allow_type("image/png");
        let text = FileInfo::new("notes.txt", "text/plain", 10);
        assert_eq!(
            is_file(Some(&text), &config).error_message(),
            Some("Invalid file type. Please upload a valid file format.")
        );
        assert!(is_file(Some(&png(10)), &config).is_valid());
    }

    #[test]
    fn test_max_size_message_reports_mebibytes() {
        let config = FileConfig::new().max_size(1_048_576);
        assert_eq!(
            is_file(Some(&png(2_000_000)), &config).error_message(),
            Some("File size should not exceed 1MB.")
        );
        assert!(is_file(Some(&png(1_048_576)), &config).is_valid());
    }

    #[test]
    fn test_fractional_threshold() {
        let config = FileConfig::new().max_size(524_288);
        assert_eq!(
            is_file(Some(&png(600_000)), &config).error_message(),
            Some("File size should not exceed 0.5MB.")
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let config = FileConfig::new()
            .allowed_types(["application/pdf"])
            .max_size(10)
            .message(Rule::Type, "PDF only.")
            .message(Rule::Size, "Too big.");
        assert_eq!(is_file(Some(&png(100)), &config).error_message(), Some("PDF only."));
    }

    #[test]
    fn test_optional_missing_file_skips_other_rules() {
        let config = FileConfig::new()
            .required(false)
            .allow_type("image/png")
            .max_size(10);
        assert!(is_file(None, &config).is_valid());
    }

    #[test]
    fn test_config_from_json() {
        let config: FileConfig = serde_json::from_value(serde_json::json!({
            "allowedTypes": ["image/jpeg"],
            "maxSize": 2048
        }))
        .unwrap();
        assert!(config.required);
        assert_eq!(config.max_size, Some(2048));

        let file: FileInfo = serde_json::from_value(serde_json::json!({
            "name": "cv.pdf", "type": "application/pdf", "size": 10
        }))
        .unwrap();
        assert_eq!(file.media_type, "application/pdf");
    }
}
