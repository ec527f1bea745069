//! Built-in validators, one per control family

pub mod email;
pub mod file;
pub mod group;
pub mod number;
pub mod select;
pub mod string;

pub use email::{is_email, EmailConfig, EmailKind};
pub use file::{is_file, FileConfig, FileInfo};
pub use group::{is_checkbox_group, is_radio_group, CheckboxConfig, RadioConfig};
pub use number::{is_number, parse_numeric, NumberConfig};
pub use select::{is_select, SelectConfig};
pub use string::{is_string, StringConfig};

/// A value is blank when it is missing or only whitespace
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

/// Regex patterns travel through config files as plain strings
pub(crate) mod pattern_serde {
    use regex::Regex;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Regex>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|pattern| Regex::new(&pattern).map_err(D::Error::custom))
            .transpose()
    }
}
