//! Generated versions of a script.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One generated script plus the parameters that produced it.
///
/// Optional fields are absent in records written by older releases and are
/// tolerated on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Version {
    /// When the version was generated
    #[serde(with = "crate::timestamp")]
    pub timestamp: NaiveDateTime,
    /// Model identifier as sent to the endpoint
    #[serde(default)]
    pub model: String,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f32>,
    /// The user's instruction
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub prompt: Option<String>,
    /// The generated text
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub content: Option<String>,
    /// Estimated input tokens of the request
    #[serde(default)]
    #[builder(default)]
    pub input_tokens: usize,
    /// Estimated cost of the request in USD
    #[serde(default)]
    #[builder(default)]
    pub estimated_cost: f64,
    /// Labels of the context parts used, in order
    #[serde(default)]
    #[builder(default)]
    pub context: Vec<String>,
    /// 1-based number within the script; 0 only for unmigrated legacy records
    #[serde(default)]
    pub version_number: u32,
}

/// Number the next version of a script should receive.
pub fn next_version_number(versions: &[Version]) -> u32 {
    versions
        .iter()
        .map(|v| v.version_number)
        .max()
        .unwrap_or(0)
        + 1
}

/// Give position-based numbers to legacy records that lack one.
///
/// Stored numbers are left alone. Returns how many records were migrated.
pub fn assign_legacy_numbers(versions: &mut [Version]) -> usize {
    let mut migrated = 0;
    for (index, version) in versions.iter_mut().enumerate() {
        if version.version_number == 0 {
            version.version_number = index as u32 + 1;
            migrated += 1;
        }
    }
    migrated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: u32) -> Version {
        Version {
            version_number: n,
            ..Version::default()
        }
    }

    #[test]
    fn test_next_number_is_max_plus_one() {
        assert_eq!(next_version_number(&[]), 1);
        assert_eq!(next_version_number(&[numbered(1), numbered(2)]), 3);
        assert_eq!(next_version_number(&[numbered(4), numbered(2)]), 5);
    }

    #[test]
    fn test_legacy_numbers_fill_only_missing() {
        let mut versions = vec![numbered(0), numbered(7), numbered(0)];
        assert_eq!(assign_legacy_numbers(&mut versions), 2);
        let numbers: Vec<u32> = versions.iter().map(|v| v.version_number).collect();
        assert_eq!(numbers, vec![1, 7, 3]);
    }

    #[test]
    fn test_legacy_record_deserializes() {
        let raw = r#"{"timestamp": "2024-05-01 10:00:00", "model": "gpt-4o", "content": "Story"}"#;
        let version: Version = serde_json::from_str(raw).expect("legacy record loads");
        assert_eq!(version.version_number, 0);
        assert_eq!(version.temperature, None);
        assert_eq!(version.prompt, None);
        assert_eq!(version.content.as_deref(), Some("Story"));
        assert!(version.context.is_empty());
    }

    #[test]
    fn test_builder_requires_number() {
        let built = VersionBuilder::default()
            .timestamp(NaiveDateTime::default())
            .model("gpt-4o-mini")
            .prompt("Write it")
            .build();
        assert!(built.is_err());
    }
}
