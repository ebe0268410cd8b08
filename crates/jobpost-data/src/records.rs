/*
 * records.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Job and layout records as stored in the data directory.
//!
//! Field names use camelCase in JSON (`headerTitle`, `applyLink`). Fields that
//! are not modelled here are kept in `extra` so templates can still reach them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Identifier; filled in from the index entry or file name when absent.
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<String>,

    /// Responsibilities, one entry per bullet.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub description: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub requirements: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub benefits: Vec<String>,

    #[serde(
        default,
        deserialize_with = "lenient::apply_info",
        skip_serializing_if = "Option::is_none"
    )]
    pub apply: Option<ApplyInfo>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub interview_address: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_phone: Option<String>,

    /// Additional fields not explicitly defined
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// The job identifier, or `""` before the catalog has assigned one.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// The application deadline, if one is set.
    pub fn deadline(&self) -> Option<&str> {
        self.apply.as_ref().and_then(|a| a.deadline.as_deref())
    }
}

/// How to apply for a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyInfo {
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub apply_link: Option<String>,
}

/// A visual layout for the posting image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterLabels>,

    /// Template markup; the built-in template is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Additional fields not explicitly defined
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Captions for the footer blocks of a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_label: Option<String>,
}

/// An entry of `jobs/index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobIndexEntry {
    /// File name relative to the jobs directory.
    pub file: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
}

/// Deserializers that accept loosely-typed hand-written JSON.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::ApplyInfo;

    /// Scalars become strings; null, lists and objects are absent.
    pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar(Value::deserialize(deserializer)?))
    }

    /// Like [`optional_string`], with an absent value read as `""`.
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_string(deserializer)?.unwrap_or_default())
    }

    /// A list of scalars; a non-list value counts as an empty list.
    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        Ok(items.into_iter().filter_map(scalar).collect())
    }

    /// An apply block; anything that is not an object is absent.
    pub fn apply_info<'de, D>(deserializer: D) -> Result<Option<ApplyInfo>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => ApplyInfo::deserialize(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
