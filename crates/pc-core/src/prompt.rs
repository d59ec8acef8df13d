//! Prompt request building and the structured/natural result pair.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Form field that is split into a list rather than sent as a string.
pub const TAGS_FIELD: &str = "tags";

/// Form field that must be non-empty for a submission to go out.
pub const TASK_FIELD: &str = "task";

/// Split a comma-separated tag string into trimmed, non-empty tags.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `key=value` field assignment.
///
/// # Errors
///
/// Returns [`CoreError::InvalidField`] if there is no `=` or the key is empty.
pub fn parse_field_assignment(raw: &str) -> Result<(String, String), CoreError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CoreError::InvalidField(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CoreError::InvalidField(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// JSON payload for `/pcrafter/process`, built from raw form fields.
///
/// Empty values are dropped; `tags` becomes a list. Later assignments of the
/// same field win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
}

impl PromptRequest {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (key, value) in fields {
            request.set(key, value.as_ref());
        }
        request
    }

    /// Set a single field, applying the empty-value and tag rules.
    pub fn set(&mut self, key: impl Into<String>, value: &str) {
        if value.is_empty() {
            return;
        }
        let key = key.into();
        if key == TAGS_FIELD {
            self.tags = Some(parse_tags(value));
        } else {
            self.fields.insert(key, value.to_string());
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn task(&self) -> Option<&str> {
        self.get(TASK_FIELD)
    }

    /// Whether the request carries the required `task` field.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.task().is_some()
    }

    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }
}

/// Structured and natural renderings of one processed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub structured: String,
    pub natural: String,
}

/// Which rendering of a [`PromptResult`] to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptChoice {
    #[default]
    Structured,
    Natural,
}

impl PromptChoice {
    #[must_use]
    pub fn pick(self, result: &PromptResult) -> &str {
        match self {
            Self::Structured => &result.structured,
            Self::Natural => &result.natural,
        }
    }
}

impl fmt::Display for PromptChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Structured => "structured",
            Self::Natural => "natural",
        })
    }
}

impl FromStr for PromptChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "natural" => Ok(Self::Natural),
            other => Err(CoreError::UnknownChoice(other.to_string())),
        }
    }
}
