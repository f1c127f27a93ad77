//! Correction rule sets used to repair vendor documentation inconsistencies.
//!
//! Rules are loaded once before any log type is processed and passed by
//! reference into every stage; nothing mutates them during a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Sentinel the vendor uses for reserved, unused format positions.
pub const FUTURE_USE: &str = "FUTURE_USE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionRules {
    /// Long field name to variable name; fills empty derived names and wins
    /// over every auto-derived name-map entry.
    pub global_name_overrides: BTreeMap<String, String>,
    /// Variable-name token to corrected token.
    pub token_corrections: BTreeMap<String, String>,
    /// Log type name to ordered positional or value-matched edits.
    pub per_log_corrections: BTreeMap<String, Vec<PerLogCorrection>>,
    /// Drop a leading [`FUTURE_USE`] token before per-log edits. A run
    /// setting rather than part of the exceptions file.
    #[serde(skip)]
    pub strip_leading_future_use: bool,
}

impl CorrectionRules {
    #[must_use]
    pub fn with_strip_leading_future_use(mut self, enable: bool) -> Self {
        self.strip_leading_future_use = enable;
        self
    }

    /// Corrected form of `token`, or `token` itself when no rule applies.
    pub fn correct_token<'a>(&'a self, token: &'a str) -> &'a str {
        self.token_corrections
            .get(token)
            .map_or(token, String::as_str)
    }

    pub fn name_override(&self, long_name: &str) -> Option<&str> {
        self.global_name_overrides
            .get(long_name)
            .map(String::as_str)
    }

    pub fn corrections_for(&self, log_type: &str) -> &[PerLogCorrection] {
        self.per_log_corrections
            .get(log_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn per_log_entry_count(&self) -> usize {
        self.per_log_corrections.values().map(Vec::len).sum()
    }
}

/// One per-log correction as written in the exceptions file.
///
/// Exactly one target (`match` or `position`) and one action (`new` or
/// `split_into`) are expected; when both targets are given `match` wins,
/// when both actions are given `new` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerLogCorrection {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub match_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_into: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionTarget {
    /// First token equal to the value.
    Match(String),
    /// Explicit index; bounds are checked against the list at apply time.
    Position(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionAction {
    Replace(String),
    Split(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEdit {
    pub target: CorrectionTarget,
    pub action: CorrectionAction,
}

impl PerLogCorrection {
    pub fn replace_at(position: i64, new: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            new: Some(new.into()),
            ..Self::default()
        }
    }

    pub fn split_at<I, S>(position: i64, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            position: Some(position),
            split_into: Some(tokens.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn replace_match(value: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            match_value: Some(value.into()),
            new: Some(new.into()),
            ..Self::default()
        }
    }

    pub fn split_match<I, S>(value: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            match_value: Some(value.into()),
            split_into: Some(tokens.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Resolve the entry into a typed edit, rejecting malformed shapes.
    pub fn edit(&self) -> Result<CorrectionEdit> {
        let target = match (&self.match_value, self.position) {
            (Some(value), _) => CorrectionTarget::Match(value.clone()),
            (None, Some(position)) => CorrectionTarget::Position(position),
            (None, None) => {
                return Err(ModelError::MalformedCorrection(
                    "neither 'position' nor 'match' key".to_string(),
                ));
            }
        };
        let action = match (&self.new, &self.split_into) {
            (Some(new), _) => CorrectionAction::Replace(new.clone()),
            (None, Some(tokens)) => CorrectionAction::Split(tokens.clone()),
            (None, None) => {
                return Err(ModelError::MalformedCorrection(
                    "neither 'new' nor 'split_into' key".to_string(),
                ));
            }
        };
        Ok(CorrectionEdit { target, action })
    }
}
