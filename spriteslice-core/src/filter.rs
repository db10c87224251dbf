use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SliceError;

/// Texture sampling filter for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FilterMode {
    Nearest,
    #[default]
    Bilinear,
    /// Unrecognized label.
    Invalid,
}

const FILTER_LABELS: &[(FilterMode, &str)] = &[
    (FilterMode::Nearest, "NEAREST"),
    (FilterMode::Bilinear, "BILINEAR"),
];

impl FilterMode {
    /// Label lookup, case-insensitive. Unknown labels map to `Invalid`.
    pub fn from_label(label: &str) -> Self {
        FILTER_LABELS
            .iter()
            .find(|(_, l)| l.eq_ignore_ascii_case(label.trim()))
            .map(|(mode, _)| *mode)
            .unwrap_or(FilterMode::Invalid)
    }

    pub fn label(self) -> &'static str {
        FILTER_LABELS
            .iter()
            .find(|(mode, _)| *mode == self)
            .map(|(_, l)| *l)
            .unwrap_or("INVALID")
    }

    pub fn is_valid(self) -> bool { self != FilterMode::Invalid }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for FilterMode {
    type Err = SliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match FilterMode::from_label(s) {
            FilterMode::Invalid => Err(SliceError::UnknownFilterMode(s.to_string())),
            mode => Ok(mode),
        }
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self { mode.label().to_string() }
}

impl From<String> for FilterMode {
    fn from(label: String) -> Self { FilterMode::from_label(&label) }
}
