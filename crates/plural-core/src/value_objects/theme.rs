//! Theme definitions - named color tables for the presentation layer

use serde::{Deserialize, Serialize};

use super::color::ThemeColor;
use crate::error::DomainError;

/// Light or dark base palette
///
/// Unknown tags are rejected with a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Light,
    Dark,
}

/// The fifteen color slots of a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub success: ThemeColor,
    pub info: ThemeColor,
    pub warning: ThemeColor,
    pub danger: ThemeColor,
    pub light: ThemeColor,
    pub dark: ThemeColor,
    pub bg: ThemeColor,
    pub fg: ThemeColor,
    #[serde(rename = "selectbg")]
    pub select_bg: ThemeColor,
    #[serde(rename = "selectfg")]
    pub select_fg: ThemeColor,
    pub border: ThemeColor,
    #[serde(rename = "inputfg")]
    pub input_fg: ThemeColor,
    #[serde(rename = "inputbg")]
    pub input_bg: ThemeColor,
}

/// A named theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(rename = "type")]
    pub theme_type: ThemeType,
    pub colors: ThemeColors,
    pub name: String,
}

impl Theme {
    #[inline]
    pub fn is_dark(&self) -> bool {
        self.theme_type == ThemeType::Dark
    }
}

/// Decode a JSON array of themes
pub fn parse_themes(json: &str) -> Result<Vec<Theme>, DomainError> {
    serde_json::from_str(json).map_err(|e| DomainError::InvalidTheme(e.to_string()))
}
