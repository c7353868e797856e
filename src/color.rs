//! Color Tokens - Hex Validation and Palettes
//!
//! A token is either valid (3 or 6 hex digits, optional `#`) or rejected.
//! Rejected tokens never enter a palette.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::presets::PresetLibrary;

/// Check a hex color token: optional `#`, then exactly 3 or 6 hex digits.
pub fn validate(token: &str) -> bool {
    let body = token.trim();
    let body = body.strip_prefix('#').unwrap_or(body);
    matches!(body.len(), 3 | 6) && body.chars().all(|c| c.is_ascii_hexdigit())
}

/// Canonical form: `#`-prefixed, uppercase.
///
/// Only meaningful for tokens that pass [`validate`].
pub fn normalize(token: &str) -> String {
    let body = token.trim();
    let body = body.strip_prefix('#').unwrap_or(body);
    format!("#{}", body.to_ascii_uppercase())
}

/// A token looks hex-formatted if it is `#`-prefixed or made only of hex digits.
/// Anything else is treated as a free-text color name.
pub fn looks_hex_like(token: &str) -> bool {
    let token = token.trim();
    token.starts_with('#') || (!token.is_empty() && token.chars().all(|c| c.is_ascii_hexdigit()))
}

/// A validated color in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorToken(String);

impl ColorToken {
    pub fn parse(token: &str) -> Option<Self> {
        if validate(token) {
            Some(Self(normalize(token)))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColorToken {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{}' is not a hex color", value))
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate that failed validation, kept for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedColor {
    /// 1-based input slot
    pub slot: usize,
    pub token: String,
}

/// Ordered palette of canonical colors. Duplicates are kept.
///
/// Deserializing drops invalid entries instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ColorPalette {
    colors: Vec<ColorToken>,
    #[serde(skip)]
    rejected: Vec<RejectedColor>,
}

impl ColorPalette {
    /// Build from input slots. Empty slots are skipped, invalid ones recorded.
    pub fn from_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut colors = vec![];
        let mut rejected = vec![];

        for (i, candidate) in candidates.into_iter().enumerate() {
            let candidate = candidate.as_ref().trim();
            if candidate.is_empty() {
                continue;
            }
            match ColorToken::parse(candidate) {
                Some(token) => colors.push(token),
                None => {
                    debug!(slot = i + 1, token = candidate, "dropping invalid palette color");
                    rejected.push(RejectedColor {
                        slot: i + 1,
                        token: candidate.to_string(),
                    });
                }
            }
        }

        Self { colors, rejected }
    }

    /// Load a named preset palette. Unknown names yield an empty palette.
    pub fn from_preset(library: &PresetLibrary, name: &str) -> Self {
        match library.palette_preset(name) {
            Some(colors) => Self::from_candidates(colors),
            None => {
                debug!(preset = name, "unknown palette preset");
                Self::default()
            }
        }
    }

    pub fn colors(&self) -> &[ColorToken] {
        &self.colors
    }

    pub fn rejected(&self) -> &[RejectedColor] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.as_str().to_string()).collect()
    }

    /// Display lines listing accepted colors, then skipped ones.
    pub fn preview(&self) -> Vec<String> {
        let mut lines = if self.colors.is_empty() {
            vec!["No valid colors provided".to_string()]
        } else {
            let mut lines = vec![format!("Valid colors ({}):", self.colors.len())];
            lines.extend(
                self.colors
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("  {}. {}", i + 1, c)),
            );
            lines
        };

        if !self.rejected.is_empty() {
            lines.push(String::new());
            lines.push("Invalid colors skipped:".to_string());
            lines.extend(
                self.rejected
                    .iter()
                    .map(|r| format!("  Color {}: '{}' (invalid)", r.slot, r.token)),
            );
        }

        lines
    }

    /// Info lines for a preset palette.
    pub fn preset_info(&self, name: &str) -> Vec<String> {
        let mut lines = vec![
            format!("Preset: {}", name),
            format!("Colors ({}):", self.colors.len()),
        ];
        lines.extend(
            self.colors
                .iter()
                .enumerate()
                .map(|(i, c)| format!("  {}. {}", i + 1, c)),
        );
        lines
    }
}

impl From<Vec<String>> for ColorPalette {
    fn from(colors: Vec<String>) -> Self {
        Self::from_candidates(colors)
    }
}

impl From<ColorPalette> for Vec<String> {
    fn from(palette: ColorPalette) -> Self {
        palette.to_strings()
    }
}

/// Subject color handling: hex-like tokens are validated and normalized
/// (dropped when invalid); free-text names pass through trimmed.
pub fn resolve_subject_colors<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref().trim();
            if candidate.is_empty() {
                None
            } else if !looks_hex_like(candidate) {
                Some(candidate.to_string())
            } else if validate(candidate) {
                Some(normalize(candidate))
            } else {
                debug!(token = candidate, "dropping malformed subject color");
                None
            }
        })
        .collect()
}
