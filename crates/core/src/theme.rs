//! Visual themes for the notebook.
//!
//! A theme is plain presentation data: a background, a text colour and a
//! font stack. Presets are looked up by name from a [`ThemeStore`]; custom
//! themes are built from colour picks and one of the [`FONT_CHOICES`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the preset selected when the notebook opens.
pub const DEFAULT_PRESET: &str = "Iridescent Dawn";

/// Font stacks offered for custom themes, as (label, CSS font-family).
pub const FONT_CHOICES: &[(&str, &str)] = &[
    ("Georgia", "'Georgia', serif"),
    ("Arial", "'Arial', sans-serif"),
    ("Courier New", "'Courier New', monospace"),
    ("Roboto", "'Roboto', sans-serif"),
    ("Open Sans", "'Open Sans', sans-serif"),
    ("Merriweather", "'Merriweather', serif"),
    ("Lora", "'Lora', serif"),
];

/// Presentation values for rendering poems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// CSS background (colour or gradient).
    pub background: String,

    /// CSS text colour.
    pub text_color: String,

    /// CSS font-family stack.
    pub font: String,
}

impl Theme {
    /// Create a theme from raw values.
    pub fn new(
        background: impl Into<String>,
        text_color: impl Into<String>,
        font: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            text_color: text_color.into(),
            font: font.into(),
        }
    }

    /// The plain theme used when no preset applies.
    pub fn fallback() -> Self {
        Self::new("#fff", "#222", "'Georgia', serif")
    }

    /// Build a custom theme from colour-picker values and a font choice.
    ///
    /// Colours must be `#rrggbb`. The font may be given either by its label
    /// ("Lora") or by its font-family stack ("'Lora', serif").
    pub fn custom(background: &str, text_color: &str, font: &str) -> Result<Self> {
        let background = parse_hex_color(background)?;
        let text_color = parse_hex_color(text_color)?;

        let font = FONT_CHOICES
            .iter()
            .find(|(label, stack)| label.eq_ignore_ascii_case(font.trim()) || *stack == font)
            .map(|(_, stack)| stack.to_string())
            .ok_or_else(|| Error::InvalidTheme(format!("unsupported font '{}'", font)))?;

        Ok(Self {
            background,
            text_color,
            font,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(
            "linear-gradient(to bottom right, #fef6ff, #e6f2ff)",
            "#444",
            "'Cormorant Garamond', serif",
        )
    }
}

/// Check a `#rrggbb` colour and return it lowercased.
fn parse_hex_color(value: &str) -> Result<String> {
    let value = value.trim();
    let digits = value
        .strip_prefix('#')
        .ok_or_else(|| Error::InvalidTheme(format!("colour '{}' must start with '#'", value)))?;

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidTheme(format!(
            "colour '{}' is not of the form #rrggbb",
            value
        )));
    }

    Ok(value.to_ascii_lowercase())
}

/// Named theme presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeStore {
    presets: BTreeMap<String, Theme>,
}

impl ThemeStore {
    /// Create a store holding the built-in presets.
    pub fn new() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(DEFAULT_PRESET.to_string(), Theme::default());
        presets.insert(
            "Terracotta Soul".to_string(),
            Theme::new(
                "linear-gradient(to bottom right, #fff4e6, #f6d9c2)",
                "#4b2e2e",
                "'Spectral', serif",
            ),
        );
        presets.insert(
            "Deep Ocean Ink".to_string(),
            Theme::new(
                "linear-gradient(to bottom right, #0f1c2e, #1b2a3a)",
                "#cdd6f4",
                "'EB Garamond', serif",
            ),
        );
        Self { presets }
    }

    /// Add presets from a JSON object of `{ "name": { background, textColor, font } }`.
    ///
    /// Presets with an existing name replace the old value.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let extra: BTreeMap<String, Theme> = serde_json::from_str(json)?;
        let count = extra.len();

        for (name, theme) in extra {
            if name.trim().is_empty() {
                return Err(Error::InvalidTheme("preset name is empty".to_string()));
            }
            log::debug!("Loaded theme preset '{}'", name);
            self.presets.insert(name, theme);
        }

        Ok(count)
    }

    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.presets.get(name)
    }

    /// Look up a preset by name, failing for unknown names.
    pub fn require(&self, name: &str) -> Result<&Theme> {
        self.get(name)
            .ok_or_else(|| Error::UnknownTheme(name.to_string()))
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// All presets with their names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Theme)> {
        self.presets.iter().map(|(name, theme)| (name.as_str(), theme))
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}
