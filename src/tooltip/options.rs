//! Tooltip display options and their validation.
//!
//! Options arrive either as typed values or as loosely typed JSON (config
//! files, CLI input). Both paths funnel through the same checks and report
//! problems as [`Error::InvalidConfiguration`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::host::{OverlayContent, Relief};
use crate::{Error, Result};

const DEFAULT_TEXT: &str = "Default";
const DEFAULT_TIME_MS: i64 = 2000;
const DEFAULT_FG: &str = "black";
const DEFAULT_BG: &str = "lightyellow";

const LABEL_BORDER_WIDTH: i32 = 1;
const LABEL_PADDING_X: i32 = 5;

/// Font descriptor passed through to the host: family, size, weight.
///
/// Serialized as a 3-element array, e.g. `["arial", 8, "normal"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(String, i32, String)", try_from = "(String, i32, String)")]
pub struct FontSpec {
    pub family: String,
    /// Positive for points, negative for pixels. Zero is rejected.
    pub size: i32,
    pub weight: String,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: i32, weight: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            size,
            weight: weight.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.family.trim().is_empty() {
            return Err(Error::invalid("<font> family must not be empty"));
        }
        if self.size == 0 {
            return Err(Error::invalid("<font> size must not be zero"));
        }
        if self.weight.trim().is_empty() {
            return Err(Error::invalid("<font> weight must not be empty"));
        }
        Ok(())
    }

    /// Parse a `[family, size, weight]` JSON array. The size may be an integer
    /// or a string holding one.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(parts) = value.as_array() else {
            return Err(Error::invalid("<font> must be a font tuple"));
        };
        let [family, size, weight] = parts.as_slice() else {
            return Err(Error::invalid(format!(
                "<font> must have exactly 3 elements (family, size, weight), got {}",
                parts.len()
            )));
        };
        let family = family
            .as_str()
            .ok_or_else(|| Error::invalid("<font> family must be a string"))?;
        let size = match size {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
        .ok_or_else(|| Error::invalid("<font> size must be an integer"))?;
        let weight = weight
            .as_str()
            .ok_or_else(|| Error::invalid("<font> weight must be a string"))?;

        let font = Self::new(family, size, weight);
        font.validate()?;
        Ok(font)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("arial", 8, "normal")
    }
}

impl From<FontSpec> for (String, i32, String) {
    fn from(f: FontSpec) -> Self {
        (f.family, f.size, f.weight)
    }
}

impl TryFrom<(String, i32, String)> for FontSpec {
    type Error = Error;

    fn try_from((family, size, weight): (String, i32, String)) -> Result<Self> {
        let font = Self::new(family, size, weight);
        font.validate()?;
        Ok(font)
    }
}

fn default_text() -> String { DEFAULT_TEXT.into() }
fn default_time_ms() -> i64 { DEFAULT_TIME_MS }
fn default_fg() -> String { DEFAULT_FG.into() }
fn default_bg() -> String { DEFAULT_BG.into() }

/// What a tooltip shows and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipOptions {
    #[serde(default = "default_text")]
    pub text: String,
    /// Auto-dismiss delay in milliseconds. Zero or negative keeps the tooltip
    /// up until the pointer leaves.
    #[serde(default = "default_time_ms", rename = "time")]
    pub time_ms: i64,
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            text: default_text(),
            time_ms: default_time_ms(),
            font: FontSpec::default(),
            fg: default_fg(),
            bg: default_bg(),
        }
    }
}

impl TooltipOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn time_ms(mut self, time_ms: i64) -> Self {
        self.time_ms = time_ms;
        self
    }

    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn fg(mut self, fg: impl Into<String>) -> Self {
        self.fg = fg.into();
        self
    }

    pub fn bg(mut self, bg: impl Into<String>) -> Self {
        self.bg = bg.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_text(&self.text)?;
        self.font.validate()?;
        validate_color("fg", &self.fg)?;
        validate_color("bg", &self.bg)
    }

    /// Auto-dismiss delay, or `None` when the tooltip only closes on leave.
    pub fn auto_dismiss(&self) -> Option<Duration> {
        u64::try_from(self.time_ms)
            .ok()
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// Build options from a JSON object. Missing keys take their defaults.
    pub fn from_json(value: &Value) -> Result<Self> {
        let mut options = Self::default();
        ConfigPatch::from_json(value)?.apply_to(&mut options)?;
        Ok(options)
    }

    /// Label content handed to the host when the tooltip is shown.
    pub fn overlay_content(&self) -> OverlayContent {
        OverlayContent {
            text: self.text.clone(),
            font: self.font.clone(),
            fg: self.fg.clone(),
            bg: self.bg.clone(),
            relief: Relief::Ridge,
            border_width: LABEL_BORDER_WIDTH,
            padding_x: LABEL_PADDING_X,
        }
    }
}

fn validate_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::invalid("<text> must be a non-empty string"));
    }
    Ok(())
}

fn validate_color(name: &str, color: &str) -> Result<()> {
    if color.trim().is_empty() {
        return Err(Error::invalid(format!("<{}> must be a non-empty color", name)));
    }
    Ok(())
}

/// Partial update applied by `reconfigure`. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub text: Option<String>,
    pub time_ms: Option<i64>,
    pub font: Option<FontSpec>,
    pub fg: Option<String>,
    pub bg: Option<String>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn time_ms(mut self, time_ms: i64) -> Self {
        self.time_ms = Some(time_ms);
        self
    }

    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn fg(mut self, fg: impl Into<String>) -> Self {
        self.fg = Some(fg.into());
        self
    }

    pub fn bg(mut self, bg: impl Into<String>) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check every present field without applying anything.
    pub fn validate(&self) -> Result<()> {
        if let Some(text) = &self.text {
            validate_text(text)?;
        }
        if let Some(font) = &self.font {
            font.validate()?;
        }
        if let Some(fg) = &self.fg {
            validate_color("fg", fg)?;
        }
        if let Some(bg) = &self.bg {
            validate_color("bg", bg)?;
        }
        Ok(())
    }

    /// Validate, then apply. On error `options` is left untouched.
    pub fn apply_to(self, options: &mut TooltipOptions) -> Result<()> {
        self.validate()?;
        if let Some(text) = self.text {
            options.text = text;
        }
        if let Some(time_ms) = self.time_ms {
            options.time_ms = time_ms;
        }
        if let Some(font) = self.font {
            options.font = font;
        }
        if let Some(fg) = self.fg {
            options.fg = fg;
        }
        if let Some(bg) = self.bg {
            options.bg = bg;
        }
        Ok(())
    }

    /// Parse a JSON object with the keys `text`, `time`, `font`, `fg`, `bg`.
    /// `null` values count as absent.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(Error::invalid("tooltip options must be a JSON object"));
        };
        reject_unknown_keys(map)?;

        let mut patch = Self::new();
        if let Some(text) = present(map, "text") {
            let text = text
                .as_str()
                .ok_or_else(|| Error::invalid("<text> must be a string"))?;
            patch.text = Some(text.to_string());
        }
        if let Some(time) = present(map, "time") {
            let time = time
                .as_i64()
                .ok_or_else(|| Error::invalid("<time> must be an integer"))?;
            patch.time_ms = Some(time);
        }
        if let Some(font) = present(map, "font") {
            patch.font = Some(FontSpec::from_json(font)?);
        }
        for key in ["fg", "bg"] {
            if let Some(color) = present(map, key) {
                let color = color
                    .as_str()
                    .ok_or_else(|| Error::invalid(format!("<{}> must be a color string", key)))?
                    .to_string();
                if key == "fg" {
                    patch.fg = Some(color);
                } else {
                    patch.bg = Some(color);
                }
            }
        }
        patch.validate()?;
        Ok(patch)
    }
}

const KNOWN_KEYS: [&str; 5] = ["text", "time", "font", "fg", "bg"];

fn reject_unknown_keys(map: &Map<String, Value>) -> Result<()> {
    match map.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        Some(key) => Err(Error::invalid(format!("unknown tooltip option <{}>", key))),
        None => Ok(()),
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}
