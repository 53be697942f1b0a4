//! Favicon settings.
//!
//! The pipeline never looks inside the settings payload: it is an opaque
//! JSON object ([`Settings`]) carried from the request to the collaborators
//! verbatim. The standard collaborators read it through the typed
//! [`FaviconSettings`] view defined here.
//!
//! ## Settings shape
//!
//! ```toml
//! path = "/favicons/"           # URL prefix used in generated hrefs
//!
//! [icon.desktop.transformation]
//! kind = "none"                 # "none" | "background"
//! image_scale = 1.0             # 0-1, fraction of the canvas the icon covers
//!
//! [icon.touch]
//! app_title = "My Site"         # apple-mobile-web-app-title, omitted when unset
//!
//! [icon.touch.transformation]
//! kind = "background"
//! background_color = "#ffffff"
//! background_radius = 0.0       # 0 = square, 1 = circle
//! image_scale = 0.7
//!
//! [icon.web_app_manifest]
//! name = "My Site"
//! short_name = "Site"
//! background_color = "#ffffff"
//! theme_color = "#ffffff"
//! ```
//!
//! Every key is optional. Unknown keys are ignored because the payload may
//! carry data meant for other collaborators.

use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Opaque settings payload forwarded from the request to the collaborators.
pub type Settings = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("Invalid color '{0}': expected #rgb or #rrggbb")]
    Color(String),
}

/// Typed view of the settings payload used by the standard collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconSettings {
    /// URL prefix prepended to every generated href.
    pub path: String,
    pub icon: IconSettings,
}

impl Default for FaviconSettings {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            icon: IconSettings::default(),
        }
    }
}

impl FaviconSettings {
    /// Read the typed view out of an opaque payload.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        Ok(serde_json::from_value(serde_json::Value::Object(
            settings.clone(),
        ))?)
    }

    /// Public URL of a generated file: the path prefix joined with `file_name`.
    pub fn href(&self, file_name: &str) -> String {
        if self.path.ends_with('/') {
            format!("{}{}", self.path, file_name)
        } else {
            format!("{}/{}", self.path, file_name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    pub desktop: DesktopSettings,
    pub touch: TouchSettings,
    pub web_app_manifest: WebAppManifestSettings,
}

/// Browser tab icons: `favicon.ico`, `favicon-96x96.png`, `favicon.svg`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopSettings {
    pub transformation: IconTransformation,
}

/// Apple touch icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchSettings {
    #[serde(deserialize_with = "backdrop_transformation")]
    pub transformation: IconTransformation,
    pub app_title: Option<String>,
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            transformation: IconTransformation::backdrop(),
            app_title: None,
        }
    }
}

/// `site.webmanifest` and the icons it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebAppManifestSettings {
    #[serde(deserialize_with = "backdrop_transformation")]
    pub transformation: IconTransformation,
    pub name: String,
    pub short_name: String,
    pub background_color: String,
    pub theme_color: String,
}

impl Default for WebAppManifestSettings {
    fn default() -> Self {
        Self {
            transformation: IconTransformation::backdrop(),
            name: String::new(),
            short_name: String::new(),
            background_color: "#ffffff".to_string(),
            theme_color: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationKind {
    /// Icon drawn as-is on a transparent canvas.
    #[default]
    None,
    /// Icon drawn over a solid, optionally rounded, background.
    Background,
}

/// How the master icon is placed on an output canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconTransformation {
    pub kind: TransformationKind,
    pub background_color: String,
    /// Corner radius as a fraction of half the canvas side (0 = square, 1 = circle).
    pub background_radius: f32,
    /// Fraction of the canvas side covered by the icon.
    pub image_scale: f32,
}

impl Default for IconTransformation {
    fn default() -> Self {
        Self {
            kind: TransformationKind::None,
            background_color: "#ffffff".to_string(),
            background_radius: 0.0,
            image_scale: 1.0,
        }
    }
}

impl IconTransformation {
    /// White square backdrop with the icon at 70%, the usual home-screen look.
    pub fn backdrop() -> Self {
        Self {
            kind: TransformationKind::Background,
            image_scale: 0.7,
            ..Self::default()
        }
    }

    /// Icon scale clamped to `(0, 1]`.
    pub fn scale(&self) -> f32 {
        if self.image_scale.is_finite() && self.image_scale > 0.0 {
            self.image_scale.min(1.0)
        } else {
            1.0
        }
    }

    /// Corner radius fraction clamped to `[0, 1]`.
    pub fn radius(&self) -> f32 {
        if self.background_radius.is_finite() {
            self.background_radius.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Background fill, or `None` when the canvas stays transparent.
    pub fn background(&self) -> Result<Option<Rgba<u8>>, SettingsError> {
        match self.kind {
            TransformationKind::None => Ok(None),
            TransformationKind::Background => parse_color(&self.background_color).map(Some),
        }
    }

    /// True when the output is the master icon untouched.
    pub fn is_identity(&self) -> bool {
        self.kind == TransformationKind::None && self.scale() >= 1.0
    }
}

/// Keys present in a partial `transformation` table.
#[derive(Deserialize)]
struct TransformationOverrides {
    kind: Option<TransformationKind>,
    background_color: Option<String>,
    background_radius: Option<f32>,
    image_scale: Option<f32>,
}

impl TransformationOverrides {
    fn apply(self, base: IconTransformation) -> IconTransformation {
        IconTransformation {
            kind: self.kind.unwrap_or(base.kind),
            background_color: self.background_color.unwrap_or(base.background_color),
            background_radius: self.background_radius.unwrap_or(base.background_radius),
            image_scale: self.image_scale.unwrap_or(base.image_scale),
        }
    }
}

/// Touch and manifest icons: missing keys come from [`IconTransformation::backdrop`].
fn backdrop_transformation<'de, D>(deserializer: D) -> Result<IconTransformation, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(TransformationOverrides::deserialize(deserializer)?.apply(IconTransformation::backdrop()))
}

/// Parse `#rgb` or `#rrggbb` into an opaque RGBA color.
pub fn parse_color(value: &str) -> Result<Rgba<u8>, SettingsError> {
    let invalid = || SettingsError::Color(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Ok(Rgba([expand(0)?, expand(1)?, expand(2)?, 255]))
        }
        6 => Ok(Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ])),
        _ => Err(invalid()),
    }
}

/// Format an RGBA color back into `#rrggbb`.
pub fn format_color(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
