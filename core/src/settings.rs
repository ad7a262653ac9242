//! Enhancement settings attached to a restoration run.

use serde::{Deserialize, Serialize};

/// Toggles controlling which improvements the backend should attempt.
///
/// Snapshotted at handoff; the same snapshot is used for every item of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancementSettings {
    pub enhance_sharpness: bool,
    pub colorize: bool,
    pub upscale_resolution: bool,
    pub remove_scratches: bool,
    pub enhance_contrast: bool,
    pub remove_noise: bool,
    pub fix_lighting: bool,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            enhance_sharpness: true,
            colorize: false,
            upscale_resolution: false,
            remove_scratches: true,
            enhance_contrast: true,
            remove_noise: true,
            fix_lighting: false,
        }
    }
}

/// Settings toggle, in the order improvement labels are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Enhancement {
    Sharpness,
    Scratches,
    Contrast,
    Noise,
    Lighting,
    Colorize,
    Upscale,
}

impl Enhancement {
    /// Every toggle, in label order.
    pub const ALL: [Enhancement; 7] = [
        Enhancement::Sharpness,
        Enhancement::Scratches,
        Enhancement::Contrast,
        Enhancement::Noise,
        Enhancement::Lighting,
        Enhancement::Colorize,
        Enhancement::Upscale,
    ];

    /// Label shown on a result once the improvement was applied.
    pub fn improvement_label(&self) -> &'static str {
        match self {
            Enhancement::Sharpness => "Enhanced sharpness",
            Enhancement::Scratches => "Removed scratches",
            Enhancement::Contrast => "Improved contrast",
            Enhancement::Noise => "Reduced noise",
            Enhancement::Lighting => "Fixed lighting",
            Enhancement::Colorize => "Added color",
            Enhancement::Upscale => "Upscaled resolution",
        }
    }

    /// Label of the toggle in the settings panel.
    pub fn setting_label(&self) -> &'static str {
        match self {
            Enhancement::Sharpness => "Enhance Sharpness",
            Enhancement::Scratches => "Remove Scratches",
            Enhancement::Contrast => "Enhance Contrast",
            Enhancement::Noise => "Remove Noise",
            Enhancement::Lighting => "Fix Lighting",
            Enhancement::Colorize => "Colorize",
            Enhancement::Upscale => "Upscale Resolution",
        }
    }

    /// camelCase key, matching the serialized settings.
    pub fn key(&self) -> &'static str {
        match self {
            Enhancement::Sharpness => "enhanceSharpness",
            Enhancement::Scratches => "removeScratches",
            Enhancement::Contrast => "enhanceContrast",
            Enhancement::Noise => "removeNoise",
            Enhancement::Lighting => "fixLighting",
            Enhancement::Colorize => "colorize",
            Enhancement::Upscale => "upscaleResolution",
        }
    }

    /// Parse a toggle from its key or short name (`sharpness`, `noise`...),
    /// ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|e| {
            e.key().to_ascii_lowercase() == name || format!("{:?}", e).to_ascii_lowercase() == name
        })
    }
}

impl EnhancementSettings {
    /// Everything off.
    pub fn none() -> Self {
        Self {
            enhance_sharpness: false,
            colorize: false,
            upscale_resolution: false,
            remove_scratches: false,
            enhance_contrast: false,
            remove_noise: false,
            fix_lighting: false,
        }
    }

    pub fn is_enabled(&self, enhancement: Enhancement) -> bool {
        match enhancement {
            Enhancement::Sharpness => self.enhance_sharpness,
            Enhancement::Scratches => self.remove_scratches,
            Enhancement::Contrast => self.enhance_contrast,
            Enhancement::Noise => self.remove_noise,
            Enhancement::Lighting => self.fix_lighting,
            Enhancement::Colorize => self.colorize,
            Enhancement::Upscale => self.upscale_resolution,
        }
    }

    pub fn set(&mut self, enhancement: Enhancement, enabled: bool) {
        let slot = match enhancement {
            Enhancement::Sharpness => &mut self.enhance_sharpness,
            Enhancement::Scratches => &mut self.remove_scratches,
            Enhancement::Contrast => &mut self.enhance_contrast,
            Enhancement::Noise => &mut self.remove_noise,
            Enhancement::Lighting => &mut self.fix_lighting,
            Enhancement::Colorize => &mut self.colorize,
            Enhancement::Upscale => &mut self.upscale_resolution,
        };
        *slot = enabled;
    }

    pub fn toggle(&mut self, enhancement: Enhancement) {
        let current = self.is_enabled(enhancement);
        self.set(enhancement, !current);
    }

    /// Builder-style setter.
    pub fn with(mut self, enhancement: Enhancement, enabled: bool) -> Self {
        self.set(enhancement, enabled);
        self
    }

    /// Labels of the enabled improvements, always in [`Enhancement::ALL`] order.
    pub fn applied_improvements(&self) -> Vec<String> {
        Enhancement::ALL
            .iter()
            .filter(|e| self.is_enabled(**e))
            .map(|e| e.improvement_label().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhancement_from_name() {
        assert_eq!(Enhancement::from_name("sharpness"), Some(Enhancement::Sharpness));
        assert_eq!(Enhancement::from_name("fixLighting"), Some(Enhancement::Lighting));
        assert_eq!(Enhancement::from_name("UPSCALERESOLUTION"), Some(Enhancement::Upscale));
        assert_eq!(Enhancement::from_name("sepia"), None);
    }

    #[test]
    fn test_defaults_match_upload_page() {
        let s = EnhancementSettings::default();
        assert!(s.enhance_sharpness);
        assert!(!s.colorize);
        assert!(!s.upscale_resolution);
        assert!(s.remove_scratches);
        assert!(s.enhance_contrast);
        assert!(s.remove_noise);
        assert!(!s.fix_lighting);
    }

    #[test]
    fn test_applied_improvements_fixed_order() {
        let s = EnhancementSettings::none()
            .with(Enhancement::Noise, true)
            .with(Enhancement::Sharpness, true);
        assert_eq!(s.applied_improvements(), vec!["Enhanced sharpness", "Reduced noise"]);
    }

    #[test]
    fn test_applied_improvements_all_enabled() {
        let mut s = EnhancementSettings::none();
        for e in Enhancement::ALL {
            s.set(e, true);
        }
        assert_eq!(
            s.applied_improvements(),
            vec![
                "Enhanced sharpness",
                "Removed scratches",
                "Improved contrast",
                "Reduced noise",
                "Fixed lighting",
                "Added color",
                "Upscaled resolution",
            ]
        );
    }

    #[test]
    fn test_toggle() {
        let mut s = EnhancementSettings::default();
        s.toggle(Enhancement::Colorize);
        assert!(s.colorize);
        s.toggle(Enhancement::Colorize);
        assert!(!s.colorize);
    }

    #[test]
    fn test_serde_camel_case_and_missing_fields() {
        let json = serde_json::to_value(EnhancementSettings::default()).unwrap();
        assert_eq!(json["enhanceSharpness"], true);
        assert_eq!(json["upscaleResolution"], false);

        // Missing keys fall back to defaults
        let parsed: EnhancementSettings = serde_json::from_str(r#"{"colorize": true}"#).unwrap();
        assert!(parsed.colorize);
        assert!(parsed.enhance_sharpness);
    }

    #[test]
    fn test_keys_match_serialized_names() {
        let json = serde_json::to_value(EnhancementSettings::default()).unwrap();
        for e in Enhancement::ALL {
            assert!(json.get(e.key()).is_some(), "missing key {}", e.key());
        }
    }
}
