//! Data-driven game tuning
//!
//! Defaults reproduce the shipped game. The browser shell may override any
//! subset of fields from a JSON document embedded in the page.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Particles ===
    /// Particles to collect
    pub particle_count: usize,
    /// Particle radius (canvas pixels)
    pub particle_radius: f32,
    /// Maximum absolute starting velocity per axis (pixels/frame)
    pub max_start_speed: f32,
    /// Particle and confetti colors
    pub palette: Vec<String>,

    // === Pointer ===
    pub pointer_radius: f32,
    /// Distance below which the pointer eats a particle
    pub collect_distance: f32,

    // === Finale ===
    pub confetti_count: usize,
    pub title_text: String,
    pub subtitle_text: String,

    // === Messages ===
    /// How long a toast stays visible
    pub toast_ms: u32,
    pub start_message: String,
    pub halfway_message: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            particle_radius: PARTICLE_RADIUS,
            max_start_speed: MAX_START_SPEED,
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),

            pointer_radius: POINTER_RADIUS,
            collect_distance: COLLECT_DISTANCE,

            confetti_count: CONFETTI_COUNT,
            title_text: "Y V K".to_string(),
            subtitle_text: "Getting DIGITAL Soon!".to_string(),

            toast_ms: TOAST_MS,
            start_message: "COLLECT ALL PARTICLES".to_string(),
            halfway_message: "50% MORE TO GO".to_string(),
        }
    }
}

impl Tuning {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        if tuning.palette.is_empty() {
            log::warn!("Tuning palette is empty, using default palette");
            tuning.palette = Tuning::default().palette;
        }
        Ok(tuning)
    }

    /// Number of particles that triggers the halfway milestone
    pub fn halfway_threshold(&self) -> usize {
        self.particle_count.div_ceil(2)
    }

    /// Color for a palette index (wraps)
    pub fn color(&self, index: usize) -> &str {
        &self.palette[index % self.palette.len()]
    }

    /// DOM element id holding the JSON overrides
    pub const ELEMENT_ID: &'static str = "munch-tuning";

    /// Load overrides from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning JSON ({}), using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_game() {
        let t = Tuning::default();
        assert_eq!(t.particle_count, 12);
        assert_eq!(t.halfway_threshold(), 6);
        assert_eq!(t.palette.len(), 5);
        assert_eq!(t.color(0), "#ff595e");
        assert_eq!(t.color(5), "#ff595e");
        assert_eq!(t.toast_ms, 1300);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "particle_count": 20, "halfway_message": "HALF" }"#).unwrap();
        assert_eq!(t.particle_count, 20);
        assert_eq!(t.halfway_threshold(), 10);
        assert_eq!(t.halfway_message, "HALF");
        assert_eq!(t.start_message, "COLLECT ALL PARTICLES");
        assert_eq!(t.collect_distance, 14.0);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let t = Tuning::from_json(r#"{ "palette": [] }"#).unwrap();
        assert_eq!(t.palette.len(), 5);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ particle_count: ").is_err());
    }
}
