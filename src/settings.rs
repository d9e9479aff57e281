//! Presentation settings
//!
//! Quality presets only change how much visual feedback is simulated;
//! gameplay balance lives in `tuning`.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Live particle cap per emitter
    pub fn max_particles_per_emitter(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 1000,
        }
    }

    /// Concurrent emitter cap
    pub fn max_emitters(&self) -> usize {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 10,
            QualityPreset::High => 16,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (impact and death bursts)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on a malformed document
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Effective per-emitter particle cap
    pub fn max_particles_per_emitter(&self) -> usize {
        self.quality.max_particles_per_emitter()
    }

    /// Effective emitter cap (0 when particles are disabled)
    pub fn max_emitters(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_emitters()
        }
    }
}
