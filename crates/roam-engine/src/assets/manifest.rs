use serde::{Deserialize, Serialize};

use crate::core::controller::MotionTuning;

/// Scene description: the interactables a walkthrough declares, plus
/// optional overrides for the play area and spawn point.
/// Loaded from a JSON file at runtime. The host reads the same file to know
/// which model and overlay belong to each interactable index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Interactables in declaration order. Index = interactable id.
    pub interactables: Vec<InteractableDescriptor>,
    /// Overrides the configured play area.
    #[serde(default)]
    pub bounds: Option<BoundsDescriptor>,
    /// Overrides the configured spawn eye position.
    #[serde(default)]
    pub spawn: Option<[f32; 3]>,
    /// Overrides the configured movement constants.
    #[serde(default)]
    pub tuning: Option<MotionTuning>,
}

/// Describes a single interactable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractableDescriptor {
    /// Unique human-readable name (e.g., "statue").
    pub label: String,
    /// Model path for the host loader. Not read by the core.
    #[serde(default)]
    pub model: Option<String>,
    /// Distance below which the player counts as near.
    #[serde(default)]
    pub trigger_radius: f32,
    /// Whether the model's bounding box blocks the player (default: true).
    #[serde(default = "default_collides")]
    pub collides: bool,
    /// Host overlay key. Interactables without one only show a prompt.
    #[serde(default)]
    pub overlay: Option<String>,
}

/// Play area corners on the XZ plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundsDescriptor {
    /// Minimum (x, z).
    pub min: [f32; 2],
    /// Maximum (x, z).
    pub max: [f32; 2],
}

fn default_collides() -> bool {
    true
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "interactables": [
                { "label": "statue" }
            ]
        }"#;
        let manifest = SceneManifest::from_json(json).unwrap();
        assert_eq!(manifest.interactables.len(), 1);
        let statue = &manifest.interactables[0];
        assert_eq!(statue.trigger_radius, 0.0);
        assert!(statue.collides);
        assert!(statue.overlay.is_none());
        assert!(manifest.bounds.is_none());
        assert!(manifest.tuning.is_none());
    }

    #[test]
    fn parse_manifest_with_overrides() {
        let json = r#"{
            "spawn": [0.0, 1.8, 10.0],
            "bounds": { "min": [-9.9, -9.9], "max": [9.9, 9.9] },
            "tuning": { "max_speed": 0.15 },
            "interactables": [
                { "label": "statue", "model": "assets/statue.glb", "trigger_radius": 10.0, "overlay": "bits-and-bytes" },
                { "label": "rug", "trigger_radius": 1.2, "collides": false }
            ]
        }"#;
        let manifest = SceneManifest::from_json(json).unwrap();
        assert_eq!(manifest.spawn, Some([0.0, 1.8, 10.0]));
        assert_eq!(manifest.bounds.unwrap().max, [9.9, 9.9]);
        assert_eq!(manifest.tuning.unwrap().max_speed, 0.15);
        assert_eq!(manifest.interactables[0].overlay.as_deref(), Some("bits-and-bytes"));
        assert!(!manifest.interactables[1].collides);
    }

    #[test]
    fn missing_interactables_is_an_error() {
        assert!(SceneManifest::from_json(r#"{ "spawn": [0, 0, 0] }"#).is_err());
    }
}
