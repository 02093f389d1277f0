//! Editor tuning knobs.
//!
//! Every field has a default, so hosts only send what they override:
//!
//! ```json
//! { "snapToGuides": true, "historyCapacity": 100 }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Pointer travel (screen px) before a press becomes a drag.
    pub drag_threshold: f64,
    /// Max distance (canvas units) at which a guideline appears.
    pub snap_tolerance: f64,
    /// Floor for width/height during resize gestures.
    pub min_size: f64,
    pub history_capacity: usize,
    /// Shift dragged elements onto matching guidelines.
    pub snap_to_guides: bool,
    /// Keep dropped elements inside the artboard.
    pub clamp_to_artboard: bool,
    /// Longest side of a freshly loaded image.
    pub image_max_size: f64,
    /// Grip radius in screen px.
    pub handle_radius: f64,
    /// Distance of the rotate grip above the top edge, in screen px.
    pub rotate_handle_offset: f64,
    /// Rotation step (degrees) while shift is held.
    pub rotation_snap: f64,
    pub duplicate_offset: f64,
    pub nudge_step: f64,
    pub nudge_step_large: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            snap_tolerance: 5.0,
            min_size: ab_core::geometry::DEFAULT_MIN_SIZE,
            history_capacity: 50,
            snap_to_guides: false,
            clamp_to_artboard: false,
            image_max_size: 300.0,
            handle_radius: 8.0,
            rotate_handle_offset: 30.0,
            rotation_snap: 15.0,
            duplicate_offset: 20.0,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
