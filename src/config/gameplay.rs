use serde::{Deserialize, Serialize};

/// Movement tuning, all in per-tick units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub walk_speed: f32,
    pub sneak_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Maximum downward speed.
    pub terminal_velocity: f32,
    pub reach_distance: f32,
    /// Degrees of rotation per unit of pointer motion.
    pub mouse_sensitivity: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.07,
            sneak_speed: 0.04,
            jump_velocity: 0.15,
            gravity: 0.008,
            terminal_velocity: 0.5,
            reach_distance: 5.0,
            mouse_sensitivity: 0.15,
        }
    }
}
