use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Per-column probability of planting a tree.
    pub tree_density: f32,
    /// Trees are only planted on columns below this height.
    pub tree_line: i32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            tree_density: 0.005,
            tree_line: 90,
        }
    }
}
