use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSysConfig {
    /// Chebyshev radius, in chunks, that must stay resident around the actor.
    pub load_distance: i32,
    /// Extra chunks kept beyond the load radius before eviction. Must be at
    /// least 1 so a chunk is never evicted while still inside the load radius.
    pub unload_margin: i32,
}

impl Default for ChunkSysConfig {
    fn default() -> Self {
        Self {
            load_distance: 4,
            unload_margin: 2,
        }
    }
}
