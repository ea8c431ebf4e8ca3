pub mod config;
pub mod engine;
pub mod player;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::chunksys::ChunkSysConfig;
pub use config::core::EngineConfig;
pub use config::gameplay::GameplayConfig;
pub use config::worldgen::WorldGenConfig;
pub use engine::{EventSink, RenderBackend, Simulation};
pub use player::{BreakEvent, BreakingController, InputState, Player, PlayerPhysics};
pub use utils::error::ConfigError;
pub use utils::ray::{Ray, RayHit};
pub use world::{
    build_chunk_geometry, BlockType, Chunk, ChunkCoord, ChunkGeometry, FaceMask, RenderHandle,
    StreamingManager, TerrainGenerator, World,
};
