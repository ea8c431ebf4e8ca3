pub mod chunksys;
pub mod core;
pub mod gameplay;
pub mod worldgen;

pub use chunksys::ChunkSysConfig;
pub use self::core::EngineConfig;
pub use gameplay::GameplayConfig;
pub use worldgen::WorldGenConfig;
