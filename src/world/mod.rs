pub mod block;
pub mod chunk;
pub mod chunk_coord;
pub mod core;
pub mod generator;
pub mod geometry;
pub mod streaming;

pub use block::{BlockProperties, BlockType};
pub use chunk::{Chunk, RenderHandle, CHUNK_SIZE, WORLD_HEIGHT};
pub use chunk_coord::ChunkCoord;
pub use self::core::World;
pub use generator::TerrainGenerator;
pub use geometry::{build_chunk_geometry, BlockFace, ChunkGeometry, FaceMask};
pub use streaming::StreamingManager;
