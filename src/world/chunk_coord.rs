use crate::world::chunk::CHUNK_SIZE;
use glam::{IVec3, Vec3};

/// Horizontal chunk coordinate. Chunks span the full world height, so there
/// is no vertical component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given world block column. Floored division keeps
    /// negative coordinates in their enclosing chunk (x = -1 is chunk -1).
    pub fn from_world(x: i32, z: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            z: z.div_euclid(CHUNK_SIZE),
        }
    }

    pub fn from_position(pos: Vec3) -> Self {
        Self::from_world(pos.x.floor() as i32, pos.z.floor() as i32)
    }

    /// Packs the coordinate into a stable map key. Bijective: `from_key`
    /// recovers the exact coordinate.
    pub fn key(self) -> u64 {
        (((self.x as i64) << 32) | (self.z as u32 as i64)) as u64
    }

    pub fn from_key(key: u64) -> Self {
        Self {
            x: (key >> 32) as i32,
            z: key as u32 as i32,
        }
    }

    /// World position of the chunk's (0, 0, 0) block.
    pub fn block_origin(self) -> IVec3 {
        IVec3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}
