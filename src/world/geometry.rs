use crate::world::block::BlockType;
use crate::world::chunk::{CHUNK_SIZE, WORLD_HEIGHT};
use crate::world::chunk_coord::ChunkCoord;
use crate::world::core::World;
use bitflags::bitflags;
use glam::IVec3;

bitflags! {
    /// Faces of a voxel bordering an empty neighbor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FaceMask: u8 {
        const X_POS = 1 << 0;
        const X_NEG = 1 << 1;
        const Y_POS = 1 << 2;
        const Y_NEG = 1 << 3;
        const Z_POS = 1 << 4;
        const Z_NEG = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFace {
    pub position: IVec3,
    pub block: BlockType,
    pub faces: FaceMask,
}

/// The visible-face set of one chunk, the sole contract handed to the
/// external renderer. Faces are grouped by block type so a consumer can
/// batch per material.
#[derive(Debug, Default)]
pub struct ChunkGeometry {
    pub faces: Vec<BlockFace>,
}

impl ChunkGeometry {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Computes which faces of each non-empty block border an empty cell.
/// Neighbor lookups go through the store and so cross chunk boundaries
/// transparently. The bottom face at y = 0 is always visible: the world
/// floor has no neighbor below.
pub fn build_chunk_geometry(world: &World, coord: ChunkCoord) -> ChunkGeometry {
    let mut geometry = ChunkGeometry::default();
    let Some(chunk) = world.chunk(coord) else {
        return geometry;
    };
    let origin = coord.block_origin();

    for block in BlockType::SOLID {
        for lx in 0..CHUNK_SIZE {
            for y in 0..WORLD_HEIGHT {
                for lz in 0..CHUNK_SIZE {
                    if chunk.get(lx, y, lz) != block {
                        continue;
                    }
                    let wx = origin.x + lx;
                    let wz = origin.z + lz;

                    let mut faces = FaceMask::empty();
                    if world.get_block(wx + 1, y, wz).is_empty() {
                        faces |= FaceMask::X_POS;
                    }
                    if world.get_block(wx - 1, y, wz).is_empty() {
                        faces |= FaceMask::X_NEG;
                    }
                    if world.get_block(wx, y + 1, wz).is_empty() {
                        faces |= FaceMask::Y_POS;
                    }
                    if y == 0 || world.get_block(wx, y - 1, wz).is_empty() {
                        faces |= FaceMask::Y_NEG;
                    }
                    if world.get_block(wx, y, wz + 1).is_empty() {
                        faces |= FaceMask::Z_POS;
                    }
                    if world.get_block(wx, y, wz - 1).is_empty() {
                        faces |= FaceMask::Z_NEG;
                    }

                    if !faces.is_empty() {
                        geometry.faces.push(BlockFace {
                            position: IVec3::new(wx, y, wz),
                            block,
                            faces,
                        });
                    }
                }
            }
        }
    }

    geometry
}
