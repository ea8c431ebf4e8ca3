use crate::world::block::BlockType;
use crate::world::chunk::{Chunk, CHUNK_SIZE, WORLD_HEIGHT};
use crate::world::chunk_coord::ChunkCoord;
use glam::IVec3;
use log::debug;
use std::collections::HashMap;

/// Owns every loaded chunk and resolves world-coordinate block access.
///
/// Queries outside the vertical range or into an unloaded chunk read as
/// `Empty`; writes there are no-ops. Components over the infinite, lazily
/// generated world can therefore treat "unknown" and "air" identically.
#[derive(Debug, Default)]
pub struct World {
    chunks: HashMap<u64, Chunk>,
}

impl World {
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !(0..WORLD_HEIGHT).contains(&y) {
            return BlockType::Empty;
        }
        let coord = ChunkCoord::from_world(x, z);
        match self.chunks.get(&coord.key()) {
            Some(chunk) => chunk.get(x.rem_euclid(CHUNK_SIZE), y, z.rem_euclid(CHUNK_SIZE)),
            None => BlockType::Empty,
        }
    }

    pub fn block_at(&self, pos: IVec3) -> BlockType {
        self.get_block(pos.x, pos.y, pos.z)
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) {
        if !(0..WORLD_HEIGHT).contains(&y) {
            return;
        }
        let coord = ChunkCoord::from_world(x, z);
        let Some(chunk) = self.chunks.get_mut(&coord.key()) else {
            debug!("set_block into unloaded chunk ({}, {}) ignored", coord.x, coord.z);
            return;
        };
        let lx = x.rem_euclid(CHUNK_SIZE);
        let lz = z.rem_euclid(CHUNK_SIZE);
        chunk.set(lx, y, lz, block);

        // A boundary write changes the neighbor's face visibility too.
        if lx == 0 {
            self.mark_rebuild(coord.offset(-1, 0));
        }
        if lx == CHUNK_SIZE - 1 {
            self.mark_rebuild(coord.offset(1, 0));
        }
        if lz == 0 {
            self.mark_rebuild(coord.offset(0, -1));
        }
        if lz == CHUNK_SIZE - 1 {
            self.mark_rebuild(coord.offset(0, 1));
        }
    }

    fn mark_rebuild(&mut self, coord: ChunkCoord) {
        if let Some(chunk) = self.chunks.get_mut(&coord.key()) {
            chunk.needs_rebuild = true;
        }
    }

    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.coord.key(), chunk);
    }

    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(&coord.key())
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord.key())
    }

    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord.key())
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord.key())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> Vec<ChunkCoord> {
        self.chunks.values().map(|chunk| chunk.coord).collect()
    }

    pub fn dirty_coords(&self) -> Vec<ChunkCoord> {
        self.chunks
            .values()
            .filter(|chunk| chunk.needs_rebuild)
            .map(|chunk| chunk.coord)
            .collect()
    }

    /// Topmost non-empty y of the column, or `None` for an all-air column.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..WORLD_HEIGHT)
            .rev()
            .find(|&y| self.get_block(x, y, z) != BlockType::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_chunks(coords: &[(i32, i32)]) -> World {
        let mut world = World::new();
        for &(cx, cz) in coords {
            let mut chunk = Chunk::new(ChunkCoord::new(cx, cz));
            chunk.needs_rebuild = false;
            world.insert_chunk(chunk);
        }
        world
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut world = world_with_chunks(&[(0, 0), (-1, -1)]);
        world.set_block(5, 60, 5, BlockType::Stone);
        assert_eq!(world.get_block(5, 60, 5), BlockType::Stone);

        // Negative coordinates resolve into chunk (-1, -1).
        world.set_block(-1, 10, -16, BlockType::Log);
        assert_eq!(world.get_block(-1, 10, -16), BlockType::Log);
    }

    #[test]
    fn test_out_of_range_reads_empty() {
        let mut world = world_with_chunks(&[(0, 0)]);
        assert_eq!(world.get_block(5, -1, 5), BlockType::Empty);
        assert_eq!(world.get_block(5, WORLD_HEIGHT, 5), BlockType::Empty);
        // Unloaded chunk.
        assert_eq!(world.get_block(1000, 64, 1000), BlockType::Empty);

        // Writes there are no-ops, never panics.
        world.set_block(5, -1, 5, BlockType::Stone);
        world.set_block(5, WORLD_HEIGHT, 5, BlockType::Stone);
        world.set_block(1000, 64, 1000, BlockType::Stone);
        assert_eq!(world.get_block(1000, 64, 1000), BlockType::Empty);
    }

    #[test]
    fn test_boundary_write_marks_neighbor() {
        let mut world = world_with_chunks(&[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]);

        world.set_block(0, 50, 5, BlockType::Stone);
        assert!(world.chunk(ChunkCoord::new(0, 0)).unwrap().needs_rebuild);
        assert!(world.chunk(ChunkCoord::new(-1, 0)).unwrap().needs_rebuild);
        assert!(!world.chunk(ChunkCoord::new(1, 0)).unwrap().needs_rebuild);
        assert!(!world.chunk(ChunkCoord::new(0, -1)).unwrap().needs_rebuild);
        assert!(!world.chunk(ChunkCoord::new(0, 1)).unwrap().needs_rebuild);
    }

    #[test]
    fn test_interior_write_marks_own_chunk_only() {
        let mut world = world_with_chunks(&[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]);

        world.set_block(5, 50, 5, BlockType::Dirt);
        assert!(world.chunk(ChunkCoord::new(0, 0)).unwrap().needs_rebuild);
        for coord in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let neighbor = world.chunk(ChunkCoord::new(coord.0, coord.1)).unwrap();
            assert!(!neighbor.needs_rebuild, "neighbor {:?} marked dirty", coord);
        }
    }

    #[test]
    fn test_surface_height() {
        let mut world = world_with_chunks(&[(0, 0)]);
        assert_eq!(world.surface_height(3, 3), None);
        world.set_block(3, 20, 3, BlockType::Stone);
        world.set_block(3, 42, 3, BlockType::Grass);
        assert_eq!(world.surface_height(3, 3), Some(42));
    }
}
