use crate::config::WorldGenConfig;
use crate::world::block::BlockType;
use crate::world::chunk::{Chunk, CHUNK_SIZE, WORLD_HEIGHT};
use crate::world::chunk_coord::ChunkCoord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

const BASE_HEIGHT: i32 = 64;
const MIN_HEIGHT: i32 = 10;
const MAX_HEIGHT: i32 = 100;
const DIRT_LAYERS: i32 = 3;

/// Deterministic chunk generation. Everything a chunk contains is a pure
/// function of its coordinate: the height field is closed-form and the tree
/// RNG is reseeded per chunk, so regenerating after an eviction reproduces
/// the exact same blocks.
pub struct TerrainGenerator {
    config: WorldGenConfig,
}

impl TerrainGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        Self { config }
    }

    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        let mut rng = Self::chunk_rng(coord);

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let wx = coord.x * CHUNK_SIZE + lx;
                let wz = coord.z * CHUNK_SIZE + lz;
                let height = Self::column_height(wx, wz);

                for y in 0..height {
                    let block = if y == height - 1 {
                        BlockType::Grass
                    } else if y >= height - 1 - DIRT_LAYERS {
                        BlockType::Dirt
                    } else {
                        BlockType::Stone
                    };
                    chunk.set(lx, y, lz, block);
                }

                // The draw is taken for every column so tree placement does
                // not depend on which columns are below the tree line.
                let draw = rng.gen::<f32>();
                if draw < self.config.tree_density && height < self.config.tree_line {
                    self.plant_tree(&mut chunk, &mut rng, lx, lz, height);
                }
            }
        }

        chunk
    }

    /// Column surface height: a bounded sum of sinusoids over world x/z,
    /// clamped to [10, 100].
    pub fn column_height(wx: i32, wz: i32) -> i32 {
        let swell = (wx as f64 * 0.02).sin() * 8.0
            + (wz as f64 * 0.02).cos() * 8.0
            + ((wx + wz) as f64 * 0.05).sin() * 4.0;
        (BASE_HEIGHT + swell as i32).clamp(MIN_HEIGHT, MAX_HEIGHT)
    }

    fn chunk_rng(coord: ChunkCoord) -> ChaCha12Rng {
        let seed = (coord.x as i64)
            .wrapping_mul(341_873_128_712)
            .wrapping_add((coord.z as i64).wrapping_mul(132_897_987_541));
        ChaCha12Rng::seed_from_u64(seed as u64)
    }

    /// Trunk of 4-5 logs starting at the surface, topped by a 5x5 canopy over
    /// four layers with the extreme corners cut. Canopy blocks only fill
    /// empty cells and are clipped at the chunk edge: letting them span
    /// neighbors would tie a chunk's content to neighbor RNG and break
    /// regeneration determinism.
    fn plant_tree(&self, chunk: &mut Chunk, rng: &mut ChaCha12Rng, lx: i32, lz: i32, height: i32) {
        let trunk_height = 4 + rng.gen_range(0..2);

        for ty in 0..trunk_height {
            let by = height + ty;
            if by < WORLD_HEIGHT {
                chunk.set(lx, by, lz, BlockType::Log);
            }
        }

        for cx in -2i32..=2 {
            for cz in -2i32..=2 {
                for cy in (trunk_height - 2)..=(trunk_height + 1) {
                    if cx.abs() == 2 && cz.abs() == 2 {
                        continue;
                    }
                    let bx = lx + cx;
                    let bz = lz + cz;
                    let by = height + cy;
                    if (0..CHUNK_SIZE).contains(&bx)
                        && (0..CHUNK_SIZE).contains(&bz)
                        && (0..WORLD_HEIGHT).contains(&by)
                        && chunk.get(bx, by, bz) == BlockType::Empty
                    {
                        chunk.set(bx, by, bz, BlockType::Leaves);
                    }
                }
            }
        }
    }
}
