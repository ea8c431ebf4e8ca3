use crate::config::ChunkSysConfig;
use crate::engine::RenderBackend;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::core::World;
use crate::world::generator::TerrainGenerator;
use log::debug;

/// Keeps the square neighborhood of chunks around the actor resident and
/// evicts everything beyond it. The eviction radius sits strictly outside
/// the load radius so a chunk on the boundary is never loaded and evicted
/// on alternating ticks.
pub struct StreamingManager {
    load_distance: i32,
    unload_margin: i32,
}

impl StreamingManager {
    pub fn new(config: &ChunkSysConfig) -> Self {
        Self {
            load_distance: config.load_distance,
            unload_margin: config.unload_margin,
        }
    }

    pub fn update(
        &self,
        world: &mut World,
        generator: &TerrainGenerator,
        center: ChunkCoord,
        renderer: &mut dyn RenderBackend,
    ) {
        self.ensure_loaded(world, generator, center);
        self.evict_distant(world, center, renderer);
    }

    /// Generates every missing chunk within the load radius. Also used for
    /// the initial preload, before any renderer exists.
    pub fn ensure_loaded(&self, world: &mut World, generator: &TerrainGenerator, center: ChunkCoord) {
        for cx in (center.x - self.load_distance)..=(center.x + self.load_distance) {
            for cz in (center.z - self.load_distance)..=(center.z + self.load_distance) {
                let coord = ChunkCoord::new(cx, cz);
                if !world.contains(coord) {
                    world.insert_chunk(generator.generate_chunk(coord));
                }
            }
        }
    }

    /// Removes chunks beyond the unload radius, handing each render handle
    /// back to its owner before the chunk record is dropped.
    pub fn evict_distant(
        &self,
        world: &mut World,
        center: ChunkCoord,
        renderer: &mut dyn RenderBackend,
    ) {
        let limit = self.load_distance + self.unload_margin;
        let distant: Vec<ChunkCoord> = world
            .coords()
            .into_iter()
            .filter(|coord| coord.chebyshev_distance(center) > limit)
            .collect();

        for coord in distant {
            if let Some(chunk) = world.remove_chunk(coord) {
                if let Some(handle) = chunk.render_handle {
                    renderer.chunk_evicted(coord, handle);
                }
                debug!("evicted chunk ({}, {})", coord.x, coord.z);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldGenConfig;
    use crate::world::chunk::RenderHandle;
    use crate::world::geometry::ChunkGeometry;

    #[derive(Default)]
    struct CountingRenderer {
        released: Vec<ChunkCoord>,
    }

    impl RenderBackend for CountingRenderer {
        fn chunk_built(&mut self, _coord: ChunkCoord, _geometry: &ChunkGeometry) -> RenderHandle {
            RenderHandle(0)
        }

        fn chunk_evicted(&mut self, coord: ChunkCoord, _handle: RenderHandle) {
            self.released.push(coord);
        }
    }

    fn setup() -> (StreamingManager, World, TerrainGenerator) {
        let manager = StreamingManager::new(&ChunkSysConfig::default());
        (
            manager,
            World::new(),
            TerrainGenerator::new(WorldGenConfig::default()),
        )
    }

    #[test]
    fn test_load_radius_fully_resident() {
        let (manager, mut world, generator) = setup();
        let center = ChunkCoord::new(0, 0);
        manager.ensure_loaded(&mut world, &generator, center);

        assert_eq!(world.len(), 81);
        for cx in -4..=4 {
            for cz in -4..=4 {
                assert!(world.contains(ChunkCoord::new(cx, cz)));
            }
        }
    }

    #[test]
    fn test_update_respects_both_radii() {
        let (manager, mut world, generator) = setup();
        let mut renderer = CountingRenderer::default();

        manager.ensure_loaded(&mut world, &generator, ChunkCoord::new(0, 0));
        let center = ChunkCoord::new(20, 0);
        manager.update(&mut world, &generator, center, &mut renderer);

        for coord in world.coords() {
            assert!(coord.chebyshev_distance(center) <= 6);
        }
        for cx in 16..=24 {
            for cz in -4..=4 {
                assert!(world.contains(ChunkCoord::new(cx, cz)));
            }
        }
    }

    #[test]
    fn test_boundary_chunk_survives_eviction() {
        let (manager, mut world, generator) = setup();
        let mut renderer = CountingRenderer::default();
        let center = ChunkCoord::new(0, 0);

        manager.ensure_loaded(&mut world, &generator, center);
        // A chunk just outside the load radius but inside the unload radius
        // stays put.
        world.insert_chunk(generator.generate_chunk(ChunkCoord::new(6, 0)));
        manager.update(&mut world, &generator, center, &mut renderer);
        assert!(world.contains(ChunkCoord::new(6, 0)));
        assert!(renderer.released.is_empty());
    }

    #[test]
    fn test_eviction_releases_render_handle() {
        let (manager, mut world, generator) = setup();
        let mut renderer = CountingRenderer::default();
        let far = ChunkCoord::new(30, 30);

        world.insert_chunk(generator.generate_chunk(far));
        world.chunk_mut(far).unwrap().render_handle = Some(RenderHandle(7));

        manager.evict_distant(&mut world, ChunkCoord::new(0, 0), &mut renderer);
        assert!(!world.contains(far));
        assert_eq!(renderer.released, vec![far]);
    }
}
