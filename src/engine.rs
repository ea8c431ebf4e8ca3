use crate::config::EngineConfig;
use crate::player::breaking::BreakingController;
use crate::player::input::InputState;
use crate::player::physics::{self, PlayerPhysics};
use crate::player::Player;
use crate::utils::ray;
use crate::world::{
    build_chunk_geometry, BlockType, ChunkCoord, ChunkGeometry, RenderHandle, StreamingManager,
    TerrainGenerator, World, WORLD_HEIGHT,
};
use glam::{IVec3, Vec3};
use log::{debug, info};

/// Receives block mutation events. Fire-and-forget: the simulation never
/// waits on or reads back from the sink.
pub trait EventSink {
    fn on_break_complete(&mut self, position: IVec3, block: BlockType);
    fn on_place(&mut self, position: IVec3, block: BlockType);
}

/// Owns all GPU-side chunk resources. The simulation references them only
/// through the opaque handles this trait returns.
pub trait RenderBackend {
    /// Called with the fresh visible-face set every time a chunk is built or
    /// rebuilt. Any resource previously held for this chunk is superseded.
    fn chunk_built(&mut self, coord: ChunkCoord, geometry: &ChunkGeometry) -> RenderHandle;

    /// Called exactly once per eviction; the handle is dead afterwards.
    fn chunk_evicted(&mut self, coord: ChunkCoord, handle: RenderHandle);
}

/// Collaborator stubs for headless use.
pub struct NullEvents;

impl EventSink for NullEvents {
    fn on_break_complete(&mut self, _position: IVec3, _block: BlockType) {}
    fn on_place(&mut self, _position: IVec3, _block: BlockType) {}
}

pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn chunk_built(&mut self, _coord: ChunkCoord, _geometry: &ChunkGeometry) -> RenderHandle {
        RenderHandle(0)
    }

    fn chunk_evicted(&mut self, _coord: ChunkCoord, _handle: RenderHandle) {}
}

/// The whole simulation: world state, the actor, and the per-tick pipeline.
pub struct Simulation {
    pub world: World,
    pub player: Player,
    generator: TerrainGenerator,
    streaming: StreamingManager,
    physics: PlayerPhysics,
    breaking: BreakingController,
    config: EngineConfig,
}

impl Simulation {
    /// Preloads the chunks around the spawn column and drops the actor on
    /// its surface.
    pub fn new(config: EngineConfig) -> Self {
        let generator = TerrainGenerator::new(config.worldgen.clone());
        let streaming = StreamingManager::new(&config.chunksys);
        let physics = PlayerPhysics::new(&config.gameplay, config.spawn_x, config.spawn_z);

        let mut world = World::new();
        let spawn_chunk = ChunkCoord::from_world(config.spawn_x, config.spawn_z);
        streaming.ensure_loaded(&mut world, &generator, spawn_chunk);
        info!("generated {} chunks around spawn", world.len());

        let player = Player::spawn(&world, config.spawn_x, config.spawn_z, config.fallback_spawn_y);
        info!(
            "player spawned at ({:.1}, {:.1}, {:.1})",
            player.position.x, player.position.y, player.position.z
        );

        Self {
            world,
            player,
            generator,
            streaming,
            physics,
            breaking: BreakingController::new(),
            config,
        }
    }

    /// One simulation step, in fixed order: actor physics, chunk streaming,
    /// breaking, placement, then geometry rebuild of whatever went dirty.
    pub fn tick(
        &mut self,
        input: &InputState,
        events: &mut dyn EventSink,
        renderer: &mut dyn RenderBackend,
    ) {
        self.physics.update(&mut self.player, &self.world, input);

        let center = ChunkCoord::from_position(self.player.position);
        self.streaming
            .update(&mut self.world, &self.generator, center, renderer);

        let target = ray::cast(
            &self.world,
            &self.player.view_ray(),
            self.config.gameplay.reach_distance,
        )
        .map(|hit| hit.position);
        if let Some(event) = self.breaking.update(&mut self.world, input.breaking, target) {
            events.on_break_complete(event.position, event.block);
        }

        if input.place {
            self.place_selected(events);
        }

        self.rebuild_dirty(renderer);
    }

    /// Places the selected block in the empty cell just before the targeted
    /// block, unless the cell would embed the actor.
    fn place_selected(&mut self, events: &mut dyn EventSink) {
        let (hit, cell) = ray::cast_with_placement(
            &self.world,
            &self.player.view_ray(),
            self.config.gameplay.reach_distance,
        );
        if hit.is_none() {
            return;
        }
        let Some(cell) = cell else {
            return;
        };
        if !(0..WORLD_HEIGHT).contains(&cell.y) {
            return;
        }
        if physics::aabb_overlaps_block(self.player.position, cell) {
            debug!("placement at {:?} refused, cell overlaps the actor", cell);
            return;
        }

        let block = self.player.selected_block;
        self.world.set_block(cell.x, cell.y, cell.z, block);
        events.on_place(cell, block);
    }

    fn rebuild_dirty(&mut self, renderer: &mut dyn RenderBackend) {
        for coord in self.world.dirty_coords() {
            let geometry = build_chunk_geometry(&self.world, coord);
            let handle = renderer.chunk_built(coord, &geometry);
            if let Some(chunk) = self.world.chunk_mut(coord) {
                chunk.render_handle = Some(handle);
                chunk.needs_rebuild = false;
            }
        }
    }

    pub fn rotate_view(&mut self, dyaw: f32, dpitch: f32) {
        self.player.rotate(dyaw, dpitch);
    }

    /// Camera pose for the renderer: position, yaw, pitch.
    pub fn pose(&self) -> (Vec3, f32, f32) {
        (self.player.position, self.player.yaw, self.player.pitch)
    }

    pub fn eye_position(&self) -> Vec3 {
        self.player.eye_position()
    }

    /// Target and normalized break progress for the overlay collaborator.
    pub fn break_progress(&self) -> Option<(IVec3, f32)> {
        self.breaking.progress_fraction(&self.world)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkSysConfig;
    use crate::world::TerrainGenerator as Terrain;

    #[derive(Default)]
    struct RecordingEvents {
        breaks: Vec<(IVec3, BlockType)>,
        places: Vec<(IVec3, BlockType)>,
    }

    impl EventSink for RecordingEvents {
        fn on_break_complete(&mut self, position: IVec3, block: BlockType) {
            self.breaks.push((position, block));
        }

        fn on_place(&mut self, position: IVec3, block: BlockType) {
            self.places.push((position, block));
        }
    }

    fn test_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.chunksys = ChunkSysConfig {
            load_distance: 1,
            unload_margin: 2,
        };
        config
    }

    #[test]
    fn test_spawn_rests_on_surface() {
        let mut sim = Simulation::new(test_config());
        let spawn_y = sim.player.position.y;
        assert_eq!(sim.player.position.x, 32.5);
        assert_eq!(sim.player.position.z, 32.5);

        sim.tick(&InputState::default(), &mut NullEvents, &mut NullRenderer);
        assert_eq!(sim.player.position.y, spawn_y);
        assert!(sim.player.on_ground);
    }

    #[test]
    fn test_tick_clears_all_dirty_chunks() {
        let mut sim = Simulation::new(test_config());
        assert!(!sim.world.dirty_coords().is_empty());
        sim.tick(&InputState::default(), &mut NullEvents, &mut NullRenderer);
        assert!(sim.world.dirty_coords().is_empty());
        // Every resident chunk got a handle from the backend.
        for coord in sim.world.coords() {
            assert!(sim.world.chunk(coord).unwrap().render_handle.is_some());
        }
    }

    #[test]
    fn test_breaking_the_block_underfoot() {
        let mut sim = Simulation::new(test_config());
        let mut events = RecordingEvents::default();
        sim.rotate_view(0.0, 89.0);
        sim.tick(&InputState::default(), &mut events, &mut NullRenderer);
        assert!(sim.player.on_ground);

        let below = IVec3::new(32, sim.player.position.y as i32 - 1, 32);
        let block = sim.world.block_at(below);
        assert_ne!(block, BlockType::Empty);
        let threshold = block.break_ticks() as u32;

        let input = InputState {
            breaking: true,
            ..InputState::default()
        };
        let mut break_tick = None;
        for tick in 1..=threshold + 10 {
            sim.tick(&input, &mut events, &mut NullRenderer);
            if !events.breaks.is_empty() {
                break_tick = Some(tick);
                break;
            }
        }
        // One unit of progress per held tick, one event on the final tick.
        assert_eq!(break_tick, Some(threshold));
        assert_eq!(events.breaks, vec![(below, block)]);
        assert_eq!(sim.world.block_at(below), BlockType::Empty);
    }

    #[test]
    fn test_placement_refused_into_actor() {
        let mut sim = Simulation::new(test_config());
        let mut events = RecordingEvents::default();
        sim.rotate_view(0.0, 89.0);
        sim.tick(&InputState::default(), &mut events, &mut NullRenderer);

        // Looking straight down, the cell before the hit is the actor's own
        // feet cell.
        let input = InputState {
            place: true,
            ..InputState::default()
        };
        sim.tick(&input, &mut events, &mut NullRenderer);
        assert!(events.places.is_empty());
    }

    #[test]
    fn test_placement_at_eye_level() {
        let mut sim = Simulation::new(test_config());
        let mut events = RecordingEvents::default();
        sim.tick(&InputState::default(), &mut events, &mut NullRenderer);

        // A clear shaft along -z at eye height, with a stone backstop.
        let eye = sim.eye_position();
        let (ex, ey, ez) = (
            eye.x.floor() as i32,
            eye.y.floor() as i32,
            eye.z.floor() as i32,
        );
        for z in (ez - 3)..=ez {
            sim.world.set_block(ex, ey, z, BlockType::Empty);
        }
        sim.world.set_block(ex, ey, ez - 3, BlockType::Stone);

        let input = InputState {
            place: true,
            ..InputState::default()
        };
        sim.tick(&input, &mut events, &mut NullRenderer);

        assert_eq!(events.places.len(), 1);
        let (position, block) = events.places[0];
        assert_eq!(position, IVec3::new(ex, ey, ez - 2));
        assert_eq!(block, BlockType::Stone);
        assert_eq!(sim.world.block_at(position), BlockType::Stone);
    }

    #[test]
    fn test_streaming_follows_the_actor() {
        let mut sim = Simulation::new(test_config());
        sim.tick(&InputState::default(), &mut NullEvents, &mut NullRenderer);

        // Teleport far away; the next tick must rebuild residency around the
        // new position and drop the old neighborhood.
        sim.player.position = Vec3::new(500.5, 120.0, 500.5);
        sim.tick(&InputState::default(), &mut NullEvents, &mut NullRenderer);

        let center = ChunkCoord::from_world(500, 500);
        for cx in (center.x - 1)..=(center.x + 1) {
            for cz in (center.z - 1)..=(center.z + 1) {
                assert!(sim.world.contains(ChunkCoord::new(cx, cz)));
            }
        }
        for coord in sim.world.coords() {
            assert!(coord.chebyshev_distance(center) <= 3);
        }
    }

    #[test]
    fn test_regenerated_chunk_matches_after_eviction() {
        let mut sim = Simulation::new(test_config());
        let coord = ChunkCoord::new(2, 2);
        let before: Vec<BlockType> = sim.world.chunk(coord).unwrap().blocks().to_vec();

        sim.player.position = Vec3::new(500.5, 120.0, 500.5);
        sim.tick(&InputState::default(), &mut NullEvents, &mut NullRenderer);
        assert!(!sim.world.contains(coord));

        let generator = Terrain::new(sim.config().worldgen.clone());
        let regenerated = generator.generate_chunk(coord);
        assert_eq!(regenerated.blocks(), &before[..]);
    }
}
