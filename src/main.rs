use anyhow::Result;
use blokkverk::engine::{EventSink, RenderBackend, Simulation};
use blokkverk::world::{BlockType, ChunkCoord, ChunkGeometry, RenderHandle};
use blokkverk::{EngineConfig, InputState};
use glam::IVec3;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::Path;

const CONFIG_PATH: &str = "blokkverk.toml";
const DEMO_TICKS: u32 = 600;

/// Stand-in for the audio/particle collaborators: just narrates the events.
struct LogEvents;

impl EventSink for LogEvents {
    fn on_break_complete(&mut self, position: IVec3, block: BlockType) {
        info!("broke {} at {:?}", block.name(), position);
    }

    fn on_place(&mut self, position: IVec3, block: BlockType) {
        info!("placed {} at {:?}", block.name(), position);
    }
}

/// Stand-in for the renderer: hands out handles and keeps counters.
#[derive(Default)]
struct CountingRenderer {
    next_handle: u64,
    builds: u64,
    faces: usize,
    evictions: u64,
}

impl RenderBackend for CountingRenderer {
    fn chunk_built(&mut self, _coord: ChunkCoord, geometry: &ChunkGeometry) -> RenderHandle {
        self.next_handle += 1;
        self.builds += 1;
        self.faces += geometry.faces.len();
        RenderHandle(self.next_handle)
    }

    fn chunk_evicted(&mut self, _coord: ChunkCoord, _handle: RenderHandle) {
        self.evictions += 1;
    }
}

/// Headless demo: walk the actor through the world for a while, breaking
/// whatever it ends up looking at, and log what the simulation does.
fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config_path = Path::new(CONFIG_PATH);
    let config = if config_path.exists() {
        info!("loading config from {}", CONFIG_PATH);
        EngineConfig::load(config_path)?
    } else {
        EngineConfig::default()
    };
    let sensitivity = config.gameplay.mouse_sensitivity;

    let mut sim = Simulation::new(config);
    let mut events = LogEvents;
    let mut renderer = CountingRenderer::default();

    let mut input = InputState {
        forward: true,
        ..InputState::default()
    };

    for tick in 0..DEMO_TICKS {
        input.jump = tick % 150 == 0;
        // Look slightly downward and keep turning; drop one block along the
        // way, then hold the breaking input for the last stretch.
        input.place = tick == 400;
        input.breaking = tick >= 450;
        sim.rotate_view(2.0 * sensitivity, if tick < 100 { 0.2 } else { 0.0 });

        sim.tick(&input, &mut events, &mut renderer);
        input.clear_edges();

        if tick % 100 == 0 {
            let (position, yaw, pitch) = sim.pose();
            info!(
                "tick {:3}: pos ({:6.1}, {:5.1}, {:6.1}) yaw {:6.1} pitch {:5.1}, {} chunks",
                tick,
                position.x,
                position.y,
                position.z,
                yaw,
                pitch,
                sim.world.len()
            );
        }
    }

    info!(
        "done: {} chunk builds ({} faces total), {} evictions, {} chunks resident",
        renderer.builds,
        renderer.faces,
        renderer.evictions,
        sim.world.len()
    );
    Ok(())
}
