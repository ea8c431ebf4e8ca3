pub mod breaking;
pub mod input;
pub mod physics;

pub use breaking::{BreakEvent, BreakingController};
pub use input::InputState;
pub use physics::PlayerPhysics;

use crate::utils::ray::Ray;
use crate::world::{BlockType, World};
use glam::Vec3;

/// The first-person actor. `position` is the feet center; yaw and pitch are
/// in degrees, pitch clamped so the view never flips over the poles.
#[derive(Debug)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub selected_block: BlockType,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity_y: 0.0,
            on_ground: false,
            selected_block: BlockType::Stone,
        }
    }

    /// Spawns at the center of the given block column, standing on its
    /// surface, or at `fallback_y` if the column is all air.
    pub fn spawn(world: &World, spawn_x: i32, spawn_z: i32, fallback_y: f32) -> Self {
        let y = world
            .surface_height(spawn_x, spawn_z)
            .map(|surface| (surface + 1) as f32)
            .unwrap_or(fallback_y);
        Self::new(Vec3::new(
            spawn_x as f32 + 0.5,
            y,
            spawn_z as f32 + 0.5,
        ))
    }

    pub fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-89.0, 89.0);
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, physics::EYE_HEIGHT, 0.0)
    }

    pub fn view_direction(&self) -> Vec3 {
        let yr = self.yaw.to_radians();
        let pr = self.pitch.to_radians();
        Vec3::new(yr.sin() * pr.cos(), -pr.sin(), -yr.cos() * pr.cos())
    }

    pub fn view_ray(&self) -> Ray {
        Ray::new(self.eye_position(), self.view_direction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Chunk, ChunkCoord};
    use approx::assert_relative_eq;

    #[test]
    fn test_view_direction() {
        let player = Player::new(Vec3::ZERO);
        let dir = player.view_direction();
        assert_relative_eq!(dir.x, 0.0);
        assert_relative_eq!(dir.y, 0.0);
        assert_relative_eq!(dir.z, -1.0);

        let mut player = Player::new(Vec3::ZERO);
        player.rotate(0.0, 90.0 + 45.0);
        assert_eq!(player.pitch, 89.0);
        assert!(player.view_direction().y < -0.99);
    }

    #[test]
    fn test_spawn_on_surface() {
        let mut world = World::new();
        world.insert_chunk(Chunk::new(ChunkCoord::new(0, 0)));
        world.set_block(4, 30, 4, BlockType::Grass);

        let player = Player::spawn(&world, 4, 4, 80.0);
        assert_eq!(player.position, Vec3::new(4.5, 31.0, 4.5));

        // All-air column falls back to the provided height.
        let player = Player::spawn(&world, 9, 9, 80.0);
        assert_eq!(player.position.y, 80.0);
    }
}
