use crate::config::GameplayConfig;
use crate::player::input::InputState;
use crate::player::Player;
use crate::world::{BlockType, World};
use glam::{IVec3, Vec3};
use log::info;

pub const HALF_WIDTH: f32 = 0.3;
pub const FULL_HEIGHT: f32 = 1.8;
pub const EYE_HEIGHT: f32 = 1.62;

/// Gap kept between the hitbox and the surface it is pressed against.
const SKIN: f32 = 0.001;
const VOID_Y: f32 = -20.0;
const VOID_FALLBACK_Y: f32 = 10.0;

/// Axis-separated AABB-vs-voxel movement. Horizontal axes resolve
/// independently with a wall slide, vertical motion snaps to floors and
/// ceilings, and a fall past the void threshold returns the actor to the
/// spawn column.
pub struct PlayerPhysics {
    walk_speed: f32,
    sneak_speed: f32,
    jump_velocity: f32,
    gravity: f32,
    terminal_velocity: f32,
    spawn_x: i32,
    spawn_z: i32,
}

impl PlayerPhysics {
    pub fn new(gameplay: &GameplayConfig, spawn_x: i32, spawn_z: i32) -> Self {
        Self {
            walk_speed: gameplay.walk_speed,
            sneak_speed: gameplay.sneak_speed,
            jump_velocity: gameplay.jump_velocity,
            gravity: gameplay.gravity,
            terminal_velocity: gameplay.terminal_velocity,
            spawn_x,
            spawn_z,
        }
    }

    pub fn update(&self, player: &mut Player, world: &World, input: &InputState) {
        let speed = if input.sneak {
            self.sneak_speed
        } else {
            self.walk_speed
        };
        let (sin, cos) = player.yaw.to_radians().sin_cos();

        let mut dx = 0.0;
        let mut dz = 0.0;
        if input.forward {
            dx += sin;
            dz -= cos;
        }
        if input.backward {
            dx -= sin;
            dz += cos;
        }
        if input.left {
            dx -= cos;
            dz -= sin;
        }
        if input.right {
            dx += cos;
            dz += sin;
        }

        let len = (dx * dx + dz * dz).sqrt();
        if len > 0.0 {
            dx = dx / len * speed;
            dz = dz / len * speed;
        }

        // One axis at a time: a blocked axis clamps flush against the wall
        // while the other keeps sliding.
        if dx != 0.0 {
            let new_x = player.position.x + dx;
            if collides_at(world, new_x, player.position.y, player.position.z) {
                player.position.x = slide_x(player.position.x, dx);
            } else {
                player.position.x = new_x;
            }
        }
        if dz != 0.0 {
            let new_z = player.position.z + dz;
            if collides_at(world, player.position.x, player.position.y, new_z) {
                player.position.z = slide_z(player.position.z, dz);
            } else {
                player.position.z = new_z;
            }
        }

        if input.jump && player.on_ground {
            player.velocity_y = self.jump_velocity;
            player.on_ground = false;
        }

        player.velocity_y -= self.gravity;
        if player.velocity_y < -self.terminal_velocity {
            player.velocity_y = -self.terminal_velocity;
        }

        let new_y = player.position.y + player.velocity_y;
        if player.velocity_y <= 0.0 {
            let floor = find_floor(
                world,
                player.position.x,
                player.position.z,
                player.position.y,
                new_y,
            );
            if floor > new_y {
                player.position.y = floor;
                player.velocity_y = 0.0;
                player.on_ground = true;
            } else {
                player.position.y = new_y;
                player.on_ground = false;
            }
        } else if collides_at(world, player.position.x, new_y, player.position.z) {
            player.velocity_y = 0.0;
            player.position.y = snap_ceiling(new_y);
        } else {
            player.position.y = new_y;
            player.on_ground = false;
        }

        if player.position.y < VOID_Y {
            self.respawn(player, world);
        }
    }

    fn respawn(&self, player: &mut Player, world: &World) {
        player.position.x = self.spawn_x as f32 + 0.5;
        player.position.z = self.spawn_z as f32 + 0.5;
        player.position.y = world
            .surface_height(self.spawn_x, self.spawn_z)
            .map(|surface| (surface + 1) as f32)
            .unwrap_or(VOID_FALLBACK_Y);
        player.velocity_y = 0.0;
        info!(
            "void fall, returned to spawn column ({}, {})",
            self.spawn_x, self.spawn_z
        );
    }
}

/// True if the actor hitbox at the given feet position intersects any
/// non-empty voxel. Voxel cells are half-open, so the hitbox top is pulled
/// in by the skin to avoid counting a cell it only touches.
pub fn collides_at(world: &World, px: f32, py: f32, pz: f32) -> bool {
    let min_bx = (px - HALF_WIDTH).floor() as i32;
    let max_bx = (px + HALF_WIDTH).floor() as i32;
    let min_by = py.floor() as i32;
    let max_by = (py + FULL_HEIGHT - SKIN).floor() as i32;
    let min_bz = (pz - HALF_WIDTH).floor() as i32;
    let max_bz = (pz + HALF_WIDTH).floor() as i32;

    for bx in min_bx..=max_bx {
        for by in min_by..=max_by {
            for bz in min_bz..=max_bz {
                if world.get_block(bx, by, bz) != BlockType::Empty {
                    return true;
                }
            }
        }
    }
    false
}

/// Overlap test between the actor hitbox and a single voxel cell, used to
/// refuse placements that would embed the actor.
pub fn aabb_overlaps_block(position: Vec3, block: IVec3) -> bool {
    let bx = block.x as f32;
    let by = block.y as f32;
    let bz = block.z as f32;
    position.x - HALF_WIDTH < bx + 1.0
        && position.x + HALF_WIDTH > bx
        && position.y < by + 1.0
        && position.y + FULL_HEIGHT > by
        && position.z - HALF_WIDTH < bz + 1.0
        && position.z + HALF_WIDTH > bz
}

/// Top surface of the highest solid block the falling hitbox sweeps through
/// between `old_y` and `new_y`, or `new_y` if the drop is unobstructed.
fn find_floor(world: &World, px: f32, pz: f32, old_y: f32, new_y: f32) -> f32 {
    let min_bx = (px - HALF_WIDTH).floor() as i32;
    let max_bx = (px + HALF_WIDTH).floor() as i32;
    let min_bz = (pz - HALF_WIDTH).floor() as i32;
    let max_bz = (pz + HALF_WIDTH).floor() as i32;

    let check_top = old_y.floor() as i32 - 1;
    let check_bot = (new_y.floor() as i32).max(0);

    let mut best = new_y;
    for bx in min_bx..=max_bx {
        for bz in min_bz..=max_bz {
            for by in (check_bot..=check_top).rev() {
                if world.get_block(bx, by, bz) != BlockType::Empty {
                    let top = (by + 1) as f32;
                    if top > best && top <= old_y + SKIN {
                        best = top;
                    }
                }
            }
        }
    }
    best
}

fn slide_x(old_x: f32, dx: f32) -> f32 {
    if dx > 0.0 {
        let wall = (old_x + HALF_WIDTH + dx).floor() as i32;
        wall as f32 - HALF_WIDTH - SKIN
    } else {
        let wall = (old_x - HALF_WIDTH + dx).floor() as i32;
        (wall + 1) as f32 + HALF_WIDTH + SKIN
    }
}

fn slide_z(old_z: f32, dz: f32) -> f32 {
    if dz > 0.0 {
        let wall = (old_z + HALF_WIDTH + dz).floor() as i32;
        wall as f32 - HALF_WIDTH - SKIN
    } else {
        let wall = (old_z - HALF_WIDTH + dz).floor() as i32;
        (wall + 1) as f32 + HALF_WIDTH + SKIN
    }
}

/// Pins the actor's top flush below the ceiling voxel it ran into.
fn snap_ceiling(new_y: f32) -> f32 {
    (new_y + FULL_HEIGHT).floor() - FULL_HEIGHT
}
