use crate::world::{BlockType, World};
use glam::{IVec3, Vec3};

/// Sampling step of the voxel march, in world units.
pub const RAY_STEP: f32 = 0.02;

#[derive(Debug, Clone)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    pub position: IVec3,
    pub block: BlockType,
}

/// First non-empty voxel along the ray, or `None` if the reach is exhausted
/// in empty space.
pub fn cast(world: &World, ray: &Ray, reach: f32) -> Option<RayHit> {
    march(world, ray, reach).0
}

/// Like [`cast`], but also returns the last empty voxel visited before the
/// hit: the cell a placed block would occupy.
pub fn cast_with_placement(world: &World, ray: &Ray, reach: f32) -> (Option<RayHit>, Option<IVec3>) {
    march(world, ray, reach)
}

fn march(world: &World, ray: &Ray, reach: f32) -> (Option<RayHit>, Option<IVec3>) {
    let mut previous: Option<IVec3> = None;
    let mut last_empty: Option<IVec3> = None;

    let mut t = 0.0;
    while t < reach {
        let cell = ray.at(t).floor().as_ivec3();
        // Consecutive samples often land in the same voxel; requery only on
        // a cell change.
        if previous == Some(cell) {
            t += RAY_STEP;
            continue;
        }
        previous = Some(cell);

        let block = world.block_at(cell);
        if block != BlockType::Empty {
            return (Some(RayHit { position: cell, block }), last_empty);
        }
        last_empty = Some(cell);
        t += RAY_STEP;
    }

    (None, None)
}
