use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Empty,
    Stone,
    Dirt,
    Grass,
    Log,
    Leaves,
}

/// Per-type data consulted by every component. Break times are in ticks,
/// colors are the untextured fallback palette.
#[derive(Debug, Clone, Copy)]
pub struct BlockProperties {
    pub name: &'static str,
    pub solid: bool,
    pub break_ticks: f32,
    pub base_color: [f32; 3],
}

const PROPERTIES: [BlockProperties; 6] = [
    BlockProperties {
        name: "empty",
        solid: false,
        break_ticks: 30.0,
        base_color: [1.0, 1.0, 1.0],
    },
    BlockProperties {
        name: "stone",
        solid: true,
        break_ticks: 90.0,
        base_color: [0.6, 0.6, 0.6],
    },
    BlockProperties {
        name: "dirt",
        solid: true,
        break_ticks: 30.0,
        base_color: [0.55, 0.35, 0.15],
    },
    BlockProperties {
        name: "grass",
        solid: true,
        break_ticks: 35.0,
        base_color: [0.3, 0.7, 0.3],
    },
    BlockProperties {
        name: "log",
        solid: true,
        break_ticks: 100.0,
        base_color: [0.5, 0.35, 0.2],
    },
    BlockProperties {
        name: "leaves",
        solid: true,
        break_ticks: 15.0,
        base_color: [0.2, 0.6, 0.2],
    },
];

impl BlockType {
    /// Solid types in draw-group order.
    pub const SOLID: [BlockType; 5] = [
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Log,
        BlockType::Leaves,
    ];

    pub fn properties(self) -> &'static BlockProperties {
        &PROPERTIES[self as usize]
    }

    pub fn is_empty(self) -> bool {
        self == BlockType::Empty
    }

    pub fn is_solid(self) -> bool {
        self.properties().solid
    }

    pub fn break_ticks(self) -> f32 {
        self.properties().break_ticks
    }

    pub fn base_color(self) -> [f32; 3] {
        self.properties().base_color
    }

    pub fn name(self) -> &'static str {
        self.properties().name
    }
}
