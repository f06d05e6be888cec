//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    rgba(r, g, b, 255)
}

pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb, rgba};

    // Race
    pub const ROAD: Color = rgb(50, 50, 50);
    pub const GRASS: Color = rgb(40, 80, 40);
    pub const CENTER_STRIPE: Color = rgb(255, 255, 200);
    pub const LANE_MARKER: Color = rgb(200, 200, 200);
    pub const ROAD_EDGE: Color = rgb(255, 255, 100);

    pub const PLAYER_BODY: Color = rgb(0, 150, 255);
    pub const PLAYER_GLOW: Color = rgb(100, 200, 255);
    pub const PLAYER_WINDSHIELD: Color = rgb(200, 230, 255);
    pub const HEADLIGHT: Color = rgb(255, 255, 200);
    pub const TAILLIGHT: Color = rgb(255, 50, 50);

    pub const ENEMY_WINDSHIELD: Color = rgb(230, 240, 250);
    pub const ENEMY_HEADLIGHT: Color = rgb(255, 255, 180);
    /// Traffic paint, indexed by `Obstacle::color`
    pub const ENEMY_PALETTE: [Color; 8] = [
        rgb(255, 80, 80),
        rgb(255, 180, 50),
        rgb(100, 220, 100),
        rgb(180, 180, 220),
        rgb(255, 100, 180),
        rgb(180, 100, 255),
        rgb(80, 200, 220),
        rgb(220, 220, 100),
    ];

    // HUD
    pub const HUD_NAME: Color = rgb(100, 200, 255);
    pub const HUD_SCORE: Color = rgb(255, 255, 255);
    pub const HUD_SPEED: Color = rgb(255, 200, 100);
    pub const HUD_TIME: Color = rgb(100, 255, 200);
    pub const HUD_HINT: Color = rgb(200, 200, 255);

    // Game over
    pub const OVERLAY: Color = rgba(0, 0, 0, 180);
    pub const GAME_OVER: Color = rgb(255, 80, 80);
    pub const SAVE_PENDING: Color = rgb(255, 255, 100);
    pub const SAVE_OK: Color = rgb(100, 255, 100);
    pub const SAVE_FAILED: Color = rgb(255, 120, 120);
    pub const PROMPT: Color = rgb(255, 255, 200);

    // Menu
    pub const MENU_BACKGROUND: Color = rgb(20, 20, 30);
    pub const TITLE: Color = rgb(255, 215, 0);
    pub const HEADING: Color = rgb(0, 255, 255);
    pub const WHITE: Color = rgb(255, 255, 255);
    pub const PLACEHOLDER: Color = rgb(150, 150, 150);
    pub const FIELD: Color = rgb(40, 40, 50);
    pub const FIELD_ACTIVE: Color = rgb(100, 180, 255);
    pub const BUTTON: Color = rgb(0, 120, 0);
    pub const BUTTON_DISABLED: Color = rgb(60, 60, 70);
    pub const BUTTON_TEXT_DISABLED: Color = rgb(120, 120, 120);
    pub const BUTTON_OUTLINE: Color = rgb(50, 205, 50);
    pub const TABLE_OUTLINE: Color = rgb(100, 150, 255);
    pub const TABLE_HEADER: Color = rgb(255, 255, 0);
    pub const ROW_ODD: Color = rgb(40, 40, 60);
    pub const ROW_EVEN: Color = rgb(50, 50, 70);
    pub const GOLD: Color = rgb(255, 215, 0);
    pub const SILVER: Color = rgb(192, 192, 192);
    pub const BRONZE: Color = rgb(205, 127, 50);
    pub const MUTED: Color = rgb(211, 211, 211);
    pub const FOOTER: Color = rgb(255, 255, 224);
    pub const ERROR: Color = rgb(255, 0, 0);
}
