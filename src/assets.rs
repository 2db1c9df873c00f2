//! Asset loading
//!
//! Textures and the UI font are loaded once at startup. A missing or
//! corrupt asset is logged and replaced with placeholder rendering
//! (colored shapes, built-in font); it never halts the game.

use macroquad::prelude::*;

use crate::config::Config;

/// Loaded assets, with `None` standing in for anything that failed to
/// load. Draw code substitutes placeholders for missing entries.
pub struct Assets {
    pub player: Option<Texture2D>,
    pub star: Option<Texture2D>,
    pub font: Option<Font>,
}

impl Assets {
    pub async fn load(cfg: &Config) -> Self {
        let player = match load_texture(&cfg.player_texture_path).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                Some(texture)
            }
            Err(e) => {
                println!(
                    "Failed to load player texture '{}': {}, using a colored box",
                    cfg.player_texture_path, e
                );
                None
            }
        };

        let star = match load_texture(&cfg.star_texture_path).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                Some(texture)
            }
            Err(e) => {
                println!(
                    "Failed to load star texture '{}': {}, using a drawn star",
                    cfg.star_texture_path, e
                );
                None
            }
        };

        let font = match load_ttf_font(&cfg.font_path).await {
            Ok(font) => Some(font),
            Err(e) => {
                println!(
                    "Failed to load font '{}': {}, using the built-in font",
                    cfg.font_path, e
                );
                None
            }
        };

        Self { player, star, font }
    }

    /// Draw text with the loaded font, or the built-in font if loading
    /// failed. `x`/`y` follow macroquad's baseline convention.
    pub fn draw_label(&self, text: &str, x: f32, y: f32, font_size: u16, color: Color) {
        draw_text_ex(
            text,
            x,
            y,
            TextParams {
                font: self.font.as_ref(),
                font_size,
                color,
                ..Default::default()
            },
        );
    }

    /// Draw text horizontally centered on `center_x`.
    pub fn draw_label_centered(
        &self,
        text: &str,
        center_x: f32,
        y: f32,
        font_size: u16,
        color: Color,
    ) {
        let dims = measure_text(text, self.font.as_ref(), font_size, 1.0);
        self.draw_label(text, center_x - dims.width * 0.5, y, font_size, color);
    }
}
