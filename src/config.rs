//! Game configuration
//!
//! One `Config` is built at startup and passed by reference into level
//! construction; nothing reads global mutable state. Values can be
//! overridden by an optional RON file next to the executable, and any
//! missing or malformed file just means defaults.

use serde::{Deserialize, Serialize};

/// Default location of the optional config override file
pub const CONFIG_PATH: &str = "assets/config.ron";

/// Static configuration for the whole game: screen, physics, paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window width in pixels
    pub screen_width: f32,
    /// Window height in pixels
    pub screen_height: f32,
    /// Target frame rate (one simulation step per rendered frame)
    pub target_fps: f64,
    /// Side length of one maze tile in pixels
    pub tile_size: f32,
    /// Player bounding box width
    pub player_width: f32,
    /// Player bounding box height
    pub player_height: f32,
    /// Horizontal move speed (pixels per frame)
    pub player_speed: f32,
    /// Downward acceleration (pixels per frame per frame)
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_strength: f32,
    /// Terminal fall speed (pixels per frame)
    pub max_fall_speed: f32,
    /// Portal color cycle rate in full hue revolutions per second
    pub portal_color_speed: f32,
    /// How long the intro screen stays up, in seconds
    pub intro_seconds: f64,
    /// Maze layout text file
    pub maze_layout_path: String,
    /// Player sprite (falls back to a colored box if missing)
    pub player_texture_path: String,
    /// Star sprite (falls back to a drawn star shape if missing)
    pub star_texture_path: String,
    /// UI font (falls back to the built-in font if missing)
    pub font_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            target_fps: 60.0,
            tile_size: 40.0,
            player_width: 30.0,
            player_height: 40.0,
            player_speed: 5.0,
            gravity: 0.5,
            jump_strength: -11.0,
            max_fall_speed: 10.0,
            portal_color_speed: 0.2,
            intro_seconds: 5.0,
            maze_layout_path: "assets/maze1.txt".to_string(),
            player_texture_path: "assets/player.png".to_string(),
            star_texture_path: "assets/star.png".to_string(),
            font_path: "assets/font.ttf".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a RON file, falling back to defaults if the
    /// file is missing or does not parse. Never fatal.
    pub fn load(path: &str) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match ron::from_str(&contents) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Config parse error in {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Target duration of one frame in seconds
    pub fn frame_time(&self) -> f64 {
        1.0 / self.target_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_consistent() {
        let cfg = Config::default();
        assert!(cfg.screen_width > 0.0 && cfg.screen_height > 0.0);
        assert!(cfg.jump_strength < 0.0, "jump must be upward");
        assert!(cfg.gravity > 0.0);
        assert!(cfg.max_fall_speed > 0.0);
        assert!((cfg.frame_time() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = Config::load("no/such/config.ron");
        assert_eq!(cfg.screen_width, Config::default().screen_width);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.ron");
        let mut file = std::fs::File::create(&path).expect("create");
        write!(file, "(screen_width: 1024.0, tile_size: 32.0)").expect("write");

        let cfg = Config::load(path.to_str().expect("utf-8 path"));
        assert_eq!(cfg.screen_width, 1024.0);
        assert_eq!(cfg.tile_size, 32.0);
        assert_eq!(cfg.player_speed, Config::default().player_speed);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(screen_width: }").expect("write");

        let cfg = Config::load(path.to_str().expect("utf-8 path"));
        assert_eq!(cfg.tile_size, Config::default().tile_size);
    }
}
