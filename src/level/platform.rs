//! Platforming level
//!
//! Fixed platforms, four static stars, and a portal that only appears
//! once every star has been collected. Touching the portal completes the
//! level.

use macroquad::prelude::{WHITE, YELLOW};

use crate::assets::Assets;
use crate::components::{Component, Portal, Solid, Star};
use crate::config::Config;
use crate::input::Intent;
use crate::level::{collect_stars, ComponentSet, Level, Outcome};
use crate::player::Player;

/// Where the portal materializes once all stars are collected
const PORTAL_POSITION: (f32, f32) = (700.0, 100.0);
const PORTAL_SIZE: f32 = 50.0;

pub struct PlatformLevel {
    pub player: Player,
    pub solids: Vec<Solid>,
    pub components: ComponentSet,
    /// Component indices of the static stars, parallel to `collected`
    pub star_slots: Vec<usize>,
    pub collected: Vec<bool>,
    pub portal_slot: Option<usize>,
    portal_color_speed: f32,
    screen_width: f32,
}

impl PlatformLevel {
    pub fn new(cfg: &Config) -> Self {
        let solids = vec![
            Solid::new(50.0, 490.0, 150.0, 10.0),
            Solid::new(250.0, 420.0, 100.0, 10.0),
            Solid::new(400.0, 340.0, 100.0, 10.0),
            Solid::new(150.0, 260.0, 100.0, 10.0),
            Solid::new(400.0, 160.0, 100.0, 10.0),
            Solid::new(500.0, 460.0, 100.0, 10.0),
            Solid::new(300.0, 180.0, 100.0, 0.0),
            Solid::new(0.0, cfg.screen_height - 20.0, cfg.screen_width, 20.0),
        ];

        // Spawn standing on the first platform
        let first = solids[0].rect;
        let start_x = first.center_x() - cfg.player_width * 0.5;
        let start_y = first.y - cfg.player_height;
        let mut player = Player::new(start_x, start_y, cfg.player_width, cfg.player_height, cfg);
        player.on_ground = true;

        let mut components = ComponentSet::new();
        let star_points = [(295.0, 400.0), (445.0, 320.0), (185.0, 240.0), (550.0, 500.0)];
        let star_slots: Vec<usize> = star_points
            .iter()
            .map(|&(x, y)| {
                components.insert(Component::Star(Star::new(
                    x,
                    y,
                    cfg.screen_width,
                    cfg.screen_height,
                )))
            })
            .collect();
        let collected = vec![false; star_slots.len()];

        Self {
            player,
            solids,
            components,
            star_slots,
            collected,
            portal_slot: None,
            portal_color_speed: cfg.portal_color_speed,
            screen_width: cfg.screen_width,
        }
    }

    fn all_collected(&self) -> bool {
        self.collected.iter().all(|&c| c)
    }
}

impl Level for PlatformLevel {
    fn update(&mut self, intent: Intent, dt: f32) -> Outcome {
        collect_stars(
            self.player.rect(),
            &mut self.components,
            &self.star_slots,
            &mut self.collected,
        );

        self.player.update_sidescroll(intent, &self.solids);
        self.components.update_all(dt);

        if self.all_collected() && self.portal_slot.is_none() {
            let (x, y) = PORTAL_POSITION;
            let slot = self.components.insert(Component::Portal(Portal::new(
                x,
                y,
                PORTAL_SIZE,
                PORTAL_SIZE,
                self.portal_color_speed,
            )));
            self.portal_slot = Some(slot);
        }

        if let Some(Component::Portal(portal)) =
            self.portal_slot.and_then(|slot| self.components.get(slot))
        {
            if self.player.rect().intersects(&portal.rect) {
                return Outcome::Completed;
            }
        }

        Outcome::None
    }

    fn draw(&self, assets: &Assets) {
        for solid in &self.solids {
            solid.draw((0.0, 0.0));
        }
        for component in self.components.iter_alive() {
            component.draw(assets, (0.0, 0.0));
        }
        self.player.draw(assets, (0.0, 0.0));

        assets.draw_label_centered(
            "Collect the stars to reveal the portal",
            self.screen_width * 0.5,
            34.0,
            28,
            YELLOW,
        );
        let progress = format!(
            "Collected: {}/{}",
            self.collected.iter().filter(|&&c| c).count(),
            self.collected.len()
        );
        assets.draw_label(&progress, 10.0, 70.0, 24, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_player_spawns_standing_on_first_platform() {
        let level = PlatformLevel::new(&Config::default());
        let first = level.solids[0].rect;
        assert!(level.player.on_ground);
        assert_eq!(level.player.y, first.y - level.player.height);
        assert_eq!(level.player.rect().center_x(), first.center_x());
    }

    #[test]
    fn test_no_portal_until_all_stars_collected() {
        let mut level = PlatformLevel::new(&Config::default());
        for _ in 0..10 {
            assert_eq!(level.update(Intent::default(), DT), Outcome::None);
        }
        assert!(level.portal_slot.is_none());
    }

    #[test]
    fn test_star_collection_is_monotonic_and_removes_star() {
        let mut level = PlatformLevel::new(&Config::default());
        let slot = level.star_slots[0];
        let star_rect = level.components.get(slot).expect("star alive").rect();

        // Park the player on the star
        level
            .player
            .reset_position(star_rect.center_x() - 15.0, star_rect.center_y() - 20.0);
        level.update(Intent::default(), DT);

        assert!(level.collected[0]);
        assert!(!level.components.is_alive(slot));
        assert_eq!(level.components.alive_count(), 3);

        // Stays collected on later frames, star never comes back
        for _ in 0..5 {
            level.update(Intent::default(), DT);
            assert!(level.collected[0]);
            assert!(!level.components.is_alive(slot));
        }
    }

    #[test]
    fn test_portal_spawns_after_all_stars_and_completes_on_touch() {
        let mut level = PlatformLevel::new(&Config::default());
        for flag in level.collected.iter_mut() {
            *flag = true;
        }

        assert_eq!(level.update(Intent::default(), DT), Outcome::None);
        let slot = level.portal_slot.expect("portal spawned");
        let rect = level.components.get(slot).expect("portal alive").rect();
        assert_eq!((rect.x, rect.y), (700.0, 100.0));
        assert_eq!((rect.w, rect.h), (50.0, 50.0));

        level.player.reset_position(700.0, 100.0);
        assert_eq!(level.update(Intent::default(), DT), Outcome::Completed);
    }

    #[test]
    fn test_portal_spawns_only_once() {
        let mut level = PlatformLevel::new(&Config::default());
        for flag in level.collected.iter_mut() {
            *flag = true;
        }
        level.update(Intent::default(), DT);
        let first_slot = level.portal_slot;
        level.update(Intent::default(), DT);
        assert_eq!(level.portal_slot, first_slot);
    }
}
