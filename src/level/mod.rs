//! Levels
//!
//! A level owns its player, its solids, and a set of interactive
//! components, and steps them once per frame. Every update reports an
//! [`Outcome`] that the session loop matches on to keep running, advance,
//! rebuild the level, or end the game.
//!
//! Components live in a [`ComponentSet`]: a flat arena with stable
//! indices and an alive flag per slot. Collected stars are killed in
//! place rather than removed, so indices held by levels stay valid and
//! nothing is mutated out from under an iteration.

pub mod maze;
pub mod platform;
pub mod puzzle;

pub use maze::MazeLevel;
pub use platform::PlatformLevel;
pub use puzzle::PuzzleLevel;

use crate::assets::Assets;
use crate::components::Component;
use crate::config::Config;
use crate::input::Intent;

/// Per-frame signal a level hands back to the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep playing this level.
    None,
    /// Level finished; advance to the next one.
    Completed,
    /// Rebuild this level from scratch.
    Restart,
    /// Terminal win: tear the level down and show the end screen.
    ShowEndMessage,
}

/// The contract every level variant implements. One `update` per frame,
/// then one `draw`.
pub trait Level {
    fn update(&mut self, intent: Intent, dt: f32) -> Outcome;
    fn draw(&self, assets: &Assets);
}

/// The fixed set of level variants, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Platform,
    Maze,
    Puzzle,
}

impl LevelKind {
    pub const ALL: [LevelKind; 3] = [LevelKind::Platform, LevelKind::Maze, LevelKind::Puzzle];

    pub fn label(&self) -> &'static str {
        match self {
            LevelKind::Platform => "platform",
            LevelKind::Maze => "maze",
            LevelKind::Puzzle => "puzzle",
        }
    }

    pub fn from_name(name: &str) -> Option<LevelKind> {
        match name {
            "platform" => Some(LevelKind::Platform),
            "maze" => Some(LevelKind::Maze),
            "puzzle" => Some(LevelKind::Puzzle),
            _ => None,
        }
    }
}

/// Build a fresh level of the given kind.
pub fn create_level(kind: LevelKind, cfg: &Config) -> Box<dyn Level> {
    match kind {
        LevelKind::Platform => Box::new(PlatformLevel::new(cfg)),
        LevelKind::Maze => Box::new(MazeLevel::new(cfg)),
        LevelKind::Puzzle => Box::new(PuzzleLevel::new(cfg)),
    }
}

/// Map a level identifier to a freshly constructed level. Unknown
/// identifiers produce no level; the caller decides what that means.
pub fn create_level_by_name(name: &str, cfg: &Config) -> Option<Box<dyn Level>> {
    match LevelKind::from_name(name) {
        Some(kind) => Some(create_level(kind, cfg)),
        None => {
            eprintln!("Warning: unknown level type '{}' requested", name);
            None
        }
    }
}

/// Arena of interactive components with stable indices. Slots are never
/// reused within a level's lifetime; a killed slot just stops updating
/// and drawing.
#[derive(Debug, Default)]
pub struct ComponentSet {
    items: Vec<Component>,
    alive: Vec<bool>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component, returning its stable index.
    pub fn insert(&mut self, component: Component) -> usize {
        self.items.push(component);
        self.alive.push(true);
        self.items.len() - 1
    }

    /// Mark a slot dead. Dead slots are skipped by updates and draws.
    pub fn kill(&mut self, index: usize) {
        if let Some(flag) = self.alive.get_mut(index) {
            *flag = false;
        }
    }

    pub fn is_alive(&self, index: usize) -> bool {
        self.alive.get(index).copied().unwrap_or(false)
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        if self.is_alive(index) {
            self.items.get(index)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Component> {
        if self.alive.get(index).copied().unwrap_or(false) {
            self.items.get_mut(index)
        } else {
            None
        }
    }

    /// Step every live component once.
    pub fn update_all(&mut self, dt: f32) {
        for (component, alive) in self.items.iter_mut().zip(&self.alive) {
            if *alive {
                component.update(dt);
            }
        }
    }

    /// Iterate over live components.
    pub fn iter_alive(&self) -> impl Iterator<Item = &Component> {
        self.items
            .iter()
            .zip(&self.alive)
            .filter_map(|(component, alive)| alive.then_some(component))
    }

    /// Number of live components.
    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|alive| **alive).count()
    }
}

/// Shared pickup scan for static stars. `star_slots` are component
/// indices parallel to `collected`; a touched star flips its flag and is
/// killed in place, so flags only ever go from false to true.
pub(crate) fn collect_stars(
    player_rect: crate::geometry::Rect,
    components: &mut ComponentSet,
    star_slots: &[usize],
    collected: &mut [bool],
) {
    for (i, &slot) in star_slots.iter().enumerate() {
        if collected[i] {
            continue;
        }
        if let Some(Component::Star(star)) = components.get(slot) {
            if player_rect.intersects(&star.rect) {
                collected[i] = true;
                components.kill(slot);
            }
        }
    }
}
