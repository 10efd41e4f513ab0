use std::str::FromStr;

use log::LevelFilter;
use web_sys::Element;

use crate::error::{GameError, Result};
use crate::geom::Distance;
use crate::graphics::Seconds;

/// Canvas attributes that may override the defaults.
pub const ATTRIBUTES: [&str; 5] = [
    "data-width",
    "data-height",
    "data-lives",
    "data-log-level",
    "data-seed",
];

/// Largest canvas side accepted, in line with browser canvas limits.
pub const MAX_DIMENSION: u32 = 16384;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    /// Pixels per second.
    pub player_speed: Distance,
    pub player_fire_speed: Distance,
    pub enemy_fire_speed: Distance,
    pub fire_cooldown: Seconds,
    pub lives: u32,
    /// Radians per second of the fleet's sine sway.
    pub sway_speed: f64,
    /// Chance per tick that a fleet row shoots.
    pub enemy_fire_chance: f64,
    pub player_fire_capacity: usize,
    pub enemy_fire_capacity: usize,
    pub tick_seconds: Seconds,
    pub max_frame_time: Seconds,
    pub log_level: LevelFilter,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            player_speed: 120.0,
            player_fire_speed: 180.0,
            enemy_fire_speed: 60.0,
            fire_cooldown: 0.4,
            lives: 3,
            sway_speed: 2.0,
            enemy_fire_chance: 0.004,
            player_fire_capacity: 20,
            enemy_fire_capacity: 50,
            tick_seconds: 1.0 / 120.0,
            max_frame_time: 0.25,
            log_level: LevelFilter::Info,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by whichever `data-*` attributes the canvas carries.
    pub fn from_element(element: &Element) -> Result<Self> {
        let mut config = Self::default();
        for name in ATTRIBUTES {
            if let Some(value) = element.get_attribute(name) {
                config.apply_attribute(name, &value)?;
            }
        }
        Ok(config)
    }

    pub fn apply_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "data-width" => self.width = parse_dimension(name, value)?,
            "data-height" => self.height = parse_dimension(name, value)?,
            "data-lives" => self.lives = parse_nonzero(name, value)?,
            "data-log-level" => self.log_level = parse(name, value)?,
            "data-seed" => self.seed = Some(parse(name, value)?),
            _ => {}
        }
        Ok(())
    }
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GameError::invalid(name, value))
}

fn parse_nonzero(name: &str, value: &str) -> Result<u32> {
    match parse(name, value)? {
        0 => Err(GameError::invalid(name, value)),
        n => Ok(n),
    }
}

fn parse_dimension(name: &str, value: &str) -> Result<u32> {
    match parse_nonzero(name, value)? {
        n if n > MAX_DIMENSION => Err(GameError::invalid(name, value)),
        n => Ok(n),
    }
}
