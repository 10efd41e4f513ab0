use crate::config::GameConfig;
use crate::entities::{Fleet, FirePool, Ship};
use crate::geom::Distance;
use crate::graphics::{Color, Draw, PixelBuffer, Seconds};
use crate::input::KeyState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Every entity in play plus the fixed-timestep clock that drives them.
pub struct Game {
    config: GameConfig,
    rng: fastrand::Rng,
    ship: Ship,
    fleet: Fleet,
    player_fires: FirePool,
    enemy_fires: FirePool,
    status: Status,
    score: u32,
    clock: Seconds,
    backlog: Seconds,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let rng = fastrand::Rng::with_seed(seed);
        Self::with_rng(config, rng)
    }

    fn with_rng(config: GameConfig, rng: fastrand::Rng) -> Self {
        Self {
            ship: Ship::new(&config),
            fleet: Fleet::new(&config),
            player_fires: FirePool::new(config.player_fire_capacity),
            enemy_fires: FirePool::new(config.enemy_fire_capacity),
            status: Status::Playing,
            score: 0,
            clock: 0.0,
            backlog: 0.0,
            config,
            rng,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.ship.lives
    }

    pub fn remaining_enemies(&self) -> usize {
        self.fleet.remaining()
    }

    /// Runs as many whole ticks as `offset` (plus leftovers from earlier frames) covers and
    /// returns how many ran.
    pub fn advance(&mut self, offset: Seconds, keys: &KeyState) -> u32 {
        if self.status != Status::Playing {
            if keys.restart {
                self.restart();
            }
            return 0;
        }

        self.backlog = (self.backlog + offset.max(0.0)).min(self.config.max_frame_time);
        let step = self.config.tick_seconds;
        let mut ticks = 0;
        while self.backlog >= step {
            self.backlog -= step;
            self.tick(step, keys);
            ticks += 1;
            if self.status != Status::Playing {
                self.backlog = 0.0;
                break;
            }
        }
        ticks
    }

    fn restart(&mut self) {
        log::info!("restarting");
        let rng = std::mem::replace(&mut self.rng, fastrand::Rng::with_seed(0));
        *self = Self::with_rng(self.config.clone(), rng);
    }

    pub(crate) fn tick(&mut self, step: Seconds, keys: &KeyState) {
        if self.status != Status::Playing {
            return;
        }
        self.clock += step;
        let height = Distance::from(self.config.height);

        self.ship.direction = keys.direction();
        self.ship.animate(step);
        if keys.fire {
            if let Some(fire) = self.ship.shoot(self.clock) {
                if let Err(err) = self.player_fires.spawn(fire) {
                    log::warn!("could not spawn a player fire: {}", err);
                }
            }
        }

        self.player_fires.animate(step, height);
        self.enemy_fires.animate(step, height);

        self.fleet.animate(step);
        self.score += self.fleet.take_hits(&mut self.player_fires);

        while self.enemy_fires.take_hit(&self.ship.inner) {
            self.ship.hit();
            log::info!("player hit, {} lives left", self.ship.lives);
        }

        self.fleet.shoot(
            &mut self.rng,
            self.config.enemy_fire_chance,
            self.config.enemy_fire_speed,
            &mut self.enemy_fires,
        );

        self.update_status();
    }

    fn update_status(&mut self) {
        let status = if self.ship.is_destroyed() {
            Status::Lost
        } else if self.fleet.remaining() == 0 {
            Status::Won
        } else {
            Status::Playing
        };
        if status != self.status {
            log::info!("{:?} with a score of {}", status, self.score);
            self.status = status;
        }
    }
}

impl Draw for Game {
    fn draw(&self, pixels: &mut PixelBuffer) {
        pixels.clear(Color::BACKGROUND);
        if self.status != Status::Lost {
            self.ship.inner.draw(pixels);
        }
        self.player_fires.draw(pixels);
        self.enemy_fires.draw(pixels);
        self.fleet.draw(pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Fire;
    use crate::geom::XY;
    use crate::input::Key;

    fn quiet_config() -> GameConfig {
        GameConfig {
            enemy_fire_chance: 0.0,
            ..Default::default()
        }
    }

    fn held(key: Key) -> KeyState {
        let mut keys = KeyState::default();
        keys.apply(key, true);
        keys
    }

    #[test]
    fn advance_runs_fixed_ticks_and_keeps_the_remainder() {
        let config = GameConfig {
            tick_seconds: 0.25,
            max_frame_time: 10.0,
            ..quiet_config()
        };
        let mut game = Game::new(config, 1);
        let keys = KeyState::default();
        assert_eq!(game.advance(0.125, &keys), 0);
        assert_eq!(game.advance(0.25, &keys), 1);
        assert_eq!(game.advance(0.5, &keys), 2);
        assert_eq!(game.clock, 0.75);
    }

    #[test]
    fn long_stalls_are_capped() {
        let config = GameConfig {
            tick_seconds: 0.0625,
            max_frame_time: 0.25,
            ..quiet_config()
        };
        let mut game = Game::new(config, 1);
        assert_eq!(game.advance(30.0, &KeyState::default()), 4);
    }

    #[test]
    fn holding_a_direction_moves_the_ship() {
        let mut game = Game::new(quiet_config(), 1);
        let start = game.ship.inner.position.x();
        for _ in 0..60 {
            game.tick(1.0 / 60.0, &held(Key::Right));
        }
        assert!((game.ship.inner.position.x() - (start + 120.0)).abs() < 1e-6);
    }

    #[test]
    fn holding_fire_respects_the_cooldown() {
        let config = GameConfig {
            player_fire_speed: 0.0,
            ..quiet_config()
        };
        let mut game = Game::new(config, 1);
        let keys = held(Key::Fire);
        // shots at 0.125, 0.625 and 1.125
        for _ in 0..10 {
            game.tick(0.125, &keys);
        }
        assert_eq!(game.player_fires.len(), 3);
    }

    #[test]
    fn shooting_an_enemy_scores_its_points() {
        let mut game = Game::new(quiet_config(), 1);
        game.tick(0.0, &KeyState::default());
        let target = game.fleet.rows[0].members[2].inner.position;
        game.player_fires
            .spawn(Fire::new(target, Color::WHITE, 0.0))
            .unwrap();
        game.tick(0.0, &KeyState::default());
        assert_eq!(game.score(), 20);
        assert_eq!(game.remaining_enemies(), 15);
        assert_eq!(game.player_fires.len(), 0);
    }

    #[test]
    fn enemy_fire_costs_lives_until_the_game_is_lost() {
        let mut game = Game::new(quiet_config(), 1);
        let at_ship = game.ship.inner.position;
        for expected in [2, 1, 0] {
            game.enemy_fires
                .spawn(Fire::new(at_ship, Color::WHITE, 0.0))
                .unwrap();
            game.tick(0.0, &KeyState::default());
            assert_eq!(game.lives(), expected);
        }
        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.advance(1.0, &KeyState::default()), 0);
    }

    #[test]
    fn clearing_the_fleet_wins_and_restart_resets() {
        let mut game = Game::new(quiet_config(), 1);
        for row in game.fleet.rows.iter_mut() {
            row.members.clear();
        }
        game.tick(0.01, &KeyState::default());
        assert_eq!(game.status(), Status::Won);

        game.advance(0.01, &held(Key::Restart));
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.remaining_enemies(), 16);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn losing_beats_winning_on_the_same_tick() {
        let config = GameConfig {
            lives: 1,
            ..quiet_config()
        };
        let mut game = Game::new(config, 1);
        for row in game.fleet.rows.iter_mut() {
            row.members.clear();
        }
        game.enemy_fires
            .spawn(Fire::new(game.ship.inner.position, Color::WHITE, 0.0))
            .unwrap();
        game.tick(0.0, &KeyState::default());
        assert_eq!(game.remaining_enemies(), 0);
        assert_eq!(game.status(), Status::Lost);
    }

    #[test]
    fn lost_game_hides_the_ship() {
        let config = GameConfig {
            lives: 1,
            ..quiet_config()
        };
        let mut game = Game::new(config, 1);
        game.enemy_fires
            .spawn(Fire::new(game.ship.inner.position, Color::WHITE, 0.0))
            .unwrap();
        game.tick(0.0, &KeyState::default());
        assert_eq!(game.status(), Status::Lost);

        let mut pixels = PixelBuffer::new(512, 256);
        game.draw(&mut pixels);
        let x = game.ship.inner.position.x() as i64;
        let y = game.ship.inner.position.y() as i64;
        // nose and solid base would both be white if the ship were drawn
        assert_eq!(pixels.get(x, y - 3), Some(Color::BACKGROUND));
        assert_eq!(pixels.get(x, y + 3), Some(Color::BACKGROUND));
    }

    #[test]
    fn restart_continues_the_random_stream() {
        let mut game = Game::new(quiet_config(), 5);
        let mut replay = fastrand::Rng::with_seed(5);
        // both full rows roll once per tick
        for _ in 0..3 {
            game.tick(0.01, &KeyState::default());
            replay.f64();
            replay.f64();
        }
        for row in game.fleet.rows.iter_mut() {
            row.members.clear();
        }
        game.tick(0.01, &KeyState::default());
        assert_eq!(game.status(), Status::Won);

        game.advance(0.01, &held(Key::Restart));
        assert_eq!(game.status(), Status::Playing);
        let next = game.rng.u64(..);
        assert_eq!(next, replay.u64(..));
        assert_ne!(next, fastrand::Rng::with_seed(5).u64(..));
    }

    #[test]
    fn same_seed_same_volleys() {
        let config = GameConfig {
            enemy_fire_chance: 0.5,
            ..Default::default()
        };
        let mut a = Game::new(config.clone(), 99);
        let mut b = Game::new(config, 99);
        for _ in 0..50 {
            a.tick(0.01, &KeyState::default());
            b.tick(0.01, &KeyState::default());
        }
        let xs = |game: &Game| {
            game.enemy_fires
                .iter()
                .map(|fire| fire.inner.position.x())
                .collect::<Vec<_>>()
        };
        assert!(!xs(&a).is_empty());
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn render_paints_background_and_ship() {
        let game = Game::new(quiet_config(), 1);
        let mut pixels = PixelBuffer::new(512, 256);
        game.draw(&mut pixels);
        assert_eq!(pixels.get(0, 0), Some(Color::BACKGROUND));
        let nose_x = game.ship.inner.position.x() as i64;
        let nose_y = game.ship.inner.position.y() as i64 - 3;
        assert_eq!(pixels.get(nose_x, nose_y), Some(Color::WHITE));
        let enemy = game.fleet.rows[1].members[0].inner.position;
        // row 4 of the red sprite is solid
        assert_eq!(
            pixels.get(enemy.x() as i64, enemy.y() as i64),
            Some(Color::from_rgba(0xEB1A40FF))
        );
    }
}
