pub(crate) mod sprites;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::geom::{Distance, OffsetStrategy, Position, Rect, Size, XY};
use crate::graphics::{Color, Draw, PixelBuffer, Seconds};
use sprites::Sprite;

/// Anything on screen: a sprite stenciled in one color, centered on its position.
pub(crate) struct Object {
    pub(crate) sprite: &'static Sprite,
    pub(crate) position: Position,
    pub(crate) color: Color,
}

impl Object {
    pub(crate) fn new(sprite: &'static Sprite, position: Position, color: Color) -> Self {
        Self {
            sprite,
            position,
            color,
        }
    }
}

impl Rect for Object {
    fn position(&self) -> Position {
        self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    fn size(&self) -> Size {
        Size::new(self.sprite.width.into(), self.sprite.height.into())
    }
}

impl Draw for Object {
    fn draw(&self, pixels: &mut PixelBuffer) {
        let left = self.position.x().trunc() as i64 - i64::from(self.sprite.width / 2);
        let top = self.position.y().trunc() as i64 - i64::from(self.sprite.height / 2);
        pixels.stencil(self.sprite, left, top, self.color);
    }
}

pub(crate) struct Animation {
    frames: &'static [Sprite],
    frame_duration: Seconds,
    looping: bool,
    elapsed: Seconds,
}

impl Animation {
    pub(crate) fn new(frames: &'static [Sprite], frame_duration: Seconds, looping: bool) -> Self {
        debug_assert!(!frames.is_empty());
        Self {
            frames,
            frame_duration,
            looping,
            elapsed: 0.0,
        }
    }

    fn total(&self) -> Seconds {
        self.frames.len() as f64 * self.frame_duration
    }

    pub(crate) fn advance(&mut self, offset: Seconds) {
        self.elapsed += offset;
        let total = self.total();
        if self.elapsed >= total {
            if self.looping {
                self.elapsed %= total;
            } else {
                self.elapsed = total;
            }
        }
    }

    pub(crate) fn frame_index(&self) -> usize {
        ((self.elapsed / self.frame_duration) as usize).min(self.frames.len() - 1)
    }

    pub(crate) fn current(&self) -> &'static Sprite {
        &self.frames[self.frame_index()]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    #[default]
    Stopped,
    Right,
}

impl Direction {
    fn sign(self) -> Distance {
        match self {
            Direction::Left => -1.0,
            Direction::Stopped => 0.0,
            Direction::Right => 1.0,
        }
    }
}

pub(crate) struct Ship {
    pub(crate) inner: Object,
    pub(crate) direction: Direction,
    pub(crate) rate: Distance,
    pub(crate) lives: u32,
    cooldown: Seconds,
    last_shot: Option<Seconds>,
    fire_speed: Distance,
}

impl Ship {
    pub(crate) fn new(config: &GameConfig) -> Self {
        let width = Distance::from(config.width);
        let height = Distance::from(config.height);
        let half_width = Distance::from(sprites::PLAYER.width / 2);

        let mut position = Position::new(width / 2.0, height - height / 5.0);
        position.set_offset_x(OffsetStrategy::limit(half_width, width - half_width - 1.0));

        Self {
            inner: Object::new(&sprites::PLAYER, position, Color::WHITE),
            direction: Default::default(),
            rate: config.player_speed,
            lives: config.lives,
            cooldown: config.fire_cooldown,
            last_shot: None,
            fire_speed: config.player_fire_speed,
        }
    }

    pub(crate) fn animate(&mut self, offset: Seconds) {
        let distance = self.direction.sign() * self.rate * offset;
        self.inner.position_mut().offset(distance, 0.0);
    }

    /// A fire from the nose of the ship, unless the last one left less than a cooldown ago.
    pub(crate) fn shoot(&mut self, now: Seconds) -> Option<Fire> {
        if self
            .last_shot
            .is_some_and(|last| now - last < self.cooldown)
        {
            return None;
        }
        self.last_shot = Some(now);
        Some(Fire::new(
            self.inner.position(),
            self.inner.color,
            -self.fire_speed,
        ))
    }

    pub(crate) fn hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.lives == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EnemyKind {
    Green,
    Red,
}

impl EnemyKind {
    const FRAME_DURATION: Seconds = 0.2;

    fn frames(self) -> &'static [Sprite] {
        match self {
            EnemyKind::Green => &sprites::GREEN_ENEMY,
            EnemyKind::Red => &sprites::RED_ENEMY,
        }
    }

    fn color(self) -> Color {
        match self {
            EnemyKind::Green => Color::from_rgba(0x31EDEEFF),
            EnemyKind::Red => Color::from_rgba(0xEB1A40FF),
        }
    }

    pub(crate) fn points(self) -> u32 {
        match self {
            EnemyKind::Green => 20,
            EnemyKind::Red => 10,
        }
    }

    /// Row height in tenths of the screen, from the top.
    fn row_tenths(self) -> u32 {
        match self {
            EnemyKind::Green => 2,
            EnemyKind::Red => 3,
        }
    }

    fn name(self) -> &'static str {
        match self {
            EnemyKind::Green => "green",
            EnemyKind::Red => "red",
        }
    }
}

pub(crate) struct Enemy {
    pub(crate) inner: Object,
    animation: Animation,
    home_x: Distance,
}

impl Enemy {
    fn new(kind: EnemyKind, home_x: Distance, y: Distance) -> Self {
        let animation = Animation::new(kind.frames(), EnemyKind::FRAME_DURATION, true);
        let inner = Object::new(animation.current(), Position::new(home_x, y), kind.color());
        Self {
            inner,
            animation,
            home_x,
        }
    }

    fn animate(&mut self, offset: Seconds, sway: Distance) {
        self.animation.advance(offset);
        self.inner.sprite = self.animation.current();
        self.inner.position.set_x(self.home_x + sway);
    }
}

pub(crate) struct FleetRow {
    pub(crate) kind: EnemyKind,
    pub(crate) members: Vec<Enemy>,
}

impl FleetRow {
    pub(crate) const LENGTH: u32 = 8;

    pub(crate) fn new(kind: EnemyKind, config: &GameConfig) -> Self {
        let width = u64::from(config.width);
        let length = u64::from(Self::LENGTH);
        let stride = (width * 3 / 4) / length;
        let y = (u64::from(config.height) * u64::from(kind.row_tenths()) / 10) as Distance;
        let members = (0..length)
            .map(|i| {
                let x = (i * stride + width / 8 + stride / 2) as Distance;
                log::info!("a {} enemy was created at ({}, {})", kind.name(), x, y);
                Enemy::new(kind, x, y)
            })
            .collect();
        Self { kind, members }
    }
}

/// Every enemy row, swaying together on a sine wave.
pub(crate) struct Fleet {
    pub(crate) rows: Vec<FleetRow>,
    clock: Seconds,
    sway_speed: f64,
    amplitude: Distance,
}

impl Fleet {
    pub(crate) fn new(config: &GameConfig) -> Self {
        Self {
            rows: vec![
                FleetRow::new(EnemyKind::Green, config),
                FleetRow::new(EnemyKind::Red, config),
            ],
            clock: 0.0,
            sway_speed: config.sway_speed,
            amplitude: Distance::from(config.width / 16),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.rows.iter().map(|row| row.members.len()).sum()
    }

    pub(crate) fn animate(&mut self, offset: Seconds) {
        self.clock += offset;
        let sway = ((self.clock * self.sway_speed).sin() * self.amplitude).trunc();
        for row in self.rows.iter_mut() {
            for enemy in row.members.iter_mut() {
                enemy.animate(offset, sway);
            }
        }
    }

    /// Removes every enemy struck by one of `fires`, consuming the fire. Returns the points won.
    pub(crate) fn take_hits(&mut self, fires: &mut FirePool) -> u32 {
        let mut points = 0;
        for row in self.rows.iter_mut() {
            let kind = row.kind;
            row.members.retain(|enemy| {
                if fires.take_hit(&enemy.inner) {
                    log::debug!(
                        "a {} enemy was destroyed at ({}, {})",
                        kind.name(),
                        enemy.inner.position.x(),
                        enemy.inner.position.y()
                    );
                    points += kind.points();
                    false
                } else {
                    true
                }
            });
        }
        points
    }

    /// Each row, with probability `chance`, shoots from one of its surviving members.
    pub(crate) fn shoot(
        &self,
        rng: &mut fastrand::Rng,
        chance: f64,
        speed: Distance,
        fires: &mut FirePool,
    ) {
        for row in self.rows.iter() {
            if row.members.is_empty() || rng.f64() >= chance {
                continue;
            }
            let shooter = &row.members[rng.usize(..row.members.len())];
            let fire = Fire::new(shooter.inner.position, shooter.inner.color, speed);
            if let Err(err) = fires.spawn(fire) {
                log::warn!("could not spawn an enemy fire: {}", err);
            }
        }
    }
}

impl Draw for Fleet {
    fn draw(&self, pixels: &mut PixelBuffer) {
        for row in self.rows.iter() {
            for enemy in row.members.iter() {
                enemy.inner.draw(pixels);
            }
        }
    }
}

pub(crate) struct Fire {
    pub(crate) inner: Object,
    /// Pixels per second, negative is up.
    velocity: Distance,
}

impl Fire {
    pub(crate) fn new(position: Position, color: Color, velocity: Distance) -> Self {
        let position = Position::new(position.x(), position.y());
        Self {
            inner: Object::new(&sprites::FIRE, position, color),
            velocity,
        }
    }

    pub(crate) fn animate(&mut self, offset: Seconds) {
        let pos = self.inner.position_mut();
        let y = pos.y();
        pos.set_y(y + self.velocity * offset);
    }

    fn is_off_screen(&self, height: Distance) -> bool {
        let y = self.inner.position.y();
        (self.velocity < 0.0 && y <= 0.0) || (self.velocity > 0.0 && y >= height)
    }
}

/// Live fires of one side, bounded like the arcade's projectile slots.
pub(crate) struct FirePool {
    fires: Vec<Fire>,
    capacity: usize,
}

impl FirePool {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            fires: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.fires.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Fire> {
        self.fires.iter()
    }

    pub(crate) fn spawn(&mut self, fire: Fire) -> Result<()> {
        if self.len() >= self.capacity {
            return Err(GameError::FirePoolFull {
                capacity: self.capacity,
            });
        }
        self.fires.push(fire);
        Ok(())
    }

    /// Moves every fire and retires the ones that left the screen.
    pub(crate) fn animate(&mut self, offset: Seconds, height: Distance) {
        let mut i = 0;
        while i < self.fires.len() {
            self.fires[i].animate(offset);
            if self.fires[i].is_off_screen(height) {
                // fire order doesn't matter
                self.fires.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Consumes the first fire overlapping `target`, if any.
    pub(crate) fn take_hit(&mut self, target: &dyn Rect) -> bool {
        match self
            .fires
            .iter()
            .position(|fire| fire.inner.overlaps(target))
        {
            Some(i) => {
                self.fires.swap_remove(i);
                true
            }
            None => false,
        }
    }
}

impl Draw for FirePool {
    fn draw(&self, pixels: &mut PixelBuffer) {
        for fire in self.iter() {
            fire.inner.draw(pixels);
        }
    }
}
