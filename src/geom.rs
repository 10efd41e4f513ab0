pub type Distance = f64;

#[derive(Clone, Copy, Debug, Default)]
pub struct Coordinates {
    x: Distance,
    y: Distance,
    x_strategy: OffsetStrategy,
    y_strategy: OffsetStrategy,
}

pub trait XY {
    fn get_coordinates(&self) -> Coordinates;
    fn get_coordinates_mut(&mut self) -> &mut Coordinates;
    fn x(&self) -> Distance {
        self.get_coordinates().x
    }

    fn y(&self) -> Distance {
        self.get_coordinates().y
    }

    fn set_x(&mut self, x: Distance) {
        self.get_coordinates_mut().x = x;
    }

    fn set_y(&mut self, y: Distance) {
        self.get_coordinates_mut().y = y;
    }

    fn set_offset_x(&mut self, strategy: OffsetStrategy) {
        self.get_coordinates_mut().x_strategy = strategy;
    }

    fn set_offset_y(&mut self, strategy: OffsetStrategy) {
        self.get_coordinates_mut().y_strategy = strategy;
    }

    fn offset(&mut self, offset_x: Distance, offset_y: Distance) {
        let x = self.x();
        let y = self.y();
        let this = self.get_coordinates();
        self.set_x(this.x_strategy.offset(x, offset_x));
        self.set_y(this.y_strategy.offset(y, offset_y));
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Position(Coordinates);

impl Position {
    pub fn new(x: Distance, y: Distance) -> Self {
        Self(Coordinates {
            x,
            y,
            ..Default::default()
        })
    }
}

impl XY for Position {
    fn get_coordinates(&self) -> Coordinates {
        self.0
    }

    fn get_coordinates_mut(&mut self) -> &mut Coordinates {
        &mut self.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Size(Coordinates);

impl Size {
    pub fn new(x: Distance, y: Distance) -> Self {
        Self(Coordinates {
            x,
            y,
            ..Default::default()
        })
    }
}

impl XY for Size {
    fn get_coordinates(&self) -> Coordinates {
        self.0
    }

    fn get_coordinates_mut(&mut self) -> &mut Coordinates {
        &mut self.0
    }
}

/// An axis-aligned box whose position is its center.
pub trait Rect {
    fn position(&self) -> Position;
    fn position_mut(&mut self) -> &mut Position;
    fn size(&self) -> Size;

    fn left(&self) -> Distance {
        self.position().x() - self.size().x() / 2.0
    }

    fn right(&self) -> Distance {
        self.position().x() + self.size().x() / 2.0
    }

    fn top(&self) -> Distance {
        self.position().y() - self.size().y() / 2.0
    }

    fn bottom(&self) -> Distance {
        self.position().y() + self.size().y() / 2.0
    }

    /// Strict overlap; boxes that only share an edge don't collide.
    fn overlaps(&self, other: &dyn Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub enum OffsetStrategy {
    Linear,
    Limit { min: Distance, max: Distance },
}

impl Default for OffsetStrategy {
    fn default() -> Self {
        Self::linear()
    }
}

impl OffsetStrategy {
    pub fn linear() -> Self {
        Self::Linear
    }

    pub fn limit(min: Distance, max: Distance) -> Self {
        Self::Limit { min, max }
    }

    pub fn offset(&self, current: Distance, offset: Distance) -> Distance {
        match self {
            OffsetStrategy::Linear => current + offset,
            OffsetStrategy::Limit { min, max } => (current + offset).min(*max).max(*min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block {
        position: Position,
        size: Size,
    }

    impl Block {
        fn new(x: Distance, y: Distance, w: Distance, h: Distance) -> Self {
            Self {
                position: Position::new(x, y),
                size: Size::new(w, h),
            }
        }
    }

    impl Rect for Block {
        fn position(&self) -> Position {
            self.position
        }

        fn position_mut(&mut self) -> &mut Position {
            &mut self.position
        }

        fn size(&self) -> Size {
            self.size
        }
    }

    #[test]
    fn limit_clamps_both_ways() {
        let mut position = Position::new(10.0, 5.0);
        position.set_offset_x(OffsetStrategy::limit(5.0, 20.0));
        position.offset(-30.0, 1.0);
        assert_eq!(position.x(), 5.0);
        assert_eq!(position.y(), 6.0);
        position.offset(100.0, 0.0);
        assert_eq!(position.x(), 20.0);
    }

    #[test]
    fn edges_come_from_the_center() {
        let block = Block::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(block.left(), 8.0);
        assert_eq!(block.right(), 12.0);
        assert_eq!(block.top(), 17.0);
        assert_eq!(block.bottom(), 23.0);
    }

    #[test]
    fn overlap_needs_both_axes() {
        let enemy = Block::new(100.0, 50.0, 12.0, 8.0);
        assert!(enemy.overlaps(&Block::new(100.0, 50.0, 1.0, 3.0)));
        assert!(enemy.overlaps(&Block::new(105.0, 47.0, 1.0, 3.0)));
        // lined up vertically but off to the side
        assert!(!enemy.overlaps(&Block::new(120.0, 50.0, 1.0, 3.0)));
        // lined up horizontally but below
        assert!(!enemy.overlaps(&Block::new(100.0, 70.0, 1.0, 3.0)));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Block::new(0.0, 0.0, 2.0, 2.0);
        let b = Block::new(2.0, 0.0, 2.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }
}
