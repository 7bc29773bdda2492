/// Direction the snake's head travels on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// The heading pointing the other way
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Heading) -> bool {
        self.opposite() == other
    }

    /// Unit step (dx, dy); y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }
}
