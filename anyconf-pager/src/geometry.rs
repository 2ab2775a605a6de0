use std::ops::Sub;

/// Pointer position in the host's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Difference between two pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f32,
    pub dy: f32,
}

impl Delta {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// More horizontal than vertical. Ties count as vertical.
    pub fn is_horizontal(&self) -> bool {
        self.dx.abs() > self.dy.abs()
    }
}

impl Sub for Point {
    type Output = Delta;

    fn sub(self, rhs: Point) -> Delta {
        Delta {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}
