use crate::shared::point::Point;

/// The edge of a ring being swept, named after the side of the image it
/// bounds. The walk visits them clockwise: Top (rightward), Right
/// (downward), Bottom (leftward), Left (upward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// Next edge clockwise.
    pub fn next(self) -> Direction {
        Direction::ALL[(self.index() + 1) % 4]
    }

    /// One step along this edge.
    pub fn step(self) -> Point {
        match self {
            Direction::Top => Point::new(1, 0),
            Direction::Right => Point::new(0, 1),
            Direction::Bottom => Point::new(-1, 0),
            Direction::Left => Point::new(0, -1),
        }
    }

    /// How this edge's stop corner moves when the walk drops to the next
    /// ring: one pixel inward on both axes.
    pub fn lap_shrink(self) -> Point {
        match self {
            Direction::Top => Point::new(-1, 1),
            Direction::Right => Point::new(-1, -1),
            Direction::Bottom => Point::new(1, -1),
            Direction::Left => Point::new(1, 1),
        }
    }
}

/// Where the ring walk turns, and which edge it is on.
///
/// `stop_corner(d)` is the last pixel of edge `d` and the first pixel of edge
/// `d.next()`. The walk of a ring starts at `stop_corner(previous)`.
///
/// Odd dimensions are padded with a phantom row above the image and/or a
/// phantom column to its right so that every ring has at least two pixels per
/// side; phantom pixels lie outside the source and are never opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingSchedule {
    stop_corners: [Point; 4],
    current: Direction,
    previous: Direction,
}

impl RingSchedule {
    /// The outermost ring of a `width × height` image, with the parity
    /// adjustment applied. Both dimensions must be positive.
    pub fn initial(width: i64, height: i64) -> Self {
        debug_assert!(width > 0 && height > 0, "ring walk needs a non-empty image");

        let mut schedule = Self {
            stop_corners: [
                Point::new(width - 1, 0),
                Point::new(width - 1, height - 1),
                Point::new(0, height - 1),
                Point::new(0, 0),
            ],
            current: Direction::Top,
            previous: Direction::Left,
        };

        if height % 2 != 0 {
            // The top row is now phantom, so the first lap skips it.
            schedule.current = Direction::Right;
            schedule.previous = Direction::Top;
            schedule.shift(Direction::Top, Point::new(0, -1));
            schedule.shift(Direction::Left, Point::new(0, -1));
        }

        if width % 2 != 0 {
            // The right column is now phantom. It is only skipped when the walk
            // already starts on it; starting at the top-left would mean
            // sweeping a real row first.
            if schedule.current == Direction::Right {
                schedule.current = Direction::Bottom;
                schedule.previous = Direction::Right;
            }
            schedule.shift(Direction::Top, Point::new(1, 0));
            schedule.shift(Direction::Right, Point::new(1, 0));
        }

        schedule
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn previous(&self) -> Direction {
        self.previous
    }

    pub fn stop_corner(&self, direction: Direction) -> Point {
        self.stop_corners[direction.index()]
    }

    /// First position of the current ring's walk.
    pub fn start(&self) -> Point {
        self.stop_corner(self.previous)
    }

    /// Horizontal distance between the ring's left and right columns.
    pub fn ring_width(&self) -> i64 {
        self.stop_corner(Direction::Top).x - self.stop_corner(Direction::Left).x
    }

    /// Vertical distance between the ring's top and bottom rows.
    pub fn ring_height(&self) -> i64 {
        self.stop_corner(Direction::Right).y - self.stop_corner(Direction::Top).y
    }

    /// True once shrinking has consumed the whole image.
    pub fn is_exhausted(&self) -> bool {
        self.ring_width() < 0 || self.ring_height() < 0
    }

    /// Moves on to the next edge. Returns true when that completes a lap, in
    /// which case the corners have already shrunk to the next ring.
    pub fn turn(&mut self) -> bool {
        self.previous = self.current;
        self.current = self.current.next();
        if self.current != Direction::Top {
            return false;
        }
        for direction in Direction::ALL {
            self.shift(direction, direction.lap_shrink());
        }
        true
    }

    fn shift(&mut self, direction: Direction, delta: Point) {
        let corner = &mut self.stop_corners[direction.index()];
        *corner = *corner + delta;
    }
}

/// Per-edge "found" flags.
///
/// A flag certifies that no pixel left to visit can move that edge's bound
/// further out: every ring inside the current one lies strictly within the
/// row or column where an opaque pixel was already seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FoundEdges {
    flags: [bool; 4],
    count: usize,
}

impl FoundEdges {
    /// Sets the flag for `direction`; returns true once all four are set.
    pub fn mark(&mut self, direction: Direction) -> bool {
        let flag = &mut self.flags[direction.index()];
        if !*flag {
            *flag = true;
            self.count += 1;
        }
        self.all()
    }

    pub fn all(&self) -> bool {
        self.count == 4
    }
}
