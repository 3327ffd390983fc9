//! Grid coordinate system for laying out diagrams.
//!
//! Grid coordinates run at twice the density of visual slots: even indices are
//! slot centers and odd indices are the margins between them. The canvas is
//! `GRID_WIDTH` slots wide, so valid x indices run from 0 to
//! `2 * (GRID_WIDTH - 1)`.

use crate::geom::{Point, Vector, point};
use vek::*;


/// Total width of the diagram canvas, in pixels.
pub const TOTAL_WIDTH: i32 = 166;
/// Total height of the diagram canvas when one diagram is shown per page.
pub const TOTAL_HEIGHT: i32 = 332;

/// Width of an item or fluid icon drawn in a slot.
pub const STACK_WIDTH: i32 = 16;
pub const SLOT_WIDTH: i32 = 18;
pub const BIG_SLOT_WIDTH: i32 = 26;
pub const MARGIN_WIDTH: i32 = 6;
pub const SIDE_MARGIN_WIDTH: i32 = 2;

/// Number of slots that fit across the canvas.
pub const GRID_WIDTH: i32 = 7;
/// Number of slots that fit down the canvas when one diagram is shown per page.
pub const GRID_HEIGHT: i32 = 14;

/// Grid with no offset.
pub const GRID: Grid = Grid { offset: Vec2 { x: 0, y: 0 } };


/// One of the eight compass directions, or center.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    NW,
    N,
    NE,
    W,
    C,
    E,
    SW,
    S,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::NW, Direction::N, Direction::NE,
        Direction::W, Direction::C, Direction::E,
        Direction::SW, Direction::S, Direction::SE,
    ];

    pub fn x_factor(self) -> i32 {
        match self {
            Direction::NW | Direction::W | Direction::SW => -1,
            Direction::N | Direction::C | Direction::S => 0,
            Direction::NE | Direction::E | Direction::SE => 1,
        }
    }

    pub fn y_factor(self) -> i32 {
        match self {
            Direction::NW | Direction::N | Direction::NE => -1,
            Direction::W | Direction::C | Direction::E => 0,
            Direction::SW | Direction::S | Direction::SE => 1,
        }
    }

    /// Unit-ish vector (components in -1..=1) pointing this way.
    pub fn vector(self) -> Vector {
        Vec2::new(self.x_factor(), self.y_factor())
    }
}


/// Maps grid coordinates to pixel positions, translated by an offset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub offset: Point,
}

impl Grid {
    pub fn new(offset: Point) -> Self {
        Grid { offset }
    }

    /// Pixel center of grid cell `(x, y)`.
    pub fn grid(&self, x: i32, y: i32) -> Point {
        point(
            self.offset.x + SIDE_MARGIN_WIDTH + (SLOT_WIDTH + x * (SLOT_WIDTH + MARGIN_WIDTH)) / 2,
            self.offset.y + SIDE_MARGIN_WIDTH + (SLOT_WIDTH + y * (SLOT_WIDTH + MARGIN_WIDTH)) / 2,
        )
    }

    /// Point a half cell (slot plus margin) away from a grid cell.
    pub fn margin(&self, x: i32, y: i32, dir: Direction) -> Point {
        self.offset_by(x, y, dir, (SLOT_WIDTH + MARGIN_WIDTH) / 2)
    }

    /// Point on the edge of the slot at a grid cell.
    pub fn edge(&self, x: i32, y: i32, dir: Direction) -> Point {
        self.offset_by(x, y, dir, SLOT_WIDTH / 2)
    }

    /// Point on the edge of a big slot at a grid cell.
    pub fn big_edge(&self, x: i32, y: i32, dir: Direction) -> Point {
        self.offset_by(x, y, dir, BIG_SLOT_WIDTH / 2)
    }

    fn offset_by(&self, x: i32, y: i32, dir: Direction, amount: i32) -> Point {
        self.grid(x, y) + dir.vector() * amount
    }
}


#[test]
fn test_grid_origin_and_center() {
    assert_eq!(GRID.grid(0, 0), point(11, 11));
    assert_eq!(GRID.grid(2, 0), point(35, 11));
    // the middle column sits in the middle of the canvas
    assert_eq!(GRID.grid(GRID_WIDTH - 1, 0).x, TOTAL_WIDTH / 2);
}

#[test]
fn test_grid_strictly_monotonic() {
    for col in -20..20 {
        for row in -20..20 {
            let here = GRID.grid(col, row);
            assert_eq!(here, GRID.grid(col, row));
            assert!(GRID.grid(col + 1, row).x > here.x);
            assert!(GRID.grid(col, row + 1).y > here.y);
            assert_ne!(GRID.grid(col + 1, row), here);
        }
    }
}

#[test]
fn test_grid_offset() {
    let grid = Grid::new(point(5, -3));
    assert_eq!(grid.grid(4, 4), GRID.grid(4, 4) + point(5, -3));
}

#[test]
fn test_edges() {
    let c = GRID.grid(2, 2);
    assert_eq!(GRID.edge(2, 2, Direction::E), c + point(9, 0));
    assert_eq!(GRID.edge(2, 2, Direction::NW), c + point(-9, -9));
    assert_eq!(GRID.margin(2, 2, Direction::S), c + point(0, 12));
    assert_eq!(GRID.big_edge(2, 2, Direction::W), c + point(-13, 0));
    assert_eq!(GRID.edge(2, 2, Direction::C), c);
    // a margin step lands on the next grid index
    assert_eq!(GRID.margin(2, 2, Direction::E), GRID.grid(3, 2));
}
