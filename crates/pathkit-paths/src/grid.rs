//! Grid distance metrics and a parsed maze that implements [`AstarPather`].

use std::collections::HashSet;
use std::fmt;

use pathkit_core::{Point, Range, text};

use crate::astar::{Path, SearchOutcome, search};
use crate::traits::{AstarPather, Cost, Pather, WeightedPather};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

const WALL: char = '#';
const FLOOR: char = '.';
const START: char = 'S';
const GOAL: char = 'G';
const TRAIL: char = '*';

/// Which steps a [`GridMap`] allows from a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Up, right, down, left.
    #[default]
    Cardinal,
    /// The four cardinal steps plus the four diagonals.
    Diagonal,
}

impl Movement {
    /// The distance metric matching this movement with unit step cost.
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> i32 {
        match self {
            Self::Cardinal => manhattan(a, b),
            Self::Diagonal => chebyshev(a, b),
        }
    }
}

/// A rectangular maze where every step costs 1.
///
/// Points outside the maze count as walls. The A* estimate is the
/// [`Movement::distance`] to [`goal`](Self::goal): Manhattan for cardinal
/// moves, Chebyshev once diagonals are allowed. Both are admissible and
/// consistent for their movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    range: Range,
    walls: Vec<bool>,
    start: Point,
    goal: Point,
    movement: Movement,
}

impl GridMap {
    /// Open maze of the given size with no walls. A negative width or
    /// height gives an empty maze.
    pub fn new(width: i32, height: i32, start: Point, goal: Point) -> Self {
        let range = Range::with_size(width.max(0), height.max(0));
        Self {
            range,
            walls: vec![false; range.len()],
            start,
            goal,
            movement: Movement::Cardinal,
        }
    }

    /// Same maze with the given movement rule.
    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    /// Parse a maze drawn with `#` (wall), `.` (floor), `S` (start) and
    /// `G` (goal). Surrounding blank lines are ignored; every line must
    /// have the same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let rows = text::lines(s.trim());
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let width = first.chars().count();
        let mut map = Self::new(width as i32, rows.len() as i32, Point::ZERO, Point::ZERO);
        let mut start = None;
        let mut goal = None;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    WALL => map.set_wall(p, true),
                    FLOOR => {}
                    START => start = Some(p),
                    GOAL => goal = Some(p),
                    _ => return Err(GridError::InvalidCell { ch, pos: p }),
                }
            }
        }

        map.start = start.ok_or(GridError::MissingMarker(START))?;
        map.goal = goal.ok_or(GridError::MissingMarker(GOAL))?;
        Ok(map)
    }

    /// The rectangle covered by the maze.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn movement(&self) -> Movement {
        self.movement
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let d = p - self.range.min;
        Some((d.y * self.range.width() + d.x) as usize)
    }

    /// Mark `p` as wall or floor. Points outside the maze are ignored.
    pub fn set_wall(&mut self, p: Point, wall: bool) {
        if let Some(i) = self.idx(p) {
            self.walls[i] = wall;
        }
    }

    /// Whether `p` blocks movement (walls and everything outside the maze).
    pub fn is_wall(&self, p: Point) -> bool {
        self.idx(p).is_none_or(|i| self.walls[i])
    }

    /// Shortest start-to-goal path, with search statistics.
    pub fn solve(&self) -> SearchOutcome<Point> {
        let goal = self.goal;
        search(self, self.start, |p: &Point| *p == goal)
    }

    /// Shortest start-to-goal path, if the goal is reachable.
    pub fn shortest_path(&self) -> Option<Path<Point>> {
        self.solve().path
    }

    /// Draw the maze, marking the interior of `path` with `*`.
    pub fn render(&self, path: &[Point]) -> String {
        let trail: HashSet<Point> = path.iter().copied().collect();
        let mut out = String::with_capacity(self.range.len() + self.range.height() as usize);
        for p in self.range {
            if p.x == self.range.min.x && p.y > self.range.min.y {
                out.push('\n');
            }
            let ch = if p == self.start {
                START
            } else if p == self.goal {
                GOAL
            } else if self.is_wall(p) {
                WALL
            } else if trail.contains(&p) {
                TRAIL
            } else {
                FLOOR
            };
            out.push(ch);
        }
        out
    }
}

impl Pather for GridMap {
    type Node = Point;

    fn neighbors(&self, node: &Point, buf: &mut Vec<Point>) {
        match self.movement {
            Movement::Cardinal => {
                buf.extend(node.neighbors_4().into_iter().filter(|n| !self.is_wall(*n)))
            }
            Movement::Diagonal => {
                buf.extend(node.neighbors_8().into_iter().filter(|n| !self.is_wall(*n)))
            }
        }
    }
}

impl WeightedPather for GridMap {
    #[inline]
    fn cost(&self, _from: &Point, _to: &Point) -> Cost {
        1
    }
}

impl AstarPather for GridMap {
    #[inline]
    fn estimate(&self, node: &Point) -> Cost {
        Cost::from(self.movement.distance(*node, self.goal))
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

/// Errors that can occur when parsing a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input has no lines.
    Empty,
    /// A line's width differs from the first line's.
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `#`, `.`, `S` or `G`.
    InvalidCell { ch: char, pos: Point },
    /// No start (`S`) or goal (`G`) marker.
    MissingMarker(char),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "maze is empty"),
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(f, "maze line {line} has width {found}, expected {expected}"),
            Self::InvalidCell { ch, pos } => {
                write!(f, "maze contains invalid cell \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingMarker(ch) => write!(f, "maze has no \u{201c}{ch}\u{201d} marker"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLED: &str = "\
S#.
.#.
..G";

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, -4);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(manhattan(b, b), 0);
    }

    #[test]
    fn parse_reads_markers_and_walls() {
        let m = GridMap::parse(WALLED).unwrap();
        assert_eq!(m.range().size(), Point::new(3, 3));
        assert_eq!(m.start(), Point::new(0, 0));
        assert_eq!(m.goal(), Point::new(2, 2));
        assert!(m.is_wall(Point::new(1, 0)));
        assert!(m.is_wall(Point::new(1, 1)));
        assert!(!m.is_wall(Point::new(1, 2)));
        assert!(m.is_wall(Point::new(-1, 0)));
        assert!(m.is_wall(Point::new(3, 0)));
    }

    #[test]
    fn solves_walled_grid() {
        let m = GridMap::parse(WALLED).unwrap();
        let outcome = m.solve();
        let path = outcome.path.unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.cost, 4);
        assert_eq!(
            path.nodes,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ]
        );
        assert_eq!(m.render(&path.nodes), "S#.\n*#.\n**G");
    }

    #[test]
    fn sealed_goal_explores_reachable_cells_once() {
        let m = GridMap::parse(
            "
S..#.
...#G
...#.
",
        )
        .unwrap();
        let outcome = m.solve();
        assert!(outcome.path.is_none());
        assert_eq!(outcome.stats.expanded, 9);
    }

    #[test]
    fn open_grid_path_is_manhattan_long() {
        let m = GridMap::new(10, 6, Point::new(1, 1), Point::new(8, 4));
        let path = m.shortest_path().unwrap();
        assert_eq!(path.cost, 10);
        assert_eq!(path.len(), 11);
        // Manhattan is consistent here, so nothing is ever expanded twice.
        assert!(m.solve().stats.expanded <= m.range().len());
    }

    #[test]
    fn diagonal_moves_follow_chebyshev() {
        let start = Point::new(0, 0);
        let goal = Point::new(6, 3);
        let m = GridMap::new(8, 5, start, goal).with_movement(Movement::Diagonal);
        assert_eq!(m.movement(), Movement::Diagonal);
        let path = m.shortest_path().unwrap();
        assert_eq!(path.cost, Cost::from(chebyshev(start, goal)));
        assert_eq!(path.cost, 6);
        for w in path.nodes.windows(2) {
            assert_eq!(chebyshev(w[0], w[1]), 1);
        }
    }

    #[test]
    fn diagonal_moves_slip_between_walls() {
        let mut m = GridMap::parse(
            "
S#.
#..
..G
",
        )
        .unwrap();
        assert!(m.shortest_path().is_none());
        m = m.with_movement(Movement::Diagonal);
        let path = m.shortest_path().unwrap();
        assert_eq!(path.nodes, vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);
        assert_eq!(path.cost, 2);
    }

    #[test]
    fn negative_size_is_empty_maze() {
        let m = GridMap::new(-3, 2, Point::new(0, 0), Point::new(1, 0));
        assert!(m.range().is_empty());
        assert_eq!(m.range().len(), 0);
        assert!(m.is_wall(Point::new(-3, 0)));
        assert!(m.is_wall(Point::new(0, 0)));
        assert_eq!(m.to_string(), "");

        let m = GridMap::new(-3, 2, Point::new(-3, 0), Point::new(-1, 1));
        assert!(m.shortest_path().is_none());
        let m = GridMap::new(4, -1, Point::new(0, -1), Point::new(1, -1));
        assert!(m.shortest_path().is_none());
    }

    #[test]
    fn start_on_goal() {
        let m = GridMap::new(2, 2, Point::new(1, 1), Point::new(1, 1));
        let path = m.shortest_path().unwrap();
        assert_eq!(path.nodes, vec![Point::new(1, 1)]);
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn set_wall_ignores_outside_points() {
        let mut m = GridMap::new(2, 1, Point::new(0, 0), Point::new(1, 0));
        m.set_wall(Point::new(5, 5), true);
        m.set_wall(Point::new(1, 0), true);
        assert!(m.is_wall(Point::new(1, 0)));
        assert!(m.shortest_path().is_none());
        assert_eq!(m.to_string(), "SG");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(GridMap::parse("  \n "), Err(GridError::Empty));
        assert_eq!(
            GridMap::parse("S..\n.G"),
            Err(GridError::Ragged {
                line: 2,
                expected: 3,
                found: 2,
            })
        );
        assert_eq!(
            GridMap::parse("S.x\n..G"),
            Err(GridError::InvalidCell {
                ch: 'x',
                pos: Point::new(2, 0),
            })
        );
        assert_eq!(GridMap::parse("S.."), Err(GridError::MissingMarker('G')));
        assert_eq!(GridMap::parse("..G"), Err(GridError::MissingMarker('S')));
    }

    #[test]
    fn error_display() {
        let err = GridMap::parse("S.x\n..G").unwrap_err();
        assert_eq!(
            err.to_string(),
            "maze contains invalid cell \u{201c}x\u{201d} at (2, 0)"
        );
    }
}
