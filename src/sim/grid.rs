//! Brick grid
//!
//! Row-major R×C matrix. Row 0 is the top row and is worth the most.

use glam::Vec2;
use rand::Rng;

use crate::config::{BrickConfig, Rgba};

/// Brick status; `Destroyed` is terminal until the next rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BrickStatus,
    pub points: u32,
    pub color: Rgba,
    /// Glow animation offset (radians)
    pub pulse: f32,
}

impl Brick {
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict point-in-rectangle test (edges excluded)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }
}

/// Points for a row: `(rows - row) * 10`
pub fn row_points(rows: usize, row: usize) -> u32 {
    (rows.saturating_sub(row) * 10) as u32
}

/// The brick matrix
#[derive(Debug, Clone)]
pub struct BrickGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Brick>,
}

impl BrickGrid {
    pub fn new(config: &BrickConfig, rng: &mut impl Rng) -> Self {
        let mut grid = Self {
            rows: 0,
            columns: 0,
            cells: Vec::new(),
        };
        grid.rebuild(config, rng);
        grid
    }

    /// Discard every cell and lay out a fresh, fully active grid
    pub fn rebuild(&mut self, config: &BrickConfig, rng: &mut impl Rng) {
        self.rows = config.rows;
        self.columns = config.columns;
        self.cells.clear();
        self.cells.reserve(config.rows * config.columns);

        let size = Vec2::new(config.width, config.height);
        for row in 0..config.rows {
            let color = if config.palette.is_empty() {
                Rgba::WHITE
            } else {
                config.palette[row % config.palette.len()]
            };
            for col in 0..config.columns {
                let pos = Vec2::new(
                    col as f32 * (config.width + config.padding) + config.offset_left,
                    row as f32 * (config.height + config.padding) + config.offset_top,
                );
                self.cells.push(Brick {
                    row,
                    col,
                    pos,
                    size,
                    status: BrickStatus::Active,
                    points: row_points(config.rows, row),
                    color,
                    pulse: rng.random_range(0.0..std::f32::consts::TAU),
                });
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn status(&self, row: usize, col: usize) -> Option<BrickStatus> {
        self.get(row, col).map(|b| b.status)
    }

    /// Mark a brick destroyed; returns its points if it was active
    pub fn destroy(&mut self, row: usize, col: usize) -> Option<u32> {
        let i = self.index(row, col)?;
        let brick = &mut self.cells[i];
        if brick.is_active() {
            brick.status = BrickStatus::Destroyed;
            Some(brick.points)
        } else {
            None
        }
    }

    /// First active brick (row-major) whose interior contains `point`
    pub fn hit_test(&self, point: Vec2) -> Option<&Brick> {
        self.cells.iter().find(|b| b.is_active() && b.contains(point))
    }

    /// Victory predicate: every brick destroyed
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|b| !b.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_active()).count()
    }

    /// All bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grid() -> BrickGrid {
        BrickGrid::new(&BrickConfig::default(), &mut Pcg32::seed_from_u64(1))
    }

    #[test]
    fn test_layout() {
        let grid = grid();
        assert_eq!(grid.iter().count(), 45);
        let first = grid.get(0, 0).unwrap();
        assert_eq!(first.pos, Vec2::new(35.0, 80.0));
        let last = grid.get(4, 8).unwrap();
        assert_eq!(last.pos, Vec2::new(8.0 * 80.0 + 35.0, 4.0 * 35.0 + 80.0));
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 9).is_none());
    }

    #[test]
    fn test_row_points() {
        assert_eq!(row_points(5, 0), 50);
        assert_eq!(row_points(5, 4), 10);
        let grid = grid();
        for brick in grid.iter() {
            assert_eq!(brick.points, ((5 - brick.row) * 10) as u32);
        }
    }

    #[test]
    fn test_palette_by_row_wraps() {
        let config = BrickConfig {
            rows: 7,
            ..Default::default()
        };
        let grid = BrickGrid::new(&config, &mut Pcg32::seed_from_u64(1));
        assert_eq!(grid.get(0, 3).unwrap().color, config.palette[0]);
        assert_eq!(grid.get(4, 0).unwrap().color, config.palette[4]);
        assert_eq!(grid.get(5, 0).unwrap().color, config.palette[0]);
        assert_eq!(grid.get(6, 0).unwrap().color, config.palette[1]);
    }

    #[test]
    fn test_pulse_in_range() {
        for brick in grid().iter() {
            assert!((0.0..std::f32::consts::TAU).contains(&brick.pulse));
        }
    }

    #[test]
    fn test_destroy_is_terminal() {
        let mut grid = grid();
        assert_eq!(grid.destroy(0, 0), Some(50));
        assert_eq!(grid.status(0, 0), Some(BrickStatus::Destroyed));
        assert_eq!(grid.destroy(0, 0), None);
        assert_eq!(grid.destroy(9, 9), None);
        assert_eq!(grid.active_count(), 44);
    }

    #[test]
    fn test_victory_needs_every_brick() {
        let mut grid = grid();
        for row in 0..5 {
            for col in 0..9 {
                if (row, col) != (2, 4) {
                    grid.destroy(row, col);
                }
            }
        }
        assert!(!grid.is_cleared());
        grid.destroy(2, 4);
        assert!(grid.is_cleared());
    }

    #[test]
    fn test_hit_test_strict_center() {
        let mut grid = grid();
        let brick = grid.get(1, 2).unwrap().clone();
        assert_eq!(
            grid.hit_test(brick.center()).map(|b| (b.row, b.col)),
            Some((1, 2))
        );
        // Edge is outside, and so is the padding between bricks
        assert!(grid.hit_test(brick.pos).is_none());
        assert!(grid.hit_test(brick.pos - Vec2::new(5.0, 0.0)).is_none());

        grid.destroy(1, 2);
        assert!(grid.hit_test(brick.center()).is_none());
    }

    #[test]
    fn test_rebuild_overwrites() {
        let mut grid = grid();
        for row in 0..5 {
            for col in 0..9 {
                grid.destroy(row, col);
            }
        }
        assert!(grid.is_cleared());

        let smaller = BrickConfig {
            rows: 2,
            columns: 3,
            ..Default::default()
        };
        grid.rebuild(&smaller, &mut Pcg32::seed_from_u64(2));
        assert_eq!(grid.iter().count(), 6);
        assert_eq!(grid.active_count(), 6);
        assert_eq!(grid.get(0, 0).unwrap().points, 20);
        assert!(grid.get(2, 0).is_none());
    }
}
