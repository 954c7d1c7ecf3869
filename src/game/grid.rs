//! Grid storage for the dungeon plus the bounded-retry placement sampler.
//!
//! Cells are stored row-major (`y * w + x`). Positions handed to [`Grid::get`]
//! and [`Grid::set`] must be in bounds; [`Grid::step`] is the only place that
//! produces new positions and it clamps.

use log::trace;
use rand::Rng;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Floor,
    Wall,
    Treasure,
    Trap,
    Heal,
    Exit,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Floor => '.',
            Cell::Wall => '#',
            Cell::Treasure => 'T',
            Cell::Trap => 'X',
            Cell::Heal => '+',
            Cell::Exit => 'E',
        }
    }

    pub fn from_glyph(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Floor),
            '#' => Some(Cell::Wall),
            'T' => Some(Cell::Treasure),
            'X' => Some(Cell::Trap),
            '+' => Some(Cell::Heal),
            'E' => Some(Cell::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (dx, dy) with y growing downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Outcome of a bounded-retry placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed(Pos),
    Exhausted,
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    w: usize,
    h: usize,
    cells: Vec<Cell>, // row-major h*w
}

impl Grid {
    pub fn new(w: usize, h: usize, fill: Cell) -> Self {
        Grid {
            w,
            h,
            cells: vec![fill; w * h],
        }
    }

    /// Floor everywhere, walls on the border ring.
    pub fn walled(w: usize, h: usize) -> Self {
        let mut grid = Grid::new(w, h, Cell::Floor);
        for x in 0..w {
            grid.set(Pos::new(x, 0), Cell::Wall);
            grid.set(Pos::new(x, h - 1), Cell::Wall);
        }
        for y in 0..h {
            grid.set(Pos::new(0, y), Cell::Wall);
            grid.set(Pos::new(w - 1, y), Cell::Wall);
        }
        grid
    }

    /// Build a grid from ASCII rows using the cell glyphs. `@` marks the player and is
    /// stored as floor; its position is returned alongside the grid.
    ///
    /// Returns `None` for ragged or empty input, unknown glyphs, or a missing/duplicate `@`.
    pub fn parse(layout: &str) -> Option<(Grid, Pos)> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let h = rows.len();
        let w = rows.first()?.chars().count();
        if w == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(w * h);
        let mut player = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != w {
                return None;
            }
            for (x, c) in row.chars().enumerate() {
                if c == '@' {
                    if player.is_some() {
                        return None;
                    }
                    player = Some(Pos::new(x, y));
                    cells.push(Cell::Floor);
                } else {
                    cells.push(Cell::from_glyph(c)?);
                }
            }
        }
        Some((Grid { w, h, cells }, player?))
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.y * self.w + pos.x
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.w && pos.y < self.h
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.idx(pos)]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let i = self.idx(pos);
        self.cells[i] = cell;
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x + 1 == self.w || pos.y + 1 == self.h
    }

    /// Every position on the outer ring, each listed once.
    pub fn border(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.h)
            .flat_map(move |y| (0..self.w).map(move |x| Pos::new(x, y)))
            .filter(move |p| self.is_border(*p))
    }

    /// Neighbour of `from` in `dir`, clamped to the grid.
    pub fn step(&self, from: Pos, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        let nx = (from.x as isize + dx).clamp(0, self.w as isize - 1);
        let ny = (from.y as isize + dy).clamp(0, self.h as isize - 1);
        Pos::new(nx as usize, ny as usize)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.w)
    }

    /// Scatter up to `count` copies of `cell` over floor cells anywhere on the grid,
    /// skipping `forbidden`. Gives up after `max_tries` random picks; returns how many
    /// were placed.
    pub fn scatter<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        cell: Cell,
        count: usize,
        forbidden: &HashSet<Pos>,
        max_tries: usize,
    ) -> usize {
        let mut placed = 0;
        let mut tries = 0;
        while placed < count && tries < max_tries {
            tries += 1;
            let pos = Pos::new(rng.gen_range(0..self.w), rng.gen_range(0..self.h));
            if forbidden.contains(&pos) || self.get(pos) != Cell::Floor {
                continue;
            }
            self.set(pos, cell);
            placed += 1;
        }
        trace!(
            "scatter {:?}: placed {}/{} after {} tries",
            cell,
            placed,
            count,
            tries
        );
        placed
    }

    /// Put `cell` on a random interior floor cell other than `avoid`, sampling at most
    /// `attempts` times.
    pub fn place_on_floor<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        cell: Cell,
        avoid: Pos,
        attempts: usize,
    ) -> Placement {
        if self.w < 3 || self.h < 3 {
            return Placement::Exhausted;
        }
        for _ in 0..attempts {
            let pos = Pos::new(rng.gen_range(1..self.w - 1), rng.gen_range(1..self.h - 1));
            if pos == avoid {
                continue;
            }
            if self.get(pos) == Cell::Floor {
                self.set(pos, cell);
                return Placement::Placed(pos);
            }
        }
        Placement::Exhausted
    }
}
