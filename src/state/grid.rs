use std::error::Error;
use std::fmt;

use crate::infra::{AgentId, Direction, Position};

/// Raw value the engine uses for a wall.
pub const WALL: i32 = -16;

/// Classified view of one raw grid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open(i32),
    Wall,
    Occupied(AgentId),
}

impl Cell {
    pub fn classify(value: i32) -> Cell {
        if value >= 0 {
            return Cell::Open(value);
        }
        match AgentId::from_sentinel(value) {
            Some(agent) => Cell::Occupied(agent),
            // WALL and any unknown negative value are not traversable
            None => Cell::Wall,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Cell::Open(_))
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// Reward collected by stepping onto this cell.
    pub fn reward(self) -> i32 {
        match self {
            Cell::Open(reward) => reward,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    TooSmall {
        cells: usize,
    },
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidValue {
        row: usize,
        token: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::Empty => write!(formatter, "Grid has no cells"),
            GridError::TooSmall { cells } => {
                write!(formatter, "Grid has {} cell(s), two agents need at least 2", cells)
            }
            GridError::Ragged {
                row,
                expected,
                found,
            } => write!(
                formatter,
                "Row {} has {} cells, expected {}",
                row, found, expected
            ),
            GridError::InvalidValue { row, token } => {
                write!(formatter, "Row {} contains invalid value '{}'", row, token)
            }
        }
    }
}

impl Error for GridError {}

/// Snapshot of the maze as supplied by the engine, stored row-major.
///
/// Cell indices follow `index = col + width * row`; the inverse uses the
/// width for both the division and the modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    values: Vec<i32>,
}

impl Grid {
    pub fn filled(width: i32, height: i32, value: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            values: vec![value; len],
        }
    }

    /// Build from `rows[row][col]`. Every row must have the same length.
    pub fn try_from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        let height = rows.len();
        Ok(Self {
            width: width as i32,
            height: height as i32,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse whitespace separated integers, one grid row per non-empty line.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = rows.len();
            let cells = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<i32>().map_err(|_| GridError::InvalidValue {
                        row,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
        Self::try_from_rows(rows)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.row >= 0 && pos.row < self.height && pos.col >= 0 && pos.col < self.width
    }

    pub fn index(&self, pos: &Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some((pos.col + self.width * pos.row) as usize)
    }

    pub fn position(&self, index: usize) -> Position {
        let index = index as i32;
        Position::new(index / self.width, index % self.width)
    }

    pub fn value(&self, index: usize) -> i32 {
        self.values[index]
    }

    pub fn set(&mut self, index: usize, value: i32) {
        self.values[index] = value;
    }

    pub fn cell(&self, index: usize) -> Cell {
        Cell::classify(self.values[index])
    }

    pub fn reward(&self, index: usize) -> i32 {
        self.cell(index).reward()
    }

    /// In-bounds neighbor one step away; never wraps around an edge.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if direction == Direction::None {
            return None;
        }
        self.index(&self.position(index).step(direction))
    }

    /// In-bounds axis neighbors, ordered by ascending cell index.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::MOVES
            .into_iter()
            .filter_map(move |direction| self.neighbor(index, direction).map(|n| (direction, n)))
    }

    pub fn find_agent(&self, agent: AgentId) -> Option<usize> {
        self.values.iter().position(|&v| v == agent.sentinel())
    }

    pub fn is_occupied_by(&self, index: usize, agent: AgentId) -> bool {
        self.cell(index) == Cell::Occupied(agent)
    }

    /// Start cell for each agent: agent one takes the first corner, agent two the last.
    pub fn starting_cell(&self, agent: AgentId) -> usize {
        match agent {
            AgentId::First => 0,
            AgentId::Second => self.len().saturating_sub(1),
        }
    }

    pub fn total_reward(&self) -> i32 {
        (0..self.len()).map(|i| self.reward(i)).sum()
    }

    pub fn draw_ascii(&self) -> String {
        let mut out = String::with_capacity(self.len() * 2 + self.height as usize);
        for index in 0..self.len() {
            let symbol = match self.cell(index) {
                Cell::Wall => '#',
                Cell::Occupied(AgentId::First) => '1',
                Cell::Occupied(AgentId::Second) => '2',
                Cell::Open(0) => '.',
                Cell::Open(reward) if reward < 10 => {
                    char::from_digit(reward as u32, 10).unwrap_or('+')
                }
                Cell::Open(_) => '+',
            };
            out.push(symbol);
            if (index as i32 + 1) % self.width == 0 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out
    }
}
