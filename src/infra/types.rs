use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn distance(&self, other: &Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn step(&self, direction: Direction) -> Position {
        let (d_row, d_col) = direction.delta();
        Position::new(self.row + d_row, self.col + d_col)
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.distance(other) == 1
    }
}

/// Single-step command handed back to the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Directions that actually move, in the order neighbors are probed.
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// (row, col) delta of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    pub fn as_str_name(self) -> &'static str {
        match self {
            Direction::None => "NONE",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

/// Identity of one of the two agents sharing the maze. The numeric value doubles
/// as the sentinel marking the agent's cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    First,
    Second,
}

impl AgentId {
    pub fn sentinel(self) -> i32 {
        match self {
            AgentId::First => -1,
            AgentId::Second => -2,
        }
    }

    pub fn opponent(self) -> AgentId {
        match self {
            AgentId::First => AgentId::Second,
            AgentId::Second => AgentId::First,
        }
    }

    pub fn from_sentinel(value: i32) -> Option<AgentId> {
        match value {
            -1 => Some(AgentId::First),
            -2 => Some(AgentId::Second),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentIdError {
    pub number: i32,
}

impl fmt::Display for AgentIdError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "Invalid agent number {} (expected -1 or -2)",
            self.number
        )
    }
}

impl Error for AgentIdError {}

impl TryFrom<i32> for AgentId {
    type Error = AgentIdError;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        AgentId::from_sentinel(number).ok_or(AgentIdError { number })
    }
}
