use crate::infra::AgentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub agent: AgentId,
    pub position: usize,
    pub score: i32,
    /// Moves the engine refused (wall or occupied destination)
    pub blocked_moves: u32,
    pub waits: u32,
}

impl PlayerState {
    pub fn new(agent: AgentId, position: usize) -> Self {
        Self {
            agent,
            position,
            score: 0,
            blocked_moves: 0,
            waits: 0,
        }
    }
}
