use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::infra::{AgentId, AgentIdError, Direction, RouteSearch};
use crate::planners::greedy::executor::MoveExecutor;
use crate::planners::greedy::planner_state::Plan;
use crate::state::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplanReason {
    FirstTurn,
    PlanExhausted,
    NoRewardLeft,
}

/// One agent: plans the most rewarding route that fits in the remaining turns
/// and walks it move by move, re-planning when it runs dry.
pub struct Bot {
    agent: Option<AgentId>,
    config: BotConfig,
    plan: Option<Plan>,
    executor: MoveExecutor,
}

impl Bot {
    pub fn new(config: BotConfig) -> Self {
        Self {
            agent: None,
            config,
            plan: None,
            executor: MoveExecutor::new(),
        }
    }

    pub fn with_agent(agent: AgentId, config: BotConfig) -> Self {
        Self {
            agent: Some(agent),
            ..Self::new(config)
        }
    }

    /// Identity handed out by the engine before play: -1 or -2.
    pub fn take_number(&mut self, number: i32) -> Result<(), AgentIdError> {
        let agent = AgentId::try_from(number)?;
        debug!("Assigned identity {:?}", agent);
        self.agent = Some(agent);
        Ok(())
    }

    pub fn agent(&self) -> Option<AgentId> {
        self.agent
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Cell the agent believes it stands on.
    pub fn position(&self, grid: &Grid) -> Option<usize> {
        let agent = self.agent?;
        Some(
            self.plan
                .as_ref()
                .and_then(Plan::current_cell)
                .unwrap_or_else(|| grid.starting_cell(agent)),
        )
    }

    pub fn replan_reason(&self, grid: &Grid, remaining_turns: i32) -> Option<ReplanReason> {
        let Some(plan) = &self.plan else {
            return Some(ReplanReason::FirstTurn);
        };
        if plan.is_exhausted() && remaining_turns > 0 {
            return Some(ReplanReason::PlanExhausted);
        }
        if plan.remaining_reward(grid, self.config.stale_policy) == 0 {
            return Some(ReplanReason::NoRewardLeft);
        }
        None
    }

    /// Move for this turn.
    #[tracing::instrument(level = "trace", skip(self, grid), fields(agent = ?self.agent))]
    pub fn step(&mut self, grid: &Grid, remaining_turns: i32) -> Direction {
        let Some(agent) = self.agent else {
            warn!("Step requested before an identity was assigned");
            return Direction::None;
        };

        if let Some(reason) = self.replan_reason(grid, remaining_turns) {
            self.replan(grid, agent, remaining_turns, reason);
        }

        match self.plan.as_mut() {
            Some(plan) => self.executor.execute(plan, grid, agent.opponent()),
            None => Direction::None,
        }
    }

    fn replan(&mut self, grid: &Grid, agent: AgentId, remaining_turns: i32, reason: ReplanReason) {
        let start = self
            .plan
            .as_ref()
            .and_then(Plan::current_cell)
            .unwrap_or_else(|| grid.starting_cell(agent));

        let route = RouteSearch::best_route(grid, start, remaining_turns);
        debug!(
            ?reason,
            start,
            remaining_turns,
            steps = route.len(),
            reward = route.reward,
            "{:?} re-planned",
            agent
        );
        self.plan = Some(Plan::new(grid, route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StalePolicy;
    use crate::state::WALL;

    fn grid(rows: Vec<Vec<i32>>) -> Grid {
        Grid::try_from_rows(rows).unwrap()
    }

    #[test]
    fn test_step_without_identity_is_none() {
        let mut bot = Bot::new(BotConfig::default());
        assert_eq!(bot.step(&grid(vec![vec![-1, 3]]), 5), Direction::None);
        assert!(bot.plan().is_none());
        assert!(bot.take_number(7).is_err());
        assert!(bot.take_number(-1).is_ok());
        assert_eq!(bot.agent(), Some(AgentId::First));
    }

    #[test]
    fn test_first_turn_plans_from_corner() {
        let mut bot = Bot::with_agent(AgentId::Second, BotConfig::default());
        let g = grid(vec![vec![0, 0, 4], vec![0, 2, -2]]);
        assert_eq!(bot.replan_reason(&g, 6), Some(ReplanReason::FirstTurn));
        assert_eq!(bot.position(&g), Some(5));

        assert_eq!(bot.step(&g, 6), Direction::Up);
        let plan = bot.plan().unwrap();
        assert_eq!(plan.route().start(), Some(5));
        assert_eq!(plan.route().cells, vec![5, 2]);
        assert_eq!(plan.route().reward, 4);
    }

    #[test]
    fn test_walks_route_and_goes_down_around_wall() {
        let mut bot = Bot::with_agent(AgentId::First, BotConfig::default());
        let mut g = grid(vec![vec![-1, WALL], vec![3, 0]]);

        assert_eq!(bot.step(&g, 5), Direction::Down);
        // engine applies the move
        g.set(0, 0);
        g.set(2, -1);
        assert_eq!(bot.position(&g), Some(2));
    }

    #[test]
    fn test_defers_when_opponent_blocks() {
        let mut bot = Bot::with_agent(AgentId::First, BotConfig::default());
        let mut g = grid(vec![vec![-1, 0, 0, 5]]);

        assert_eq!(bot.step(&g, 10), Direction::Right);
        g.set(0, 0);
        g.set(1, -1);

        // turn N: opponent sits on the next destination
        g.set(2, -2);
        assert_eq!(bot.step(&g, 9), Direction::None);
        assert_eq!(bot.plan().unwrap().cursor(), 1);

        // turn N+1: opponent moved away
        g.set(2, 0);
        assert_eq!(bot.step(&g, 8), Direction::Right);
        assert_eq!(bot.plan().unwrap().cursor(), 2);
    }

    #[test]
    fn test_replans_when_plan_exhausted() {
        let mut bot = Bot::with_agent(AgentId::First, BotConfig::default());
        let mut g = grid(vec![vec![-1, 2, 0, 0, 6]]);

        // two turns only reach the 2
        assert_eq!(bot.step(&g, 2), Direction::Right);
        g.set(0, 0);
        g.set(1, -1);
        assert!(bot.plan().unwrap().is_exhausted());

        // more turns appear on the next round (budget reset by the engine)
        assert_eq!(bot.replan_reason(&g, 4), Some(ReplanReason::PlanExhausted));
        assert_eq!(bot.step(&g, 4), Direction::Right);
        let plan = bot.plan().unwrap();
        assert_eq!(plan.route().start(), Some(1));
        assert_eq!(plan.route().end(), Some(4));
    }

    #[test]
    fn test_replans_when_reward_is_gone() {
        let mut bot = Bot::with_agent(AgentId::First, BotConfig::default());
        let mut g = grid(vec![vec![-1, 0, 5], vec![4, WALL, WALL]]);

        assert_eq!(bot.step(&g, 4), Direction::Right);
        g.set(0, 0);
        g.set(1, -1);

        // opponent collected the 5 the route was heading for
        g.set(2, 0);
        assert_eq!(bot.replan_reason(&g, 3), Some(ReplanReason::NoRewardLeft));
        assert_eq!(bot.step(&g, 3), Direction::Left);
        assert_eq!(bot.plan().unwrap().route().start(), Some(1));
    }

    #[test]
    fn test_no_replan_at_end_of_game() {
        let mut bot = Bot::with_agent(AgentId::First, BotConfig::default());
        let mut g = grid(vec![vec![-1, 4]]);
        assert_eq!(bot.step(&g, 1), Direction::Right);
        g.set(0, 0);
        g.set(1, -1);
        // exhausted with zero turns left: only the stale check could fire
        assert_eq!(bot.replan_reason(&g, 0), Some(ReplanReason::NoRewardLeft));
        assert_eq!(bot.step(&g, 0), Direction::None);
        assert!(bot.plan().unwrap().route().is_empty());
    }

    #[test]
    fn test_suffix_policy_ignores_visited_cells() {
        let suffix = BotConfig {
            stale_policy: StalePolicy::RemainingSuffix,
        };
        for (config, expected) in [
            (suffix, Some(ReplanReason::NoRewardLeft)),
            (BotConfig::default(), None),
        ] {
            let mut bot = Bot::with_agent(AgentId::First, config);
            let mut g = grid(vec![vec![-1, 0, 0, 5]]);
            assert_eq!(bot.step(&g, 3), Direction::Right);
            g.set(1, -1);
            // a reward respawned behind the agent and the 5 is gone
            g.set(0, 9);
            g.set(3, 0);
            assert_eq!(bot.replan_reason(&g, 2), expected, "{:?}", config);
        }
    }
}
