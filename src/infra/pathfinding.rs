use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::infra::graph::Graph;
use crate::state::Grid;

#[derive(Clone, Eq, PartialEq)]
struct Node {
    cell: usize,
    reward: i32,
    order: usize, // Insertion sequence, earlier wins ties
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.reward
            .cmp(&other.reward)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one search: every reached cell with the predecessor that first
/// reached it (`None` for the start) and the reward accumulated on the way.
#[derive(Debug, Clone)]
pub struct SearchState {
    start: usize,
    came_from: HashMap<usize, Option<usize>>,
    accumulated: HashMap<usize, i32>,
}

impl SearchState {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn is_reached(&self, cell: usize) -> bool {
        self.came_from.contains_key(&cell)
    }

    pub fn predecessor(&self, cell: usize) -> Option<usize> {
        self.came_from.get(&cell).copied().flatten()
    }

    pub fn accumulated(&self, cell: usize) -> Option<i32> {
        self.accumulated.get(&cell).copied()
    }

    /// Reached cells in ascending index order.
    pub fn reached(&self) -> Vec<usize> {
        let mut cells: Vec<usize> = self.came_from.keys().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Cells from the start to `cell`, or `None` if `cell` was never reached.
    pub fn path_to(&self, cell: usize) -> Option<Vec<usize>> {
        if !self.is_reached(cell) {
            return None;
        }
        let mut path = vec![cell];
        let mut current = cell;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Ordered cells from start to endpoint plus the reward collected on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub cells: Vec<usize>,
    pub reward: i32,
}

impl Route {
    pub fn singleton(start: usize) -> Self {
        Self {
            cells: vec![start],
            reward: 0,
        }
    }

    /// Reward of `cells` on `grid`, the start cell excluded.
    pub fn from_cells(grid: &Grid, cells: Vec<usize>) -> Self {
        let reward = cells.iter().skip(1).map(|&c| grid.reward(c)).sum();
        Self { cells, reward }
    }

    /// Number of steps, one turn each.
    pub fn len(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<usize> {
        self.cells.last().copied()
    }
}

pub struct RouteSearch;

impl RouteSearch {
    /// Label-setting search from `start`. A cell is settled the first time a
    /// valid edge reaches it from the frontier cell with the highest
    /// accumulated reward.
    #[tracing::instrument(level = "trace", skip(graph))]
    pub fn run(graph: &Graph, start: usize) -> SearchState {
        let mut frontier = BinaryHeap::new();
        let mut came_from: HashMap<usize, Option<usize>> = HashMap::new();
        let mut accumulated: HashMap<usize, i32> = HashMap::new();
        let mut order = 0;

        // the start pairs with itself at zero cost
        let seed = graph.edge(start, start).reward().unwrap_or_default();
        came_from.insert(start, None);
        accumulated.insert(start, seed);
        frontier.push(Node {
            cell: start,
            reward: seed,
            order,
        });

        let mut expansions = 0;
        while let Some(Node { cell: current, reward, .. }) = frontier.pop() {
            expansions += 1;
            for &(neighbor, weight) in graph.edges(current) {
                if came_from.contains_key(&neighbor) || !weight.is_valid() {
                    continue;
                }
                let next_reward = reward + weight.value();
                came_from.insert(neighbor, Some(current));
                accumulated.insert(neighbor, next_reward);
                order += 1;
                frontier.push(Node {
                    cell: neighbor,
                    reward: next_reward,
                    order,
                });
            }
        }

        tracing::trace!(expansions, reached = came_from.len(), "Search drained");
        SearchState {
            start,
            came_from,
            accumulated,
        }
    }

    /// Best route from `start` whose length fits in `budget` turns: highest
    /// reward, then fewest steps, then lowest endpoint index.
    pub fn best_route(grid: &Grid, start: usize, budget: i32) -> Route {
        let graph = Graph::build(grid);
        let state = Self::run(&graph, start);
        Self::select_endpoint(grid, &state, budget)
    }

    pub fn select_endpoint(grid: &Grid, state: &SearchState, budget: i32) -> Route {
        let budget = budget.max(0) as usize;
        let mut best = Route::singleton(state.start());

        for cell in state.reached() {
            let Some(path) = state.path_to(cell) else {
                continue;
            };
            let candidate = Route::from_cells(grid, path);
            if candidate.len() > budget {
                continue;
            }
            let better = candidate.reward > best.reward
                || (candidate.reward == best.reward && candidate.len() < best.len());
            if better {
                best = candidate;
            }
        }

        tracing::debug!(
            start = state.start(),
            end = ?best.end(),
            steps = best.len(),
            reward = best.reward,
            "Route selected"
        );
        best
    }
}
