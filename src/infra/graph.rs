use crate::state::Grid;

/// Weight of a directed edge: the reward of the destination cell, or invalid
/// when the destination can't be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeight {
    Valid(i32),
    Invalid,
}

impl EdgeWeight {
    /// Numeric form; invalid edges report -1 which no reward can take.
    pub fn value(self) -> i32 {
        match self {
            EdgeWeight::Valid(reward) => reward,
            EdgeWeight::Invalid => -1,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, EdgeWeight::Valid(_))
    }
}

/// Relation between an ordered pair of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// A cell paired with itself, reached at zero cost.
    SelfLoop,
    Weighted(EdgeWeight),
    Absent,
}

impl Edge {
    /// Reward gained by following the edge, `None` when it can't be followed.
    pub fn reward(self) -> Option<i32> {
        match self {
            Edge::SelfLoop => Some(0),
            Edge::Weighted(EdgeWeight::Valid(reward)) => Some(reward),
            Edge::Weighted(EdgeWeight::Invalid) | Edge::Absent => None,
        }
    }
}

/// Directed adjacency over the grid cells.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<(usize, EdgeWeight)>>,
}

impl Graph {
    #[tracing::instrument(level = "trace", skip(grid), fields(width = grid.width, height = grid.height))]
    pub fn build(grid: &Grid) -> Self {
        let mut adjacency = vec![Vec::new(); grid.len()];

        for (from, edges) in adjacency.iter_mut().enumerate() {
            if grid.cell(from).is_wall() {
                continue;
            }
            for (_, to) in grid.neighbors(from) {
                let cell = grid.cell(to);
                let weight = if cell.is_open() {
                    EdgeWeight::Valid(cell.reward())
                } else {
                    EdgeWeight::Invalid
                };
                edges.push((to, weight));
            }
        }

        let graph = Self { adjacency };
        tracing::trace!(edges = graph.edge_count(), "Graph built");
        graph
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Outgoing edges of `from`, by ascending destination index.
    pub fn edges(&self, from: usize) -> &[(usize, EdgeWeight)] {
        self.adjacency.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge(&self, from: usize, to: usize) -> Edge {
        if from == to {
            return Edge::SelfLoop;
        }
        self.edges(from)
            .iter()
            .find(|(dest, _)| *dest == to)
            .map(|&(_, weight)| Edge::Weighted(weight))
            .unwrap_or(Edge::Absent)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WALL;

    fn grid(rows: Vec<Vec<i32>>) -> Grid {
        Grid::try_from_rows(rows).unwrap()
    }

    #[test]
    fn test_edge_weight_is_destination_reward() {
        let graph = Graph::build(&grid(vec![vec![1, 4], vec![2, 8]]));

        assert_eq!(graph.edge(0, 1), Edge::Weighted(EdgeWeight::Valid(4)));
        assert_eq!(graph.edge(1, 0), Edge::Weighted(EdgeWeight::Valid(1)));
        assert_eq!(graph.edge(0, 2), Edge::Weighted(EdgeWeight::Valid(2)));
        assert_eq!(graph.edge(2, 3), Edge::Weighted(EdgeWeight::Valid(8)));
        // diagonal
        assert_eq!(graph.edge(0, 3), Edge::Absent);
        assert_eq!(graph.edge(3, 3), Edge::SelfLoop);
    }

    #[test]
    fn test_edge_reward() {
        let graph = Graph::build(&grid(vec![vec![6, WALL], vec![2, 0]]));

        assert_eq!(graph.edge(0, 0).reward(), Some(0));
        assert_eq!(graph.edge(1, 1).reward(), Some(0));
        assert_eq!(graph.edge(0, 2).reward(), Some(2));
        assert_eq!(graph.edge(2, 0).reward(), Some(6));
        assert_eq!(graph.edge(0, 1).reward(), None);
        assert_eq!(graph.edge(0, 3).reward(), None);
    }

    #[test]
    fn test_walls_have_no_valid_edges() {
        let graph = Graph::build(&grid(vec![vec![0, WALL, 3]]));

        assert!(graph.edges(1).is_empty(), "Wall should have no outgoing edges");
        assert_eq!(graph.edge(0, 1), Edge::Weighted(EdgeWeight::Invalid));
        assert_eq!(graph.edge(2, 1), Edge::Weighted(EdgeWeight::Invalid));
        assert_eq!(EdgeWeight::Invalid.value(), -1);
    }

    #[test]
    fn test_occupied_cells_are_not_enterable() {
        let graph = Graph::build(&grid(vec![vec![-1, 5, -2]]));

        assert_eq!(graph.edge(1, 0), Edge::Weighted(EdgeWeight::Invalid));
        assert_eq!(graph.edge(1, 2), Edge::Weighted(EdgeWeight::Invalid));
        // an occupied cell can still be left
        assert_eq!(graph.edge(0, 1), Edge::Weighted(EdgeWeight::Valid(5)));
    }

    #[test]
    fn test_edge_count_bounded() {
        let graph = Graph::build(&Grid::filled(4, 3, 1));
        // interior pairs: horizontal 3*3, vertical 4*2, both directions
        assert_eq!(graph.edge_count(), 2 * (9 + 8));
        assert!(graph.edge_count() <= 4 * 12);

        for from in 0..graph.len() {
            let dests: Vec<usize> = graph.edges(from).iter().map(|(d, _)| *d).collect();
            let mut sorted = dests.clone();
            sorted.sort();
            assert_eq!(dests, sorted, "Edges of {} not ordered", from);
        }
    }
}
