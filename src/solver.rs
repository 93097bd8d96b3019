use crate::level::{ALL_DIRECTIONS, Direction, Level};
use crate::zobrist::Zobrist;
use arrayvec::ArrayVec;
use log::{debug, warn};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Shortest sequence of player moves completing the level.
    Solved(Vec<Direction>),
    /// The node budget ran out before a solution was found.
    Cutoff,
    /// Every reachable state was explored without completing the level.
    Impossible,
}

struct Node {
    parent: usize,
    direction: Direction,
}

/// Breadth-first search over player moves.
pub struct Solver {
    max_nodes: usize,
    nodes_explored: usize,
}

impl Solver {
    pub fn new(max_nodes: usize) -> Self {
        Solver {
            max_nodes,
            nodes_explored: 0,
        }
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    pub fn solve(&mut self, level: &Level) -> SolveResult {
        self.nodes_explored = 0;

        if level.completed() {
            return SolveResult::Solved(Vec::new());
        }

        let zobrist = Zobrist::for_level(level);
        let mut seen = HashSet::new();
        seen.insert(zobrist.compute_hash(level));

        // Node 0 is the root; its parent/direction are never read.
        let mut nodes = vec![Node {
            parent: 0,
            direction: Direction::Up,
        }];
        let mut queue = VecDeque::new();
        queue.push_back((0usize, level.clone()));

        while let Some((node_idx, state)) = queue.pop_front() {
            self.nodes_explored += 1;
            if self.nodes_explored > self.max_nodes {
                warn!(
                    "Solver gave up after {} nodes ({} states seen)",
                    self.max_nodes,
                    seen.len()
                );
                return SolveResult::Cutoff;
            }

            for (direction, next) in Self::successors(&state) {
                if !seen.insert(zobrist.compute_hash(&next)) {
                    continue;
                }

                nodes.push(Node {
                    parent: node_idx,
                    direction,
                });
                let next_idx = nodes.len() - 1;

                if next.completed() {
                    let solution = Self::path(&nodes, next_idx);
                    debug!(
                        "Solved in {} moves after {} nodes",
                        solution.len(),
                        self.nodes_explored
                    );
                    return SolveResult::Solved(solution);
                }
                queue.push_back((next_idx, next));
            }
        }

        SolveResult::Impossible
    }

    /// Every state one legal move away.
    fn successors(level: &Level) -> ArrayVec<(Direction, Level), 4> {
        let mut result = ArrayVec::new();
        for direction in ALL_DIRECTIONS {
            let mut next = level.clone();
            if next.step(direction).changed() {
                result.push((direction, next));
            }
        }
        result
    }

    fn path(nodes: &[Node], mut idx: usize) -> Vec<Direction> {
        let mut path = Vec::new();
        while idx != 0 {
            path.push(nodes[idx].direction);
            idx = nodes[idx].parent;
        }
        path.reverse();
        path
    }
}
