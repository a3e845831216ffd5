//! Monte Carlo Tree Search (MCTS) with UCB1 selection.
//!
//! Each simulation runs four phases:
//! - Selection: descend through fully expanded nodes by UCB1
//! - Expansion: add one child for an untried move
//! - Simulation: a uniform random playout to the end of the game
//! - Backpropagation: update visits and signed wins up to the root
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and refer to each other by
//! index, so the parent link never owns anything. A fresh tree is built
//! for every decision and dropped afterwards.

use fastrand::Rng;

use crate::board::Color;
use crate::constants::UCB_C;
use crate::playout::mcplayout;
use crate::position::{GameState, Move};

/// Index of a node in the search tree arena.
pub type NodeId = usize;

/// A node in the MCTS search tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The game position at this node
    pub pos: GameState,
    /// Parent node (None at the root)
    pub parent: Option<NodeId>,
    /// Move that led here from the parent (None at the root)
    pub mv: Option<Move>,
    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,
    /// Number of visits
    pub v: u32,
    /// Signed win total (winrate = w/v)
    pub w: f64,
    /// Legal moves not yet expanded
    pub untried: Vec<Move>,
}

impl TreeNode {
    fn new(pos: GameState, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        Self {
            untried: pos.legal_moves(),
            pos,
            parent,
            mv,
            children: Vec::new(),
            v: 0,
            w: 0.0,
        }
    }

    /// Mean signed reward for this node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.v > 0 {
            self.w / self.v as f64
        } else {
            0.0
        }
    }
}

/// Arena-backed search tree. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
}

pub const ROOT: NodeId = 0;

impl SearchTree {
    pub fn new(pos: &GameState) -> Self {
        Self {
            nodes: vec![TreeNode::new(*pos, None, None)],
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    fn add_child(&mut self, parent: NodeId, pos: GameState, mv: Move) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode::new(pos, Some(parent), Some(mv)));
        self.nodes[parent].children.push(id);
        id
    }

    /// UCB1 score of `id` under its parent. Unvisited nodes score infinity.
    fn ucb1(&self, id: NodeId) -> f64 {
        let node = &self.nodes[id];
        if node.v == 0 {
            return f64::INFINITY;
        }
        let parent_v = node.parent.map_or(node.v, |p| self.nodes[p].v);
        let v = node.v as f64;
        node.w / v + UCB_C * ((parent_v as f64).ln() / v).sqrt()
    }

    /// Child with the highest UCB1 score; the first one wins ties.
    fn most_urgent(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.nodes[id].children {
            let score = self.ucb1(child);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Descend from the root through fully expanded nodes.
    fn tree_descend(&self) -> NodeId {
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id];
            if !node.untried.is_empty() || node.children.is_empty() {
                return id;
            }
            match self.most_urgent(id) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Expand one untried move of `id`, returning the new child.
    /// Returns `id` itself when nothing is left to expand.
    fn expand(&mut self, id: NodeId) -> NodeId {
        let Some(mv) = self.nodes[id].untried.pop() else {
            return id;
        };
        let mut child_pos = self.nodes[id].pos;
        if child_pos.apply_move(mv).is_err() {
            return id;
        }
        self.add_child(id, child_pos, mv)
    }

    /// Propagate a playout result (+1 Dark win, -1 Light win, 0 draw) from
    /// `id` up to the root inclusive.
    ///
    /// Each node is credited from the side that moved into it: positive
    /// when Light is to move there (Dark just moved), negative otherwise.
    fn tree_update(&mut self, id: NodeId, result: i32) {
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = &mut self.nodes[n];
            let perspective = match node.pos.to_move() {
                Color::Light => 1,
                Color::Dark => -1,
            };
            node.v += 1;
            node.w += f64::from(perspective * result);
            cur = node.parent;
        }
    }

    /// Run one selection/expansion/simulation/backpropagation cycle.
    pub fn simulate(&mut self, rng: &mut Rng) {
        let leaf = self.tree_descend();
        let leaf = self.expand(leaf);
        let mut pos = self.nodes[leaf].pos;
        let outcome = mcplayout(&mut pos, rng);
        self.tree_update(leaf, outcome.signed());
    }

    /// Move of the most visited root child; the first one wins ties.
    pub fn best_move(&self) -> Option<Move> {
        let mut best: Option<&TreeNode> = None;
        for &child in &self.root().children {
            let node = &self.nodes[child];
            if best.is_none_or(|b| node.v > b.v) {
                best = Some(node);
            }
        }
        best.and_then(|node| node.mv)
    }
}

/// Run MCTS from `pos` for `iterations` simulations and return the most
/// visited move.
///
/// Returns `None` when the side to move has no legal moves.
pub fn tree_search(pos: &GameState, iterations: usize, rng: &mut Rng) -> Option<Move> {
    let mut tree = SearchTree::new(pos);
    for _ in 0..iterations {
        tree.simulate(rng);
    }
    tree.best_move()
}

/// A fixed-budget MCTS searcher with its own random source.
#[derive(Debug, Clone)]
pub struct Mcts {
    pub iterations: usize,
    rng: Rng,
}

impl Mcts {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            rng: Rng::new(),
        }
    }

    pub fn with_seed(iterations: usize, seed: u64) -> Self {
        Self {
            iterations,
            rng: Rng::with_seed(seed),
        }
    }

    pub fn search(&mut self, pos: &GameState) -> Option<Move> {
        self.search_tree(pos).best_move()
    }

    /// Search and keep the tree for inspection.
    pub fn search_tree(&mut self, pos: &GameState) -> SearchTree {
        let mut tree = SearchTree::new(pos);
        for _ in 0..self.iterations {
            tree.simulate(&mut self.rng);
        }
        tree
    }
}

/// Print debug information about the root's children.
pub fn dump_children(tree: &SearchTree) {
    for &child in &tree.root().children {
        let node = tree.node(child);
        if let Some(mv) = node.mv {
            eprintln!("move {} v={} w={} wr={:.3}", mv, node.v, node.w, node.winrate());
        }
    }
}
