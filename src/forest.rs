//! Link Cut Tree over node costs, built from path-trees glued by successor references.

use crate::path_tree::{Cost, Idx, PathTrees, EMPTY};

pub type Node = Idx;

/// Interface of a dynamic forest of rooted trees with costs on the nodes.
/// Nodes are `1..=capacity()`, each starts as its own tree with cost 0.
/// Operations panic if a node doesn't exist or a precondition is broken.
pub trait DynamicForest<C: Cost = i64> {
    /// Create a new forest with n singleton trees.
    fn new(n: usize) -> Self;
    fn capacity(&self) -> usize;
    /// Grows the node domain to `1..=n`, keeping all trees and costs.
    fn expand(&mut self, n: usize);
    /// Adds c to the cost of every node on the path from u to the root of its tree.
    fn add_cost(&mut self, u: Node, c: C);
    /// Minimum cost node on the path from u to its root, and its cost. Ties favor the node
    /// nearest the root.
    fn find_cost(&mut self, u: Node) -> (Node, C);
    /// Returns the root of the tree containing u.
    fn find_root(&mut self, u: Node) -> Node;
    /// Hangs the tree rooted at t below u. Panics if t is not a root or both are in the same tree.
    fn link(&mut self, t: Node, u: Node);
    /// Removes the edge from u to its parent. Panics if u is a root.
    fn cut(&mut self, u: Node);
    /// Cost of u alone.
    fn cost(&mut self, u: Node) -> C;
    /// Parent of u, None if u is a root.
    fn parent(&mut self, u: Node) -> Option<Node>;
    fn is_root(&mut self, u: Node) -> bool {
        self.find_root(u) == u
    }
}

#[derive(Debug, Clone)]
pub struct Forest<C: Cost = i64> {
    paths: PathTrees<C>,
}

impl<C: Cost> Forest<C> {
    /// Path-trees backing the forest.
    pub fn paths(&self) -> &PathTrees<C> {
        &self.paths
    }

    /// Turns the path from the root of u's tree down to u into a single path, with u at its head.
    /// Returns its id.
    fn expose(&mut self, u: Node) -> Idx {
        let mut p = EMPTY;
        let mut next = Some(u);
        while let Some(v) = next {
            let root = self.paths.find_path(v);
            next = self.paths.successor(root);
            // The part below v now continues at v through its successor.
            let (_below, above) = self.paths.split(v);
            p = self.paths.join(p, v, above);
            log::trace!("expose({u}): joined at {v}, next {next:?}");
        }
        self.paths.set_successor(p, None);
        p
    }

    /// Parent of u, without restructuring. O(depth of the path-trees).
    pub fn tree_parent(&self, u: Node) -> Option<Node> {
        match self.paths.next(u) {
            EMPTY => self.paths.successor(self.paths.root(u)),
            v => Some(v),
        }
    }

    /// Cost of u, without restructuring. O(depth of the path-trees).
    pub fn tree_cost(&self, u: Node) -> C {
        self.paths.cost(u)
    }
}

impl<C: Cost> DynamicForest<C> for Forest<C> {
    fn new(n: usize) -> Self {
        Self {
            paths: PathTrees::new(n),
        }
    }

    fn capacity(&self) -> usize {
        self.paths.capacity()
    }

    fn expand(&mut self, n: usize) {
        self.paths.expand(n);
    }

    fn add_cost(&mut self, u: Node, c: C) {
        self.paths.check(u);
        let p = self.expose(u);
        self.paths.add_path_cost(p, c);
    }

    fn find_cost(&mut self, u: Node) -> (Node, C) {
        self.paths.check(u);
        let p = self.expose(u);
        let (v, c) = self.paths.find_path_cost(p);
        self.paths.set_successor(v, None);
        (v, c)
    }

    fn find_root(&mut self, u: Node) -> Node {
        self.paths.check(u);
        let p = self.expose(u);
        let root = self.paths.find_tail(p);
        self.paths.set_successor(root, None);
        root
    }

    fn link(&mut self, t: Node, u: Node) {
        log::debug!("link({t}, {u})");
        assert!(self.find_root(t) == t, "link: node {t} is not a tree root");
        assert!(
            self.find_root(u) != t,
            "link: nodes {t} and {u} are already in the same tree"
        );
        let p = self.paths.find_path(t);
        self.paths.set_successor(p, Some(u));
    }

    fn cut(&mut self, u: Node) {
        log::debug!("cut({u})");
        self.paths.check(u);
        self.expose(u);
        self.paths.splay(u);
        assert!(
            self.paths.children(u)[1] != EMPTY,
            "cut: node {u} is a tree root"
        );
        self.paths.split(u);
    }

    fn cost(&mut self, u: Node) -> C {
        self.paths.splay(u);
        self.paths.cost(u)
    }

    fn parent(&mut self, u: Node) -> Option<Node> {
        self.paths.check(u);
        self.expose(u);
        self.paths.splay(u);
        let p = self.paths.next(u);
        if p == EMPTY {
            return None;
        }
        self.paths.splay(p);
        Some(p)
    }
}
