use link_cut_forest::forest::{DynamicForest, Node};

/// Dummy implementation with explicit parents, most of the operations take linear time.
#[derive(Debug, Clone)]
pub struct SlowForest {
    parent: Vec<Option<Node>>,
    cost: Vec<i64>,
}

impl SlowForest {
    /// Nodes from u up to its root, u first.
    pub fn path_up(&self, mut u: Node) -> Vec<Node> {
        let mut path = vec![u];
        while let Some(p) = self.parent[u] {
            path.push(p);
            u = p;
        }
        path
    }
}

impl DynamicForest for SlowForest {
    fn new(n: usize) -> Self {
        Self {
            parent: vec![None; n + 1],
            cost: vec![0; n + 1],
        }
    }

    fn capacity(&self) -> usize {
        self.parent.len() - 1
    }

    fn expand(&mut self, n: usize) {
        assert!(n > self.capacity());
        self.parent.resize(n + 1, None);
        self.cost.resize(n + 1, 0);
    }

    fn add_cost(&mut self, u: Node, c: i64) {
        for v in self.path_up(u) {
            self.cost[v] += c;
        }
    }

    fn find_cost(&mut self, u: Node) -> (Node, i64) {
        let mut best = u;
        for v in self.path_up(u) {
            // Later nodes are closer to the root and win ties.
            if self.cost[v] <= self.cost[best] {
                best = v;
            }
        }
        (best, self.cost[best])
    }

    fn find_root(&mut self, u: Node) -> Node {
        *self.path_up(u).last().unwrap()
    }

    fn link(&mut self, t: Node, u: Node) {
        assert!(self.parent[t].is_none());
        assert_ne!(self.find_root(u), t);
        self.parent[t] = Some(u);
    }

    fn cut(&mut self, u: Node) {
        assert!(self.parent[u].take().is_some());
    }

    fn cost(&mut self, u: Node) -> i64 {
        self.cost[u]
    }

    fn parent(&mut self, u: Node) -> Option<Node> {
        self.parent[u]
    }
}
