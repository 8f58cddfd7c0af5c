//! Splay trees over node paths, with costs stored differentially so that a whole path can be
//! shifted in O(1) and its minimum found in amortized O(log n).
//!
//! Every node `u` stores `dcost(u) = cost(u) - mincost(u)` and
//! `dmin(u) = mincost(u) - mincost(parent(u))` (or `mincost(u)` on a root), where `mincost` is
//! the minimum cost over the splay subtree. The absolute cost of `u` is `dcost(u)` plus the sum
//! of `dmin` over `u` and all its ancestors. In-order goes from the head of the path (deepest
//! node of the conceptual tree) to its tail (closest to the tree root).

use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, Sub};
use std::str::FromStr;

use debug_tree::TreeBuilder;
use derivative::Derivative;

pub type Idx = usize;

/// Slot 0 is never a node, it marks a missing child.
pub const EMPTY: Idx = 0;

/// Numeric cost carried by every node. Subtraction is only ever applied to differences that are
/// non-negative, so unsigned types work as long as no negative amount is added.
pub trait Cost:
    Copy + Ord + Default + Add<Output = Self> + Sub<Output = Self> + Debug + Display + FromStr
{
}

impl<T> Cost for T where
    T: Copy + Ord + Default + Add<Output = T> + Sub<Output = T> + Debug + Display + FromStr
{
}

fn node_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == EMPTY {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}
fn node2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    node_fmt(u, f)?;
    write!(f, ", ")?;
    node_fmt(v, f)?;
    write!(f, "]")
}

/// Used to pretty print a Idx, outputting ∅ if it is EMPTY.
pub struct PrettyIdx(pub Idx);

impl Display for PrettyIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        node_fmt(&self.0, f)
    }
}

impl Debug for PrettyIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

use PrettyIdx as I;

/// What sits above a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Up {
    /// Root of a path-tree whose path has nothing above its tail.
    #[default]
    None,
    /// Parent inside the same path-tree.
    Parent(Idx),
    /// Root of a path-tree; the node of another path right above this path's tail.
    Successor(Idx),
}

impl Up {
    pub fn successor(self) -> Option<Idx> {
        match self {
            Up::Successor(s) => Some(s),
            _ => None,
        }
    }
    pub fn parent(self) -> Option<Idx> {
        match self {
            Up::Parent(p) => Some(p),
            _ => None,
        }
    }
    /// Whether the node owning this is the root of its path-tree.
    pub fn is_root(self) -> bool {
        !matches!(self, Up::Parent(_))
    }
}

#[derive(Derivative, Clone, Copy, Default)]
#[derivative(Debug)]
struct Node<C: Cost> {
    up: Up,
    /// Left (head side) and right (tail side) child
    #[derivative(Debug(format_with = "node2_fmt"))]
    child: [Idx; 2],
    dcost: C,
    dmin: C,
}

/// All path-trees over the nodes `1..=capacity`. Nodes are addressed only by index.
#[derive(Clone)]
pub struct PathTrees<C: Cost = i64> {
    nodes: Vec<Node<C>>,
}

impl<C: Cost> Debug for PathTrees<C> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        let _b = builder.add_branch("PathTrees");
        for u in 1..self.nodes.len() {
            if self.nodes[u].up.is_root() {
                self.path_dbg(u, &builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<C: Cost> PathTrees<C> {
    fn path_dbg(&self, root: Idx, tree: &TreeBuilder) {
        let _b = tree.add_branch(&format!("path {root} (up {:?})", self.nodes[root].up));
        for u in self.path(root) {
            tree.add_leaf(&format!(
                "[{u}] cost {} {:?}",
                self.cost(u),
                self.nodes[u]
            ));
        }
    }

    /// New set of `n` singleton paths with cost 0 and no successor.
    pub fn new(n: usize) -> Self {
        Self {
            nodes: vec![Node::default(); n + 1],
        }
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Grows the index domain to `1..=n`. New nodes are singleton paths with cost 0.
    pub fn expand(&mut self, n: usize) {
        assert!(
            n > self.capacity(),
            "expand: {n} does not grow capacity {}",
            self.capacity()
        );
        log::debug!("expand {} -> {n}", self.capacity());
        self.nodes.resize(n + 1, Node::default());
    }

    /// Panics unless `u` is a node.
    pub fn check(&self, u: Idx) {
        assert!(
            u != EMPTY && u < self.nodes.len(),
            "node {u} out of range 1..={}",
            self.capacity()
        );
    }

    // OPERATIONS
    // They panic if the node doesn't exist.

    pub fn up(&self, u: Idx) -> Up {
        self.nodes[u].up
    }
    pub fn children(&self, u: Idx) -> [Idx; 2] {
        self.nodes[u].child
    }
    pub fn dcost(&self, u: Idx) -> C {
        self.nodes[u].dcost
    }
    pub fn dmin(&self, u: Idx) -> C {
        self.nodes[u].dmin
    }
    pub fn is_path_root(&self, u: Idx) -> bool {
        self.nodes[u].up.is_root()
    }
    /// Root of the path-tree containing u, without restructuring.
    pub fn root(&self, mut u: Idx) -> Idx {
        self.check(u);
        while let Up::Parent(p) = self.nodes[u].up {
            u = p;
        }
        u
    }
    /// Successor of the path whose path-tree root is p.
    pub fn successor(&self, p: Idx) -> Option<Idx> {
        self.assert_path_id(p);
        self.nodes[p].up.successor()
    }
    pub fn set_successor(&mut self, p: Idx, s: Option<Idx>) {
        self.assert_path_id(p);
        if let Some(s) = s {
            self.check(s);
        }
        self.nodes[p].up = s.map_or(Up::None, Up::Successor);
    }
    fn assert_path_id(&self, p: Idx) {
        self.check(p);
        assert!(self.nodes[p].up.is_root(), "node {p} is not a path id");
    }

    /// Absolute cost of u, rebuilt from the differential encoding.
    pub fn cost(&self, mut u: Idx) -> C {
        self.check(u);
        let mut c = self.nodes[u].dcost + self.nodes[u].dmin;
        while let Up::Parent(p) = self.nodes[u].up {
            c = c + self.nodes[p].dmin;
            u = p;
        }
        c
    }

    /// Nodes of the path containing u, from head to tail.
    pub fn path(&self, u: Idx) -> Vec<Idx> {
        let mut out = vec![];
        let mut stack = vec![];
        let mut cur = self.root(u);
        loop {
            while cur != EMPTY {
                stack.push(cur);
                cur = self.nodes[cur].child[0];
            }
            match stack.pop() {
                Some(v) => {
                    out.push(v);
                    cur = self.nodes[v].child[1];
                }
                None => return out,
            }
        }
    }

    /// Node right after u in its path (towards the tail), without restructuring.
    pub fn next(&self, u: Idx) -> Idx {
        self.check(u);
        let mut v = self.nodes[u].child[1];
        if v != EMPTY {
            while self.nodes[v].child[0] != EMPTY {
                v = self.nodes[v].child[0];
            }
            return v;
        }
        let mut v = u;
        while let Up::Parent(p) = self.nodes[v].up {
            if self.nodes[p].child[0] == v {
                return p;
            }
            v = p;
        }
        EMPTY
    }

    /// Index of x in the children of its parent p.
    fn dir(&self, x: Idx, p: Idx) -> usize {
        (self.nodes[p].child[1] == x) as usize
    }

    /// Rotates x above its parent, keeping the absolute cost of every node.
    pub fn rotate(&mut self, x: Idx) {
        self.check(x);
        let Up::Parent(y) = self.nodes[x].up else {
            panic!("rotate: node {x} is a path root");
        };
        let d = self.dir(x, y);
        let [a, b] = [self.nodes[x].child[d], self.nodes[x].child[1 - d]];
        let c = self.nodes[y].child[1 - d];
        log::trace!(
            "rotate x={x} y={y} a={} b={} c={}",
            I(a),
            I(b),
            I(c)
        );

        // All quantities below are relative to the old mincost of y's subtree.
        let dx = self.nodes[x].dmin;
        let mut m = self.nodes[y].dcost;
        if b != EMPTY {
            m = m.min(self.nodes[b].dmin + dx);
        }
        if c != EMPTY {
            m = m.min(self.nodes[c].dmin);
        }
        if a != EMPTY {
            self.nodes[a].dmin = self.nodes[a].dmin + dx;
        }
        if b != EMPTY {
            self.nodes[b].dmin = self.nodes[b].dmin + dx - m;
        }
        if c != EMPTY {
            self.nodes[c].dmin = self.nodes[c].dmin - m;
        }
        self.nodes[x].dcost = self.nodes[x].dcost + dx;
        self.nodes[x].dmin = self.nodes[y].dmin;
        self.nodes[y].dcost = self.nodes[y].dcost - m;
        self.nodes[y].dmin = m;

        let above = self.nodes[y].up;
        if let Up::Parent(z) = above {
            let dz = self.dir(y, z);
            self.nodes[z].child[dz] = x;
        }
        self.nodes[x].up = above;
        self.nodes[x].child[1 - d] = y;
        self.nodes[y].up = Up::Parent(x);
        self.nodes[y].child[d] = b;
        if b != EMPTY {
            self.nodes[b].up = Up::Parent(y);
        }
    }

    /// Makes x the root of its path-tree.
    pub fn splay(&mut self, x: Idx) {
        self.check(x);
        while let Up::Parent(y) = self.nodes[x].up {
            if let Up::Parent(z) = self.nodes[y].up {
                if self.dir(x, y) == self.dir(y, z) {
                    // zig-zig
                    self.rotate(y);
                } else {
                    // zig-zag
                    self.rotate(x);
                }
            }
            self.rotate(x);
        }
    }

    /// Path id of the path containing u, which is u itself after splaying.
    pub fn find_path(&mut self, u: Idx) -> Idx {
        self.splay(u);
        u
    }

    /// Last node of the path p, splayed to be its new id.
    pub fn find_tail(&mut self, p: Idx) -> Idx {
        self.assert_path_id(p);
        let mut u = p;
        while self.nodes[u].child[1] != EMPTY {
            u = self.nodes[u].child[1];
        }
        self.splay(u);
        u
    }

    /// Adds c to the cost of every node on path p.
    pub fn add_path_cost(&mut self, p: Idx, c: C) {
        self.assert_path_id(p);
        self.nodes[p].dmin = self.nodes[p].dmin + c;
    }

    /// Minimum cost node on path p and its cost. Ties go to the node closest to the tail.
    /// The returned node becomes the path id.
    pub fn find_path_cost(&mut self, p: Idx) -> (Idx, C) {
        self.assert_path_id(p);
        let zero = C::default();
        let mut u = p;
        loop {
            let [l, r] = self.nodes[u].child;
            if r != EMPTY && self.nodes[r].dmin == zero {
                u = r;
            } else if self.nodes[u].dcost == zero {
                break;
            } else {
                debug_assert_ne!(l, EMPTY, "broken cost encoding at {u}");
                u = l;
            }
        }
        self.splay(u);
        (u, self.nodes[u].dcost + self.nodes[u].dmin)
    }

    /// Joins paths l, then the singleton v, then r into a single path with id v. Either side may
    /// be EMPTY. v takes the successor of r, or of l if r is EMPTY.
    pub fn join(&mut self, l: Idx, v: Idx, r: Idx) -> Idx {
        self.check(v);
        assert!(
            self.nodes[v].child == [EMPTY; 2] && self.nodes[v].up.is_root(),
            "join: node {v} is not a singleton path"
        );
        log::trace!("join({}, {v}, {})", I(l), I(r));
        let cv = self.nodes[v].dcost + self.nodes[v].dmin;
        let mut m = cv;
        for p in [l, r] {
            if p != EMPTY {
                self.assert_path_id(p);
                m = m.min(self.nodes[p].dmin);
            }
        }
        let up = match (l, r) {
            (_, r) if r != EMPTY => self.nodes[r].up,
            (l, _) if l != EMPTY => self.nodes[l].up,
            _ => Up::None,
        };
        for p in [l, r] {
            if p != EMPTY {
                self.nodes[p].dmin = self.nodes[p].dmin - m;
                self.nodes[p].up = Up::Parent(v);
            }
        }
        self.nodes[v] = Node {
            up,
            child: [l, r],
            dcost: cv - m,
            dmin: m,
        };
        v
    }

    /// Splits the path containing u into the parts before and after u, which may be EMPTY.
    /// The part before continues at u, the part after keeps the old successor, and u is left as
    /// a singleton path with no successor.
    pub fn split(&mut self, u: Idx) -> (Idx, Idx) {
        self.splay(u);
        let Node {
            up,
            child: [a, b],
            dcost,
            dmin,
        } = self.nodes[u];
        log::trace!("split({u}) = ({}, {})", I(a), I(b));
        if a != EMPTY {
            self.nodes[a].dmin = self.nodes[a].dmin + dmin;
            self.nodes[a].up = Up::Successor(u);
        }
        if b != EMPTY {
            self.nodes[b].dmin = self.nodes[b].dmin + dmin;
            self.nodes[b].up = up;
        }
        self.nodes[u] = Node {
            up: Up::None,
            child: [EMPTY; 2],
            dcost: C::default(),
            dmin: dcost + dmin,
        };
        (a, b)
    }
}
