//! Text form of a forest, used by test fixtures.
//!
//! A tree is written as `label:cost`, followed by its children in parentheses when it has any,
//! e.g. `1:5(2:0 3:15(4:7))`. A forest lists every tree, one per line, roots and children in
//! ascending label order. Labels must be exactly `1..=n`.

use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use thiserror::Error;

use crate::forest::{DynamicForest, Forest, Node};
use crate::path_tree::Cost;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseForestError {
    #[error("unexpected {found:?} at byte {pos}")]
    Unexpected { found: char, pos: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("invalid label {0:?}")]
    InvalidLabel(String),
    #[error("invalid cost {0:?}")]
    InvalidCost(String),
    #[error("label {label} outside 1..={n}")]
    LabelOutOfRange { label: usize, n: usize },
    #[error("label {0} appears more than once")]
    DuplicateLabel(usize),
}

enum Step {
    Open(Node),
    Close,
}

impl<C: Cost> Display for Forest<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let n = self.capacity();
        let mut children = vec![vec![]; n + 1];
        let mut roots = vec![];
        for u in 1..=n {
            match self.tree_parent(u) {
                Some(p) => children[p].push(u),
                None => roots.push(u),
            }
        }
        for (i, &root) in roots.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let mut stack = vec![Step::Open(root)];
            let mut sep = false;
            while let Some(step) = stack.pop() {
                match step {
                    Step::Open(u) => {
                        if sep {
                            write!(f, " ")?;
                        }
                        write!(f, "{u}:{}", self.tree_cost(u))?;
                        sep = true;
                        if !children[u].is_empty() {
                            write!(f, "(")?;
                            sep = false;
                            stack.push(Step::Close);
                            stack.extend(children[u].iter().rev().map(|&c| Step::Open(c)));
                        }
                    }
                    Step::Close => {
                        write!(f, ")")?;
                        sep = true;
                    }
                }
            }
        }
        Ok(())
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

fn take_while(it: &mut Chars, f: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&(_, c)) = it.peek() {
        if !f(c) {
            break;
        }
        out.push(c);
        it.next();
    }
    out
}

impl<C: Cost> FromStr for Forest<C> {
    type Err = ParseForestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.char_indices().peekable();
        let mut nodes: Vec<(Node, C)> = vec![];
        // (child, parent)
        let mut edges = vec![];
        let mut open = vec![];
        let mut last = None;
        while let Some(&(pos, c)) = it.peek() {
            match c {
                c if c.is_whitespace() => {
                    it.next();
                    last = None;
                }
                '(' => {
                    it.next();
                    open.push(last.take().ok_or(ParseForestError::Unexpected { found: c, pos })?);
                }
                ')' => {
                    it.next();
                    open.pop()
                        .ok_or(ParseForestError::Unexpected { found: c, pos })?;
                    last = None;
                }
                '0'..='9' => {
                    let label = take_while(&mut it, |c| c.is_ascii_digit());
                    let label: Node = label
                        .parse()
                        .map_err(|_| ParseForestError::InvalidLabel(label))?;
                    match it.next() {
                        Some((_, ':')) => {}
                        Some((pos, found)) => {
                            return Err(ParseForestError::Unexpected { found, pos })
                        }
                        None => return Err(ParseForestError::UnexpectedEnd),
                    }
                    let cost = take_while(&mut it, |c| {
                        !c.is_whitespace() && c != '(' && c != ')'
                    });
                    let cost = cost
                        .parse()
                        .map_err(|_| ParseForestError::InvalidCost(cost))?;
                    if let Some(&parent) = open.last() {
                        edges.push((label, parent));
                    }
                    nodes.push((label, cost));
                    last = Some(label);
                }
                found => return Err(ParseForestError::Unexpected { found, pos }),
            }
        }
        if !open.is_empty() {
            return Err(ParseForestError::UnexpectedEnd);
        }

        let n = nodes.len();
        let mut seen = vec![false; n + 1];
        for &(label, _) in &nodes {
            if !(1..=n).contains(&label) {
                return Err(ParseForestError::LabelOutOfRange { label, n });
            }
            if std::mem::replace(&mut seen[label], true) {
                return Err(ParseForestError::DuplicateLabel(label));
            }
        }
        let mut forest = Self::new(n);
        // Still singletons, so this sets each cost exactly.
        for (u, c) in nodes {
            forest.add_cost(u, c);
        }
        for (child, parent) in edges {
            forest.link(child, parent);
        }
        Ok(forest)
    }
}
