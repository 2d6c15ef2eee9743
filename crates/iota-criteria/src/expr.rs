//! Boolean expression tree over [`Term`]s

use crate::term::Term;
use std::fmt;

/// A node of a criteria tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Term(Term),
    And(Vec<Criterion>),
    Or(Vec<Criterion>),
    Not(Box<Criterion>),
}

impl Criterion {
    /// Combine with `AND`, collapsing zero nodes to `None` and one node to itself
    pub fn all(nodes: impl IntoIterator<Item = Option<Criterion>>) -> Option<Criterion> {
        Self::group(nodes, Criterion::And)
    }

    /// Combine with `OR`, collapsing zero nodes to `None` and one node to itself
    pub fn any(nodes: impl IntoIterator<Item = Option<Criterion>>) -> Option<Criterion> {
        Self::group(nodes, Criterion::Or)
    }

    pub fn negate(node: Option<Criterion>) -> Option<Criterion> {
        node.map(|node| Criterion::Not(Box::new(node)))
    }

    fn group(
        nodes: impl IntoIterator<Item = Option<Criterion>>,
        wrap: fn(Vec<Criterion>) -> Criterion,
    ) -> Option<Criterion> {
        let mut nodes: Vec<Criterion> = nodes.into_iter().flatten().collect();
        match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(wrap(nodes)),
        }
    }

    fn is_group(&self) -> bool {
        matches!(self, Criterion::And(_) | Criterion::Or(_))
    }

    fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[Criterion], keyword: &str) -> fmt::Result {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", keyword)?;
            }
            if node.is_group() {
                write!(f, "({})", node)?;
            } else {
                write!(f, "{}", node)?;
            }
        }
        Ok(())
    }
}

impl From<Term> for Criterion {
    fn from(term: Term) -> Self {
        Criterion::Term(term)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Term(term) => write!(f, "{}", term),
            Criterion::And(nodes) => Self::write_joined(f, nodes, "AND"),
            Criterion::Or(nodes) => Self::write_joined(f, nodes, "OR"),
            Criterion::Not(node) => write!(f, "NOT({})", node),
        }
    }
}
