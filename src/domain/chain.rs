//! Prioritized fallback lookup over path tables.
//!
//! A chain is an owned singly-linked list: every [`ResolverNode::Table`]
//! holds exactly one successor and the list always ends in a
//! [`ResolverNode::Terminal`]. Cycles cannot be expressed, and priority is
//! fixed by construction order.
//!
//! ```text
//! Table(config) -> Table(builtin) -> Terminal("Hello, world!")
//! ```

use axum::http::StatusCode;

use super::entities::PathTable;

/// Fixed output of the end of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalResponder {
    pub status: StatusCode,
    pub body: String,
}

impl TerminalResponder {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl Default for TerminalResponder {
    fn default() -> Self {
        Self::new(StatusCode::OK, "Hello, world!")
    }
}

/// Outcome of walking the chain for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A table contained the path; the caller issues the redirect.
    Redirect(&'a str),
    /// No table matched; the terminal responder answers.
    Terminal(&'a TerminalResponder),
}

/// One link of the resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverNode {
    Table {
        table: PathTable,
        next: Box<ResolverNode>,
    },
    Terminal(TerminalResponder),
}

impl ResolverNode {
    /// Composes `tables` (highest priority first) into a chain ending in
    /// `terminal`.
    pub fn build<I>(tables: I, terminal: TerminalResponder) -> Self
    where
        I: IntoIterator<Item = PathTable>,
        I::IntoIter: DoubleEndedIterator,
    {
        tables
            .into_iter()
            .rev()
            .fold(ResolverNode::Terminal(terminal), |next, table| {
                ResolverNode::Table {
                    table,
                    next: Box::new(next),
                }
            })
    }

    /// Resolves `path` against each table in order.
    ///
    /// The first table containing `path` wins and the walk stops there.
    /// A miss at an intermediate node is ordinary control flow, not an error.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let mut node = self;
        loop {
            match node {
                ResolverNode::Table { table, next } => {
                    if let Some(url) = table.get(path) {
                        return Resolution::Redirect(url);
                    }
                    node = next.as_ref();
                }
                ResolverNode::Terminal(responder) => return Resolution::Terminal(responder),
            }
        }
    }

    /// Number of table nodes before the terminal.
    pub fn depth(&self) -> usize {
        self.tables().count()
    }

    /// Tables in lookup order.
    pub fn tables(&self) -> impl Iterator<Item = &PathTable> {
        let mut node = Some(self);
        std::iter::from_fn(move || match node? {
            ResolverNode::Table { table, next } => {
                node = Some(next.as_ref());
                Some(table)
            }
            ResolverNode::Terminal(_) => {
                node = None;
                None
            }
        })
    }

    pub fn terminal(&self) -> &TerminalResponder {
        let mut node = self;
        loop {
            match node {
                ResolverNode::Table { next, .. } => node = next.as_ref(),
                ResolverNode::Terminal(responder) => return responder,
            }
        }
    }
}
