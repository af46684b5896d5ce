//! Thread-local free lists for the most frequently built AST nodes.
//!
//! The parser takes [`SelectStatement`], [`JoinClause`], [`ColumnReference`]
//! and [`BinaryExpression`] nodes from here. A node goes back to its pool
//! only when the production that took it fails before handing it on;
//! callers that are done with a parsed statement may hand it to
//! [`recycle`].

use std::cell::RefCell;
use std::mem;

use tracing::trace;

use crate::ast::{BinaryExpression, ColumnReference, Expr, JoinClause, SelectStatement, Statement};

/// Maximum number of idle nodes kept per node type and thread.
pub const POOL_CAPACITY: usize = 256;

/// Counters for one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Nodes handed out.
    pub acquired: usize,
    /// Nodes handed out from the free list rather than freshly allocated.
    pub reused: usize,
    /// Nodes returned.
    pub released: usize,
    /// Nodes dropped because the free list was full.
    pub discarded: usize,
    /// Nodes currently idle.
    pub idle: usize,
}

/// A bounded free list of reset nodes.
#[derive(Debug)]
pub struct NodePool<T> {
    free: Vec<T>,
    stats: PoolStats,
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self {
            free: Vec::new(),
            stats: PoolStats::default(),
        }
    }
}

impl<T: Pooled> NodePool<T> {
    /// Takes an idle node or builds a fresh one.
    pub fn acquire(&mut self) -> T {
        self.stats.acquired += 1;
        if let Some(node) = self.free.pop() {
            self.stats.reused += 1;
            self.stats.idle = self.free.len();
            node
        } else {
            T::fresh()
        }
    }

    /// Resets `node` and keeps it for reuse.
    pub fn release(&mut self, mut node: T) {
        self.stats.released += 1;
        if self.free.len() >= POOL_CAPACITY {
            self.stats.discarded += 1;
            return;
        }
        node.reset();
        self.free.push(node);
        self.stats.idle = self.free.len();
    }

    /// Returns the pool counters.
    #[must_use]
    pub const fn stats(&self) -> PoolStats {
        self.stats
    }
}

/// A node type with a thread-local pool.
pub trait Pooled: Sized {
    /// Builds a node in its default state.
    fn fresh() -> Self;

    /// Restores the default state.
    fn reset(&mut self);

    /// Runs `f` with this thread's pool for the type.
    fn with_pool<R>(f: impl FnOnce(&mut NodePool<Self>) -> R) -> R;
}

macro_rules! pooled {
    ($pool:ident, $node:ty, $fresh:expr, |$this:ident| $reset:expr) => {
        thread_local! {
            static $pool: RefCell<NodePool<$node>> = RefCell::new(NodePool::default());
        }

        impl Pooled for $node {
            fn fresh() -> Self {
                $fresh
            }

            fn reset(&mut self) {
                let $this = self;
                $reset
            }

            fn with_pool<R>(f: impl FnOnce(&mut NodePool<Self>) -> R) -> R {
                $pool.with(|pool| f(&mut pool.borrow_mut()))
            }
        }
    };
}

pooled!(
    SELECT_POOL,
    Box<SelectStatement>,
    Box::default(),
    |node| **node = SelectStatement::default()
);
pooled!(
    BINARY_POOL,
    Box<BinaryExpression>,
    Box::default(),
    |node| **node = BinaryExpression::default()
);
pooled!(
    COLUMN_POOL,
    Box<ColumnReference>,
    Box::default(),
    |node| {
        node.table = None;
        node.column.clear();
    }
);
pooled!(
    JOIN_POOL,
    JoinClause,
    JoinClause::default(),
    |node| *node = JoinClause::default()
);

/// Takes a node from this thread's pool.
#[must_use]
pub fn acquire<T: Pooled>() -> T {
    T::with_pool(NodePool::acquire)
}

/// Returns a node to this thread's pool.
pub fn release<T: Pooled>(node: T) {
    T::with_pool(|pool| pool.release(node));
}

/// Returns the counters of this thread's pool for `T`.
#[must_use]
pub fn stats<T: Pooled>() -> PoolStats {
    T::with_pool(|pool| pool.stats())
}

/// Hands the pooled nodes of a finished statement back to this thread's
/// pools. Other nodes are dropped.
pub fn recycle(statement: Statement) {
    match statement {
        Statement::Select(select) => recycle_select(select),
        Statement::SetOperation(operation) => {
            recycle(*operation.left);
            recycle(*operation.right);
        }
        Statement::With(with) => recycle(*with.query),
        other => trace!(statement = other.type_tag(), "nothing to recycle"),
    }
}

fn recycle_select(mut select: Box<SelectStatement>) {
    for column in mem::take(&mut select.columns) {
        recycle_expr(column);
    }
    if let Some(condition) = select.where_clause.take() {
        recycle_expr(condition);
    }
    for mut join in mem::take(&mut select.joins) {
        if let Some(condition) = join.condition.take() {
            recycle_expr(condition);
        }
        release(join);
    }
    release(select);
}

fn recycle_expr(expr: Expr) {
    match expr {
        Expr::Binary(mut binary) => {
            recycle_expr(mem::take(&mut binary.left));
            recycle_expr(mem::take(&mut binary.right));
            release(binary);
        }
        Expr::Column(column) => release(column),
        Expr::Subquery(subquery) => recycle(*subquery.query),
        _ => {}
    }
}
