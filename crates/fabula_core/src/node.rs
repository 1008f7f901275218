//! Step specifications and the builders that declare them.
//!
//! A specification is an ordered sequence of nodes. Steps chain one after
//! another; each fork group restarts from the path built before it, so two
//! adjacent fork groups are two alternatives rather than a chain.
//!
//! ```rust,ignore
//! // [a, [b, c, [d], [e]], [f, g]]
//! let story = step("a", a)
//!     .then(fork([
//!         step("b", b).then(step("c", c)).then(fork([step("d", d), step("e", e)])),
//!         step("f", f).then(step("g", g)),
//!     ]));
//! ```

use crate::{BoxFuture, Step, StepAction};
use fabula_error::FabulaResult;
use std::sync::Arc;
use tracing::trace;

/// One element of a step specification.
pub enum Node<D> {
    /// A step, chained to whatever follows it in the same sequence.
    Step(Arc<Step<D>>),
    /// An alternative continuation from the path built so far.
    Fork(Steps<D>),
    /// The path ends here, intentionally incomplete.
    Deferred,
}

impl<D> Node<D> {
    /// Wraps a step.
    pub fn step(step: Step<D>) -> Self {
        Node::Step(Arc::new(step))
    }

    /// Wraps a sequence as one fork group, flagging its leading step.
    pub fn fork(alternative: Steps<D>) -> Self {
        let mut alternative = alternative;
        alternative.mark_fork();
        Node::Fork(alternative)
    }

    /// True for the deferred marker.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Node::Deferred)
    }

    /// True when a path cannot continue past this node.
    fn terminates(&self) -> bool {
        match self {
            Node::Deferred => true,
            Node::Step(step) => step.is_pending(),
            Node::Fork(_) => false,
        }
    }
}

impl<D> Clone for Node<D> {
    fn clone(&self) -> Self {
        match self {
            Node::Step(step) => Node::Step(Arc::clone(step)),
            Node::Fork(steps) => Node::Fork(steps.clone()),
            Node::Deferred => Node::Deferred,
        }
    }
}

impl<D> std::fmt::Debug for Node<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Step(step) => f.debug_tuple("Step").field(&step.description()).finish(),
            Node::Fork(steps) => f.debug_tuple("Fork").field(steps).finish(),
            Node::Deferred => f.write_str("Deferred"),
        }
    }
}

/// An ordered step specification.
///
/// Anything appended after a deferred marker or a pending step is dropped:
/// deferral ends the remainder of the sequence, not just one branch.
pub struct Steps<D> {
    nodes: Vec<Node<D>>,
}

impl<D> Steps<D> {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Builds a specification from raw nodes.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node<D>>) -> Self {
        let mut steps = Self::new();
        for node in nodes {
            steps.push(node);
        }
        steps
    }

    /// Appends one node.
    pub fn push(&mut self, node: Node<D>) {
        if self.is_terminated() {
            trace!(node = ?node, "Dropping node declared after a deferral");
            return;
        }
        self.nodes.push(node);
    }

    /// Appends a continuation.
    pub fn then(mut self, next: impl Into<Steps<D>>) -> Self {
        for node in next.into().nodes {
            self.push(node);
        }
        self
    }

    /// Appends a deferred marker.
    pub fn then_deferred(mut self) -> Self {
        self.push(Node::Deferred);
        self
    }

    /// The nodes in declaration order.
    pub fn nodes(&self) -> &[Node<D>] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when nothing more can be appended.
    pub fn is_terminated(&self) -> bool {
        self.nodes.last().is_some_and(Node::terminates)
    }

    fn mark_fork(&mut self) {
        if let Some(Node::Step(step)) = self.nodes.first_mut() {
            Arc::make_mut(step).mark_fork();
        }
    }
}

impl<D> Default for Steps<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for Steps<D> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<D> std::fmt::Debug for Steps<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.nodes).finish()
    }
}

impl<D> From<Node<D>> for Steps<D> {
    fn from(node: Node<D>) -> Self {
        Steps::from_nodes([node])
    }
}

impl<D> From<Vec<Node<D>>> for Steps<D> {
    fn from(nodes: Vec<Node<D>>) -> Self {
        Steps::from_nodes(nodes)
    }
}

/// Declares a step from a closure.
///
/// ```rust,ignore
/// let login = step("log in", |d: &mut HttpDriver| Box::pin(async move {
///     d.post("/session", &creds).await
/// }));
/// ```
pub fn step<D, F>(description: impl Into<String>, action: F) -> Steps<D>
where
    D: Send + 'static,
    F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
{
    step_with(description, action)
}

/// Declares a step from any [`StepAction`].
pub fn step_with<D, A>(description: impl Into<String>, action: A) -> Steps<D>
where
    D: Send + 'static,
    A: StepAction<D> + 'static,
{
    let action: Arc<dyn StepAction<D>> = Arc::new(action);
    Node::step(Step::new(description, Some(action))).into()
}

/// Declares a step whose action is not written yet.
///
/// Paths reaching it stop there and are reported as deferred.
pub fn pending<D>(description: impl Into<String>) -> Steps<D> {
    Node::step(Step::new(description, None)).into()
}

/// Declares alternative continuations.
///
/// Each alternative becomes its own fork group starting from the same path,
/// and its leading step is flagged as a fork, whatever the number of
/// alternatives. Declaring no alternatives yields an empty fork group, which
/// story validation rejects.
pub fn fork<D>(alternatives: impl IntoIterator<Item = Steps<D>>) -> Steps<D> {
    let mut nodes: Vec<Node<D>> = alternatives.into_iter().map(Node::fork).collect();
    if nodes.is_empty() {
        nodes.push(Node::Fork(Steps::new()));
    }
    Steps { nodes }
}

/// The deferred marker as a specification.
pub fn deferred<D>() -> Steps<D> {
    Node::Deferred.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Driver;

    fn noop(description: &str) -> Steps<Driver> {
        step(description, |_d: &mut Driver| Box::pin(async { Ok(()) }))
    }

    #[test]
    fn test_deferral_truncates_the_rest_of_the_sequence() {
        let steps = noop("a").then(noop("b")).then(deferred()).then(noop("c"));
        assert_eq!(steps.len(), 3);
        assert!(steps.nodes()[2].is_deferred());
        assert!(steps.is_terminated());
    }

    #[test]
    fn test_pending_step_truncates_the_rest_of_the_sequence() {
        let steps = noop("a").then(pending("b")).then(noop("c"));
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_fork_flags_leading_step_of_every_alternative() {
        let steps = fork([noop("b").then(noop("c")), noop("f")]);
        let flags: Vec<bool> = steps
            .nodes()
            .iter()
            .map(|node| match node {
                Node::Fork(inner) => match &inner.nodes()[0] {
                    Node::Step(step) => step.is_fork(),
                    _ => false,
                },
                _ => false,
            })
            .collect();
        assert_eq!(flags, vec![true, true]);

        let Node::Fork(first) = &steps.nodes()[0] else {
            panic!("expected a fork group");
        };
        let Node::Step(second_step) = &first.nodes()[1] else {
            panic!("expected a step");
        };
        assert!(!second_step.is_fork());
    }

    #[test]
    fn test_single_alternative_is_still_a_fork() {
        let steps = fork([noop("d")]);
        let Node::Fork(inner) = &steps.nodes()[0] else {
            panic!("expected a fork");
        };
        assert!(matches!(&inner.nodes()[0], Node::Step(s) if s.is_fork()));
    }

    #[test]
    fn test_marking_a_shared_step_does_not_touch_other_uses() {
        let shared = noop("shared");
        let forked = fork([shared.clone()]);

        let Node::Step(original) = &shared.nodes()[0] else {
            panic!("expected a step");
        };
        assert!(!original.is_fork());
        assert!(matches!(&forked.nodes()[0], Node::Fork(_)));
    }

    #[test]
    fn test_empty_fork_is_kept_for_validation() {
        let steps: Steps<Driver> = fork(Vec::new());
        assert!(matches!(&steps.nodes()[0], Node::Fork(inner) if inner.is_empty()));
    }
}
