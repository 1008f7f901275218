//! Path enumeration: every linear way through a story.

use crate::{Node, Step, Steps};
use std::sync::Arc;
use tracing::{debug, instrument};

/// One element of an enumerated path.
pub enum PathEntry<D> {
    /// A step to execute.
    Step(Arc<Step<D>>),
    /// The path stops here on purpose.
    Deferred,
}

impl<D> PathEntry<D> {
    /// The step, unless this is the deferred marker.
    pub fn as_step(&self) -> Option<&Arc<Step<D>>> {
        match self {
            PathEntry::Step(step) => Some(step),
            PathEntry::Deferred => None,
        }
    }
}

impl<D> Clone for PathEntry<D> {
    fn clone(&self) -> Self {
        match self {
            PathEntry::Step(step) => PathEntry::Step(Arc::clone(step)),
            PathEntry::Deferred => PathEntry::Deferred,
        }
    }
}

impl<D> std::fmt::Debug for PathEntry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathEntry::Step(step) => write!(f, "{}", step.description()),
            PathEntry::Deferred => f.write_str("<deferred>"),
        }
    }
}

/// One concrete linear sequence of steps through a story.
///
/// Every path owns its entries; forking copies the path built so far.
pub struct Path<D> {
    entries: Vec<PathEntry<D>>,
}

impl<D> Path<D> {
    /// Creates a path from its entries.
    pub fn new(entries: Vec<PathEntry<D>>) -> Self {
        Self { entries }
    }

    /// Entries in execution order.
    pub fn entries(&self) -> &[PathEntry<D>] {
        &self.entries
    }

    /// Mutable access to this path's own entries.
    pub fn entries_mut(&mut self) -> &mut Vec<PathEntry<D>> {
        &mut self.entries
    }

    /// The steps of this path, without the deferred marker.
    pub fn steps(&self) -> impl Iterator<Item = &Arc<Step<D>>> {
        self.entries.iter().filter_map(PathEntry::as_step)
    }

    /// True when the path ends with the deferred marker.
    pub fn is_deferred(&self) -> bool {
        matches!(self.entries.last(), Some(PathEntry::Deferred))
    }

    /// Number of entries, counting the deferred marker.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a path with no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable description: step descriptions joined with `" > "`.
    ///
    /// A path that starts with the anonymous body step is described by the
    /// empty string.
    pub fn description(&self) -> String {
        match self.entries.first() {
            Some(PathEntry::Step(step)) if step.is_body() => String::new(),
            _ => self
                .steps()
                .map(|step| step.description())
                .collect::<Vec<_>>()
                .join(" > "),
        }
    }
}

impl<D> Clone for Path<D> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<D> std::fmt::Debug for Path<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

/// Enumerates every linear path through a specification, in declaration order.
///
/// An absent specification has no paths. Within a sequence, steps are
/// appended to the path in place; a fork group recurses on a copy of the
/// path, so each following sibling restarts from the path as it was before
/// the fork. Paths are emitted only when a sequence ends on a step or when a
/// deferred marker (or a pending step) is reached.
///
/// # Examples
///
/// ```rust,ignore
/// // [a, [b, c, [d], [e]], [f, g]]  =>  a>b>c>d, a>b>c>e, a>f>g
/// let paths = enumerate_paths(Some(&spec));
/// assert_eq!(paths.len(), 3);
/// ```
#[instrument(skip_all, fields(nodes = spec.map(Steps::len).unwrap_or(0)))]
pub fn enumerate_paths<D>(spec: Option<&Steps<D>>) -> Vec<Path<D>> {
    let mut paths = Vec::new();
    if let Some(spec) = spec {
        walk(spec.nodes(), Vec::new(), &mut paths);
    }
    debug!(paths = paths.len(), "Enumerated paths");
    paths
}

fn walk<D>(nodes: &[Node<D>], mut path: Vec<PathEntry<D>>, paths: &mut Vec<Path<D>>) {
    for (position, node) in nodes.iter().enumerate() {
        let forked = match node {
            Node::Deferred => {
                path.push(PathEntry::Deferred);
                paths.push(Path::new(path));
                return;
            }
            Node::Fork(alternative) => {
                walk(alternative.nodes(), path.clone(), paths);
                true
            }
            Node::Step(step) => {
                path.push(PathEntry::Step(Arc::clone(step)));
                if step.is_pending() {
                    path.push(PathEntry::Deferred);
                    paths.push(Path::new(path));
                    return;
                }
                false
            }
        };

        match nodes.get(position + 1) {
            Some(Node::Deferred) => {
                path.push(PathEntry::Deferred);
                paths.push(Path::new(path));
                return;
            }
            Some(_) => {}
            None => {
                if !forked {
                    paths.push(Path::new(path));
                }
                return;
            }
        }
    }
}
