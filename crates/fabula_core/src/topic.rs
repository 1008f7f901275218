//! Topics and the suite that holds them.
//!
//! Declarations go through explicit builders: a [`Suite`] owns the global
//! hooks and the declared topics, and each topic body receives its own
//! [`TopicBuilder`].

use crate::{BODY_STEP, BoxFuture, Hook, Node, Step, StepAction, Steps, Story};
use derive_getters::Getters;
use fabula_error::{FabulaResult, StoryError};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A named grouping of stories with optional before/after hooks.
///
/// Immutable once declared.
#[derive(Getters)]
pub struct Topic<D> {
    /// Topic description
    description: String,

    /// Stories in declaration order
    stories: Vec<Story<D>>,

    /// Hook run before every path of every story, after the global hook
    before: Option<Hook<D>>,

    /// Hook run after every path of every story
    after: Option<Hook<D>>,
}

impl<D> std::fmt::Debug for Topic<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topic")
            .field("description", &self.description)
            .field("stories", &self.stories)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Collects the stories and hooks of one topic.
pub struct TopicBuilder<D> {
    stories: Vec<Story<D>>,
    before: Option<Hook<D>>,
    after: Option<Hook<D>>,
}

impl<D: Send + 'static> TopicBuilder<D> {
    fn new() -> Self {
        Self {
            stories: Vec::new(),
            before: None,
            after: None,
        }
    }

    /// Sets the hook run before every path, after the global before-hook.
    pub fn before<F>(&mut self, hook: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Sets the hook run after every path.
    pub fn after<F>(&mut self, hook: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    /// Declares a story from a step specification.
    pub fn story(
        &mut self,
        description: impl Into<String>,
        steps: impl Into<Steps<D>>,
    ) -> &mut Self {
        self.stories.push(Story::new(description, Some(steps.into())));
        self
    }

    /// Declares a story whose whole body is one callable.
    pub fn story_fn<F>(&mut self, description: impl Into<String>, body: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.story_with(description, body)
    }

    /// Declares a story whose whole body is one [`StepAction`].
    pub fn story_with<A>(&mut self, description: impl Into<String>, body: A) -> &mut Self
    where
        A: StepAction<D> + 'static,
    {
        let action: Arc<dyn StepAction<D>> = Arc::new(body);
        let steps = Steps::from(Node::step(Step::new(BODY_STEP, Some(action))));
        self.stories.push(Story::new(description, Some(steps)));
        self
    }

    /// Declares a story that is not written yet.
    pub fn deferred(&mut self, description: impl Into<String>) -> &mut Self {
        self.stories.push(Story::new(description, None));
        self
    }

    fn build(self, description: String) -> Result<Topic<D>, StoryError> {
        for story in &self.stories {
            story.validate()?;
        }
        Ok(Topic {
            description,
            stories: self.stories,
            before: self.before,
            after: self.after,
        })
    }
}

/// Every declared topic plus the hooks that wrap every path.
///
/// # Example
///
/// ```rust,ignore
/// let mut suite = Suite::new();
/// suite.before_each_path(|d: &mut HttpDriver| Box::pin(async move { d.reset().await }));
/// suite.topic("Users", |t| {
///     t.story("sign up", step("register", register).then(step("log in", login)));
///     t.deferred("delete account");
/// })?;
/// ```
pub struct Suite<D> {
    topics: Vec<Topic<D>>,
    before_each: Option<Hook<D>>,
    after_each: Option<Hook<D>>,
}

impl<D: Send + 'static> Suite<D> {
    /// Creates an empty suite.
    pub fn new() -> Self {
        Self {
            topics: Vec::new(),
            before_each: None,
            after_each: None,
        }
    }

    /// Sets the global hook run first on every path.
    pub fn before_each_path<F>(&mut self, hook: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.before_each = Some(Arc::new(hook));
        self
    }

    /// Sets the global hook run last on every path.
    pub fn after_each_path<F>(&mut self, hook: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.after_each = Some(Arc::new(hook));
        self
    }

    /// Alias for [`Suite::before_each_path`].
    pub fn before_each<F>(&mut self, hook: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.before_each_path(hook)
    }

    /// Alias for [`Suite::after_each_path`].
    pub fn after_each<F>(&mut self, hook: F) -> &mut Self
    where
        F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync + 'static,
    {
        self.after_each_path(hook)
    }

    /// Declares a topic.
    ///
    /// # Errors
    ///
    /// Returns an error if any story declared in `body` is malformed; the
    /// topic is then not added.
    #[instrument(skip_all, fields(topic = %description.as_ref()))]
    pub fn topic<S, F>(&mut self, description: S, body: F) -> FabulaResult<&mut Self>
    where
        S: AsRef<str>,
        F: FnOnce(&mut TopicBuilder<D>),
    {
        let mut builder = TopicBuilder::new();
        body(&mut builder);
        let topic = builder.build(description.as_ref().to_string())?;
        debug!(stories = topic.stories.len(), "Declared topic");
        self.topics.push(topic);
        Ok(self)
    }

    /// Alias for [`Suite::topic`].
    pub fn suite<S, F>(&mut self, description: S, body: F) -> FabulaResult<&mut Self>
    where
        S: AsRef<str>,
        F: FnOnce(&mut TopicBuilder<D>),
    {
        self.topic(description, body)
    }
}

impl<D> Suite<D> {
    /// Declared topics in order.
    pub fn topics(&self) -> &[Topic<D>] {
        &self.topics
    }

    /// Global before-hook.
    pub fn before_each_hook(&self) -> Option<&Hook<D>> {
        self.before_each.as_ref()
    }

    /// Global after-hook.
    pub fn after_each_hook(&self) -> Option<&Hook<D>> {
        self.after_each.as_ref()
    }
}

impl<D: Send + 'static> Default for Suite<D> {
    fn default() -> Self {
        Self::new()
    }
}
