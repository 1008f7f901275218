//! The unit of work a step or hook performs against a driver.

use async_trait::async_trait;
use fabula_error::FabulaResult;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by closure actions.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something a step or hook does with the path's driver.
///
/// Closures of the shape `|driver| Box::pin(async move { ... })` implement
/// this trait, so most stories never name it.
///
/// # Example
///
/// ```rust,ignore
/// use fabula_core::StepAction;
/// use fabula_error::FabulaResult;
/// use async_trait::async_trait;
///
/// struct CreateUser { name: String }
///
/// #[async_trait]
/// impl StepAction<HttpDriver> for CreateUser {
///     async fn execute(&self, driver: &mut HttpDriver) -> FabulaResult<()> {
///         driver.post("/users", &self.name).await
///     }
/// }
/// ```
#[async_trait]
pub trait StepAction<D>: Send + Sync {
    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Any error aborts the current path only.
    async fn execute(&self, driver: &mut D) -> FabulaResult<()>;
}

#[async_trait]
impl<D, F> StepAction<D> for F
where
    D: Send,
    F: for<'a> Fn(&'a mut D) -> BoxFuture<'a, FabulaResult<()>> + Send + Sync,
{
    async fn execute(&self, driver: &mut D) -> FabulaResult<()> {
        (self)(driver).await
    }
}

/// A before/after hook. Hooks share the step action capability.
pub type Hook<D> = Arc<dyn StepAction<D>>;
