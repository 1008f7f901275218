//! Driver contract.

use crate::{ExpectationResults, Scribe};
use async_trait::async_trait;
use fabula_error::FabulaResult;

/// The HTTP-driving and assertion component a story runs against.
///
/// A fresh driver is created for every path, so drivers may keep
/// per-path state (cookies, captured ids, expectation tallies) freely.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use fabula_interface::{ApiDriver, ExpectationResults, Scribe};
/// use fabula_error::FabulaResult;
///
/// struct HttpDriver { scribe: Option<Scribe>, passed: u64, failed: u64 }
///
/// #[async_trait]
/// impl ApiDriver for HttpDriver {
///     fn scribing_on(&mut self, scribe: Scribe) { self.scribe = Some(scribe); }
///     fn scribing_off(&mut self) { self.scribe = None; }
///     async fn results(&mut self) -> FabulaResult<ExpectationResults> {
///         Ok(ExpectationResults::new(self.passed, self.failed))
///     }
/// }
/// ```
#[async_trait]
pub trait ApiDriver: Send {
    /// Waits for outstanding requests to settle.
    ///
    /// Called before the story-level before-hook and before every step.
    async fn wait(&mut self) -> FabulaResult<()> {
        Ok(())
    }

    /// Starts attributing actions and notes to `scribe`.
    fn scribing_on(&mut self, scribe: Scribe);

    /// Stops attributing actions.
    fn scribing_off(&mut self);

    /// Returns the expectation tallies accumulated on this driver.
    ///
    /// # Errors
    ///
    /// Returns an error if outstanding requests fail to settle.
    async fn results(&mut self) -> FabulaResult<ExpectationResults>;
}

/// Creates one driver per path.
pub trait DriverFactory: Send + Sync {
    /// Driver type produced by this factory.
    type Driver: ApiDriver;

    /// Creates a fresh driver.
    fn driver(&self) -> Self::Driver;
}

impl<D, F> DriverFactory for F
where
    D: ApiDriver,
    F: Fn() -> D + Send + Sync,
{
    type Driver = D;

    fn driver(&self) -> D {
        (self)()
    }
}
