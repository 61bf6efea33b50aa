//! Eagerly started handles for pipeline operations
//!
//! [`Factory::promisify`] hands back a [`PromisedFactory`] whose `build`,
//! `create`, and `cleanup` start running immediately on a task library and
//! return a [`Promise`] the caller awaits later.

use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use super::attributes::Overrides;
use super::factory::Factory;
use crate::domain::{Document, FactoryName};
use crate::error::{Error, Result};

/// Runs detached tasks
pub trait Spawner: Send + Sync + fmt::Debug {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

impl Spawner for Handle {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        drop(Handle::spawn(self, task));
    }
}

/// A task library that may be able to spawn work
pub trait PromiseLibrary {
    /// `None` when the library has no way to run tasks
    fn spawner(&self) -> Option<Arc<dyn Spawner>>;
}

impl PromiseLibrary for Handle {
    fn spawner(&self) -> Option<Arc<dyn Spawner>> {
        Some(Arc::new(self.clone()) as Arc<dyn Spawner>)
    }
}

/// The tokio runtime of the calling context, if there is one
#[derive(Debug, Default, Clone, Copy)]
pub struct AmbientRuntime;

impl PromiseLibrary for AmbientRuntime {
    fn spawner(&self) -> Option<Arc<dyn Spawner>> {
        Handle::try_current()
            .ok()
            .map(|handle| Arc::new(handle) as Arc<dyn Spawner>)
    }
}

/// Result of an operation that is already running
#[derive(Debug)]
pub struct Promise<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T> Future for Promise<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or_else(|_| Err(Error::PromiseDropped)))
    }
}

/// A pipeline surface whose operations return [`Promise`]s
///
/// Shares state with the [`Factory`] it came from; every other operation is
/// reachable through `Deref`. Promises run concurrently unless awaited one
/// at a time, so await each before starting the next to keep creation order.
#[derive(Clone)]
pub struct PromisedFactory {
    factory: Factory,
    spawner: Arc<dyn Spawner>,
}

impl fmt::Debug for PromisedFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromisedFactory")
            .field("factory", &self.factory)
            .field("spawner", &self.spawner)
            .finish()
    }
}

impl PromisedFactory {
    pub fn build(&self, name: impl Into<FactoryName>, overrides: Overrides) -> Promise<Document> {
        let factory = self.factory.clone();
        let name = name.into();
        self.run(async move { factory.build(name, overrides).await })
    }

    pub fn create(&self, name: impl Into<FactoryName>, overrides: Overrides) -> Promise<Document> {
        let factory = self.factory.clone();
        let name = name.into();
        self.run(async move { factory.create(name, overrides).await })
    }

    pub fn cleanup(&self) -> Promise<()> {
        let factory = self.factory.clone();
        self.run(async move { factory.cleanup().await })
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    fn run<T, F>(&self, operation: F) -> Promise<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        self.spawner.spawn(Box::pin(async move {
            // The caller may have dropped the promise; nothing to report to then.
            let _ = sender.send(operation.await);
        }));
        Promise { receiver }
    }
}

impl Deref for PromisedFactory {
    type Target = Factory;

    fn deref(&self) -> &Self::Target {
        &self.factory
    }
}

impl Factory {
    /// Wrap this pipeline so `build`, `create`, and `cleanup` start eagerly
    /// on `library`.
    ///
    /// Fails without touching any state when the library cannot spawn tasks.
    pub fn promisify(&self, library: &dyn PromiseLibrary) -> Result<PromisedFactory> {
        let spawner = library.spawner().ok_or_else(|| {
            Error::configuration("supplied promise library cannot spawn tasks")
        })?;
        Ok(PromisedFactory {
            factory: self.clone(),
            spawner,
        })
    }
}
