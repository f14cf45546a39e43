//! Asynchronous work returned by view-model handlers.
//!
//! Handlers never await. They mutate their view model synchronously and hand
//! back a [`Task`] whose futures resolve to follow-up messages. A driver
//! ([`run_until_idle`]) awaits those futures and feeds each message back
//! into [`ViewModel::update`], which keeps every state mutation inside one
//! synchronous `update` call.

use std::future::Future;

use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};

/// Zero or more pending futures, each producing one message.
#[must_use = "a Task does nothing until it is driven"]
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.futures.len())
            .finish()
    }
}

impl<M: Send + 'static> Task<M> {
    /// A task with no work.
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Runs `future` and maps its output into a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> M + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            futures: vec![Box::pin(async move { map(future.await) })],
        }
    }

    /// Produces `message` without doing any work.
    pub fn done(message: M) -> Self {
        Self {
            futures: vec![Box::pin(async move { message })],
        }
    }

    /// Combines tasks; their futures run concurrently.
    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|task| task.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    /// Number of pending futures.
    pub fn len(&self) -> usize {
        self.futures.len()
    }

    /// Maps every produced message, e.g. to wrap it into a parent message.
    pub fn map<N: Send + 'static>(self, f: impl Fn(M) -> N + Clone + Send + 'static) -> Task<N> {
        Task {
            futures: self
                .futures
                .into_iter()
                .map(|future| {
                    let f = f.clone();
                    Box::pin(async move {
                        let message = future.await;
                        f(message)
                    }) as BoxFuture<'static, N>
                })
                .collect(),
        }
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, M>> {
        self.futures
    }
}

/// A screen driven by messages.
pub trait ViewModel {
    type Message: Send + 'static;

    /// Applies `message` and returns any follow-up work.
    fn update(&mut self, message: Self::Message) -> Task<Self::Message>;
}

/// Drives `task` and every follow-up task until no work is left.
///
/// Returns the number of messages delivered.
pub async fn run_until_idle<V: ViewModel>(view: &mut V, task: Task<V::Message>) -> usize {
    let mut pending: FuturesUnordered<_> = task.into_futures().into_iter().collect();
    let mut delivered = 0;
    while let Some(message) = pending.next().await {
        delivered += 1;
        for future in view.update(message).into_futures() {
            pending.push(future);
        }
    }
    delivered
}

/// Dispatches `message` and drives the resulting work to completion.
pub async fn dispatch<V: ViewModel>(view: &mut V, message: V::Message) -> usize {
    let task = view.update(message);
    run_until_idle(view, task).await
}
