//! FIFO dispatch of work onto the UI thread.
//!
//! The content engine emits accessibility events asynchronously on its own
//! thread, but platform UI objects may only be touched on the UI thread. Work
//! therefore hops threads through a single FIFO queue: a later focus event
//! must never be observed before an earlier one.
//!
//! # How It Works
//!
//! 1. [`Dispatcher`] owns the consumer end of the queue and lives with the
//!    UI thread; [`DispatchProxy`] is the cloneable producer end handed to
//!    any other thread.
//!
//! 2. [`DispatchProxy::post`] enqueues a closure and returns immediately.
//!    [`DispatchProxy::post_blocking`] additionally parks the caller on a
//!    completion pair until the closure has run.
//!
//! 3. The UI thread calls [`Dispatcher::run_pending`] from its event loop to
//!    drain everything queued so far, in submission order.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use parking_lot::{Condvar, Mutex};

use crate::error::{CoreError, Result};
use crate::logging::targets;

/// A boxed call queued for the UI thread.
type BoxedCall = Box<dyn FnOnce() + Send + 'static>;

/// A queued call, optionally carrying a completion notifier for blocking posts.
struct QueuedCall {
    call: BoxedCall,
    completion: Option<CompletionHandle>,
}

impl QueuedCall {
    fn run(self) {
        (self.call)();
        if let Some(completion) = self.completion {
            completion.signal_done();
        }
    }
}

/// The UI-thread consumer end of the dispatch queue.
///
/// Create one per UI thread and drain it from the event loop. Dropping the
/// dispatcher closes the queue; subsequent posts fail with
/// [`CoreError::DispatcherClosed`].
pub struct Dispatcher {
    tx: Sender<QueuedCall>,
    rx: Receiver<QueuedCall>,
}

impl Dispatcher {
    /// Create a new dispatch queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Get a producer handle that can be cloned and sent to other threads.
    pub fn proxy(&self) -> DispatchProxy {
        DispatchProxy {
            tx: self.tx.clone(),
        }
    }

    /// Run every call currently queued, in FIFO order.
    ///
    /// Must be called from the UI thread. Returns the number of calls run.
    pub fn run_pending(&self) -> usize {
        let mut count = 0;
        loop {
            match self.rx.try_recv() {
                Ok(queued) => {
                    queued.run();
                    count += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if count > 0 {
            tracing::trace!(target: targets::DISPATCH, count, "drained dispatch queue");
        }
        count
    }

    /// Get the number of calls waiting to be run.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable producer handle for posting work to the UI thread.
#[derive(Clone)]
pub struct DispatchProxy {
    tx: Sender<QueuedCall>,
}

impl DispatchProxy {
    /// Post a call to run on the UI thread. Returns immediately.
    pub fn post<F>(&self, call: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(QueuedCall {
                call: Box::new(call),
                completion: None,
            })
            .map_err(|_| CoreError::DispatcherClosed)
    }

    /// Post a call and block until the UI thread has run it.
    ///
    /// # Warning
    ///
    /// Calling this from the UI thread itself deadlocks, since the queue is
    /// drained by that same thread.
    pub fn post_blocking<F>(&self, call: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let (handle, waiter) = completion_pair();
        self.tx
            .send(QueuedCall {
                call: Box::new(call),
                completion: Some(handle),
            })
            .map_err(|_| CoreError::DispatcherClosed)?;
        waiter.wait();
        Ok(())
    }
}

/// A handle for signaling completion of a blocking post.
pub struct CompletionHandle {
    inner: std::sync::Arc<CompletionState>,
}

impl CompletionHandle {
    /// Signal that the call has finished.
    fn signal_done(self) {
        let mut done = self.inner.done.lock();
        *done = true;
        self.inner.condvar.notify_all();
    }
}

/// A waiter that blocks until the paired handle signals completion.
pub struct CompletionWaiter {
    inner: std::sync::Arc<CompletionState>,
}

impl CompletionWaiter {
    /// Block the current thread until the call completes.
    pub fn wait(self) {
        let mut done = self.inner.done.lock();
        while !*done {
            self.inner.condvar.wait(&mut done);
        }
    }

    /// Block until the call completes or `timeout` elapses.
    ///
    /// Returns `true` if the call completed.
    pub fn wait_timeout(self, timeout: std::time::Duration) -> bool {
        let mut done = self.inner.done.lock();
        if *done {
            return true;
        }
        let result = self.inner.condvar.wait_for(&mut done, timeout);
        *done || !result.timed_out()
    }
}

struct CompletionState {
    done: Mutex<bool>,
    condvar: Condvar,
}

/// Create a completion handle/waiter pair for blocking cross-thread calls.
pub fn completion_pair() -> (CompletionHandle, CompletionWaiter) {
    let state = std::sync::Arc::new(CompletionState {
        done: Mutex::new(false),
        condvar: Condvar::new(),
    });
    (
        CompletionHandle {
            inner: state.clone(),
        },
        CompletionWaiter { inner: state },
    )
}
