use log::{debug, error, warn};
use std::{
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering::SeqCst},
        mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
        Arc,
    },
};

use crate::backend::{BackendEventLoop, BackendState};
use crate::frontend::UIParameter;

/// The linker is sent to the backend thread and replies
/// once the action ran on the backend.
pub struct BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T,
    S: BackendState,
{
    backchannel: Sender<T>,
    action: F,
    is_cancelled: Arc<AtomicBool>,
    description: String,
    _marker: PhantomData<S>,
}

impl<T, F, S> BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T,
    S: BackendState,
{
    pub fn new(description: &str, action: F) -> (LinkReceiver<T>, Self) {
        let (tx, rx) = channel();
        let is_cancelled = Arc::new(AtomicBool::new(false));
        let rx = LinkReceiver {
            rx,
            is_cancelled: is_cancelled.clone(),
        };
        (
            rx,
            Self {
                backchannel: tx,
                action,
                description: description.to_owned(),
                is_cancelled,
                _marker: PhantomData,
            },
        )
    }

    /// True once the receiving side was dropped.
    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(SeqCst)
    }
}

impl<T, F, S> BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T + Send + 'static,
    S: BackendState + Send + 'static,
    T: Send + 'static,
{
    /// Run `action` on the backend and let `parameter` pick up the result.
    ///
    /// A request that is still pending for `parameter` is cancelled, because
    /// its receiver is replaced.
    pub fn request_parameter_update(
        parameter: &mut UIParameter<T>,
        description: &str,
        action: F,
        request_tx: &Sender<Box<dyn BackendRequest<S>>>,
    ) {
        let (rx, linker) = Self::new(description, action);
        parameter.set_recv(rx);
        debug!("queueing request '{}'", description);
        if request_tx.send(Box::new(linker)).is_err() {
            error!(
                "unable to send request '{}', backend event loop is gone",
                description
            );
        }
    }
}

pub trait BackendRequest<S>: Send
where
    S: BackendState,
{
    fn run_on_backend(&self, backend: &mut BackendEventLoop<S>);
    fn describe(&self) -> &str;
}

impl<T, F, S> BackendRequest<S> for BackendLink<T, F, S>
where
    F: Fn(&mut BackendEventLoop<S>) -> T + Send,
    S: BackendState + Send,
    T: Send,
{
    fn run_on_backend(&self, backend: &mut BackendEventLoop<S>) {
        if self.is_cancelled() {
            debug!("skipping cancelled request '{}'", self.description);
            return;
        }
        let result = (self.action)(backend);
        // The request might have been cancelled while `self.action` ran.
        if !self.is_cancelled() && self.backchannel.send(result).is_err() {
            warn!(
                "Trying to send message for request '{}' on closed channel.",
                self.description
            );
        }
    }

    fn describe(&self) -> &str {
        &self.description
    }
}

#[derive(Debug)]
pub struct LinkReceiver<T> {
    rx: Receiver<T>,
    is_cancelled: Arc<AtomicBool>,
}

impl<T> LinkReceiver<T> {
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn recv_timeout(&self, duration: std::time::Duration) -> Result<T, RecvTimeoutError> {
        self.rx.recv_timeout(duration)
    }
}

impl<T> Drop for LinkReceiver<T> {
    fn drop(&mut self) {
        debug!("dropping link receiver");
        self.is_cancelled.store(true, SeqCst);
    }
}
