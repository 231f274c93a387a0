use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use log::{info, warn};

use crate::backend::{BackendLink, BackendRequest, BackendState};

pub struct BackendEventLoop<S>
where
    S: BackendState,
{
    pub state: S,
    request_rx: Receiver<Box<dyn BackendRequest<S>>>,
    should_stop: bool,
}

impl<S: BackendState + Send + 'static> BackendEventLoop<S> {
    pub fn new(request_rx: Receiver<Box<dyn BackendRequest<S>>>, state: S) -> Self {
        info!("creating new event loop");
        Self {
            state,
            request_rx,
            should_stop: false,
        }
    }

    /// Block until a request arrives, then handle it together with all
    /// requests queued behind it. Returns true if the loop should stop.
    pub fn update(&mut self) -> bool {
        let Ok(first) = self.request_rx.recv() else {
            info!("all request senders are gone");
            return true;
        };
        let mut next = Some(first);
        while let Some(request) = next.take() {
            info!("handling request '{}'", request.describe());
            request.run_on_backend(self);
            next = self.request_rx.try_recv().ok();
        }
        self.should_stop
    }

    pub fn run(mut self) -> JoinHandle<()> {
        std::thread::spawn(move || loop {
            if self.update() {
                info!("stopping backend event loop");
                break;
            }
        })
    }

    pub fn signal_stop(&mut self) -> bool {
        self.should_stop = true;
        true
    }
}

pub fn request_stop<S: BackendState + Send + 'static>(
    request_tx: &Sender<Box<dyn BackendRequest<S>>>,
    backend_thread_handle: JoinHandle<()>,
) {
    let (rx, signal_end_linker) =
        BackendLink::new("try end event loop", |b: &mut BackendEventLoop<S>| {
            b.signal_stop()
        });
    info!("sending signal to end backend event loop");
    if request_tx.send(Box::new(signal_end_linker)).is_ok() {
        if let Err(e) = rx.recv_timeout(std::time::Duration::from_secs(10)) {
            warn!("did not receive a response after 10 seconds: {e}");
        };
    };
    match backend_thread_handle.join() {
        Ok(_) => info!("backend event loop ended"),
        Err(e) => warn!("failed to signal event loop to stop: {e:?}"),
    }
}
