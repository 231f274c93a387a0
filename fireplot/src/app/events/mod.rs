use std::{path::PathBuf, sync::mpsc::TryRecvError, thread::JoinHandle};

use derive_new::new;

use crate::app::storage::{load_json, save_json};

use super::FirePlotApp;
use crate::BackendAppState;
use app_core::{
    backend::{BackendEventLoop, BackendLink, LinkReceiver},
    event::{AppEvent, EventState},
    string_error::ErrorStringExt,
};

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<App> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = App>>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = App>>>,
}

impl<App> EventQueue<App> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = App>>) {
        self.queue.push(event);
    }

    /// True if no event is waiting to finish.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.tmp_backlog.is_empty()
    }

    pub fn discard_events(&mut self) {
        self.queue.clear();
        self.tmp_backlog.clear();
    }
}

impl FirePlotApp {
    pub fn run_events(&mut self) {
        // Fully drain all queued events.
        while let Some(mut event) = self.event_queue.queue.pop() {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    self.request_redraw();
                }
                Ok(EventState::Busy) => {
                    // Add busy event to the backlog.
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {}", err)
                }
            }
        }

        // Putting the backlog back in the queue by swapping the
        // vectors.
        std::mem::swap(
            &mut self.event_queue.queue,
            &mut self.event_queue.tmp_backlog,
        );
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// A file dialog running on a helper thread.
pub type DialogHandle = JoinHandle<Option<PathBuf>>;

/// Handles both, saving and loading the session, depending on whether
/// `should_save` is true or false.
#[derive(new)]
pub struct SaveLoadRequested {
    should_save: bool,
    thread_handle: Option<DialogHandle>,
}

#[derive(new)]
pub struct SavePlotRequested {
    thread_handle: Option<DialogHandle>,
}

#[derive(new)]
pub struct OpenTableRequested {
    thread_handle: Option<DialogHandle>,
}

/// Write the current table on the backend, once a path was picked.
#[derive(new)]
pub struct SaveTableRequested {
    thread_handle: Option<DialogHandle>,
    #[new(default)]
    pending: Option<LinkReceiver<Result<(), String>>>,
}

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

/// Poll a dialog thread. `Ok(None)` while the dialog is open, `Ok(Some(None))`
/// if it was cancelled.
fn poll_dialog(handle: &mut Option<DialogHandle>) -> Result<Option<Option<PathBuf>>, String> {
    let Some(handle) = handle.take_if(|handle| handle.is_finished()) else {
        return Ok(None);
    };
    handle
        .join()
        .map(Some)
        .map_err(|err| format!("file dialog failed: {:?}", err))
}

impl AppEvent for SaveLoadRequested {
    type App = FirePlotApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(picked) = poll_dialog(&mut self.thread_handle)? else {
            return Ok(EventState::Busy);
        };
        if let Some(path) = picked {
            if self.should_save {
                save_json(app, Some(path.as_ref()))
                    .map_err(|err| format!("error while trying to save to {:?}: {}", &path, err))?;
            } else {
                load_json(app, Some(path.as_ref()))
                    .map_err(|err| format!("error while trying to load {:?}: {}", &path, err))?;
            }
        }
        Ok(EventState::Finished)
    }
}

impl AppEvent for SavePlotRequested {
    type App = FirePlotApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(picked) = poll_dialog(&mut self.thread_handle)? else {
            return Ok(EventState::Busy);
        };
        if let Some(path) = picked {
            super::components::save_svg(app, &path)?;
        }
        Ok(EventState::Finished)
    }
}

impl AppEvent for OpenTableRequested {
    type App = FirePlotApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let Some(picked) = poll_dialog(&mut self.thread_handle)? else {
            return Ok(EventState::Busy);
        };
        if let Some(path) = picked {
            app.dataset.open(&path);
        }
        Ok(EventState::Finished)
    }
}

impl AppEvent for SaveTableRequested {
    type App = FirePlotApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        if let Some(rx) = &self.pending {
            return match rx.try_recv() {
                Ok(result) => result.map(|_| EventState::Finished),
                Err(TryRecvError::Empty) => Ok(EventState::Busy),
                Err(TryRecvError::Disconnected) => {
                    Err("backend hung up while writing the table".to_string())
                }
            };
        }

        let Some(picked) = poll_dialog(&mut self.thread_handle)? else {
            return Ok(EventState::Busy);
        };
        let Some(path) = picked else {
            return Ok(EventState::Finished);
        };
        let (rx, linker) = BackendLink::new(
            "write combinations table",
            move |b: &mut BackendEventLoop<BackendAppState>| b.state.write_current(&path),
        );
        app.request_tx
            .send(Box::new(linker))
            .err_to_string("unable to send request to backend")?;
        self.pending = Some(rx);
        Ok(EventState::Busy)
    }
}
