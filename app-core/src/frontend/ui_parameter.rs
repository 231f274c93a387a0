use std::sync::mpsc::TryRecvError;

use log::warn;

use crate::backend::LinkReceiver;

/// A value shown in the UI whose next version is computed on the backend.
///
/// While an update is pending, the old value stays readable, so the UI never
/// has to wait for the backend.
#[derive(Debug)]
pub struct UIParameter<T> {
    pending_update_rx: Option<LinkReceiver<T>>,
    value: T,
}

impl<T: Clone> Clone for UIParameter<T> {
    fn clone(&self) -> Self {
        Self {
            pending_update_rx: None,
            value: self.value.clone(),
        }
    }
}

impl<T: Default> Default for UIParameter<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> UIParameter<T> {
    pub fn new(val: T) -> Self {
        UIParameter {
            pending_update_rx: None,
            value: val,
        }
    }

    /// Poll for a value sent by the backend. Returns true if the parameter
    /// changed state and the UI should be redrawn.
    pub fn try_update(&mut self) -> bool {
        let Some(rx) = &self.pending_update_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(val) => {
                self.value = val;
                self.pending_update_rx = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!("Tried to receive message from closed channel.");
                self.pending_update_rx = None;
                true
            }
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending_update_rx.is_none()
    }

    /// Wait for a pending update to arrive on the backchannel. Dropping a
    /// previous receiver cancels the request it belonged to.
    pub fn set_recv(&mut self, rx: LinkReceiver<T>) {
        self.pending_update_rx = Some(rx);
    }

    /// Set the value directly, cancelling any pending update.
    pub fn set(&mut self, val: T) {
        self.pending_update_rx = None;
        self.value = val;
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}
