mod backend_link;
mod eventloop;

pub use self::{
    backend_link::{BackendLink, BackendRequest, LinkReceiver},
    eventloop::{request_stop, BackendEventLoop},
};

/// Marker for the state owned by the backend thread.
pub trait BackendState {}

/// The sending half that the frontend uses to queue backend requests.
pub type RequestSender<S> = std::sync::mpsc::Sender<Box<dyn BackendRequest<S>>>;
