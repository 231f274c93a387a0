/// Whether an event is done or has to be polled again on the next frame
/// (e.g. because it waits for a file dialog running on another thread).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    Finished,
    Busy,
}

pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}
