#![warn(clippy::all, rust_2018_idioms)]

pub mod backend;
pub mod event;
pub mod frontend;
pub mod storage;
pub mod string_error;

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use log::trace;

    use crate::backend::{request_stop, BackendEventLoop, BackendLink, BackendState};
    use crate::frontend::UIParameter;

    struct TestState {
        counter: u32,
    }
    impl BackendState for TestState {}

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_cancel_request_working() {
        init();

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let eventloop_handle =
            BackendEventLoop::new(request_rx, TestState { counter: 0 }).run();

        let tic = Instant::now();

        let (rx, linker) = BackendLink::new("test", |_: &mut BackendEventLoop<TestState>| {
            std::thread::sleep(Duration::from_millis(1000));
        });

        // Dropping rx makes the request invalid, such that the backend
        // action (waiting for 1 s) is not executed ...
        drop(rx);
        trace!("drop of receiver done");
        assert!(linker.is_cancelled());
        request_tx.send(Box::new(linker)).unwrap();
        // (this joins the event loop thread, making it block for as long as
        // the backend action takes)
        request_stop(&request_tx, eventloop_handle);
        // ... thus this whole process takes much less than a second.
        assert!(tic.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_parameter_update_from_backend() {
        init();

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let eventloop_handle =
            BackendEventLoop::new(request_rx, TestState { counter: 41 }).run();

        let mut parameter = UIParameter::new(0u32);
        BackendLink::request_parameter_update(
            &mut parameter,
            "increment counter",
            |b: &mut BackendEventLoop<TestState>| {
                b.state.counter += 1;
                b.state.counter
            },
            &request_tx,
        );
        assert!(!parameter.is_up_to_date());

        let tic = Instant::now();
        while !parameter.try_update() {
            assert!(tic.elapsed() < Duration::from_secs(5), "backend never replied");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(*parameter.value(), 42);
        assert!(parameter.is_up_to_date());

        request_stop(&request_tx, eventloop_handle);
    }

    #[test]
    fn test_set_discards_pending_update() {
        init();

        let (rx, linker) =
            BackendLink::new("never runs", |_: &mut BackendEventLoop<TestState>| 5u32);
        let mut parameter = UIParameter::new(1u32);
        parameter.set_recv(rx);
        parameter.set(2);
        assert!(linker.is_cancelled());
        assert!(!parameter.try_update());
        assert_eq!(*parameter.value(), 2);
    }
}
