use std::path::Path;

use alarm_table::Combination;
use app_core::backend::{BackendEventLoop, BackendLink};

use crate::{backend_state::Dataset, BackendAppState};

impl super::DatasetHandler {
    pub fn open(&mut self, path: &Path) {
        let path = path.to_owned();
        log::debug!("requesting table {:?}", path);
        BackendLink::request_parameter_update(
            &mut self.incoming,
            "load combinations table",
            move |b: &mut BackendEventLoop<BackendAppState>| Some(b.state.load_table(&path)),
            &self.request_tx,
        );
    }

    pub fn generate(&mut self) {
        BackendLink::request_parameter_update(
            &mut self.incoming,
            "generate combinations table",
            |b: &mut BackendEventLoop<BackendAppState>| Some(Ok(b.state.generate_table())),
            &self.request_tx,
        );
    }

    /// Pick up a table sent by the backend. Returns true if anything
    /// changed.
    pub fn try_update(&mut self) -> bool {
        if !self.incoming.try_update() {
            return false;
        }
        match self.incoming.value_mut().take() {
            Some(Ok(dataset)) => {
                log::info!("using {}", dataset);
                self.dataset = dataset;
                self.last_error = None;
            }
            Some(Err(err)) => {
                log::error!("{}", err);
                self.last_error = Some(err);
            }
            None => (),
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        !self.incoming.is_up_to_date()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn records(&self) -> &[Combination] {
        self.dataset.records()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use alarm_sim::SweepRanges;
    use alarm_table::{Prob, Table};
    use app_core::backend::request_stop;

    use super::*;
    use crate::app::components::DatasetHandler;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn wait_for(handler: &mut DatasetHandler) {
        let start = Instant::now();
        while handler.is_loading() {
            handler.try_update();
            assert!(start.elapsed() < Duration::from_secs(10), "backend did not reply");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_open_and_failed_open() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim_out.txt");
        Table::new(vec![Combination::new(10, 2, 3, Prob::Number(0.75))])
            .write_path(&path)
            .unwrap();

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let state = BackendAppState::new(SweepRanges::default());
        let handle = BackendEventLoop::new(request_rx, state).run();
        let mut handler = DatasetHandler::new(request_tx.clone());

        handler.open(&path);
        assert!(handler.is_loading());
        wait_for(&mut handler);
        assert_eq!(handler.records().len(), 1);
        assert_eq!(handler.dataset().path(), Some(path.as_path()));
        assert!(handler.last_error().is_none());

        handler.open(&dir.path().join("missing.txt"));
        wait_for(&mut handler);
        assert_eq!(handler.records().len(), 1);
        assert!(handler.last_error().is_some());

        request_stop(&request_tx, handle);
    }
}
