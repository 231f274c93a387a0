use std::path::{Path, PathBuf};

use app_core::storage::Storage;
use serde::{Deserialize, Serialize};

use crate::FirePlotApp;

use super::components::RequestForm;

// The backend keeps nothing that is not mirrored in the frontend; the table
// is reloaded from its path.
#[derive(Clone, Serialize, Deserialize)]
struct BackendStorage {}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct FrontendStorage {
    true_alarm: String,
    dismissed_alarm: String,
    table_path: Option<PathBuf>,
    plot_bounds: Option<[f64; 4]>,
}

pub fn save_json(app: &FirePlotApp, path: Option<&Path>) -> Result<(), String> {
    let frontend_storage = FrontendStorage {
        true_alarm: app.request_form.true_alarm.clone(),
        dismissed_alarm: app.request_form.dismissed_alarm.clone(),
        table_path: app.dataset.dataset().path().map(Path::to_path_buf),
        plot_bounds: app
            .plotter
            .chart()
            .map(|_| app.plotter.get_current_plot_bounds()),
    };
    let storage = Storage::new(BackendStorage {}, frontend_storage);
    storage.save_json(path)
}

/// Restore a session. The table is loaded again on the backend and the plot
/// is redrawn once it arrives.
pub fn load_json(app: &mut FirePlotApp, path: Option<&Path>) -> Result<(), String> {
    let Storage::<BackendStorage, FrontendStorage> {
        backend_storage: _,
        frontend_storage,
    } = Storage::load_json(path)?;

    app.request_form = RequestForm::new(
        &frontend_storage.true_alarm,
        &frontend_storage.dismissed_alarm,
    );
    if let Some(bounds) = frontend_storage.plot_bounds {
        app.plotter.apply_bounds(bounds);
    }
    match frontend_storage.table_path {
        Some(table_path) => {
            app.dataset.open(&table_path);
            app.plot_when_loaded = frontend_storage.plot_bounds.is_some();
        }
        None => log::debug!("restored session has no table"),
    }
    app.request_redraw();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let stored = FrontendStorage {
            true_alarm: "2".to_string(),
            dismissed_alarm: "3".to_string(),
            table_path: Some(PathBuf::from("sim_out.txt")),
            plot_bounds: Some([0.0, 50.0, 0.0, 1.0]),
        };
        Storage::new(BackendStorage {}, stored).save_json(Some(&path)).unwrap();

        let Storage::<BackendStorage, FrontendStorage> {
            frontend_storage, ..
        } = Storage::load_json(Some(&path)).unwrap();
        assert_eq!(frontend_storage.true_alarm, "2");
        assert_eq!(frontend_storage.table_path, Some(PathBuf::from("sim_out.txt")));
        assert_eq!(frontend_storage.plot_bounds, Some([0.0, 50.0, 0.0, 1.0]));
    }

    #[test]
    fn test_load_missing_session() {
        let dir = tempfile::tempdir().unwrap();
        let res = Storage::<BackendStorage, FrontendStorage>::load_json(Some(
            &dir.path().join("missing.json"),
        ));
        assert!(res.is_err());
    }
}
