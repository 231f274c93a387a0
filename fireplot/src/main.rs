#![warn(clippy::all, rust_2018_idioms)]

use alarm_sim::SweepRanges;
use app_core::backend::BackendEventLoop;
use fireplot::{BackendAppState, Config, FirePlotApp, CONFIG_FILE_NAME};

const WINDOW_NAME: &str = "Fire Probability";
const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 600.0;
const MIN_WINDOW_WIDTH: f32 = 480.0;
const MIN_WINDOW_HEIGHT: f32 = 360.0;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::from_config_file() {
        Ok(config) => config,
        Err(err) => {
            log::warn!(
                "unable to load config file {:?} from home directory: {}",
                CONFIG_FILE_NAME,
                err
            );
            Config::default()
        }
    };

    // start backend loop
    let (command_tx, command_rx) = std::sync::mpsc::channel();
    let backend_state = BackendAppState::new(SweepRanges::default());
    let eventloop_handle = BackendEventLoop::new(command_rx, backend_state).run();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| {
            Ok(Box::new(FirePlotApp::new(
                cc,
                config,
                command_tx,
                eventloop_handle,
            )))
        }),
    )
}
