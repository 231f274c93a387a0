mod components;
pub mod config;
mod events;
pub mod storage;

use self::components::{DatasetHandler, Plotter, RequestForm};
use crate::app::events::EventQueue;
use crate::{chart, BackendAppState};
use app_core::backend::BackendRequest;
use config::Config;
use events::{
    DialogHandle, OpenTableRequested, SaveLoadRequested, SavePlotRequested, SaveTableRequested,
};
use storage::{load_json, save_json};

use std::{sync::mpsc::Sender, thread::JoinHandle};

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

pub struct FirePlotApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    request_form: RequestForm,
    dataset: DatasetHandler,
    plotter: Plotter,
    request_tx: DynRequestSender,
    help_open: bool,
    ui_selection: UISelection,
    event_queue: EventQueue<Self>,
    /// Plot again as soon as the table being loaded arrives.
    plot_when_loaded: bool,
    request_redraw: Option<()>,
}

#[derive(Debug, PartialEq, Eq)]
enum UISelection {
    Plot,
    Preferences,
}

impl FirePlotApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        request_tx: DynRequestSender,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let mut dataset = DatasetHandler::new(request_tx.clone());
        if let Some(path) = &config.table_path {
            dataset.open(path);
        }
        let request_form = RequestForm::new(&config.true_alarm, &config.dismissed_alarm);

        Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            request_form,
            dataset,
            plotter: Plotter::new(),
            request_tx,
            help_open: false,
            ui_selection: UISelection::Plot,
            event_queue: EventQueue::<Self>::new(),
            plot_when_loaded: false,
            request_redraw: None,
        }
    }

    fn reset_state(&mut self) {
        self.request_form = RequestForm::default();
        self.plotter = Plotter::new();
        self.plot_when_loaded = false;
        self.event_queue.discard_events();
    }

    fn update_state(&mut self) {
        self.run_events();
        if self.dataset.try_update() {
            if std::mem::take(&mut self.plot_when_loaded) {
                self.plot_requested();
            }
            self.request_redraw();
        }
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    /// Answer the request in the form from the current table and show it.
    fn plot_requested(&mut self) {
        let request = self.request_form.request();
        let series = request.build_series(self.dataset.records());
        if series.is_empty() {
            log::info!("no combinations in the table match {:?}", request);
        }
        if let Err(err) = chart::render(&series, &mut self.plotter) {
            log::error!("{}", err);
        }
        self.ui_selection = UISelection::Plot;
    }

    fn queue_dialog<E>(
        &mut self,
        description: &str,
        dialog: fn() -> Option<std::path::PathBuf>,
        event: E,
    ) where
        E: FnOnce(Option<DialogHandle>) -> Box<dyn app_core::event::AppEvent<App = Self>>,
    {
        log::debug!("open dialog to {}", description);
        let handle = std::thread::spawn(dialog);
        self.event_queue.queue_event(event(Some(handle)));
    }

    fn open_table_dialog(&mut self) {
        self.queue_dialog(
            "select a table",
            || rfd::FileDialog::new().pick_file(),
            |handle| Box::new(OpenTableRequested::new(handle)),
        );
    }

    fn export_svg_dialog(&mut self) {
        self.queue_dialog(
            "select svg plot path",
            || rfd::FileDialog::new().set_file_name("plot.svg").save_file(),
            |handle| Box::new(SavePlotRequested::new(handle)),
        );
    }
}

impl eframe::App for FirePlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }
        // Backend replies and dialogs are polled, so keep polling while
        // something is pending.
        if self.dataset.is_loading() || !self.event_queue.is_idle() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.update_state();

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.help_open = !self.help_open;
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                should_quit = true;
            }
        });
        if ctx.input(|i| i.key_pressed(egui::Key::O) && i.modifiers.ctrl) {
            self.open_table_dialog();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::P) && i.modifiers.ctrl) {
            self.export_svg_dialog();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_help_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            self.dataset.render_status(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui, ctx);
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl FirePlotApp {
    fn central_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.request_form.render(ui) {
            self.plot_requested();
        }
        ui.separator();

        use UISelection as U;
        match self.ui_selection {
            U::Plot => self.plotter.show(
                ui,
                self.config.plot_linewidth as f32,
                self.config.marker_radius as f32,
            ),
            U::Preferences => {
                self.config.render(ctx, ui);
                if ui.button("Back to Plot").clicked() {
                    self.ui_selection = UISelection::Plot;
                }
            }
        }
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Table...").clicked() {
                    self.open_table_dialog();
                    ui.close_menu();
                }
                if ui.button("Generate Table").clicked() {
                    self.dataset.generate();
                    ui.close_menu();
                }
                if ui.button("Save Table As...").clicked() {
                    self.queue_dialog(
                        "select table path",
                        || rfd::FileDialog::new().set_file_name("sim_out.txt").save_file(),
                        |handle| Box::new(SaveTableRequested::new(handle)),
                    );
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Save Session...").clicked() {
                    self.queue_dialog(
                        "select save path",
                        || rfd::FileDialog::new().save_file(),
                        |handle| Box::new(SaveLoadRequested::new(true, handle)),
                    );
                    ui.close_menu();
                }
                if ui.button("Load Session...").clicked() {
                    self.queue_dialog(
                        "select load path",
                        || rfd::FileDialog::new().pick_file(),
                        |handle| Box::new(SaveLoadRequested::new(false, handle)),
                    );
                    ui.close_menu();
                }
                if ui.button("Quick Save").clicked() {
                    if let Err(error) = save_json(self, None) {
                        log::error!("{}", error)
                    };
                    ui.close_menu();
                }
                if ui.button("Quick Load").clicked() {
                    // The table itself is read on the backend.
                    if let Err(error) = load_json(self, None) {
                        log::error!("{}", error)
                    };
                    ui.close_menu();
                }
                if ui.button("Reset Session").clicked() {
                    self.reset_state();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Export SVG...").clicked() {
                    self.export_svg_dialog();
                    ui.close_menu();
                }
                if ui.button("Preferences").clicked() {
                    self.ui_selection = UISelection::Preferences;
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.toggle_value(&mut self.help_open, "Help (F1)");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
    }

    fn render_help_modal(&mut self, ctx: &egui::Context) {
        if self.help_open
            && egui::Modal::new("help_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Fire Probability Plot");
                    ui.label(
                        "Enter how many alarms were true and how many were dismissed, \
                         then press \"Plot\" to see how the probability of a fire \
                         changes with the number of false alarms.",
                    );
                    ui.separator();
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("Enter = Plot");
                    ui.separator();
                    ui.label("CTRL + O = Open Table");
                    ui.separator();
                    ui.label("CTRL + P = Export SVG");
                    ui.separator();
                    ui.label("F1 = Show Help");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                })
                .should_close()
        {
            self.help_open = false;
        };
    }
}
