impl super::DatasetHandler {
    /// One line describing the table in use.
    pub fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.is_loading() {
                ui.spinner();
                ui.label("loading table ...");
            }
            ui.label(self.dataset.to_string());
            if let Some(err) = self.last_error() {
                ui.colored_label(ui.visuals().error_fg_color, err);
            }
        });
    }
}
