use crate::series::PlotRequest;

/// The two input fields and the plot button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    pub true_alarm: String,
    pub dismissed_alarm: String,
}

impl RequestForm {
    pub fn new(true_alarm: &str, dismissed_alarm: &str) -> Self {
        Self {
            true_alarm: true_alarm.to_owned(),
            dismissed_alarm: dismissed_alarm.to_owned(),
        }
    }

    pub fn request(&self) -> PlotRequest {
        PlotRequest::from_inputs(&self.true_alarm, &self.dismissed_alarm)
    }

    /// Returns true if a plot was requested, either with the button or by
    /// pressing enter in one of the fields.
    pub fn render(&mut self, ui: &mut egui::Ui) -> bool {
        ui.horizontal(|ui| {
            ui.label("True Alarm Count:");
            let true_alarm = ui.add(
                egui::TextEdit::singleline(&mut self.true_alarm)
                    .hint_text("e.g. 2")
                    .desired_width(60.0),
            );
            ui.label("Dismissed Alarm Count:");
            let dismissed_alarm = ui.add(
                egui::TextEdit::singleline(&mut self.dismissed_alarm)
                    .hint_text("e.g. 3")
                    .desired_width(60.0),
            );
            let entered = (true_alarm.lost_focus() || dismissed_alarm.lost_focus())
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.button("Plot").clicked() || entered
        })
        .inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_fields() {
        let form = RequestForm::new("2", "3");
        assert_eq!(form.request(), PlotRequest::new(2, 3));
        assert_eq!(RequestForm::default().request().true_alarm, None);
    }
}
