use eframe::egui;

pub struct SourceFilter;

impl SourceFilter {
    /// Returns the newly picked source, if the user changed it.
    pub fn show(ui: &mut egui::Ui, sources: &[String], selected: &str) -> Option<String> {
        let mut picked = selected.to_string();

        ui.horizontal(|ui| {
            ui.label("Source:");
            egui::ComboBox::from_id_salt("source_filter")
                .selected_text(selected)
                .width(180.0)
                .show_ui(ui, |ui| {
                    for source in sources {
                        ui.selectable_value(&mut picked, source.clone(), source);
                    }
                });
        });

        (picked != selected).then_some(picked)
    }
}
