use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::to_color32;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – ranked taxa
// ---------------------------------------------------------------------------

/// Render the ranked list of taxa; clicking an entry highlights its bar.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading(state.chart.x_label.as_str());
    ui.separator();

    if state.chart.bars.is_empty() {
        ui.label("No taxa at this level.");
        return;
    }

    let mut clicked = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("taxa_table")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (i, bar) in state.chart.bars.iter().enumerate() {
                        ui.label(format!("{}", i + 1));

                        let text = RichText::new(&bar.label).color(to_color32(bar.color));
                        if ui
                            .selectable_label(state.selected == Some(i), text)
                            .clicked()
                        {
                            clicked = Some(i);
                        }

                        match bar.value {
                            Some(v) => ui.label(format!("{v:.3}%")),
                            None => ui.weak("n/a"),
                        };
                        ui.end_row();
                    }
                });
        });

    if let Some(i) = clicked {
        state.toggle_selected(i);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and display toggles.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(state.chart.title.as_str());

        ui.separator();
        ui.label(state.summary());

        ui.separator();
        if ui
            .selectable_label(state.show_values, "Show values")
            .clicked()
        {
            state.show_values = !state.show_values;
        }
    });
}
