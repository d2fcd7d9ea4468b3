use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::to_color32;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Bar plot (central panel)
// ---------------------------------------------------------------------------

/// Render the top-N bar chart in the central panel.
pub fn bar_plot(ui: &mut Ui, state: &ViewerState) {
    if state.chart.bars.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No taxa matched this level");
        });
        return;
    }

    let bars: Vec<Bar> = state
        .chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let mut fill = to_color32(bar.color);
            if state.selected.is_some_and(|s| s != i) {
                fill = fill.gamma_multiply(0.35);
            }
            Bar::new(i as f64, bar.value.unwrap_or(0.0))
                .name(&bar.label)
                .width(0.8)
                .fill(fill)
                .stroke(Stroke::new(1.0, Color32::DARK_GRAY))
        })
        .collect();

    let chart = BarChart::new(bars).name(&state.chart.x_label);

    let labels: Vec<String> = state.chart.bars.iter().map(|b| b.label.clone()).collect();
    let value_tags: Vec<(f64, f64)> = if state.show_values {
        state
            .chart
            .bars
            .iter()
            .enumerate()
            .filter_map(|(i, bar)| bar.value.map(|v| (i as f64, v)))
            .collect()
    } else {
        Vec::new()
    };

    Plot::new("bar_plot")
        .x_axis_label(state.chart.x_label.as_str())
        .y_axis_label(state.chart.y_label.as_str())
        .x_axis_formatter(move |mark, _range| {
            tick_label(&labels, mark.value)
                .unwrap_or_default()
                .to_string()
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            for (x, v) in value_tags {
                plot_ui.text(Text::new(PlotPoint::new(x, v), format!("{v:.2}")));
            }
        });
}

/// Label for the x-axis tick at `value`, if it falls on a bar centre.
fn tick_label(labels: &[String], value: f64) -> Option<&str> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    labels.get(rounded as usize).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_only_on_bar_centres() {
        let labels = vec!["g0".to_string(), "g1".to_string()];
        assert_eq!(tick_label(&labels, 0.0), Some("g0"));
        assert_eq!(tick_label(&labels, 1.0), Some("g1"));
        assert_eq!(tick_label(&labels, 0.5), None);
        assert_eq!(tick_label(&labels, 2.0), None);
        assert_eq!(tick_label(&labels, -1.0), None);
    }
}
