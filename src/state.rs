use crate::render::BarChartSpec;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The viewer's state, independent of rendering.
pub struct ViewerState {
    /// The chart being shown.
    pub chart: BarChartSpec,

    /// Whether bar values are printed above the bars.
    pub show_values: bool,

    /// Index of the bar highlighted in the side panel, if any.
    pub selected: Option<usize>,
}

impl ViewerState {
    pub fn new(chart: BarChartSpec) -> Self {
        Self {
            chart,
            show_values: false,
            selected: None,
        }
    }

    /// Select a bar, or clear the selection if it is already selected.
    pub fn toggle_selected(&mut self, index: usize) {
        if index >= self.chart.bars.len() {
            return;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// One-line summary shown in the top bar.
    pub fn summary(&self) -> String {
        let missing = self.chart.bars.iter().filter(|b| b.value.is_none()).count();
        match (self.chart.bars.len(), missing) {
            (0, _) => "No taxa at this level".to_string(),
            (n, 0) => format!("{n} taxa shown"),
            (n, m) => format!("{n} taxa shown, {m} without abundance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartBar;

    fn state(values: &[Option<f64>]) -> ViewerState {
        ViewerState::new(BarChartSpec {
            title: "t".into(),
            x_label: "Genus".into(),
            y_label: "y".into(),
            bars: values
                .iter()
                .enumerate()
                .map(|(i, v)| ChartBar {
                    label: format!("g{i}"),
                    value: *v,
                    color: [0, 0, 0],
                })
                .collect(),
        })
    }

    #[test]
    fn selection_toggles_and_ignores_out_of_range() {
        let mut s = state(&[Some(1.0)]);
        s.toggle_selected(0);
        assert_eq!(s.selected, Some(0));
        s.toggle_selected(0);
        assert_eq!(s.selected, None);
        s.toggle_selected(5);
        assert_eq!(s.selected, None);
    }

    #[test]
    fn summary_counts_missing_values() {
        assert_eq!(state(&[]).summary(), "No taxa at this level");
        assert_eq!(state(&[Some(1.0)]).summary(), "1 taxa shown");
        assert_eq!(
            state(&[Some(1.0), None]).summary(),
            "2 taxa shown, 1 without abundance"
        );
    }
}
