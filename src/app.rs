use eframe::egui;

use crate::error::{PlotError, Result};
use crate::render::BarChartSpec;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChartViewerApp {
    pub state: ViewerState,
}

impl ChartViewerApp {
    pub fn new(chart: BarChartSpec) -> Self {
        Self {
            state: ViewerState::new(chart),
        }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: ranked taxa ----
        egui::SidePanel::left("taxa_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: bar chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::bar_plot(ui, &self.state);
        });
    }
}

/// Open a window showing `chart`; returns once the window is closed.
pub fn show(chart: BarChartSpec) -> Result<()> {
    let title = chart.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    log::info!("Opening viewer window: {title}");
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ChartViewerApp::new(chart)))),
    )
    .map_err(|e| PlotError::Viewer(e.to_string()))
}
