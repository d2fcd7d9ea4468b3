use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use eframe::egui::FontDefinitions;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle, FontTransform};

use crate::error::{PlotError, Result};
use crate::render::BarChartSpec;

const FONT_FAMILY: &str = "sans-serif";
/// egui ships this font, so rendering works without system fonts.
const EMBEDDED_FONT: &str = "Ubuntu-Light";

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

/// Render `spec` and write it as a PNG at `path`.
///
/// The image is written to a temporary file next to `path` and renamed into
/// place, so `path` is either fully replaced or left untouched.
pub fn write_png(spec: &BarChartSpec, path: &Path, width: u32, height: u32) -> Result<()> {
    let pixels = draw_rgb(spec, width, height)?;
    let image = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| PlotError::Render("pixel buffer does not match chart size".into()))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| PlotError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| PlotError::Render(format!("encoding PNG: {e}")))?;
        writer.flush().map_err(|e| PlotError::io(path, e))?;
    }
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(output_permissions(path))
        .map_err(|e| PlotError::io(path, e))?;
    tmp.persist(path).map_err(|e| PlotError::io(path, e.error))?;
    Ok(())
}

/// Mode for the renamed file: an overwritten target keeps its own mode, a new
/// one gets the usual 0644 instead of the 0600 of a temporary file.
#[cfg(unix)]
fn output_permissions(path: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644))
}

/// Render `spec` into a packed RGB8 buffer of `width * height` pixels.
pub fn draw_rgb(spec: &BarChartSpec, width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(PlotError::Render(format!(
            "chart size must be non-zero, got {width}x{height}"
        )));
    }
    ensure_font()?;

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, spec).map_err(|e| PlotError::Render(e.to_string()))?;
        root.present().map_err(|e| PlotError::Render(e.to_string()))?;
    }
    Ok(buffer)
}

// ---------------------------------------------------------------------------
// Chart layout
// ---------------------------------------------------------------------------

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarChartSpec,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (_, height) = root.dim_in_pixel();
    // Font sizes track the raster height; 500 px is the unscaled layout.
    let scale = f64::from(height) / 500.0;
    let caption_size = 20.0 * scale;
    let label_size = 12.0 * scale;
    let desc_size = 14.0 * scale;

    // One unit-wide slot per bar; an empty chart still gets one slot.
    let slots = spec.bars.len().max(1) as f64;
    let max = spec.max_value();
    let y_max = if max > 0.0 { max * 1.05 } else { 1.0 };

    let longest_label = spec
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let x_label_area = (longest_label as f64 * label_size * 0.6 + desc_size * 2.5) as u32;

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT_FAMILY, caption_size))
        .margin((10.0 * scale) as u32)
        .x_label_area_size(x_label_area.min(height / 2))
        .y_label_area_size((60.0 * scale) as u32)
        .build_cartesian_2d(0f64..slots, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_label_style((FONT_FAMILY, label_size))
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .axis_desc_style((FONT_FAMILY, desc_size))
        .draw()?;

    chart.draw_series(spec.bars.iter().enumerate().filter_map(|(i, bar)| {
        let value = bar.value?;
        let [r, g, b] = bar.color;
        let x = i as f64;
        Some(Rectangle::new(
            [(x + 0.1, 0.0), (x + 0.9, value)],
            RGBColor(r, g, b).filled(),
        ))
    }))?;

    // Category labels, rotated to run downwards from under each bar.
    let label_font = (FONT_FAMILY, label_size)
        .into_font()
        .transform(FontTransform::Rotate90);
    for (i, bar) in spec.bars.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64 + 0.5, 0.0));
        let pos = (x + (label_size / 2.0) as i32, y + (label_size / 2.0) as i32);
        root.draw(&Text::new(bar.label.clone(), pos, label_font.clone()))?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Font registration
// ---------------------------------------------------------------------------

/// Register egui's bundled font with plotters, once per process.
fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            let defs = FontDefinitions::default();
            let data = defs
                .font_data
                .get(EMBEDDED_FONT)
                .ok_or_else(|| format!("font '{EMBEDDED_FONT}' is not bundled"))?;
            let bytes: &'static [u8] = match &data.font {
                Cow::Borrowed(bytes) => *bytes,
                Cow::Owned(bytes) => Box::leak(bytes.clone().into_boxed_slice()),
            };
            register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .map_err(|_| format!("font '{EMBEDDED_FONT}' could not be parsed"))
        })
        .clone()
        .map_err(PlotError::Render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartBar;

    fn spec(values: &[Option<f64>]) -> BarChartSpec {
        BarChartSpec {
            title: "Sample - Top Phylum Composition".into(),
            x_label: "Phylum".into(),
            y_label: "Relative abundance (%)".into(),
            bars: values
                .iter()
                .enumerate()
                .map(|(i, v)| ChartBar {
                    label: format!("Taxon_{i}"),
                    value: *v,
                    color: [200, 30, 30],
                })
                .collect(),
        }
    }

    fn count_color(buffer: &[u8], rgb: [u8; 3]) -> usize {
        buffer.chunks_exact(3).filter(|px| *px == rgb).count()
    }

    #[test]
    fn bars_are_painted_in_their_color() {
        let buffer = draw_rgb(&spec(&[Some(40.0), Some(10.0)]), 400, 250).unwrap();
        assert_eq!(buffer.len(), 400 * 250 * 3);
        assert!(count_color(&buffer, [200, 30, 30]) > 0);
    }

    #[test]
    fn empty_and_missing_charts_paint_no_bars() {
        let empty = draw_rgb(&spec(&[]), 400, 250).unwrap();
        assert_eq!(count_color(&empty, [200, 30, 30]), 0);

        let missing = draw_rgb(&spec(&[None, None]), 400, 250).unwrap();
        assert_eq!(count_color(&missing, [200, 30, 30]), 0);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = draw_rgb(&spec(&[Some(1.0)]), 0, 100).unwrap_err();
        assert!(matches!(err, PlotError::Render(_)));
    }

    #[test]
    fn writes_png_and_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phylum_barplot.png");
        std::fs::write(&path, b"stale").unwrap();

        write_png(&spec(&[Some(5.0)]), &path, 320, 200).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (320, 200));
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn unwritable_destination_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.png");
        let err = write_png(&spec(&[Some(5.0)]), &path, 320, 200).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn new_png_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genus_barplot.png");
        write_png(&spec(&[Some(5.0)]), &path, 320, 200).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn overwritten_png_keeps_the_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genus_barplot.png");
        std::fs::write(&path, b"stale").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o664)).unwrap();

        write_png(&spec(&[Some(5.0)]), &path, 320, 200).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }
}
