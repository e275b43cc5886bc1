use plotters::prelude::*;
use std::collections::HashMap;
use std::error::Error;

use crate::dataset::{Algorithm, GraphType, Measurement};

// 6.4 x 4.8 inch figure rasterized at 288 dpi
const FIGURE_SIZE: (u32, u32) = (1843, 1382);
const BOX_WIDTH: u32 = 60;
const BOX_OFFSET: f64 = 45.0;

/// Draws the grouped runtime boxplot: one category per graph type in the
/// fixed display order, one box per algorithm within each category,
/// log-scale runtime axis. Writes a PNG to `output_file`.
pub fn runtime_boxplot(measurements: &[Measurement], output_file: &str) -> Result<(), Box<dyn Error>> {
    let mut groups: HashMap<(GraphType, Algorithm), Vec<f64>> = HashMap::new();
    for m in measurements {
        if let (Some(graph_type), Some(runtime)) = (m.graph_type, m.runtime) {
            groups
                .entry((graph_type, m.algorithm))
                .or_insert_with(Vec::new)
                .push(runtime);
        }
    }

    let (y_min, y_max) = value_bounds(groups.values().flatten().copied());

    let ticks: Vec<&str> = GraphType::ALL.iter().map(|t| t.tick_label()).collect();

    let root = BitMapBackend::new(output_file, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Runtime Distribution by Graph Type", ("serif", 50).into_font())
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(100)
        // Quartiles are f32-valued, so the value axis must be too
        .build_cartesian_2d(
            ticks[..].into_segmented(),
            (y_min as f32..y_max as f32).log_scale(),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Graph Type")
        .y_desc("Runtime (s)")
        .axis_desc_style(("serif", 36))
        .label_style(("serif", 28))
        .draw()?;

    for (color_index, &algorithm) in Algorithm::ALL.iter().enumerate() {
        let color = Palette99::pick(color_index);
        // shift igraph left and ours right within each category
        let offset = match algorithm {
            Algorithm::Igraph => -BOX_OFFSET,
            Algorithm::Ours => BOX_OFFSET,
        };

        let boxes: Vec<_> = GraphType::ALL
            .iter()
            .enumerate()
            .filter_map(|(i, graph_type)| {
                let values = groups.get(&(*graph_type, algorithm))?;
                if values.is_empty() {
                    return None;
                }
                let quartiles = Quartiles::new(values);
                Some(
                    Boxplot::new_vertical(SegmentValue::CenterOf(&ticks[i]), &quartiles)
                        .width(BOX_WIDTH)
                        .whisker_width(0.5)
                        .style(color.filled())
                        .offset(offset),
                )
            })
            .collect();

        chart
            .draw_series(boxes)?
            .label(algorithm.label())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("serif", 30))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Padded positive bounds for the log-scale axis.
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| *v > 0.0) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        // nothing positive to plot, pick an arbitrary decade
        return (0.001, 1.0);
    }
    (min / 2.0, max * 2.0)
}

#[test]
fn should_render_boxplot_png() {
    let mut measurements = Vec::new();
    for &graph_type in GraphType::ALL.iter() {
        for &algorithm in Algorithm::ALL.iter() {
            for runtime in [0.5, 1.0, 2.0, 4.0] {
                measurements.push(Measurement {
                    graph_type: Some(graph_type),
                    algorithm,
                    runtime: Some(runtime),
                });
            }
        }
    }

    let output = std::env::temp_dir().join("perfbench_report_boxplot_test.png");
    let output = output.to_str().unwrap();
    runtime_boxplot(&measurements, output).unwrap();
    let written = std::fs::metadata(output).unwrap();
    assert!(written.len() > 0);
    std::fs::remove_file(output).unwrap();
}

#[test]
fn should_pad_value_bounds() {
    let (lo, hi) = value_bounds([0.5, 2.0, 0.0].into_iter());
    assert_eq!(lo, 0.25);
    assert_eq!(hi, 4.0);
}

#[test]
fn should_fall_back_on_empty_bounds() {
    let (lo, hi) = value_bounds(std::iter::empty());
    assert!(lo > 0.0 && hi > lo);
}
