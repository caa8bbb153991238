//! Chart Component
//!
//! Multi-series line chart using HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::projection::ChartData;
use crate::state::global::{GlobalState, Theme};

/// Chart colors for different series
const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

/// At most this many x-axis labels are drawn; the rest are skipped
const MAX_X_LABELS: usize = 6;

/// Line chart over index-positioned labels
#[component]
pub fn LineChart(
    title: &'static str,
    #[prop(into)] data: Signal<ChartData>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let theme = state.theme;

    // Redraw when the projected data or the theme changes
    create_effect(move |_| {
        let data = data.get();
        let theme = theme.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, title, &data, theme);
        }
    });

    view! {
        <div
            class="chart-panel"
            style=move || format!("background-color: {}", theme.get().panel_background())
        >
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="chart-canvas"
            />

            <ChartLegend data=data />
        </div>
    }
}

/// Legend showing series colors
#[component]
fn ChartLegend(#[prop(into)] data: Signal<ChartData>) -> impl IntoView {
    view! {
        <div class="chart-legend">
            {move || {
                data.get()
                    .series
                    .iter()
                    .enumerate()
                    .map(|(idx, series)| {
                        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
                        view! {
                            <div class="legend-entry">
                                <span
                                    class="legend-swatch"
                                    style=format!("background-color: {}", color)
                                />
                                <span class="legend-label">{series.name}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

/// X position of point `index` out of `count` points on a category axis
fn x_position(index: usize, count: usize, margin_left: f64, chart_width: f64) -> f64 {
    if count <= 1 {
        return margin_left + chart_width / 2.0;
    }
    margin_left + (index as f64 / (count - 1) as f64) * chart_width
}

/// Draw every n-th label so at most [`MAX_X_LABELS`] appear
fn label_step(count: usize) -> usize {
    count.div_ceil(MAX_X_LABELS).max(1)
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, title: &str, data: &ChartData, theme: Theme) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 40.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&theme.panel_background().into());
    ctx.fill_rect(0.0, 0.0, width, height);

    // Title
    ctx.set_fill_style(&theme.text_color().into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text(title, margin_left, 24.0);

    // Find global min/max for y-axis
    let mut global_min = f64::INFINITY;
    let mut global_max = f64::NEG_INFINITY;

    for series in &data.series {
        for &value in &series.values {
            global_min = global_min.min(value);
            global_max = global_max.max(value);
        }
    }

    if data.is_empty() {
        ctx.set_fill_style(&theme.muted_text().into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text(
            "No data for selected range",
            width / 2.0 - 80.0,
            height / 2.0,
        );
        return;
    }

    // Add padding to y range
    let y_range = global_max - global_min;
    let y_padding = if y_range > 0.0 { y_range * 0.1 } else { 1.0 };
    global_min -= y_padding;
    global_max += y_padding;

    if global_min == global_max {
        global_min -= 1.0;
        global_max += 1.0;
    }

    // Draw grid lines
    ctx.set_stroke_style(&theme.grid_color().into());
    ctx.set_line_width(1.0);

    // Horizontal grid lines (5 lines)
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        // Y-axis labels
        let value = global_max - (i as f64 / 5.0) * (global_max - global_min);
        ctx.set_fill_style(&theme.muted_text().into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    let count = data.labels.len();

    // Draw each data series
    for (idx, series) in data.series.iter().enumerate() {
        if series.values.is_empty() {
            continue;
        }

        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        ctx.set_stroke_style(&color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();

        for (i, &value) in series.values.iter().enumerate() {
            let x = x_position(i, count, margin_left, chart_width);

            // Scale y to chart area (inverted because canvas y grows downward)
            let y = margin_top + ((global_max - value) / (global_max - global_min)) * chart_height;

            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }

        ctx.stroke();

        // Draw points
        ctx.set_fill_style(&color.into());
        for (i, &value) in series.values.iter().enumerate() {
            let x = x_position(i, count, margin_left, chart_width);
            let y = margin_top + ((global_max - value) / (global_max - global_min)) * chart_height;

            ctx.begin_path();
            let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // Draw x-axis labels
    ctx.set_fill_style(&theme.muted_text().into());
    ctx.set_font("12px sans-serif");

    let step = label_step(count);
    for (i, label) in data.labels.iter().enumerate() {
        if i % step != 0 {
            continue;
        }
        let x = x_position(i, count, margin_left, chart_width);
        let short: String = label.chars().take(16).collect();
        let _ = ctx.fill_text(&short, x - 30.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_is_centered() {
        let x = x_position(0, 1, 60.0, 700.0);
        assert_eq!(x, 60.0 + 350.0);
    }

    #[test]
    fn test_points_span_the_chart_area() {
        let first = x_position(0, 5, 60.0, 700.0);
        let last = x_position(4, 5, 60.0, 700.0);
        assert_eq!(first, 60.0);
        assert_eq!(last, 760.0);
    }

    #[test]
    fn test_label_step_caps_label_count() {
        assert_eq!(label_step(0), 1);
        assert_eq!(label_step(4), 1);
        assert_eq!(label_step(6), 1);
        assert_eq!(label_step(7), 2);
        assert_eq!(label_step(60), 10);
        for count in 1..=200 {
            let drawn = (0..count).filter(|i| i % label_step(count) == 0).count();
            assert!(drawn <= MAX_X_LABELS + 1);
        }
    }
}
