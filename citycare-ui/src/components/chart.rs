//! Chart Component
//!
//! Rolling vitals chart using HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use citycare::ChartWindow;

use crate::state::GlobalState;

const LINE_COLOR: &str = "#FF9800";

/// Live chart of the monitor's window
#[component]
pub fn Chart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let monitor = state.monitor;

    // Redraw whenever the controller publishes
    create_effect(move |_| {
        let chart = monitor.with(|snapshot| snapshot.chart.clone());
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, chart.as_ref());
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />

            <div class="flex justify-center mt-4">
                {move || {
                    monitor.with(|snapshot| snapshot.chart.as_ref().map(|chart| view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", LINE_COLOR)
                            />
                            <span class="text-sm text-gray-300">{chart.title()}</span>
                        </div>
                    }))
                }}
            </div>
        </div>
    }
}

/// Y axis bounds with 10% headroom; a flat or empty series gets ±1
fn y_bounds(range: Option<(f64, f64)>) -> (f64, f64) {
    let Some((min, max)) = range else {
        return (0.0, 1.0);
    };
    let span = max - min;
    let padding = if span > 0.0 { span * 0.1 } else { 1.0 };
    (min - padding, max + padding)
}

/// X position of slot `index` in a window of `capacity` slots
fn x_position(index: usize, capacity: usize, left: f64, width: f64) -> f64 {
    if capacity <= 1 {
        return left;
    }
    left + (index as f64 / (capacity - 1) as f64) * width
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, chart: Option<&ChartWindow>) {
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
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let Some(chart) = chart else {
        return;
    };

    let (y_min, y_max) = y_bounds(chart.value_range());

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }
    let _ = ctx.fill_text(chart.axis_title(), 5.0, margin_top - 6.0);

    if chart.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("Waiting for data", width / 2.0 - 60.0, height / 2.0);
        return;
    }

    let capacity = chart.capacity();
    let to_y = |value: f64| margin_top + ((y_max - value) / (y_max - y_min)) * chart_height;

    // Series
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in chart.points().enumerate() {
        let x = x_position(i, capacity, margin_left, chart_width);
        if i == 0 {
            ctx.move_to(x, to_y(point.value));
        } else {
            ctx.line_to(x, to_y(point.value));
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, point) in chart.points().enumerate() {
        let x = x_position(i, capacity, margin_left, chart_width);
        ctx.begin_path();
        let _ = ctx.arc(x, to_y(point.value), 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // Time labels: first, middle and last point
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    let labels = chart.labels();
    let last = labels.len() - 1;
    let mut shown = vec![0, last / 2, last];
    shown.dedup();
    for i in shown {
        let x = x_position(i, capacity, margin_left, chart_width);
        let _ = ctx.fill_text(&labels[i], x - 25.0, height - 10.0);
    }
}
