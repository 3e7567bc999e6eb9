mod points;
mod scale;

use std::fmt::Write;

pub use points::{points_from_indicators, IndicatorPoint};
pub use scale::YDomain;

pub const CHART_HEIGHT_PX: u32 = 300;

const VIEW_WIDTH: f64 = 800.0;
const VIEW_HEIGHT: f64 = CHART_HEIGHT_PX as f64;
const AXIS_GUTTER: f64 = 64.0;
const PADDING: f64 = 12.0;
const Y_TICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Close,
    CompositeScore,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Close, Series::CompositeScore];

    pub fn key(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::CompositeScore => "composite_score",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Close => "#4f46e5",
            Self::CompositeScore => "#16a34a",
        }
    }

    pub fn value(self, point: &IndicatorPoint) -> Option<f64> {
        match self {
            Self::Close => point.close,
            Self::CompositeScore => point.composite_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlottedPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Close price and composite score drawn over a hidden time axis, one
/// shared auto-scaled y axis.
#[derive(Debug, Clone, Copy)]
pub struct LineChart<'a> {
    points: &'a [IndicatorPoint],
    domain: Option<YDomain>,
}

impl<'a> LineChart<'a> {
    pub fn new(points: &'a [IndicatorPoint]) -> Self {
        Self {
            points,
            domain: YDomain::from_points(points),
        }
    }

    pub fn plotted(&self, series: Series) -> Vec<PlottedPoint> {
        let Some(domain) = self.domain else {
            return Vec::new();
        };
        let plot_height = VIEW_HEIGHT - 2.0 * PADDING;

        self.points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let value = series.value(point)?;
                Some(PlottedPoint {
                    index,
                    x: self.x_at(index),
                    y: domain.project(value, PADDING, plot_height),
                    value,
                })
            })
            .collect()
    }

    pub fn render_svg(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEW_WIDTH} {VIEW_HEIGHT}" width="100%" height="{CHART_HEIGHT_PX}" role="img" aria-label="close and composite score">"#
        );
        self.write_y_axis(&mut svg);
        for series in Series::ALL {
            self.write_series(&mut svg, series);
        }
        svg.push_str("</svg>");
        svg
    }

    fn x_at(&self, index: usize) -> f64 {
        let left = AXIS_GUTTER;
        let width = VIEW_WIDTH - AXIS_GUTTER - PADDING;
        match self.points.len() {
            0 | 1 => left + width / 2.0,
            len => left + width * index as f64 / (len - 1) as f64,
        }
    }

    fn write_y_axis(&self, svg: &mut String) {
        let bottom = VIEW_HEIGHT - PADDING;
        let _ = write!(
            svg,
            r##"<g class="y-axis"><line x1="{AXIS_GUTTER}" y1="{PADDING}" x2="{AXIS_GUTTER}" y2="{bottom}" stroke="#9ca3af"/>"##
        );
        if let Some(domain) = self.domain {
            let plot_height = VIEW_HEIGHT - 2.0 * PADDING;
            for tick in domain.ticks(Y_TICKS) {
                let y = domain.project(tick, PADDING, plot_height);
                let label_x = AXIS_GUTTER - 6.0;
                let _ = write!(
                    svg,
                    r##"<line x1="{label_x}" y1="{y:.1}" x2="{AXIS_GUTTER}" y2="{y:.1}" stroke="#9ca3af"/><text x="{label_x}" y="{y:.1}" text-anchor="end" dominant-baseline="middle" font-size="11">{}</text>"##,
                    format_tick(tick)
                );
            }
        }
        svg.push_str("</g>");
    }

    fn write_series(&self, svg: &mut String, series: Series) {
        let plotted = self.plotted(series);
        if plotted.is_empty() {
            return;
        }

        let key = series.key();
        let color = series.color();
        let coords: Vec<String> = plotted
            .iter()
            .map(|point| format!("{:.1},{:.1}", point.x, point.y))
            .collect();
        let _ = write!(
            svg,
            r#"<polyline class="series {key}" fill="none" stroke="{color}" stroke-width="1.5" points="{}"/>"#,
            coords.join(" ")
        );

        let _ = write!(svg, r#"<g class="tooltips {key}">"#);
        for point in &plotted {
            let open_time = self.points[point.index]
                .open_time
                .as_deref()
                .unwrap_or("-");
            let _ = write!(
                svg,
                r#"<circle class="point {key}" cx="{:.1}" cy="{:.1}" r="4" fill="{color}" data-value="{}"><title>open_time: {}&#10;{key}: {}</title></circle>"#,
                point.x,
                point.y,
                point.value,
                escape_markup(open_time),
                point.value
            );
        }
        svg.push_str("</g>");
    }
}

pub fn render(points: &[IndicatorPoint]) -> String {
    LineChart::new(points).render_svg()
}

fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1000.0 {
        format!("{value:.0}")
    } else if magnitude >= 1.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.4}")
    }
}

fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
