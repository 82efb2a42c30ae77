//! PNG chart rendering for the four aggregate views.
//!
//! Charts are drawn in pixel coordinates on a 1200x700 bitmap so every
//! slide receives an image of the same size.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::DrawingErrorKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{ReportError, ReportResult};
use crate::stats::analytics::{STATUS_DONE, STATUS_IN_PROGRESS};
use crate::stats::{Analysis, CountMap, NestedCountMap};

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 700;

pub const TIME_TREND_FILE: &str = "time-trend.png";
pub const STREET_TOP10_FILE: &str = "street-top10.png";
pub const TYPE_TOP10_FILE: &str = "type-top10.png";
pub const DISTRICT_STATUS_FILE: &str = "district-status.png";

const TOP: i32 = 100;
const BOTTOM: i32 = 620;
const GRID_STEPS: i32 = 5;
const CURVE_SAMPLES: i32 = 24;

const AXIS: RGBColor = RGBColor(100, 116, 139);
const GRID: RGBColor = RGBColor(226, 232, 240);
const AXIS_TITLE: RGBColor = RGBColor(71, 85, 105);
const LABEL: RGBColor = RGBColor(64, 64, 64);
const LEGEND_TEXT: RGBColor = RGBColor(30, 41, 59);
const VALUE_TEXT: RGBColor = RGBColor(15, 23, 42);
const CATEGORY_TEXT: RGBColor = RGBColor(51, 65, 85);

const LINE_COLORS: [RGBColor; 4] = [
    RGBColor(37, 99, 235),
    RGBColor(236, 72, 153),
    RGBColor(249, 115, 22),
    RGBColor(22, 163, 74),
];
const BAR_BLUE: RGBColor = RGBColor(37, 99, 235);
const BAR_MAX: RGBColor = RGBColor(239, 68, 68);
const BAR_OTHER: RGBColor = RGBColor(250, 204, 21);
const DONE_COLOR: RGBColor = RGBColor(34, 197, 94);
const IN_PROGRESS_COLOR: RGBColor = RGBColor(59, 130, 246);

/// A chart written to disk with its pixel size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// The four charts of one report, in slide order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSet {
    pub time_trend: RenderedChart,
    pub street_top10: RenderedChart,
    pub type_top10: RenderedChart,
    pub district_status: RenderedChart,
}

#[derive(Clone, Debug)]
pub struct ChartRenderer {
    font_family: String,
}

impl ChartRenderer {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Render every chart of `analysis` into `dir`, creating it if needed.
    pub fn render_all(&self, analysis: &Analysis, dir: &Path) -> ReportResult<ChartSet> {
        std::fs::create_dir_all(dir)?;

        let charts = ChartSet {
            time_trend: self.line_chart(
                "近6个月趋势",
                &analysis.time_trend,
                &analysis.street_trend,
                &dir.join(TIME_TREND_FILE),
            )?,
            street_top10: self.vertical_bar_chart(
                "街镇高发Top10",
                &analysis.street_top10,
                &dir.join(STREET_TOP10_FILE),
            )?,
            type_top10: self.horizontal_bar_chart(
                "类型高发Top10",
                &analysis.type_top10,
                &dir.join(TYPE_TOP10_FILE),
            )?,
            district_status: self.grouped_bar_chart(
                "区办理状态",
                &analysis.district_status,
                &dir.join(DISTRICT_STATUS_FILE),
            )?,
        };

        info!("Rendered charts into {}", dir.display());
        Ok(charts)
    }

    /// Smoothed monthly trend: the total plus one line per busy street.
    pub fn line_chart(
        &self,
        title: &str,
        totals: &CountMap,
        streets: &NestedCountMap,
        path: &Path,
    ) -> ReportResult<RenderedChart> {
        let canvas = Canvas::create(path, &self.font_family, title)?;
        let (left, right) = (100, 1080);

        let max = streets
            .values()
            .flat_map(|series| series.values())
            .chain(totals.values())
            .copied()
            .max()
            .unwrap_or(0)
            .max(1);
        canvas.axis(left, right)?;
        canvas.grid_and_ticks(left, right, max)?;
        canvas.axis_titles(left, right, "月份", "数量（件）")?;

        let labels: Vec<&String> = totals.keys().collect();
        let span = (labels.len() as i32 - 1).max(1);
        let x_at = |i: usize| left + (right - left) * i as i32 / span;

        let mut points = Vec::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            let x = x_at(i);
            points.push((x, scale_down(totals[*label], max)));
            canvas.text(label, (x - 28, BOTTOM + 30), 21, LABEL, false)?;
        }
        canvas.smooth_line(&points, LINE_COLORS[0])?;

        for (idx, series) in streets.values().enumerate() {
            let points: Vec<(i32, i32)> = labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let value = series.get(*label).copied().unwrap_or(0);
                    (x_at(i), scale_down(value, max))
                })
                .collect();
            canvas.smooth_line(&points, LINE_COLORS[(idx + 1) % LINE_COLORS.len()])?;
        }

        let names: Vec<&str> = std::iter::once("总量")
            .chain(streets.keys().map(String::as_str))
            .take(LINE_COLORS.len())
            .collect();
        let legend_width = names.len() as i32 * 160;
        let mut x = left + ((right - left - legend_width) / 2).max(0);
        for (name, color) in names.iter().zip(LINE_COLORS) {
            canvas.rect((x, TOP - 44), (x + 24, TOP - 32), color)?;
            canvas.text(name, (x + 32, TOP - 32), 24, LEGEND_TEXT, false)?;
            x += 160;
        }

        canvas.finish(path)
    }

    /// Vertical bars in the given order, names written top to bottom inside each bar.
    pub fn vertical_bar_chart(
        &self,
        title: &str,
        data: &CountMap,
        path: &Path,
    ) -> ReportResult<RenderedChart> {
        let canvas = Canvas::create(path, &self.font_family, title)?;
        let (left, right) = (120, 1100);

        let max = max_value(data);
        canvas.axis(left, right)?;
        canvas.grid_and_ticks(left, right, max)?;
        canvas.axis_titles(left, right, "街镇（柱内纵向）", "数量（件）")?;

        let n = data.len().max(1) as i32;
        let bar_w = ((right - left) / (n * 2)).max(20);
        let mut x = left + 20;
        for (name, value) in data {
            let h = BOTTOM - scale_down(*value, max);
            let bar_top = BOTTOM - h;
            canvas.rect((x, bar_top), (x + bar_w, BOTTOM), BAR_BLUE)?;
            canvas.text(
                &value.to_string(),
                (x + 2, (bar_top - 6).max(TOP + 14)),
                21,
                VALUE_TEXT,
                false,
            )?;
            canvas.vertical_text_in_bar(name, x, bar_top, bar_w, h)?;
            x += bar_w * 2;
        }

        canvas.finish(path)
    }

    /// Horizontal bars with category labels on the left; the largest bar is red.
    pub fn horizontal_bar_chart(
        &self,
        title: &str,
        data: &CountMap,
        path: &Path,
    ) -> ReportResult<RenderedChart> {
        let canvas = Canvas::create(path, &self.font_family, title)?;
        let (left, right) = (280, 1120);

        let max = max_value(data);
        canvas.axis(left, right)?;
        canvas.value_grid_x(left, right, max)?;
        canvas.axis_titles(left, right, "数量（件）", "类别")?;

        let n = data.len().max(1) as i32;
        let bar_h = ((BOTTOM - TOP) / (n * 2)).max(18);
        let observed_max = data.values().copied().max().unwrap_or(0);
        let mut y = TOP + 20;
        for (name, value) in data {
            let w = ((right - left) as f64 * (*value as f64 / max as f64)) as i32;
            let color = if *value == observed_max { BAR_MAX } else { BAR_OTHER };
            canvas.rect((left, y), (left + w, y + bar_h), color)?;
            canvas.text(name, (80, y + bar_h - 2), 21, CATEGORY_TEXT, false)?;
            y += bar_h * 2;
        }

        canvas.finish(path)
    }

    /// Two bars per district: done in green, in progress in blue.
    pub fn grouped_bar_chart(
        &self,
        title: &str,
        data: &NestedCountMap,
        path: &Path,
    ) -> ReportResult<RenderedChart> {
        let canvas = Canvas::create(path, &self.font_family, title)?;
        let (left, right) = (100, 1120);
        let statuses = [(STATUS_DONE, DONE_COLOR), (STATUS_IN_PROGRESS, IN_PROGRESS_COLOR)];

        let max = data
            .values()
            .flat_map(|counts| statuses.iter().map(move |(s, _)| counts.get(*s).copied().unwrap_or(0)))
            .max()
            .unwrap_or(0)
            .max(1);
        canvas.axis(left, right)?;
        canvas.grid_and_ticks(left, right, max)?;
        canvas.axis_titles(left, right, "区", "数量（件）")?;

        let legend_x = right - 260;
        let legend_y = TOP - 42;
        for (i, (status, color)) in statuses.iter().enumerate() {
            let x = legend_x + i as i32 * 108;
            canvas.rect((x, legend_y), (x + 24, legend_y + 12), *color)?;
            canvas.text(status, (x + 30, legend_y + 11), 21, LEGEND_TEXT, false)?;
        }

        let group_w = ((right - left) / (data.len().max(1) as i32)).max(40);
        let bar_w = (group_w / (statuses.len() as i32 + 1)).max(8);
        for (i, (district, counts)) in data.iter().enumerate() {
            let gx = left + i as i32 * group_w + 8;
            canvas.text(district, (gx, BOTTOM + 20), 21, LABEL, false)?;
            for (j, (status, color)) in statuses.iter().enumerate() {
                let value = counts.get(*status).copied().unwrap_or(0);
                let x = gx + j as i32 * bar_w;
                canvas.rect((x, scale_down(value, max)), (x + bar_w - 2, BOTTOM), *color)?;
            }
        }

        canvas.finish(path)
    }
}

fn max_value(data: &CountMap) -> u64 {
    data.values().copied().max().unwrap_or(0).max(1)
}

/// Y pixel of `value` on a plot spanning `TOP..BOTTOM` for `0..=max`.
fn scale_down(value: u64, max: u64) -> i32 {
    BOTTOM - ((BOTTOM - TOP) as f64 * (value as f64 / max as f64)) as i32
}

/// Tick values for `steps` equal intervals from 0 to `max`.
pub fn tick_values(max: u64, steps: i32) -> Vec<u64> {
    let count = steps.max(2);
    (0..=count)
        .map(|i| (max as f64 * i as f64 / count as f64).round() as u64)
        .collect()
}

/// Points of the cubic curve between two markers, with both control
/// points on the vertical through their midpoint.
pub fn bezier_segment(from: (i32, i32), to: (i32, i32), samples: i32) -> Vec<(i32, i32)> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (x3, y3) = (to.0 as f64, to.1 as f64);
    let cx = (x0 + x3) / 2.0;
    let samples = samples.max(1);
    (1..=samples)
        .map(|step| {
            let t = step as f64 / samples as f64;
            let u = 1.0 - t;
            let x = u * u * u * x0 + 3.0 * u * u * t * cx + 3.0 * u * t * t * cx + t * t * t * x3;
            let y = u * u * u * y0 + 3.0 * u * u * t * y0 + 3.0 * u * t * t * y3 + t * t * t * y3;
            (x.round() as i32, y.round() as i32)
        })
        .collect()
}

/// Treat a missing font as "draw nothing"; any other backend error is fatal.
fn tolerate_font<E>(result: Result<(), DrawingAreaErrorKind<E>>) -> ReportResult<()>
where
    E: std::error::Error + Send + Sync,
{
    match result {
        Ok(()) => Ok(()),
        Err(DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(err))) => {
            debug!("Skipping text, font unavailable: {}", err);
            Ok(())
        }
        Err(err) => Err(ReportError::render(err)),
    }
}

struct Canvas<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    family: &'a str,
}

impl<'a> Canvas<'a> {
    fn create(path: &'a Path, family: &'a str, title: &str) -> ReportResult<Self> {
        let area = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        area.fill(&WHITE).map_err(ReportError::render)?;
        let canvas = Self { area, family };
        canvas.text(title, (30, 50), 30, BLACK, true)?;
        Ok(canvas)
    }

    fn text(
        &self,
        content: &str,
        baseline: (i32, i32),
        size: u32,
        color: RGBColor,
        bold: bool,
    ) -> ReportResult<()> {
        if content.is_empty() {
            return Ok(());
        }
        let style = if bold { FontStyle::Bold } else { FontStyle::Normal };
        let text_style = FontDesc::new(FontFamily::from(self.family), size as f64, style)
            .color(&color)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        tolerate_font(self.area.draw(&Text::new(content.to_string(), baseline, text_style)))
    }

    fn rect(&self, from: (i32, i32), to: (i32, i32), color: RGBColor) -> ReportResult<()> {
        if to.0 <= from.0 || to.1 <= from.1 {
            return Ok(());
        }
        tolerate_font(self.area.draw(&Rectangle::new([from, to], color.filled())))
    }

    fn line(&self, points: Vec<(i32, i32)>, color: RGBColor, width: u32) -> ReportResult<()> {
        tolerate_font(self.area.draw(&PathElement::new(points, color.stroke_width(width))))
    }

    fn axis(&self, left: i32, right: i32) -> ReportResult<()> {
        self.line(vec![(left, BOTTOM), (right, BOTTOM)], AXIS, 1)?;
        self.line(vec![(left, TOP), (left, BOTTOM)], AXIS, 1)
    }

    fn grid_and_ticks(&self, left: i32, right: i32, max: u64) -> ReportResult<()> {
        let ticks = tick_values(max, GRID_STEPS);
        let count = ticks.len() as i32 - 1;
        for (i, value) in ticks.iter().enumerate() {
            let y = BOTTOM - (BOTTOM - TOP) * i as i32 / count;
            self.line(vec![(left, y), (right, y)], GRID, 1)?;
            self.text(&value.to_string(), (left - 42, y + 5), 21, AXIS, false)?;
        }
        Ok(())
    }

    /// Grid for charts whose values run along the x axis.
    fn value_grid_x(&self, left: i32, right: i32, max: u64) -> ReportResult<()> {
        let ticks = tick_values(max, GRID_STEPS);
        let count = ticks.len() as i32 - 1;
        for (i, value) in ticks.iter().enumerate() {
            let x = left + (right - left) * i as i32 / count;
            self.line(vec![(x, TOP), (x, BOTTOM)], GRID, 1)?;
            self.text(&value.to_string(), (x - 6, BOTTOM + 24), 21, AXIS, false)?;
        }
        Ok(())
    }

    fn axis_titles(&self, left: i32, right: i32, x_label: &str, y_label: &str) -> ReportResult<()> {
        self.text(x_label, ((left + right) / 2 - 20, BOTTOM + 42), 21, AXIS_TITLE, false)?;
        self.text(y_label, (left - 72, TOP - 10), 21, AXIS_TITLE, false)
    }

    fn smooth_line(&self, points: &[(i32, i32)], color: RGBColor) -> ReportResult<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let mut path = vec![points[0]];
        for pair in points.windows(2) {
            path.extend(bezier_segment(pair[0], pair[1], CURVE_SAMPLES));
        }
        self.line(path, color, 3)?;
        for point in points {
            tolerate_font(self.area.draw(&Circle::new(*point, 4, color.filled())))?;
        }
        Ok(())
    }

    fn vertical_text_in_bar(
        &self,
        text: &str,
        bar_x: i32,
        bar_top: i32,
        bar_w: i32,
        bar_h: i32,
    ) -> ReportResult<()> {
        let value = text.trim();
        if value.is_empty() || bar_h <= 18 {
            return Ok(());
        }
        let char_height = 22;
        let total = value.chars().count() as i32 * char_height;
        let start_y = bar_top + ((bar_h - total) / 2 + char_height - 4).max(char_height);
        let center_x = bar_x + bar_w / 2 - 9;
        for (i, ch) in value.chars().enumerate() {
            let y = start_y + i as i32 * char_height;
            if y > bar_top + bar_h - 4 {
                break;
            }
            self.text(&ch.to_string(), (center_x, y), 18, WHITE, true)?;
        }
        Ok(())
    }

    fn finish(self, path: &Path) -> ReportResult<RenderedChart> {
        self.area.present().map_err(ReportError::render)?;
        debug!("Wrote chart {}", path.display());
        Ok(RenderedChart {
            path: path.to_path_buf(),
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn counts(pairs: &[(&str, u64)]) -> CountMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_tick_values_cover_zero_to_max() {
        assert_eq!(tick_values(10, 5), vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(tick_values(1, 5), vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(tick_values(4, 1).len(), 3);
    }

    #[test]
    fn test_bezier_segment_ends_on_target() {
        let points = bezier_segment((0, 100), (100, 0), 10);
        assert_eq!(points.len(), 10);
        assert_eq!(points.last(), Some(&(100, 0)));
        assert!(points.iter().all(|(x, y)| (0..=100).contains(x) && (0..=100).contains(y)));
    }

    #[test]
    fn test_scale_down_bounds() {
        assert_eq!(scale_down(0, 5), BOTTOM);
        assert_eq!(scale_down(5, 5), TOP);
    }

    #[test]
    fn test_render_all_writes_four_pngs() {
        let dir = TempDir::new().unwrap();
        let analysis = Analysis {
            time_trend: counts(&[("2024-01", 1), ("2024-02", 3)]),
            street_trend: [("花木".to_string(), counts(&[("2024-01", 1), ("2024-02", 2)]))]
                .into_iter()
                .collect(),
            street_top10: counts(&[("花木", 3), ("张江", 1)]),
            type_top10: counts(&[("邻里纠纷", 2), ("物业", 2)]),
            district_status: [("浦东".to_string(), counts(&[(STATUS_DONE, 1)]))]
                .into_iter()
                .collect(),
        };

        let renderer = ChartRenderer::new("sans-serif");
        let charts = renderer.render_all(&analysis, dir.path()).unwrap();

        for chart in [
            &charts.time_trend,
            &charts.street_top10,
            &charts.type_top10,
            &charts.district_status,
        ] {
            let bytes = std::fs::read(&chart.path).unwrap();
            assert_eq!(&bytes[..4], b"\x89PNG");
            assert_eq!((chart.width, chart.height), (CHART_WIDTH, CHART_HEIGHT));
        }
        assert!(charts.street_top10.path.ends_with(STREET_TOP10_FILE));
    }

    #[test]
    fn test_empty_views_still_render() {
        let dir = TempDir::new().unwrap();
        let renderer = ChartRenderer::new("sans-serif");
        let charts = renderer.render_all(&Analysis::default(), dir.path()).unwrap();
        assert!(charts.district_status.path.exists());
    }
}
