//! Slide layout for the case statistics report.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::charts::{ChartSet, RenderedChart};
use super::pptx::{Align, Frame, Geometry, Rgb, Slide, SlideDeck, SlideElement, TextBox, TextStyle};
use crate::errors::{ReportError, ReportResult};
use crate::narrative::NarrativeText;

pub const REPORT_FILE: &str = "case-stats-report.pptx";
pub const SLIDE_WIDTH: i32 = 1366;
pub const SLIDE_HEIGHT: i32 = 768;
pub const MARGIN: i32 = 36;
pub const COVER_SUBTITLE: &str = "矛盾纠纷案件统计专题";

const BODY_TOP: i32 = 90;
const BODY_HEIGHT: i32 = SLIDE_HEIGHT - BODY_TOP - 20;
const TITLE_HEIGHT: i32 = 58;
const CARD_PADDING: i32 = 16;
const CARD_GAP: i32 = 12;
const CARD_LINE_HEIGHT: i32 = 30;
const CARD_HEIGHT: i32 = CARD_LINE_HEIGHT * 3 + CARD_PADDING * 2;

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[）.)]").expect("Invalid regex pattern for numbered items"));

/// Content-slide geometry shared by all four chart slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentLayout {
    pub image_area: Frame,
    pub text_area: Frame,
}

impl ContentLayout {
    pub fn standard() -> Self {
        let image_width = ((SLIDE_WIDTH - MARGIN * 3) as f64 * 0.58) as i32;
        let text_width = SLIDE_WIDTH - MARGIN * 3 - image_width;
        Self {
            image_area: Frame::new(MARGIN, BODY_TOP, image_width, BODY_HEIGHT),
            text_area: Frame::new(MARGIN * 2 + image_width, BODY_TOP, text_width, BODY_HEIGHT),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReportAssembler {
    font_family: String,
}

impl ReportAssembler {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
        }
    }

    /// Build the five-slide deck and write it to `<dir>/case-stats-report.pptx`.
    pub fn write_report(
        &self,
        dir: &Path,
        charts: &ChartSet,
        narrative: &NarrativeText,
        imported_at: NaiveDateTime,
    ) -> ReportResult<PathBuf> {
        let deck = self.build_deck(charts, narrative, imported_at)?;
        let path = dir.join(REPORT_FILE);
        deck.save(&path)?;
        info!("Wrote report {} ({} slides)", path.display(), deck.slides().len());
        Ok(path)
    }

    pub fn build_deck(
        &self,
        charts: &ChartSet,
        narrative: &NarrativeText,
        imported_at: NaiveDateTime,
    ) -> ReportResult<SlideDeck> {
        let title = cover_title(imported_at);
        let mut deck = SlideDeck::new(SLIDE_WIDTH, SLIDE_HEIGHT, title.clone());
        deck.add_slide(self.cover_slide(&title));

        let sections = [
            (&narrative.month_title, &narrative.month_summary, &charts.time_trend),
            (&narrative.street_title, &narrative.street_summary, &charts.street_top10),
            (&narrative.type_title, &narrative.type_summary, &charts.type_top10),
            (&narrative.district_title, &narrative.district_summary, &charts.district_status),
        ];
        for (heading, summary, chart) in sections {
            let slide = self.content_slide(&mut deck, heading, summary, chart)?;
            deck.add_slide(slide);
        }
        Ok(deck)
    }

    fn cover_slide(&self, title: &str) -> Slide {
        let mut slide = Slide::new();
        let background = Rgb(239, 246, 255);
        slide.push(SlideElement::Shape {
            geometry: Geometry::Rect,
            frame: Frame::new(0, 0, SLIDE_WIDTH, SLIDE_HEIGHT),
            fill: background,
            line: background,
        });
        slide.push(SlideElement::Text(TextBox {
            frame: Frame::new(120, 250, SLIDE_WIDTH - 240, 120),
            text: title.to_string(),
            style: self.style(44.0, true, Some(Rgb(30, 64, 175))),
            align: Align::Center,
            wrap: true,
            anchor_middle: false,
            line_spacing: None,
        }));
        slide.push(SlideElement::Text(TextBox {
            frame: Frame::new(120, 390, SLIDE_WIDTH - 240, 50),
            text: COVER_SUBTITLE.to_string(),
            style: self.style(24.0, false, Some(Rgb(71, 85, 105))),
            align: Align::Center,
            wrap: true,
            anchor_middle: false,
            line_spacing: None,
        }));
        slide
    }

    fn content_slide(
        &self,
        deck: &mut SlideDeck,
        heading: &str,
        summary: &str,
        chart: &RenderedChart,
    ) -> ReportResult<Slide> {
        let layout = ContentLayout::standard();
        let mut slide = Slide::new();

        slide.push(SlideElement::Text(TextBox {
            frame: Frame::new(MARGIN, 16, SLIDE_WIDTH - MARGIN * 2, TITLE_HEIGHT),
            text: heading.trim().to_string(),
            style: self.style(30.0, true, None),
            align: Align::Left,
            wrap: true,
            anchor_middle: false,
            line_spacing: None,
        }));

        slide.push(SlideElement::Shape {
            geometry: Geometry::RoundRect,
            frame: layout.image_area,
            fill: Rgb(248, 250, 252),
            line: Rgb(203, 213, 225),
        });
        slide.push(SlideElement::Shape {
            geometry: Geometry::RoundRect,
            frame: layout.text_area,
            fill: Rgb(252, 228, 214),
            line: Rgb(230, 145, 56),
        });

        let items = summary_items(summary);
        let card_width = layout.text_area.width - 20;
        let card_left = layout.text_area.x + 10;
        for top in card_positions(items.len(), &layout.text_area) {
            slide.push(SlideElement::Shape {
                geometry: Geometry::RoundRect,
                frame: Frame::new(card_left, top, card_width, CARD_HEIGHT),
                fill: Rgb(255, 247, 237),
                line: Rgb(253, 186, 116),
            });
        }
        for (item, top) in items.iter().zip(card_positions(items.len(), &layout.text_area)) {
            slide.push(SlideElement::Text(TextBox {
                frame: Frame::new(
                    card_left + CARD_PADDING,
                    top + 6,
                    card_width - CARD_PADDING * 2,
                    CARD_HEIGHT - 12,
                ),
                text: item.clone(),
                style: self.style(18.0, true, Some(Rgb(30, 41, 59))),
                align: Align::Left,
                wrap: true,
                anchor_middle: true,
                line_spacing: Some(110),
            }));
        }

        let bytes = std::fs::read(&chart.path)?;
        let media = deck.add_png(bytes);
        let frame = fit_image(chart.width, chart.height, &layout.image_area)?;
        slide.push(SlideElement::Picture { frame, media });

        Ok(slide)
    }

    fn style(&self, size_pt: f64, bold: bool, color: Option<Rgb>) -> TextStyle {
        TextStyle {
            font_family: self.font_family.clone(),
            size_pt,
            bold,
            color,
        }
    }
}

/// `yyyy年MM月dd日-数据分析洞察报告` for the import date.
pub fn cover_title(imported_at: NaiveDateTime) -> String {
    format!("{}-数据分析洞察报告", imported_at.format("%Y年%m月%d日"))
}

/// Split a summary on `；` into numbered items, dropping blank pieces.
pub fn summary_items(summary: &str) -> Vec<String> {
    summary
        .split('；')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(idx, piece)| {
            if NUMBERED_ITEM.is_match(piece) {
                piece.to_string()
            } else {
                format!("{}）{}", idx + 1, piece)
            }
        })
        .collect()
}

/// Top edge of each card that fits in `area`, stacked and vertically centered.
///
/// Stacking stops at the first card that would cross the bottom margin.
pub fn card_positions(count: usize, area: &Frame) -> Vec<i32> {
    let count = count as i32;
    let total = count * CARD_HEIGHT + (count - 1).max(0) * CARD_GAP;
    let max_bottom = area.bottom() - 10;
    let mut top = area.y + ((area.height - total) / 2).max(10);

    let mut positions = Vec::new();
    for _ in 0..count {
        if top + CARD_HEIGHT > max_bottom {
            break;
        }
        positions.push(top);
        top += CARD_HEIGHT + CARD_GAP;
    }
    positions
}

/// Scale an image to fit inside `area` with a 14pt inset, never enlarging it,
/// and center it.
pub fn fit_image(width: u32, height: u32, area: &Frame) -> ReportResult<Frame> {
    if width == 0 || height == 0 {
        return Err(ReportError::Layout("chart image has no size".to_string()));
    }
    let max_w = (area.width - 28) as f64;
    let max_h = (area.height - 28) as f64;
    let scale = (max_w / width as f64).min(max_h / height as f64).min(1.0);
    if scale <= 0.0 {
        return Err(ReportError::Layout("image panel too small".to_string()));
    }

    let w = ((width as f64 * scale).round() as i32).max(1);
    let h = ((height as f64 * scale).round() as i32).max(1);
    Ok(Frame::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    ))
}
