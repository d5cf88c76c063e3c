//! Drawing one list row from its computed frames.
//!
//! Rows are rendered into a scratch [`Buffer`] sized to the whole row and then copied into
//! the frame with [`blit`], which clips at the viewport edges. A row that is partly scrolled
//! out of view therefore draws exactly like a fully visible one.

use super::styles::Palette;
use crate::images::{DecodedImage, ImageSlot, RowImages};
use crate::text::{wrap_lines, StyledText};
use crate::view_state::layout::{LayoutResult, SummaryLayout};
use crate::view_state::metrics::RowMetrics;
use crate::view_state::row::{ReviewRow, SummaryRow};
use crate::view_state::types::Rect as Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const PLACEHOLDER: &str = "░";
const HALF_BLOCK: &str = "▀";
const SELECTION_MARKER: &str = "▌";

/// Convert a layout length to whole cells.
pub fn cells(value: f64) -> u16 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u16::MAX)) as u16
    } else {
        0
    }
}

/// Place a layout frame inside `area`, clipped to it.
fn place(frame: &Frame, area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(cells(frame.x)),
        area.y.saturating_add(cells(frame.y)),
        cells(frame.width),
        cells(frame.height),
    )
    .intersection(area)
}

/// Row-independent drawing inputs shared by every review row of one frame.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    metrics: &'a RowMetrics,
    show_more: &'a StyledText,
    row_width: u16,
    wrap_width: u16,
    palette: Palette,
}

impl<'a> RowContext<'a> {
    /// Context for rows laid out at `row_width` columns with `metrics`.
    pub fn new(
        metrics: &'a RowMetrics,
        show_more: &'a StyledText,
        row_width: u16,
        palette: Palette,
    ) -> Self {
        let content_x = metrics.insets.left + metrics.avatar.width + metrics.avatar_to_username;
        let content_width = f64::from(row_width) - content_x - metrics.insets.right;
        Self {
            metrics,
            show_more,
            row_width,
            wrap_width: cells(content_width).max(1),
            palette,
        }
    }

    /// Width of a whole row in columns.
    pub fn row_width(&self) -> u16 {
        self.row_width
    }

    /// Columns body text wraps at.
    pub fn wrap_width(&self) -> u16 {
        self.wrap_width
    }

    /// Colours to draw with.
    pub fn palette(&self) -> Palette {
        self.palette
    }
}

/// Review row widget.
pub struct ReviewRowWidget<'a> {
    row: &'a ReviewRow,
    layout: &'a LayoutResult,
    context: RowContext<'a>,
    images: Option<&'a RowImages>,
    selected: bool,
}

impl<'a> ReviewRowWidget<'a> {
    /// Widget drawing `row` with `layout`.
    pub fn new(row: &'a ReviewRow, layout: &'a LayoutResult, context: RowContext<'a>) -> Self {
        Self {
            row,
            layout,
            context,
            images: None,
            selected: false,
        }
    }

    /// Draw avatar and photos from these slots instead of placeholders.
    pub fn images(mut self, images: Option<&'a RowImages>) -> Self {
        self.images = images;
        self
    }

    /// Mark the row as selected.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn draw_photos(&self, area: Rect, buf: &mut Buffer) {
        let strip = self.layout.photos;
        if strip.is_empty() {
            return;
        }
        let photo = self.context.metrics.photo;
        let step = photo.width + self.context.metrics.photo_spacing;

        for index in 0..self.row.photos().len() {
            let frame = Frame::new(strip.x + index as f64 * step, strip.y, photo);
            let slot = self.images.and_then(|images| images.photos.get(index));
            draw_image(buf, place(&frame, area), slot, self.context.palette);
        }
    }
}

impl Widget for ReviewRowWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout;
        let palette = self.context.palette;
        let wrap = self.context.wrap_width;

        if self.selected {
            for y in area.top()..area.bottom() {
                buf.set_string(area.x, y, SELECTION_MARKER, palette.selection());
            }
        }

        let avatar = self.images.map(|images| &images.avatar);
        draw_image(buf, place(&layout.avatar, area), avatar, palette);

        draw_text(buf, place(&layout.username, area), self.row.username(), wrap, palette);
        draw_rating(buf, place(&layout.rating, area), self.row, palette);
        self.draw_photos(area, buf);

        if !layout.body.is_empty() {
            draw_text(buf, place(&layout.body, area), self.row.body(), wrap, palette);
        }
        if layout.needs_show_more {
            // The label is never wrapped; it is clipped at the row edge.
            let frame = place(&layout.show_more, area);
            draw_text(buf, frame, self.context.show_more, u16::MAX, palette);
        }
        if !layout.created.is_empty() {
            draw_text(buf, place(&layout.created, area), self.row.created(), wrap, palette);
        }
    }
}

/// Summary row widget.
pub struct SummaryRowWidget<'a> {
    summary: &'a SummaryRow,
    layout: &'a SummaryLayout,
    palette: Palette,
}

impl<'a> SummaryRowWidget<'a> {
    /// Widget drawing `summary` with `layout`.
    pub fn new(summary: &'a SummaryRow, layout: &'a SummaryLayout, palette: Palette) -> Self {
        Self {
            summary,
            layout,
            palette,
        }
    }
}

impl Widget for SummaryRowWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = place(&self.layout.label, area);
        draw_text(buf, frame, self.summary.text(), frame.width, self.palette);
    }
}

/// Copy `scratch` into `dest` with its top-left corner at `top` lines below the top of
/// `viewport`. Cells outside the viewport are dropped; `top` may be negative.
pub fn blit(scratch: &Buffer, dest: &mut Buffer, viewport: Rect, top: i32) {
    let width = scratch.area.width.min(viewport.width);
    for sy in 0..scratch.area.height {
        let dy = top + i32::from(sy);
        if dy < 0 || dy >= i32::from(viewport.height) {
            continue;
        }
        // dy is within 0..viewport.height here
        let y = viewport.y + dy as u16;
        for sx in 0..width {
            let src = scratch.cell((scratch.area.x + sx, scratch.area.y + sy));
            let dst = dest.cell_mut((viewport.x + sx, y));
            if let (Some(src), Some(dst)) = (src, dst) {
                *dst = src.clone();
            }
        }
    }
}

fn draw_text(buf: &mut Buffer, frame: Rect, text: &StyledText, wrap_width: u16, palette: Palette) {
    if frame.is_empty() {
        return;
    }
    let style = palette.text(text.style());
    let lines = wrap_lines(text.as_str(), usize::from(wrap_width.max(1)));
    for (offset, line) in lines.iter().take(usize::from(frame.height)).enumerate() {
        // offset < frame.height, which is a u16
        let y = frame.y + offset as u16;
        buf.set_stringn(frame.x, y, line, usize::from(frame.width), style);
    }
}

fn draw_rating(buf: &mut Buffer, frame: Rect, row: &ReviewRow, palette: Palette) {
    if frame.is_empty() {
        return;
    }
    let glyph = row.rating();
    let mut x = frame.x;
    for (index, star) in glyph.stars().chars().enumerate() {
        if x >= frame.right() {
            break;
        }
        let filled = index < usize::from(glyph.filled());
        buf.set_string(x, frame.y, star.to_string(), palette.star(filled));
        x = x.saturating_add(1);
    }
}

fn draw_image(buf: &mut Buffer, frame: Rect, slot: Option<&ImageSlot>, palette: Palette) {
    if frame.is_empty() {
        return;
    }
    match slot.and_then(ImageSlot::ready) {
        Some(image) if palette.colors_enabled() => draw_half_blocks(buf, frame, image),
        _ => {
            for y in frame.top()..frame.bottom() {
                for x in frame.left()..frame.right() {
                    buf.set_string(x, y, PLACEHOLDER, palette.placeholder());
                }
            }
        }
    }
}

/// Two pixels per cell: the upper half block takes the top pixel as foreground and the
/// bottom pixel as background.
fn draw_half_blocks(buf: &mut Buffer, frame: Rect, image: &DecodedImage) {
    let w = f64::from(frame.width);
    let h = f64::from(frame.height) * 2.0;
    for cy in 0..frame.height {
        for cx in 0..frame.width {
            let fx = (f64::from(cx) + 0.5) / w;
            let top = image.sample(fx, (f64::from(cy) * 2.0 + 0.5) / h);
            let bottom = image.sample(fx, (f64::from(cy) * 2.0 + 1.5) / h);
            let style = Style::default().fg(rgb(top)).bg(rgb(bottom));
            buf.set_string(frame.x + cx, frame.y + cy, HALF_BLOCK, style);
        }
    }
}

fn rgb(px: [u8; 4]) -> Color {
    Color::Rgb(px[0], px[1], px[2])
}
