//! TUI rendering and terminal management (impure shell)
//!
//! [`ReviewsApp`] owns the terminal and the pagination controller. It reads list snapshots,
//! page completions and image completions from channels on every tick, lays rows out with a
//! [`RowLayoutEngine`] and turns key and mouse input into [`ListIntent`]s.

pub mod constants;
pub mod row_widget;
pub mod styles;

pub use row_widget::{blit, ReviewRowWidget, RowContext, SummaryRowWidget};
pub use styles::Palette;

use crate::images::{ImageBoard, ImageCompletion, ImageLoader};
use crate::source::{PageCompletion, PageDispatcher};
use crate::state::{ListIntent, ListState, LoadingPhase, PaginationController};
use crate::text::plural::reviews_count_text;
use crate::text::CellMeasurer;
use crate::view_state::layout::{LayoutResult, RowLayoutEngine, SummaryLayout};
use crate::view_state::row::RowEntry;
use crate::view_state::scroll::{
    max_offset, project_offset, should_load_next_page, DEFAULT_PREFETCH_SCREENS,
};
use constants::{
    FALLBACK_WIDTH, INITIAL_LOAD_LABEL, KEY_HINTS, PAGINATING_LABEL, STATUS_BAR_HEIGHT,
    TICK_INTERVAL, WHEEL_STEP,
};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
    Frame, Terminal,
};
use row_widget::cells;
use std::io::{self, Stdout};
use std::sync::mpsc::Receiver;
use tracing::{debug, info};

/// Receiving ends of every channel the event loop drains.
#[derive(Debug)]
pub struct AppChannels {
    /// List snapshots emitted by the controller.
    pub snapshots: Receiver<ListState>,
    /// Page fetch completions from the dispatcher.
    pub pages: Receiver<PageCompletion>,
    /// Image load completions.
    pub images: Receiver<ImageCompletion>,
}

/// Computed layout of one list item.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ItemLayout {
    Review(LayoutResult),
    Summary(SummaryLayout),
}

/// Where an item sits in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    index: usize,
    top: f64,
    height: f64,
    layout: ItemLayout,
}

impl Placement {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct ReviewsApp<B, D>
where
    B: Backend,
    D: PageDispatcher,
{
    terminal: Terminal<B>,
    controller: PaginationController<D>,
    channels: AppChannels,
    engine: RowLayoutEngine<CellMeasurer>,
    loader: Option<ImageLoader>,
    board: ImageBoard,
    list: ListState,
    palette: Palette,
    prefetch_screens: f64,
    scroll: f64,
    selected: usize,
    /// Terminal size at the last draw.
    screen: Rect,
    /// Items placed by the last layout pass, for hit testing.
    placements: Vec<Placement>,
}

impl<B, D> ReviewsApp<B, D>
where
    B: Backend,
    D: PageDispatcher,
{
    /// App drawing into `terminal` and driving `controller`.
    pub fn new(
        terminal: Terminal<B>,
        controller: PaginationController<D>,
        engine: RowLayoutEngine<CellMeasurer>,
        channels: AppChannels,
    ) -> Self {
        let list = controller.state().clone();
        Self {
            terminal,
            controller,
            channels,
            engine,
            loader: None,
            board: ImageBoard::new(),
            list,
            palette: Palette::default(),
            prefetch_screens: DEFAULT_PREFETCH_SCREENS,
            scroll: 0.0,
            selected: 0,
            screen: Rect::default(),
            placements: Vec::new(),
        }
    }

    /// Load avatars and photos through `loader`. Without one, images stay placeholders.
    pub fn with_images(mut self, loader: ImageLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Colours to draw with.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Viewport heights left below the viewport that trigger the next page.
    pub fn with_prefetch_screens(mut self, screens: f64) -> Self {
        self.prefetch_screens = screens;
        self
    }

    /// Latest list snapshot.
    pub fn list(&self) -> &ListState {
        &self.list
    }

    /// Current scroll offset in lines.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    /// Index of the selected item.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The terminal, for inspecting the drawn buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// The controller, for inspection.
    pub fn controller(&self) -> &PaginationController<D> {
        &self.controller
    }

    /// Request the first page and draw once.
    ///
    /// # Errors
    ///
    /// Returns the backend's I/O error if drawing fails.
    pub fn start(&mut self) -> io::Result<()> {
        info!(limit = self.list.limit, "Starting review list");
        self.controller.dispatch(ListIntent::NextPage);
        self.draw()
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Waits at most one tick for input, then drains
    /// the completion channels and redraws if anything changed.
    ///
    /// # Errors
    ///
    /// Returns terminal I/O errors.
    pub fn run(&mut self) -> io::Result<()> {
        self.start()?;

        loop {
            let mut dirty = false;
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.drain_channels() || dirty {
                self.draw()?;
            }
        }
    }

    /// Apply everything waiting on the channels. Returns whether anything arrived.
    pub fn drain_channels(&mut self) -> bool {
        let mut changed = false;

        while let Ok(completion) = self.channels.pages.try_recv() {
            self.controller.handle_page(completion);
            changed = true;
        }
        while let Ok(snapshot) = self.channels.snapshots.try_recv() {
            self.list = snapshot;
            changed = true;
        }
        while let Ok(completion) = self.channels.images.try_recv() {
            changed |= self.board.apply(completion);
        }

        if changed {
            self.selected = self.selected.min(self.list.items.len().saturating_sub(1));
        }
        changed
    }

    /// Handle a single keyboard event. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => self.select_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                let page = self.viewport_height();
                self.scroll_by(page);
                self.select_first_visible();
            }
            KeyCode::PageUp => {
                let page = self.viewport_height();
                self.scroll_by(-page);
                self.select_first_visible();
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                self.scroll_by(-self.scroll);
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.list.items.len().saturating_sub(1);
                self.scroll_by(f64::INFINITY);
            }
            KeyCode::Enter => self.expand_selected(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        false
    }

    /// Handle a single mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
    }

    /// Render the current frame.
    ///
    /// # Errors
    ///
    /// Returns the backend's I/O error.
    pub fn draw(&mut self) -> io::Result<()> {
        self.drain_channels();

        let size = self.terminal.size()?;
        self.screen = Rect::new(0, 0, size.width, size.height);
        self.relayout();
        self.request_visible_images();

        let list_area = self.list_area();
        let status_area = Rect::new(
            0,
            list_area.bottom(),
            self.screen.width,
            self.screen.height.saturating_sub(list_area.height),
        );
        let width = list_area.width;
        let scroll = self.scroll;
        let viewport_bottom = scroll + f64::from(list_area.height);

        let Self {
            terminal,
            engine,
            board,
            list,
            palette,
            placements,
            selected,
            ..
        } = self;
        let context = RowContext::new(engine.metrics(), engine.show_more_label(), width, *palette);

        terminal.draw(|frame| {
            if list.items.is_empty() && list.loading_phase == LoadingPhase::InitialLoad {
                render_centered(frame, list_area, INITIAL_LOAD_LABEL);
            } else {
                let buf = frame.buffer_mut();
                for placement in placements
                    .iter()
                    .filter(|p| p.bottom() > scroll && p.top < viewport_bottom)
                {
                    let Some(item) = list.items.get(placement.index) else {
                        continue;
                    };
                    let scratch = paint_item(
                        item,
                        placement,
                        context,
                        board,
                        placement.index == *selected,
                    );
                    // Offsets are whole cells with the cell metrics.
                    let top = (placement.top - scroll).round() as i32;
                    blit(&scratch, buf, list_area, top);
                }
            }
            render_status(frame, status_area, list, *palette);
        })?;
        Ok(())
    }

    fn list_area(&self) -> Rect {
        let width = if self.screen.width > 0 {
            self.screen.width
        } else {
            FALLBACK_WIDTH
        };
        Rect::new(
            0,
            0,
            width,
            self.screen.height.saturating_sub(STATUS_BAR_HEIGHT),
        )
    }

    fn viewport_height(&self) -> f64 {
        f64::from(self.list_area().height)
    }

    fn content_height(&self) -> f64 {
        self.placements.last().map_or(0.0, Placement::bottom)
    }

    /// Recompute placements for the current snapshot and width, then clamp the scroll offset.
    fn relayout(&mut self) {
        let width = f64::from(self.list_area().width);
        let mut top = 0.0;
        self.placements.clear();

        for (index, item) in self.list.items.iter().enumerate() {
            let layout = match item {
                RowEntry::Review(row) => ItemLayout::Review(self.engine.compute_layout(row, width)),
                RowEntry::Summary(summary) => {
                    ItemLayout::Summary(self.engine.summary_layout(summary, width))
                }
            };
            let height = match layout {
                ItemLayout::Review(layout) => layout.height,
                ItemLayout::Summary(layout) => layout.height,
            };
            self.placements.push(Placement {
                index,
                top,
                height,
                layout,
            });
            top += height;
        }

        let max = max_offset(self.viewport_height(), top);
        self.scroll = self.scroll.clamp(0.0, max);
    }

    fn request_visible_images(&mut self) {
        let Some(loader) = &self.loader else {
            return;
        };
        let bottom = self.scroll + self.viewport_height();
        for placement in self
            .placements
            .iter()
            .filter(|p| p.bottom() > self.scroll && p.top < bottom)
        {
            if let Some(row) = self.list.items.get(placement.index).and_then(RowEntry::as_review) {
                self.board.ensure(row, loader);
            }
        }
    }

    /// One scroll gesture: project, clamp, then evaluate the load-more rule.
    fn scroll_by(&mut self, delta: f64) {
        self.relayout();
        let viewport = self.viewport_height();
        let content = self.content_height();
        self.scroll = project_offset(self.scroll, delta, viewport, content);
        self.maybe_load_more(viewport, content);
    }

    fn maybe_load_more(&mut self, viewport: f64, content: f64) {
        if !self.list.should_load {
            return;
        }
        if should_load_next_page(viewport, content, self.scroll, self.prefetch_screens) {
            debug!(
                offset = self.scroll,
                content, viewport, "Scroll reached prefetch distance"
            );
            self.controller.dispatch(ListIntent::NextPage);
            self.drain_channels();
        }
    }

    fn select_by(&mut self, step: isize) {
        let count = self.list.items.len();
        if count == 0 {
            self.scroll_by(0.0);
            return;
        }
        self.selected = self.selected.saturating_add_signed(step).min(count - 1);

        self.relayout();
        let viewport = self.viewport_height();
        let delta = match self.placements.get(self.selected) {
            Some(p) if p.top < self.scroll => p.top - self.scroll,
            Some(p) if p.bottom() > self.scroll + viewport => {
                // Keep the top of tall rows visible.
                (p.bottom() - viewport).min(p.top) - self.scroll
            }
            _ => 0.0,
        };
        self.scroll_by(delta);
    }

    fn select_first_visible(&mut self) {
        if let Some(p) = self.placements.iter().find(|p| p.bottom() > self.scroll) {
            self.selected = p.index;
        }
    }

    fn expand_selected(&mut self) {
        let Some(row) = self.list.items.get(self.selected).and_then(RowEntry::as_review) else {
            return;
        };
        let id = row.id();
        if self.controller.dispatch(ListIntent::ExpandRow(id)) {
            self.drain_channels();
        }
    }

    fn reload(&mut self) {
        if self.controller.dispatch(ListIntent::Reload) {
            self.engine.clear_cache();
            self.board.clear();
            self.scroll = 0.0;
            self.selected = 0;
            self.drain_channels();
        }
    }

    /// Select the clicked row; a click on its show-more control expands it.
    fn click(&mut self, column: u16, row: u16) {
        let list_area = self.list_area();
        if !list_area.contains(ratatui::layout::Position::new(column, row)) {
            return;
        }
        let y = self.scroll + f64::from(row - list_area.y);
        let x = f64::from(column - list_area.x);

        let Some(hit) = self
            .placements
            .iter()
            .find(|p| y >= p.top && y < p.bottom())
            .copied()
        else {
            return;
        };
        self.selected = hit.index;

        if let ItemLayout::Review(layout) = hit.layout {
            if layout.needs_show_more && layout.show_more.contains(x, y - hit.top) {
                self.expand_selected();
            }
        }
    }
}

fn paint_item(
    item: &RowEntry,
    placement: &Placement,
    context: RowContext<'_>,
    board: &ImageBoard,
    selected: bool,
) -> Buffer {
    let area = Rect::new(0, 0, context.row_width(), cells(placement.height));
    let mut scratch = Buffer::empty(area);
    match (item, &placement.layout) {
        (RowEntry::Review(row), ItemLayout::Review(layout)) => {
            ReviewRowWidget::new(row, layout, context)
                .images(board.row(row.id()))
                .selected(selected)
                .render(area, &mut scratch);
        }
        (RowEntry::Summary(summary), ItemLayout::Summary(layout)) => {
            SummaryRowWidget::new(summary, layout, context.palette())
                .render(area, &mut scratch);
        }
        _ => {}
    }
    scratch
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y, area.width, 1).intersection(area);
    Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .render(line_area, frame.buffer_mut());
}

fn render_status(frame: &mut Frame, area: Rect, list: &ListState, palette: Palette) {
    if area.is_empty() {
        return;
    }
    let loaded = list.review_rows().count();
    let text = match list.loading_phase {
        LoadingPhase::Paginating => {
            format!(" {} · {}", reviews_count_text(loaded), PAGINATING_LABEL)
        }
        LoadingPhase::InitialLoad => format!(" {INITIAL_LOAD_LABEL}"),
        LoadingPhase::Idle => format!(" {} · {}", reviews_count_text(loaded), KEY_HINTS),
    };
    Paragraph::new(Line::from(text))
        .style(palette.status())
        .render(area, frame.buffer_mut());
}

/// Put the terminal into raw mode on the alternate screen with mouse capture.
///
/// # Errors
///
/// Returns the I/O error of whichever terminal command failed.
pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
///
/// # Errors
///
/// Returns the I/O error of whichever terminal command failed.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
