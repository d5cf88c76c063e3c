//! Rendering tests against the bundled fixture using ratatui's TestBackend.
//!
//! These tests drive the full app without a real terminal: fixture source, inline
//! dispatcher, layout engine and, where noted, the image loader.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use reviewlist::images::{DirectoryImageFetcher, ImageLoader};
use reviewlist::source::{FileReviewSource, InlineDispatcher};
use reviewlist::state::{PaginationController, RowFactory};
use reviewlist::text::CellMeasurer;
use reviewlist::view::{AppChannels, Palette, ReviewsApp};
use reviewlist::view_state::{MaxLines, RowEntry, RowLayoutEngine, RowMetrics};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

type App = ReviewsApp<TestBackend, InlineDispatcher<FileReviewSource>>;

const WIDTH: u16 = 70;
const HEIGHT: u16 = 30;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn app(with_images: bool) -> App {
    let (page_tx, page_rx) = mpsc::channel();
    let (snap_tx, snap_rx) = mpsc::channel();
    let (image_tx, image_rx) = mpsc::channel();

    let source = FileReviewSource::open(fixtures().join("reviews.json")).unwrap();
    let metrics = RowMetrics::cells();
    let factory = RowFactory::new(&metrics, MaxLines::COLLAPSED);
    let engine = RowLayoutEngine::new(CellMeasurer, metrics, factory.styles().show_more_label(), 0);
    let controller =
        PaginationController::new(InlineDispatcher::new(source, page_tx), factory, 20, snap_tx);

    let app = ReviewsApp::new(
        Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap(),
        controller,
        engine,
        AppChannels {
            snapshots: snap_rx,
            pages: page_rx,
            images: image_rx,
        },
    )
    .with_palette(Palette::with_colors(true));

    if with_images {
        let fetcher = DirectoryImageFetcher::new(fixtures().join("images"));
        app.with_images(ImageLoader::new(fetcher, 2, image_tx))
    } else {
        app
    }
}

fn lines(app: &App) -> Vec<String> {
    let buf = app.terminal().backend().buffer();
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                .collect()
        })
        .collect()
}

#[test]
fn first_row_height_matches_drawn_lines() {
    let mut app = app(false);
    app.start().unwrap();

    let rows: Vec<_> = app.list().review_rows().take(2).cloned().collect();
    let mut engine = RowLayoutEngine::new(
        CellMeasurer,
        RowMetrics::cells(),
        RowFactory::new(&RowMetrics::cells(), MaxLines::COLLAPSED)
            .styles()
            .show_more_label(),
        0,
    );
    let height = engine
        .row_height(&RowEntry::Review(rows[0].clone()), f64::from(WIDTH))
        .round() as usize;

    let drawn = lines(&app);
    assert!(drawn[0].contains(rows[0].username().as_str()));
    assert!(
        drawn[height].contains(rows[1].username().as_str()),
        "second row should start at line {height}: {drawn:#?}"
    );
}

#[test]
fn status_bar_counts_loaded_reviews() {
    let mut app = app(false);
    app.start().unwrap();

    let status = lines(&app).pop().unwrap();
    assert!(status.contains("20 отзывов"), "status: {status}");
}

#[test]
fn scrolling_to_end_loads_everything_and_shows_summary() {
    let mut app = app(false);
    app.start().unwrap();

    for _ in 0..200 {
        app.handle_key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
    }
    app.draw().unwrap();

    assert!(app.list().is_complete());
    assert_eq!(app.list().review_rows().count(), 47);
    assert!(lines(&app).iter().any(|l| l.contains("47 отзывов")));
}

#[test]
fn images_replace_placeholders_once_loaded() {
    let mut app = app(true);
    app.start().unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        app.draw().unwrap();
        if lines(&app).iter().any(|l| l.contains('▀')) || Instant::now() > deadline {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert!(lines(&app).iter().any(|l| l.contains('▀')));
}

#[test]
fn without_loader_images_stay_placeholders() {
    let mut app = app(false);
    app.start().unwrap();

    let drawn = lines(&app);
    assert!(drawn.iter().any(|l| l.contains('░')));
    assert!(!drawn.iter().any(|l| l.contains('▀')));
}
