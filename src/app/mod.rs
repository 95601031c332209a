use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{Context, Vec2};
use tracing::{info, warn};

use crate::chart::{ChartConfig, ChartSurface, TickOutcome, TickScheduler, render};
use crate::countries::{DisplayType, RawCountry, aggregate, load_countries};

mod canvas;
mod render_utils;
mod ui;

type LoadResult = Result<Vec<RawCountry>, String>;

pub struct BubbleChartApp {
    data_path: PathBuf,
    config: ChartConfig,
    display: DisplayType,
    surface: ChartSurface,
    scheduler: Option<TickScheduler>,
    pending: Option<PendingLoad>,
    status: ChartStatus,
    search: String,
    pan: Vec2,
    zoom: f32,
}

struct PendingLoad {
    display: DisplayType,
    rx: Receiver<LoadResult>,
}

enum ChartStatus {
    Loading,
    Ready { records: usize },
    Error(String),
}

impl BubbleChartApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_path: PathBuf,
        display: DisplayType,
        config: ChartConfig,
    ) -> Self {
        Self::start(data_path, display, config)
    }

    fn start(data_path: PathBuf, display: DisplayType, config: ChartConfig) -> Self {
        let mut app = Self {
            data_path,
            surface: ChartSurface::new(&config),
            config,
            display,
            scheduler: None,
            pending: None,
            status: ChartStatus::Loading,
            search: String::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
        };
        app.request_chart(display);
        app
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_countries(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn request_chart(&mut self, display: DisplayType) {
        let mode = display.value();
        info!(display = mode, path = %self.data_path.display(), "loading country data");
        self.display = display;
        self.pending = Some(PendingLoad {
            display,
            rx: Self::spawn_load(self.data_path.clone()),
        });
        if !matches!(self.status, ChartStatus::Ready { .. }) {
            self.status = ChartStatus::Loading;
        }
    }

    fn poll_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.rx.try_recv() {
            Ok(Ok(countries)) => self.rebuild_chart(&countries, pending.display),
            Ok(Err(error)) => {
                warn!(%error, "country data failed to load; chart not updated");
                self.status = ChartStatus::Error(error);
            }
            Err(TryRecvError::Empty) => self.pending = Some(pending),
            Err(TryRecvError::Disconnected) => {
                warn!("country loader exited without a result");
                self.status = ChartStatus::Error("country loader exited unexpectedly".to_owned());
            }
        }
    }

    fn rebuild_chart(&mut self, countries: &[RawCountry], display: DisplayType) {
        if let Some(previous) = self.scheduler.take() {
            previous.cancel_handle().cancel();
        }

        let aggregation = aggregate(countries, display.groups_by_region());
        if aggregation.is_empty() {
            warn!(path = %self.data_path.display(), "country data has no records");
        }
        match render(&mut self.surface, &aggregation, display, &self.config) {
            Ok(scheduler) => {
                self.scheduler = Some(scheduler);
                self.status = ChartStatus::Ready {
                    records: aggregation.len(),
                };
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "chart render aborted");
                self.status = ChartStatus::Error(format!("{error:#}"));
            }
        }
    }

    fn tick_layout(&mut self) -> bool {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return false;
        };

        match scheduler.tick(&mut self.surface) {
            TickOutcome::Running => true,
            TickOutcome::Settled => false,
            TickOutcome::Cancelled => {
                self.scheduler = None;
                false
            }
        }
    }

    fn layout_text(&self) -> Option<String> {
        let scheduler = self.scheduler.as_ref()?;
        if scheduler.is_settled() {
            Some(format!("layout settled after {} ticks", scheduler.ticks()))
        } else {
            Some(format!(
                "layout running: tick {} | alpha {:.3}",
                scheduler.ticks(),
                scheduler.alpha()
            ))
        }
    }
}

impl eframe::App for BubbleChartApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_pending();
        let layout_moving = self.tick_layout();

        self.show(ctx);

        if layout_moving || self.pending.is_some() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;
    use crate::countries::RegionField;

    const COUNTRIES: &str = r#"[
        {"name": "Portugal", "alpha3Code": "PRT", "region": "Europe", "population": 10374822,
         "borders": ["ESP"], "timezones": ["UTC-01:00", "UTC"], "languages": [{"name": "Portuguese"}]},
        {"name": "Spain", "alpha3Code": "ESP", "region": "Europe", "population": 47351567,
         "borders": ["PRT", "FRA"], "timezones": ["UTC", "UTC+01:00"], "languages": [{"name": "Spanish"}]},
        {"name": "Japan", "alpha3Code": "JPN", "region": "Asia", "population": 125836021,
         "borders": [], "timezones": ["UTC+09:00"], "languages": [{"name": "Japanese"}]}
    ]"#;

    fn data_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(COUNTRIES.as_bytes()).unwrap();
        file
    }

    fn wait_for_load(app: &mut BubbleChartApp) {
        for _ in 0..500 {
            app.poll_pending();
            if app.pending.is_none() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("country data never arrived");
    }

    #[test]
    fn newest_selection_wins() {
        let file = data_file();
        let region = DisplayType::Region(RegionField::CountryCount);
        let mut app = BubbleChartApp::start(
            file.path().to_path_buf(),
            DisplayType::default(),
            ChartConfig::default(),
        );

        app.request_chart(region);
        wait_for_load(&mut app);

        assert_eq!(app.display, region);
        assert!(matches!(app.status, ChartStatus::Ready { records: 2 }));
        assert_eq!(app.surface.generation(), 1);
        assert!(
            app.surface
                .bubbles()
                .iter()
                .all(|bubble| bubble.tooltip.contains("No. Countries"))
        );
    }

    #[test]
    fn rebuild_cancels_previous_layout() {
        let file = data_file();
        let countries = load_countries(file.path()).unwrap();
        let mut app = BubbleChartApp::start(
            file.path().to_path_buf(),
            DisplayType::default(),
            ChartConfig::default(),
        );

        app.rebuild_chart(&countries, DisplayType::default());
        let first = app.scheduler.as_ref().unwrap().cancel_handle();
        assert!(!first.is_cancelled());

        app.rebuild_chart(&countries, DisplayType::Region(RegionField::TimezoneCount));

        assert!(first.is_cancelled());
        let current = app.scheduler.as_ref().unwrap().cancel_handle();
        assert!(!current.is_cancelled());
        assert!(app.tick_layout());
    }

    #[test]
    fn failed_load_keeps_previous_chart() {
        let file = data_file();
        let mut app = BubbleChartApp::start(
            file.path().to_path_buf(),
            DisplayType::default(),
            ChartConfig::default(),
        );
        wait_for_load(&mut app);
        let bubbles = app.surface.bubbles().len();

        app.data_path = file.path().with_extension("missing");
        app.request_chart(DisplayType::Region(RegionField::CountryCount));
        wait_for_load(&mut app);

        assert!(matches!(app.status, ChartStatus::Error(_)));
        assert_eq!(app.surface.bubbles().len(), bubbles);
        assert_eq!(app.surface.generation(), 1);
    }
}
