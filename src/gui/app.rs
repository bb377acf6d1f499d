//! Enrollment Deck Main Application
//! Main window with slide navigation, background CSV loading and PPTX export.

use egui::{Button, RichText, TopBottomPanel};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use crate::charts::StaticChartRenderer;
use crate::config::DeckConfig;
use crate::data::DataLoader;
use crate::gui::deck::DeckNav;
use crate::gui::slide_view::{DeckData, SlideView};
use crate::ppt::{PptGenerator, SlideImage};

const EXPORT_CHART_WIDTH: u32 = 1200;
const EXPORT_CHART_HEIGHT: u32 = 900;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { df: DataFrame, path: PathBuf },
    Error(String),
}

/// Main application window.
pub struct DeckApp {
    config: DeckConfig,
    loader: DataLoader,
    nav: DeckNav,
    slide_view: SlideView,
    deck: Option<DeckData>,
    status: String,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DeckApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = DeckConfig::load();
        let nav = DeckNav::new(&config.years);

        let mut app = Self {
            config,
            loader: DataLoader::new(),
            nav,
            slide_view: SlideView::new(),
            deck: None,
            status: String::new(),
            load_rx: None,
            is_loading: false,
        };

        let path = app.config.csv_path.clone();
        if path.exists() {
            app.spawn_load(path);
        } else {
            app.status = format!(
                "{} not found - use Browse to pick an enrollment CSV",
                path.display()
            );
        }
        app
    }

    /// Load a CSV in a background thread so the window stays responsive.
    fn spawn_load(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.status = format!("Loading {}...", path.display());

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let mut loader = DataLoader::new();
            match loader.load_csv(&path.to_string_lossy()) {
                Ok(df) => {
                    let _ = tx.send(LoadResult::Complete {
                        df: df.clone(),
                        path,
                    });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.spawn_load(path);
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.status = status;
                    }
                    LoadResult::Complete { df, path } => {
                        self.loader.set_dataframe(df.clone(), path);
                        let colleges = self.loader.colleges();
                        if !colleges.contains(&self.config.base_college) {
                            log::warn!(
                                "base college {:?} not present in the loaded data",
                                self.config.base_college
                            );
                        }
                        self.status =
                            format!("Loaded {} enrollment records", self.loader.row_count());
                        self.deck = Some(DeckData::new(df, colleges, &self.config));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.status = format!("Error: {error}");
                        self.deck = None;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Export the whole deck as a PPTX, one chart per slide, then open it.
    fn handle_export_ppt(&mut self) {
        let Some(deck) = self.deck.as_mut() else {
            self.status = "No data to export".to_string();
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PowerPoint", &["pptx"])
            .set_file_name("enrollment_deck.pptx")
            .save_file()
        else {
            return; // User cancelled
        };

        let mut slides: Vec<SlideImage> = Vec::new();

        for year in deck.years.clone() {
            let Some(comparison) = self.slide_view.comparison_for(deck, year) else {
                continue;
            };
            let Some(data) = deck.year_slide(year, &comparison) else {
                continue;
            };
            for section in &data.sections {
                let charts = [
                    (&section.gender, "Gender Breakdown"),
                    (&section.race, "Racial Breakdown"),
                ];
                for (bucket, kind) in charts {
                    let title = format!("{kind} - {} (Fall {year})", section.college);
                    match StaticChartRenderer::render_pie_png(
                        bucket,
                        &title,
                        EXPORT_CHART_WIDTH,
                        EXPORT_CHART_HEIGHT,
                    ) {
                        Ok(png) => slides.push(SlideImage { title, png }),
                        Err(e) => {
                            self.status = format!("Render error: {e}");
                            return;
                        }
                    }
                }
            }
        }

        if let Some(conclusion) = &deck.conclusion {
            let trends = [
                (&conclusion.gender, "Gender"),
                (&conclusion.race, "Race"),
            ];
            for (trend, kind) in trends {
                let title = format!("{} Enrollment by {kind}", deck.base_college);
                match StaticChartRenderer::render_trend_png(
                    trend,
                    &title,
                    EXPORT_CHART_WIDTH,
                    EXPORT_CHART_HEIGHT,
                ) {
                    Ok(png) => slides.push(SlideImage { title, png }),
                    Err(e) => {
                        self.status = format!("Render error: {e}");
                        return;
                    }
                }
            }
        }

        if slides.is_empty() {
            self.status = "No charts to export".to_string();
            return;
        }

        let count = slides.len();
        match PptGenerator::generate(
            &slides,
            &output_path,
            "Undergraduate Enrollment Statistics",
        ) {
            Ok(()) => {
                self.status = format!("Exported {count} slides to {}", output_path.display());
                if let Err(e) = open::that(&output_path) {
                    log::warn!("could not open {}: {e}", output_path.display());
                }
            }
            Err(e) => {
                self.status = format!("PPT error: {e}");
            }
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading("Enrollment Deck");
            ui.separator();

            if let Some(path) = self.loader.file_path() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(name);
            }

            if ui.button("Browse CSV...").clicked() {
                self.handle_browse_csv();
            }
            if ui
                .add_enabled(self.deck.is_some(), Button::new("Export PPT"))
                .clicked()
            {
                self.handle_export_ppt();
            }

            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });
        ui.add_space(4.0);
    }

    fn show_nav(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.nav.is_first(), Button::new("< Back"))
                .clicked()
            {
                self.nav.back();
            }

            let (position, total) = self.nav.position();
            ui.label(
                RichText::new(format!(
                    "{} ({position}/{total})",
                    self.nav.current().title()
                ))
                .strong(),
            );

            if ui
                .add_enabled(!self.nav.is_last(), Button::new("Next >"))
                .clicked()
            {
                self.nav.next();
            }
        });
        ui.add_space(6.0);
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        TopBottomPanel::top("header").show(ctx, |ui| {
            self.show_header(ui);
        });

        TopBottomPanel::bottom("deck_nav").show(ctx, |ui| {
            self.show_nav(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.slide_view
                .show(ui, self.nav.current(), self.deck.as_mut());
        });
    }
}
