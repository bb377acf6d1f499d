//! Slide View
//! Renders the current slide and owns the per-year comparison selection.
//! Chart data is computed through the pure pipeline with the comparison
//! college passed in explicitly, and cached per (year, comparison).

use std::collections::HashMap;

use egui::{Color32, ComboBox, RichText, ScrollArea};
use polars::prelude::*;
use rayon::prelude::*;

use super::deck::Slide;
use crate::charts::ChartPlotter;
use crate::config::DeckConfig;
use crate::data::{filter, Dimension};
use crate::stats::{AggregatedBucket, Aggregator, Differ, DifferenceResult, Trend, TrendSeries};

/// Charts for one college on a year slide.
pub struct CollegeSection {
    pub college: String,
    pub gender: AggregatedBucket,
    pub race: AggregatedBucket,
}

/// Everything a year slide shows: base and comparison sections plus the
/// annotation differences. Pure function of the record set and parameters.
pub struct YearSlideData {
    pub year: i32,
    pub comparison: String,
    /// Base college first, comparison second.
    pub sections: Vec<CollegeSection>,
    pub gender_diffs: DifferenceResult,
    pub racial_diffs: DifferenceResult,
}

impl YearSlideData {
    pub fn compute(
        df: &DataFrame,
        year: i32,
        base: &str,
        comparison: &str,
    ) -> PolarsResult<Self> {
        let mut sections = Vec::with_capacity(2);
        for college in [base, comparison] {
            let college_df = filter::by_year_and_college(df, year, Some(college))?;
            sections.push(CollegeSection {
                college: college.to_string(),
                gender: Aggregator::aggregate_dimension(&college_df, Dimension::Gender),
                race: Aggregator::aggregate_dimension(&college_df, Dimension::Race),
            });
        }

        let gender_diffs = Differ::difference(&sections[0].gender, &sections[1].gender);
        let racial_diffs = Differ::difference(&sections[0].race, &sections[1].race);

        Ok(Self {
            year,
            comparison: comparison.to_string(),
            sections,
            gender_diffs,
            racial_diffs,
        })
    }
}

/// Trend charts for the conclusion slide.
pub struct ConclusionData {
    pub gender: TrendSeries,
    pub race: TrendSeries,
}

impl ConclusionData {
    pub fn compute(df: &DataFrame, college: &str, years: &[i32]) -> PolarsResult<Self> {
        Ok(Self {
            gender: Trend::compute(df, college, years, Dimension::Gender)?,
            race: Trend::compute(df, college, years, Dimension::Race)?,
        })
    }
}

/// The loaded record set plus everything derived from it. The frame itself
/// is immutable; year slides are cached per (year, comparison college).
pub struct DeckData {
    df: DataFrame,
    pub base_college: String,
    pub years: Vec<i32>,
    /// Dropdown options; the base college is excluded.
    pub comparison_colleges: Vec<String>,
    year_slides: HashMap<(i32, String), YearSlideData>,
    pub conclusion: Option<ConclusionData>,
}

impl DeckData {
    pub fn new(df: DataFrame, colleges: Vec<String>, config: &DeckConfig) -> Self {
        let comparison_colleges: Vec<String> = colleges
            .into_iter()
            .filter(|c| c != &config.base_college)
            .collect();

        let mut deck = Self {
            df,
            base_college: config.base_college.clone(),
            years: config.years.clone(),
            comparison_colleges,
            year_slides: HashMap::new(),
            conclusion: None,
        };
        deck.precompute();
        deck
    }

    /// Warm the cache for the default comparison on every year slide and
    /// build the conclusion trends, year slides in parallel.
    fn precompute(&mut self) {
        if let Some(default_comparison) = self.comparison_colleges.first().cloned() {
            let df = &self.df;
            let base = self.base_college.as_str();
            let computed: Vec<((i32, String), YearSlideData)> = self
                .years
                .par_iter()
                .filter_map(|&year| {
                    match YearSlideData::compute(df, year, base, &default_comparison) {
                        Ok(data) => Some(((year, default_comparison.clone()), data)),
                        Err(e) => {
                            log::error!("precomputing {year} vs {default_comparison}: {e}");
                            None
                        }
                    }
                })
                .collect();
            self.year_slides.extend(computed);
        }

        match ConclusionData::compute(&self.df, &self.base_college, &self.years) {
            Ok(conclusion) => self.conclusion = Some(conclusion),
            Err(e) => log::error!("computing conclusion trends: {e}"),
        }
    }

    /// Slide data for one year/comparison pair, computed on first request.
    pub fn year_slide(&mut self, year: i32, comparison: &str) -> Option<&YearSlideData> {
        let key = (year, comparison.to_string());
        if !self.year_slides.contains_key(&key) {
            match YearSlideData::compute(&self.df, year, &self.base_college, comparison) {
                Ok(data) => {
                    self.year_slides.insert(key.clone(), data);
                }
                Err(e) => {
                    log::error!("computing {year} vs {comparison}: {e}");
                    return None;
                }
            }
        }
        self.year_slides.get(&key)
    }
}

/// Central panel widget drawing the current slide.
pub struct SlideView {
    comparison_by_year: HashMap<i32, String>,
}

impl Default for SlideView {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideView {
    pub fn new() -> Self {
        Self {
            comparison_by_year: HashMap::new(),
        }
    }

    /// The selected comparison college for a year slide, defaulting to the
    /// first available one.
    pub fn comparison_for(&self, deck: &DeckData, year: i32) -> Option<String> {
        self.comparison_by_year
            .get(&year)
            .cloned()
            .or_else(|| deck.comparison_colleges.first().cloned())
    }

    pub fn show(&mut self, ui: &mut egui::Ui, slide: Slide, deck: Option<&mut DeckData>) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match (slide, deck) {
                (Slide::Introduction, _) => Self::show_introduction(ui),
                (Slide::Year(year), Some(deck)) => self.show_year(ui, deck, year),
                (Slide::Conclusion, Some(deck)) => Self::show_conclusion(ui, deck),
                (_, None) => {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No Data").size(20.0));
                    });
                }
            });
    }

    fn show_introduction(ui: &mut egui::Ui) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Undergraduate Enrollment Statistics")
                    .size(28.0)
                    .strong(),
            );
            ui.add_space(12.0);
            ui.label(RichText::new("2013 / 2018 / 2023").size(18.0).color(Color32::GRAY));
        });
        ui.add_space(30.0);
        ui.label(
            "This deck walks through undergraduate enrollment by gender and by race \
             for three academic years. Each year slide shows the base college next to \
             a comparison college of your choice, with the percentage-point gaps \
             between their distributions listed below the charts.",
        );
        ui.add_space(8.0);
        ui.label(
            "The closing slide follows the base college's enrollment across all three \
             years. Use the buttons at the bottom to move through the deck.",
        );
    }

    fn show_year(&mut self, ui: &mut egui::Ui, deck: &mut DeckData, year: i32) {
        let Some(selected) = self.comparison_for(deck, year) else {
            ui.label("No comparison college available in this data set.");
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new("Comparison College:").strong());
            ComboBox::from_id_salt(format!("comparison_{year}"))
                .width(220.0)
                .selected_text(&selected)
                .show_ui(ui, |ui| {
                    for college in &deck.comparison_colleges {
                        if ui.selectable_label(selected == *college, college).clicked() {
                            self.comparison_by_year.insert(year, college.clone());
                        }
                    }
                });
        });
        ui.add_space(6.0);
        ui.separator();

        // Selection may have just changed; re-read it before computing.
        let selected = self
            .comparison_for(deck, year)
            .unwrap_or(selected);
        let base = deck.base_college.clone();

        let Some(data) = deck.year_slide(year, &selected) else {
            ui.colored_label(
                Color32::from_rgb(220, 53, 69),
                "Failed to compute slide data (see log).",
            );
            return;
        };

        for section in &data.sections {
            ui.add_space(10.0);
            ui.label(RichText::new(&section.college).size(20.0).strong());
            ui.horizontal(|ui| {
                ChartPlotter::draw_pie_chart(
                    ui,
                    &section.gender,
                    &format!("Gender Breakdown - {}", section.college),
                );
                ui.add_space(24.0);
                ChartPlotter::draw_pie_chart(
                    ui,
                    &section.race,
                    &format!("Racial Breakdown - {}", section.college),
                );
            });
        }

        ui.add_space(12.0);
        Self::show_annotations(ui, &base, data);
    }

    /// The percentage-point gap list under the year charts.
    fn show_annotations(ui: &mut egui::Ui, base: &str, data: &YearSlideData) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(6.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "Differences between {base} and {}",
                        data.comparison
                    ))
                    .size(16.0)
                    .strong(),
                );
                ui.add_space(4.0);

                ui.label(RichText::new("Gender Differences:").strong());
                for (label, diff) in data.gender_diffs.iter() {
                    ui.label(format!("{label}: {diff:.2}%"));
                }

                ui.add_space(4.0);
                ui.label(RichText::new("Racial Differences:").strong());
                for (label, diff) in data.racial_diffs.iter() {
                    ui.label(format!("{label}: {diff:.2}%"));
                }
            });
    }

    fn show_conclusion(ui: &mut egui::Ui, deck: &DeckData) {
        match &deck.conclusion {
            Some(conclusion) => {
                ChartPlotter::draw_trend_chart(
                    ui,
                    "trend_gender",
                    &conclusion.gender,
                    &format!("{} Enrollment by Gender", deck.base_college),
                );
                ui.add_space(18.0);
                ChartPlotter::draw_trend_chart(
                    ui,
                    "trend_race",
                    &conclusion.race,
                    &format!("{} Enrollment by Race", deck.base_college),
                );
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn sample() -> DataFrame {
        df!(
            "Term" => [2013i64, 2013, 2018, 2018],
            "College Name" => ["Engineering", "Science", "Engineering", "Science"],
            "Men" => [100i64, 30, 120, 35],
            "Women" => [50i64, 30, 70, 45],
            "Unknown" => [0i64, 0, 1, 0],
        )
        .unwrap()
    }

    fn config() -> DeckConfig {
        DeckConfig {
            years: vec![2013, 2018],
            ..DeckConfig::default()
        }
    }

    #[test]
    fn year_slide_pairs_base_with_comparison() {
        let data = YearSlideData::compute(&sample(), 2013, "Engineering", "Science").unwrap();
        assert_eq!(data.sections.len(), 2);
        assert_eq!(data.sections[0].college, "Engineering");
        assert_eq!(data.sections[0].gender.get("Men"), Some(100.0));
        assert_eq!(data.sections[1].gender.get("Men"), Some(30.0));
        assert!((data.gender_diffs.get("Men").unwrap() - 16.67).abs() < 1e-9);
    }

    #[test]
    fn deck_excludes_base_college_from_comparisons_and_warms_cache() {
        let mut deck = DeckData::new(
            sample(),
            vec!["Engineering".to_string(), "Science".to_string()],
            &config(),
        );
        assert_eq!(deck.comparison_colleges, ["Science"]);
        assert!(deck.conclusion.is_some());
        // precomputed for the default comparison
        assert!(deck.year_slides.contains_key(&(2013, "Science".to_string())));
        assert!(deck.year_slide(2013, "Science").is_some());
    }

    #[test]
    fn selection_defaults_to_first_comparison_college() {
        let deck = DeckData::new(
            sample(),
            vec!["Engineering".to_string(), "Science".to_string()],
            &config(),
        );
        let view = SlideView::new();
        assert_eq!(view.comparison_for(&deck, 2013).as_deref(), Some("Science"));
    }
}
