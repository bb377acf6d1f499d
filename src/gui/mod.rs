//! GUI module - User interface components

mod app;
mod deck;
mod slide_view;

pub use app::DeckApp;
pub use deck::{DeckNav, Slide};
pub use slide_view::{ConclusionData, DeckData, SlideView, YearSlideData};
