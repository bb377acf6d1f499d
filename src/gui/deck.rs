//! Deck Navigation
//! The slide list and the current position in it. Navigation clamps at the
//! ends; the view hides the matching button there.

/// One slide of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Introduction,
    Year(i32),
    Conclusion,
}

impl Slide {
    pub fn title(&self) -> String {
        match self {
            Slide::Introduction => "Introduction".to_string(),
            Slide::Year(year) => format!("Fall {year} Enrollment"),
            Slide::Conclusion => "Conclusion".to_string(),
        }
    }
}

/// Slide order and cursor: introduction, one slide per year, conclusion.
pub struct DeckNav {
    slides: Vec<Slide>,
    current: usize,
}

impl DeckNav {
    pub fn new(years: &[i32]) -> Self {
        let mut slides = vec![Slide::Introduction];
        slides.extend(years.iter().map(|&y| Slide::Year(y)));
        slides.push(Slide::Conclusion);
        Self { slides, current: 0 }
    }

    pub fn current(&self) -> Slide {
        self.slides[self.current]
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.slides.len() {
            self.current += 1;
        }
    }

    pub fn back(&mut self) {
        if self.current > 0 {
            self.current -= 1;
        }
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.slides.len()
    }

    /// (1-based position, total), for the "n / m" indicator.
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.slides.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_are_intro_years_conclusion() {
        let nav = DeckNav::new(&[2013, 2018, 2023]);
        assert_eq!(nav.position(), (1, 5));
        assert_eq!(nav.current(), Slide::Introduction);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut nav = DeckNav::new(&[2013]);
        assert!(nav.is_first());
        nav.back();
        assert_eq!(nav.current(), Slide::Introduction);

        nav.next();
        assert_eq!(nav.current(), Slide::Year(2013));
        nav.next();
        assert_eq!(nav.current(), Slide::Conclusion);
        assert!(nav.is_last());
        nav.next();
        assert_eq!(nav.current(), Slide::Conclusion);
    }

    #[test]
    fn year_slide_titles_name_the_year() {
        assert_eq!(Slide::Year(2018).title(), "Fall 2018 Enrollment");
    }
}
