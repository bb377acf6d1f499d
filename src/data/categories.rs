//! Demographic Category Tables
//! Named constant tables for the gender and race breakdowns, replacing the
//! inline label lists the source data's consumers tend to duplicate.

/// One demographic category: the exact CSV header it is counted under,
/// an optional alternate header from older data revisions, and the name
/// shown in charts and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryLabel {
    pub field: &'static str,
    pub alias: Option<&'static str>,
    pub display: &'static str,
}

impl CategoryLabel {
    const fn new(field: &'static str, display: &'static str) -> Self {
        Self {
            field,
            alias: None,
            display,
        }
    }

    const fn with_alias(field: &'static str, alias: &'static str, display: &'static str) -> Self {
        Self {
            field,
            alias: Some(alias),
            display,
        }
    }
}

/// Year column in the source CSV.
pub const TERM_COL: &str = "Term";
/// College name column in the source CSV.
pub const COLLEGE_COL: &str = "College Name";

/// Gender breakdown columns.
pub const GENDER_LABELS: [CategoryLabel; 3] = [
    CategoryLabel::new("Men", "Men"),
    CategoryLabel::new("Women", "Women"),
    CategoryLabel::new("Unknown", "Unknown"),
];

/// Race breakdown columns. The CSV carries two "Unknown" headers; the racial
/// one is disambiguated as "Unknown.1". Older revisions title the multiracial
/// column "Two or More".
pub const RACE_LABELS: [CategoryLabel; 9] = [
    CategoryLabel::new("Caucasian", "Caucasian"),
    CategoryLabel::new("Asian American", "Asian American"),
    CategoryLabel::new("African American", "African American"),
    CategoryLabel::new("Hispanic", "Hispanic"),
    CategoryLabel::new("Native American", "Native American"),
    CategoryLabel::new("Hawaiian/Pacific Isl", "Hawaiian/Pacific Isl"),
    CategoryLabel::with_alias("Multiracial", "Two or More", "Multiracial"),
    CategoryLabel::new("International", "International"),
    CategoryLabel::with_alias("Unknown.1", "Unknown.1", "Unknown"),
];

/// Demographic dimension of a breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Gender,
    Race,
}

impl Dimension {
    pub fn labels(self) -> &'static [CategoryLabel] {
        match self {
            Dimension::Gender => &GENDER_LABELS,
            Dimension::Race => &RACE_LABELS,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Dimension::Gender => "Gender",
            Dimension::Race => "Race",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_has_three_labels_race_has_nine() {
        assert_eq!(Dimension::Gender.labels().len(), 3);
        assert_eq!(Dimension::Race.labels().len(), 9);
    }

    #[test]
    fn racial_unknown_keeps_suffixed_field_but_plain_display() {
        let unknown = RACE_LABELS
            .iter()
            .find(|l| l.field == "Unknown.1")
            .expect("suffixed Unknown column");
        assert_eq!(unknown.display, "Unknown");
    }

    #[test]
    fn multiracial_falls_back_to_two_or_more() {
        let multi = RACE_LABELS
            .iter()
            .find(|l| l.field == "Multiracial")
            .expect("Multiracial column");
        assert_eq!(multi.alias, Some("Two or More"));
    }

    #[test]
    fn labels_are_unique_within_each_dimension() {
        for dim in [Dimension::Gender, Dimension::Race] {
            let fields: Vec<_> = dim.labels().iter().map(|l| l.field).collect();
            let mut deduped = fields.clone();
            deduped.dedup();
            assert_eq!(fields, deduped);
        }
    }
}
