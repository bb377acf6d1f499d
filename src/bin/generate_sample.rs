//! Writes a deterministic enrollment summary CSV in the layout the viewer
//! loads by default: one row per college per fall term, with gender and race
//! head-count columns. Handy for demos and for trying the viewer without the
//! real data set.

use polars::prelude::*;

const OUTPUT_PATH: &str = "CleanedCombinedSummaryUndergrad.csv";

const COLLEGES: [&str; 5] = [
    "Engineering",
    "Business",
    "Science",
    "Liberal Arts",
    "Nursing",
];
const YEARS: [i32; 3] = [2013, 2018, 2023];

/// Rough per-college enrollment profile: total size plus the share of men
/// and the racial mix the counts are carved from.
struct Profile {
    total: f64,
    men_share: f64,
    race_shares: [f64; 9],
}

fn profile(college: &str) -> Profile {
    match college {
        "Engineering" => Profile {
            total: 5200.0,
            men_share: 0.72,
            race_shares: [0.48, 0.16, 0.05, 0.12, 0.01, 0.01, 0.04, 0.10, 0.03],
        },
        "Business" => Profile {
            total: 4100.0,
            men_share: 0.55,
            race_shares: [0.55, 0.10, 0.07, 0.13, 0.01, 0.01, 0.04, 0.06, 0.03],
        },
        "Science" => Profile {
            total: 3600.0,
            men_share: 0.47,
            race_shares: [0.50, 0.14, 0.06, 0.14, 0.01, 0.01, 0.05, 0.06, 0.03],
        },
        "Liberal Arts" => Profile {
            total: 2900.0,
            men_share: 0.38,
            race_shares: [0.58, 0.07, 0.08, 0.14, 0.02, 0.01, 0.05, 0.02, 0.03],
        },
        _ => Profile {
            total: 1400.0,
            men_share: 0.12,
            race_shares: [0.60, 0.08, 0.09, 0.13, 0.01, 0.01, 0.04, 0.01, 0.03],
        },
    }
}

/// Enrollment drifts a few percent per five-year step so the trend charts
/// have a visible slope.
fn growth(college: &str, step: usize) -> f64 {
    let rate: f64 = match college {
        "Engineering" => 0.08,
        "Business" => 0.03,
        "Science" => 0.05,
        "Liberal Arts" => -0.04,
        _ => 0.06,
    };
    (1.0 + rate).powi(step as i32)
}

fn main() -> PolarsResult<()> {
    let mut terms: Vec<i32> = Vec::new();
    let mut colleges: Vec<&str> = Vec::new();
    let mut men: Vec<i64> = Vec::new();
    let mut women: Vec<i64> = Vec::new();
    let mut gender_unknown: Vec<i64> = Vec::new();
    let mut race: Vec<Vec<i64>> = vec![Vec::new(); 9];

    for college in COLLEGES {
        let p = profile(college);
        for (step, &year) in YEARS.iter().enumerate() {
            let total = p.total * growth(college, step);
            let men_count = (total * p.men_share).round() as i64;
            let unknown_count = (total * 0.004).round() as i64;
            let women_count = total.round() as i64 - men_count - unknown_count;

            terms.push(year);
            colleges.push(college);
            men.push(men_count);
            women.push(women_count);
            gender_unknown.push(unknown_count);
            for (column, share) in race.iter_mut().zip(p.race_shares) {
                column.push((total * share).round() as i64);
            }
        }
    }

    let mut df = df!(
        "Term" => terms,
        "College Name" => colleges,
        "Men" => men,
        "Women" => women,
        "Unknown" => gender_unknown,
        "Caucasian" => std::mem::take(&mut race[0]),
        "Asian American" => std::mem::take(&mut race[1]),
        "African American" => std::mem::take(&mut race[2]),
        "Hispanic" => std::mem::take(&mut race[3]),
        "Native American" => std::mem::take(&mut race[4]),
        "Hawaiian/Pacific Isl" => std::mem::take(&mut race[5]),
        "Multiracial" => std::mem::take(&mut race[6]),
        "International" => std::mem::take(&mut race[7]),
        "Unknown.1" => std::mem::take(&mut race[8]),
    )?;

    let file = std::fs::File::create(OUTPUT_PATH)
        .map_err(|e| PolarsError::ComputeError(format!("creating {OUTPUT_PATH}: {e}").into()))?;
    CsvWriter::new(file).include_header(true).finish(&mut df)?;

    println!(
        "Wrote {} rows ({} colleges x {} terms) to {OUTPUT_PATH}",
        df.height(),
        COLLEGES.len(),
        YEARS.len()
    );
    Ok(())
}
