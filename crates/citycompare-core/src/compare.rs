// crates/citycompare-core/src/compare.rs

//! # Comparison Engine
//!
//! Pure functions over a [`CityPair`]. Every statistic stays in canonical
//! units (km, km², °C); the renderer converts at the very last step, so a
//! unit toggle never has to recompute anything here from converted values.
//!
//! All ratio statistics share one rule: with values `a` (first city) and
//! `b` (second city), both finite and strictly positive,
//!
//! ```text
//! percent_diff = (max / min - 1) * 100
//! bar(v)       = v / max * 100
//! ```
//!
//! and on an exact tie the first city is reported as the larger one with a
//! difference of zero.

use crate::geo::haversine_km;
use crate::model::{CityPair, GrowthPoint, Side, TimezoneInfo};
use serde::Serialize;

/// Largest population circle diameter, in pixels.
pub const MAX_CIRCLE_PX: f64 = 150.0;

/// How two positive quantities relate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio {
    pub first: f64,
    pub second: f64,
    /// The side holding the greater value (first on a tie).
    pub larger: Side,
    pub percent_diff: f64,
    pub first_bar: f64,
    pub second_bar: f64,
}

impl Ratio {
    /// `None` unless both values are finite and strictly positive.
    pub fn of(first: f64, second: f64) -> Option<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(first) || !usable(second) {
            return None;
        }
        let (max, min) = if first >= second { (first, second) } else { (second, first) };
        let larger = if second > first { Side::Second } else { Side::First };
        Some(Self {
            first,
            second,
            larger,
            percent_diff: (max / min - 1.0) * 100.0,
            first_bar: first / max * 100.0,
            second_bar: second / max * 100.0,
        })
    }

    pub fn bar(&self, side: Side) -> f64 {
        match side {
            Side::First => self.first_bar,
            Side::Second => self.second_bar,
        }
    }

    /// Bar width of the smaller value; the single-bar view of the pair.
    pub fn smaller_bar(&self) -> f64 {
        self.first_bar.min(self.second_bar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationComparison {
    pub ratio: Ratio,
    /// Absolute difference in people.
    pub difference: u64,
}

impl PopulationComparison {
    /// Circle diameters scaled by the square root of the population share.
    pub fn circle_diameters(&self) -> (f64, f64) {
        let d = |bar: f64| (bar / 100.0).sqrt() * MAX_CIRCLE_PX;
        (d(self.ratio.first_bar), d(self.ratio.second_bar))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityComparison {
    /// People per km², first city.
    pub first_per_sq_km: f64,
    pub second_per_sq_km: f64,
    /// `larger` is the denser city.
    pub ratio: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimezoneComparison {
    pub first: TimezoneInfo,
    pub second: TimezoneInfo,
    /// `(offset1 - offset2) / 3600`.
    pub diff_hours: f64,
    /// The side whose UTC offset is algebraically larger; `None` when equal.
    pub ahead: Option<Side>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthBar {
    pub year: i32,
    pub percent: f64,
    /// `(v - min) / (max - min) * 100`; 100 for a flat series.
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthChart {
    pub bars: Vec<GrowthBar>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Every derived statistic of one pair, canonical units.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison<'a> {
    pub pair: &'a CityPair,
    pub distance_km: f64,
    pub population: Option<PopulationComparison>,
    pub area: Option<Ratio>,
    pub density: Option<DensityComparison>,
    pub first_temperature_c: Option<f64>,
    pub second_temperature_c: Option<f64>,
    pub timezone: Option<TimezoneComparison>,
    pub first_growth: Option<GrowthChart>,
    pub second_growth: Option<GrowthChart>,
}

impl<'a> Comparison<'a> {
    pub fn name(&self, side: Side) -> &'a str {
        self.pair.get(side).display_name()
    }
}

/// Compute every comparison for `pair`. Never mutates the records.
pub fn compare(pair: &CityPair) -> Comparison<'_> {
    let (a, b) = (&pair.first, &pair.second);
    Comparison {
        pair,
        distance_km: haversine_km(a.coordinates(), b.coordinates()),
        population: compare_population(a.population(), b.population()),
        area: compare_area(a.area_sq_km(), b.area_sq_km()),
        density: compare_density(
            (a.population(), a.area_sq_km()),
            (b.population(), b.area_sq_km()),
        ),
        first_temperature_c: a.weather().map(|w| w.temperature_celsius),
        second_temperature_c: b.weather().map(|w| w.temperature_celsius),
        timezone: compare_timezones(a.timezone(), b.timezone()),
        first_growth: a.historical_growth().and_then(growth_chart),
        second_growth: b.historical_growth().and_then(growth_chart),
    }
}

pub fn compare_population(first: Option<u64>, second: Option<u64>) -> Option<PopulationComparison> {
    let (first, second) = (first?, second?);
    Some(PopulationComparison {
        ratio: Ratio::of(first as f64, second as f64)?,
        difference: first.abs_diff(second),
    })
}

pub fn compare_area(first: Option<f64>, second: Option<f64>) -> Option<Ratio> {
    Ratio::of(first?, second?)
}

/// Density needs population and non-zero area on both sides.
pub fn compare_density(
    first: (Option<u64>, Option<f64>),
    second: (Option<u64>, Option<f64>),
) -> Option<DensityComparison> {
    let density = |(pop, area): (Option<u64>, Option<f64>)| -> Option<f64> {
        let (pop, area) = (pop?, area?);
        (pop > 0 && area > 0.0 && area.is_finite()).then(|| pop as f64 / area)
    };
    let (d1, d2) = (density(first)?, density(second)?);
    Some(DensityComparison {
        first_per_sq_km: d1,
        second_per_sq_km: d2,
        ratio: Ratio::of(d1, d2)?,
    })
}

pub fn compare_timezones(
    first: Option<&TimezoneInfo>,
    second: Option<&TimezoneInfo>,
) -> Option<TimezoneComparison> {
    let (first, second) = (first?, second?);
    let delta = first.gmt_offset_seconds - second.gmt_offset_seconds;
    let ahead = match delta {
        0 => None,
        d if d > 0 => Some(Side::First),
        _ => Some(Side::Second),
    };
    Some(TimezoneComparison {
        first: first.clone(),
        second: second.clone(),
        diff_hours: delta as f64 / 3600.0,
        ahead,
    })
}

/// Normalized chart of a growth series; `None` for an empty series.
pub fn growth_chart(points: &[GrowthPoint]) -> Option<GrowthChart> {
    let mut sorted: Vec<GrowthPoint> = points
        .iter()
        .copied()
        .filter(|p| p.percent.is_finite())
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by_key(|p| p.year);

    let min = sorted.iter().map(|p| p.percent).fold(f64::INFINITY, f64::min);
    let max = sorted.iter().map(|p| p.percent).fold(f64::NEG_INFINITY, f64::max);
    let mean = sorted.iter().map(|p| p.percent).sum::<f64>() / sorted.len() as f64;
    let span = max - min;

    let bars = sorted
        .iter()
        .map(|p| GrowthBar {
            year: p.year,
            percent: p.percent,
            height: if span > 0.0 {
                (p.percent - min) / span * 100.0
            } else {
                100.0
            },
        })
        .collect();

    Some(GrowthChart { bars, min, max, mean })
}
