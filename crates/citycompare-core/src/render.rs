// crates/citycompare-core/src/render.rs

//! # Render Coordinator
//!
//! Projects a [`Comparison`] onto a [`MapSurface`] and a set of display-ready
//! panels. Unit conversion happens here and nowhere else; everything coming
//! in is km, km² and °C.
//!
//! [`render`] is idempotent: it clears the map before drawing, so calling it
//! again (for instance after a unit toggle) leaves exactly two markers and
//! one line.

use crate::common::{group_rounded, group_thousands};
use crate::compare::{Comparison, GrowthBar, GrowthChart, TimezoneComparison};
use crate::geo::{celsius_to_fahrenheit, km_to_miles, sq_km_to_sq_miles};
use crate::map::{LineStyle, MapBounds, MapSurface};
use crate::model::{CityRecord, Side};
use crate::prefs::UnitPreference;
use serde::Serialize;
use std::fmt;

pub const NOT_AVAILABLE: &str = "Not available";
/// Padding around both markers when fitting the map.
pub const FIT_PADDING_PX: u32 = 50;

// ----------------------------------------------------------------------------
// Views
// ----------------------------------------------------------------------------

/// Either a rendered panel or the sentence shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(panel) => Some(panel),
            Section::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityPanel {
    pub name: String,
    pub country: String,
    pub population: String,
    pub area: String,
    pub coordinates: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationPanel {
    pub headline: String,
    pub difference: String,
    /// Width of the smaller city's bar, in percent.
    pub bar_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub diameter_px: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsPanel {
    pub area_headline: String,
    pub area_bar_percent: f64,
    pub density: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneLine {
    pub city: String,
    pub clock: Option<String>,
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimezonePanel {
    pub first: ZoneLine,
    pub second: ZoneLine,
    pub difference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPanel {
    pub city: String,
    pub bars: Vec<GrowthBar>,
    pub summary: String,
}

/// Everything shown for a successful comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub imperial: bool,
    pub dark_mode: bool,
    pub first: CityPanel,
    pub second: CityPanel,
    pub distance: String,
    pub population: Section<PopulationPanel>,
    pub circles: Option<(Circle, Circle)>,
    pub statistics: Section<StatisticsPanel>,
    pub timezone: Section<TimezonePanel>,
    pub temperature: (String, String),
    pub growth: (Section<GrowthPanel>, Section<GrowthPanel>),
}

/// Both city panels replaced by the same message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Comparison(ComparisonView),
    Error(ErrorView),
}

// ----------------------------------------------------------------------------
// Projection
// ----------------------------------------------------------------------------

/// Draw `comparison` on `map` and build every panel under `prefs`.
pub fn render<M>(comparison: &Comparison<'_>, prefs: UnitPreference, map: &mut M) -> ComparisonView
where
    M: MapSurface + ?Sized,
{
    let pair = comparison.pair;
    let (a, b) = (pair.first.coordinates(), pair.second.coordinates());

    map.clear();
    map.add_marker(a, pair.first.display_name());
    map.add_marker(b, pair.second.display_name());
    map.add_line(a, b, &LineStyle::default());
    map.fit_bounds(MapBounds::around(a, b), FIT_PADDING_PX);

    let imperial = prefs.use_imperial;
    ComparisonView {
        imperial,
        dark_mode: prefs.is_dark_mode,
        first: city_panel(&pair.first, imperial),
        second: city_panel(&pair.second, imperial),
        distance: format!(
            "Distance between cities: {}",
            distance_text(comparison.distance_km, imperial)
        ),
        population: population_section(comparison),
        circles: circles(comparison),
        statistics: statistics_section(comparison),
        timezone: match &comparison.timezone {
            Some(tz) => Section::Ready(timezone_panel(comparison, tz)),
            None => Section::Unavailable("Time zone comparison not available".into()),
        },
        temperature: (
            temperature_text(comparison.first_temperature_c, imperial),
            temperature_text(comparison.second_temperature_c, imperial),
        ),
        growth: (
            growth_section(comparison.name(Side::First), comparison.first_growth.as_ref()),
            growth_section(comparison.name(Side::Second), comparison.second_growth.as_ref()),
        ),
    }
}

/// The error projection. The map keeps whatever it showed before.
pub fn render_error(message: &str) -> ErrorView {
    ErrorView {
        first: message.to_string(),
        second: message.to_string(),
    }
}

/// `"621 miles"` or `"1,000 kilometers"`.
pub fn distance_text(km: f64, imperial: bool) -> String {
    if imperial {
        format!("{} miles", group_rounded(km_to_miles(km)))
    } else {
        format!("{} kilometers", group_rounded(km))
    }
}

pub fn area_text(sq_km: Option<f64>, imperial: bool) -> String {
    match sq_km {
        Some(v) if imperial => format!("{} sq mi", group_rounded(sq_km_to_sq_miles(v))),
        Some(v) => format!("{} km²", group_rounded(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn temperature_text(celsius: Option<f64>, imperial: bool) -> String {
    match celsius {
        Some(c) if imperial => format!("{:.1}°F", celsius_to_fahrenheit(c)),
        Some(c) => format!("{c:.1}°C"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `"1 hour"`, `"5.5 hours"`. The sign is dropped.
pub fn hours_text(hours: f64) -> String {
    let h = hours.abs();
    if h == 1.0 {
        "1 hour".to_string()
    } else {
        format!("{h} hours")
    }
}

fn city_panel(record: &CityRecord, imperial: bool) -> CityPanel {
    let c = record.coordinates();
    CityPanel {
        name: record.display_name().to_string(),
        country: record.country().unwrap_or(NOT_AVAILABLE).to_string(),
        population: record
            .population()
            .map(group_thousands)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        area: area_text(record.area_sq_km(), imperial),
        coordinates: format!("{:.4}, {:.4}", c.lat(), c.lon()),
    }
}

fn population_section(cmp: &Comparison<'_>) -> Section<PopulationPanel> {
    let Some(pop) = &cmp.population else {
        return Section::Unavailable("Population data not available for comparison".into());
    };
    Section::Ready(PopulationPanel {
        headline: format!(
            "{} is {:.1}% larger",
            cmp.name(pop.ratio.larger),
            pop.ratio.percent_diff
        ),
        difference: format!("Population difference: {} people", group_thousands(pop.difference)),
        bar_percent: pop.ratio.smaller_bar(),
    })
}

fn circles(cmp: &Comparison<'_>) -> Option<(Circle, Circle)> {
    let pop = cmp.population.as_ref()?;
    let (d1, d2) = pop.circle_diameters();
    let label = |side: Side| {
        let people = cmp.pair.get(side).population().map(group_thousands).unwrap_or_default();
        format!("{}: {}", cmp.name(side), people)
    };
    Some((
        Circle {
            diameter_px: d1,
            label: label(Side::First),
        },
        Circle {
            diameter_px: d2,
            label: label(Side::Second),
        },
    ))
}

fn statistics_section(cmp: &Comparison<'_>) -> Section<StatisticsPanel> {
    let Some(area) = &cmp.area else {
        return Section::Unavailable("Area data not available for detailed comparison".into());
    };
    let density = match &cmp.density {
        Some(d) => format!(
            "{} is {:.1}% more densely populated",
            cmp.name(d.ratio.larger),
            d.ratio.percent_diff
        ),
        None => "Population density comparison not available".to_string(),
    };
    Section::Ready(StatisticsPanel {
        area_headline: format!(
            "{} is {:.1}% larger by area",
            cmp.name(area.larger),
            area.percent_diff
        ),
        area_bar_percent: area.smaller_bar(),
        density,
    })
}

fn timezone_panel(cmp: &Comparison<'_>, tz: &TimezoneComparison) -> TimezonePanel {
    let line = |side: Side, info: &crate::model::TimezoneInfo| ZoneLine {
        city: cmp.name(side).to_string(),
        clock: info.clock().map(str::to_string),
        zone: info.zone_name.clone(),
    };
    let difference = match tz.ahead {
        None => "Both cities are in the same timezone".to_string(),
        Some(side) => format!("{} is {} ahead", cmp.name(side), hours_text(tz.diff_hours)),
    };
    TimezonePanel {
        first: line(Side::First, &tz.first),
        second: line(Side::Second, &tz.second),
        difference,
    }
}

fn growth_section(city: &str, chart: Option<&GrowthChart>) -> Section<GrowthPanel> {
    match chart {
        Some(chart) => Section::Ready(GrowthPanel {
            city: city.to_string(),
            bars: chart.bars.clone(),
            summary: format!(
                "Min: {:.1}%  Max: {:.1}%  Mean: {:.1}%",
                chart.min, chart.max, chart.mean
            ),
        }),
        None => Section::Unavailable(format!("Urban growth data not available for {city}")),
    }
}

// ----------------------------------------------------------------------------
// Terminal text
// ----------------------------------------------------------------------------

impl<T: fmt::Display> fmt::Display for Section<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Ready(panel) => fmt::Display::fmt(panel, f),
            Section::Unavailable(msg) => writeln!(f, "  {msg}"),
        }
    }
}

impl fmt::Display for CityPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Country:     {}", self.country)?;
        writeln!(f, "  Population:  {}", self.population)?;
        writeln!(f, "  Area:        {}", self.area)?;
        writeln!(f, "  Coordinates: {}", self.coordinates)
    }
}

impl fmt::Display for PopulationPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.headline)?;
        writeln!(f, "  {}", self.difference)?;
        writeln!(f, "  {}", bar(self.bar_percent))
    }
}

impl fmt::Display for StatisticsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.area_headline)?;
        writeln!(f, "  {}", bar(self.area_bar_percent))?;
        writeln!(f, "  {}", self.density)
    }
}

impl fmt::Display for TimezonePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for z in [&self.first, &self.second] {
            let clock = z.clock.as_deref().unwrap_or("--:--");
            writeln!(f, "  {:<24} {:>5}  {}", z.city, clock, z.zone)?;
        }
        writeln!(f, "  {}", self.difference)
    }
}

impl fmt::Display for GrowthPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.city)?;
        for b in &self.bars {
            writeln!(f, "  {} {:>6.2}% {}", b.year, b.percent, bar(b.height))?;
        }
        writeln!(f, "  {}", self.summary)
    }
}

impl fmt::Display for ComparisonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        writeln!(f)?;
        write!(f, "{}", self.second)?;
        writeln!(f)?;
        writeln!(f, "{}", self.distance)?;
        writeln!(f, "  {} {}", self.first.name, self.temperature.0)?;
        writeln!(f, "  {} {}", self.second.name, self.temperature.1)?;
        writeln!(f, "\nPopulation")?;
        write!(f, "{}", self.population)?;
        if let Some((c1, c2)) = &self.circles {
            writeln!(
                f,
                "  ({} @ {:.0}px, {} @ {:.0}px)",
                c1.label, c1.diameter_px, c2.label, c2.diameter_px
            )?;
        }
        writeln!(f, "\nStatistics")?;
        write!(f, "{}", self.statistics)?;
        writeln!(f, "\nTime zones")?;
        write!(f, "{}", self.timezone)?;
        writeln!(f, "\nUrban population growth")?;
        write!(f, "{}", self.growth.0)?;
        write!(f, "{}", self.growth.1)
    }
}

impl fmt::Display for ErrorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.first)?;
        writeln!(f, "{}", self.second)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Comparison(v) => fmt::Display::fmt(v, f),
            View::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// Twenty-cell text bar for a 0..=100 width.
fn bar(percent: f64) -> String {
    let filled = (percent.clamp(0.0, 100.0) / 5.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}
