// crates/citycompare-core/src/random.rs

//! Random pair suggestions from a curated list of major cities.

use crate::common::equals_folded;
use rand::Rng;

/// Major cities that geocode unambiguously by name alone.
pub const CITY_NAMES: &[&str] = &[
    // Europe
    "London", "Paris", "Berlin", "Madrid", "Rome", "Amsterdam", "Vienna", "Prague",
    "Budapest", "Warsaw", "Stockholm", "Oslo", "Copenhagen", "Helsinki", "Dublin",
    "Lisbon", "Athens", "Brussels", "Zurich", "Geneva", "Munich", "Hamburg",
    "Frankfurt", "Milan", "Naples", "Barcelona", "Valencia", "Seville", "Porto",
    "Edinburgh", "Manchester", "Birmingham", "Lyon", "Marseille", "Nice", "Krakow",
    "Bucharest", "Sofia", "Belgrade", "Zagreb", "Ljubljana", "Bratislava", "Riga",
    "Vilnius", "Tallinn", "Reykjavik", "Kyiv", "Minsk", "Moscow", "Saint Petersburg",
    "Istanbul", "Ankara",
    // North America
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia",
    "San Antonio", "San Diego", "Dallas", "San Francisco", "Seattle", "Boston",
    "Miami", "Atlanta", "Denver", "Washington", "Las Vegas", "Detroit", "Portland",
    "Minneapolis", "New Orleans", "Nashville", "Austin", "Toronto", "Montreal",
    "Vancouver", "Calgary", "Ottawa", "Edmonton", "Quebec City", "Mexico City",
    "Guadalajara", "Monterrey", "Havana", "Panama City", "San Juan",
    "Guatemala City", "San Jose",
    // South America
    "Sao Paulo", "Rio de Janeiro", "Buenos Aires", "Lima", "Bogota", "Santiago",
    "Caracas", "Quito", "Montevideo", "La Paz", "Medellin", "Brasilia", "Salvador",
    "Asuncion", "Cordoba",
    // Asia
    "Tokyo", "Osaka", "Kyoto", "Seoul", "Busan", "Beijing", "Shanghai", "Guangzhou",
    "Shenzhen", "Hong Kong", "Chengdu", "Wuhan", "Taipei", "Singapore", "Bangkok",
    "Kuala Lumpur", "Jakarta", "Manila", "Hanoi", "Ho Chi Minh City", "Phnom Penh",
    "Yangon", "Dhaka", "Kolkata", "Mumbai", "Delhi", "Bangalore", "Chennai",
    "Hyderabad", "Karachi", "Lahore", "Islamabad", "Kathmandu", "Colombo",
    "Tehran", "Baghdad", "Riyadh", "Jeddah", "Dubai", "Abu Dhabi", "Doha",
    "Kuwait City", "Muscat", "Tel Aviv", "Jerusalem", "Amman", "Beirut", "Tashkent",
    "Almaty", "Ulaanbaatar", "Tbilisi", "Yerevan", "Baku",
    // Africa
    "Cairo", "Alexandria", "Lagos", "Abuja", "Kinshasa", "Johannesburg", "Cape Town",
    "Durban", "Nairobi", "Addis Ababa", "Casablanca", "Marrakesh", "Rabat",
    "Algiers", "Tunis", "Accra", "Dakar", "Abidjan", "Kampala", "Dar es Salaam",
    "Khartoum", "Luanda", "Harare", "Lusaka", "Kigali", "Antananarivo", "Maputo",
    // Oceania
    "Sydney", "Melbourne", "Brisbane", "Perth", "Adelaide", "Canberra", "Auckland",
    "Wellington", "Christchurch", "Honolulu", "Suva", "Port Moresby",
];

/// One of the two input slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    /// Keep this value.
    Locked(&'a str),
    Free,
}

/// Suggest a pair, keeping locked slots and drawing free ones uniformly.
///
/// A drawn name is redrawn while it folds equal to the other slot. Two
/// locked slots are returned as they are, even when equal.
pub fn pick_pair<R: Rng + ?Sized>(
    rng: &mut R,
    first: Slot<'_>,
    second: Slot<'_>,
) -> (String, String) {
    match (first, second) {
        (Slot::Locked(a), Slot::Locked(b)) => (a.to_string(), b.to_string()),
        (Slot::Locked(a), Slot::Free) => (a.to_string(), draw_other_than(rng, a)),
        (Slot::Free, Slot::Locked(b)) => (draw_other_than(rng, b), b.to_string()),
        (Slot::Free, Slot::Free) => {
            let a = draw(rng);
            let b = draw_other_than(rng, a);
            (a.to_string(), b)
        }
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CITY_NAMES[rng.random_range(0..CITY_NAMES.len())]
}

fn draw_other_than<R: Rng + ?Sized>(rng: &mut R, other: &str) -> String {
    loop {
        let candidate = draw(rng);
        if !equals_folded(candidate, other) {
            return candidate.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn list_has_no_folded_duplicates() {
        let folded: HashSet<String> = CITY_NAMES
            .iter()
            .map(|c| crate::common::fold_key(c))
            .collect();
        assert_eq!(folded.len(), CITY_NAMES.len());
        assert!(CITY_NAMES.len() >= 180);
    }

    #[test]
    fn free_slots_never_collide() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (a, b) = pick_pair(&mut rng, Slot::Free, Slot::Free);
            assert!(!equals_folded(&a, &b));
            assert!(CITY_NAMES.contains(&a.as_str()));
        }
    }

    #[test]
    fn locked_slot_is_kept() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (a, b) = pick_pair(&mut rng, Slot::Locked("Tokyo"), Slot::Free);
            assert_eq!(a, "Tokyo");
            assert_ne!(b, "Tokyo");

            let (a, b) = pick_pair(&mut rng, Slot::Free, Slot::Locked("tokyo"));
            assert_eq!(b, "tokyo");
            assert_ne!(a, "Tokyo");
        }
        assert_eq!(
            pick_pair(&mut rng, Slot::Locked("Oslo"), Slot::Locked("Oslo")),
            ("Oslo".to_string(), "Oslo".to_string())
        );
    }
}
