use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A canned origin/destination pair that new trips are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTemplate {
    #[serde(default)]
    pub name: String,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RouteTemplate {
    pub fn new(name: &str, start: Coordinate, end: Coordinate) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
        }
    }

    pub fn defaults() -> Vec<RouteTemplate> {
        vec![
            RouteTemplate::new(
                "cbd-westlands",
                Coordinate::new(-1.286389, 36.817223),
                Coordinate::new(-1.300761, 36.784499),
            ),
            RouteTemplate::new(
                "upperhill-karen",
                Coordinate::new(-1.313611, 36.7825),
                Coordinate::new(-1.345, 36.765),
            ),
            RouteTemplate::new(
                "pangani-runda",
                Coordinate::new(-1.281, 36.845),
                Coordinate::new(-1.2476, 36.8634),
            ),
        ]
    }
}
