//! Site polygon metrics: vertex count and approximate ground-projected
//! area from a ring of geographic coordinates.

use serde::{Deserialize, Serialize};

/// Meters per degree of longitude at the equator.
const METERS_PER_DEG_LON: f64 = 111_320.0;
/// Meters per degree of latitude.
const METERS_PER_DEG_LAT: f64 = 110_540.0;

/// Read-only display facts for a drawn site polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetrics {
    pub vertices: usize,
    #[serde(rename = "areaM2")]
    pub area_m2: f64,
}

/// Measure a closed ring of `[lon, lat]` pairs (last point repeating the
/// first, per GeoJSON convention).
///
/// Rings shorter than 4 points are degenerate or still being drawn and
/// measure as zero. The area uses an equirectangular meters-per-degree
/// projection followed by the shoelace formula; that is only a planar
/// approximation, acceptable for site parcels of city-block scale.
pub fn measure(ring: &[[f64; 2]]) -> SiteMetrics {
    if ring.len() < 4 {
        return SiteMetrics::default();
    }

    let projected: Vec<[f64; 2]> = ring
        .iter()
        .map(|[lon, lat]| {
            [
                lon * METERS_PER_DEG_LON * lat.to_radians().cos(),
                lat * METERS_PER_DEG_LAT,
            ]
        })
        .collect();

    let mut twice_area = 0.0;
    for pair in projected.windows(2) {
        let [x1, y1] = pair[0];
        let [x2, y2] = pair[1];
        twice_area += x1 * y2 - x2 * y1;
    }

    SiteMetrics {
        vertices: ring.len() - 1,
        area_m2: twice_area.abs() / 2.0,
    }
}
