use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const TILE_SIZE: f64 = 256.0;
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Geographic position in degrees
///
/// Serialised as a `[lat, lng]` pair, matching the stadium datasets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(position: LatLng) -> Self {
        [position.lat, position.lng]
    }
}

/// Position in the map's projected pixel plane (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// Conversion between geographic coordinates and the map's layer pixels.
///
/// The live implementation is the Leaflet map; `SphericalMercator` covers
/// native use and tests.
pub trait Projection {
    fn lat_lng_to_layer_point(&self, position: LatLng) -> Point;
    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng;
}

/// Web Mercator at a fixed zoom, with layer pixels measured from `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalMercator {
    pub zoom: f64,
    pub origin: Point,
}

impl SphericalMercator {
    #[must_use]
    pub const fn new(zoom: f64) -> Self {
        Self { zoom, origin: Point::new(0.0, 0.0) }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2.0f64.powf(self.zoom)
    }
}

impl Projection for SphericalMercator {
    fn lat_lng_to_layer_point(&self, position: LatLng) -> Point {
        let size = self.world_size();
        let lat_rad = position.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
        let x = (position.lng + 180.0) / 360.0 * size;
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * size;
        Point::new(x - self.origin.x, y - self.origin.y)
    }

    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng {
        let size = self.world_size();
        let x = point.x + self.origin.x;
        let y = point.y + self.origin.y;
        let n = PI - 2.0 * PI * y / size;
        LatLng::new(n.sinh().atan().to_degrees(), x / size * 360.0 - 180.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_lat_lng_deserializes_from_pair() {
        let position: LatLng = serde_json::from_str("[55.7, 12.57]").expect("valid pair");
        assert_eq!(position, LatLng::new(55.7, 12.57));
        assert_eq!(serde_json::to_string(&position).expect("serializes"), "[55.7,12.57]");
    }

    #[test]
    fn test_mercator_equator_origin() {
        let projection = SphericalMercator::new(0.0);
        let point = projection.lat_lng_to_layer_point(LatLng::new(0.0, 0.0));
        assert_close(point.x, 128.0);
        assert_close(point.y, 128.0);
    }

    #[test]
    fn test_mercator_inverse() {
        let projection = SphericalMercator { zoom: 7.0, origin: Point::new(17_000.0, 10_000.0) };
        let copenhagen = LatLng::new(55.702_5, 12.572_2);
        let back = projection.layer_point_to_lat_lng(projection.lat_lng_to_layer_point(copenhagen));
        assert_close(back.lat, copenhagen.lat);
        assert_close(back.lng, copenhagen.lng);
    }
}
