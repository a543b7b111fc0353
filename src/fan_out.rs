//! Radial expansion of a stadium group into individually clickable markers.
//!
//! The layout is computed in the map's pixel plane rather than in degrees so
//! the fan keeps the same on-screen shape at every latitude and zoom level.

use crate::constants::{FAN_RADIUS_PX, FAN_SPAN_DEGREES, FAN_START_DEGREES};
use crate::geometry::{LatLng, Point, Projection};
use crate::markers::{build_club_marker, MarkerContext, MarkerDescriptor};
use crate::models::Club;

/// Angle in degrees of member `index` out of `count`.
///
/// Members are spread evenly over `FAN_SPAN_DEGREES` starting at
/// `FAN_START_DEGREES`; a lone member sits at the start angle.
#[must_use]
pub fn fan_angle_degrees(count: usize, index: usize) -> f64 {
    let step = if count > 1 {
        FAN_SPAN_DEGREES / (count - 1) as f64
    } else {
        0.0
    };
    FAN_START_DEGREES + index as f64 * step
}

/// Pixel offset of member `index` from the group centre
#[must_use]
pub fn fan_offset(count: usize, index: usize, radius: f64) -> Point {
    let radians = fan_angle_degrees(count, index).to_radians();
    Point::new(radius * radians.cos(), radius * radians.sin())
}

/// Geographic positions for `count` members fanned around `center`
#[must_use]
pub fn fan_positions(center: LatLng, count: usize, projection: &impl Projection) -> Vec<LatLng> {
    let center_point = projection.lat_lng_to_layer_point(center);
    (0..count)
        .map(|index| {
            let point = center_point.offset(fan_offset(count, index, FAN_RADIUS_PX));
            projection.layer_point_to_lat_lng(point)
        })
        .collect()
}

/// Build the fanned markers for a group's members, in member order.
///
/// Members that cannot be drawn are skipped; the factory logs why.
#[must_use]
pub fn expand_group(
    members: &[&Club],
    center: LatLng,
    projection: &impl Projection,
    ctx: &MarkerContext<'_>,
) -> Vec<MarkerDescriptor> {
    let positions = fan_positions(center, members.len(), projection);
    members
        .iter()
        .zip(positions)
        .filter_map(|(club, position)| build_club_marker(club, ctx, true, Some(position)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SphericalMercator;
    use crate::markers::MarkerKind;
    use crate::models::test_support::club_at;
    use crate::models::{CountryContext, LeagueRanking, StyleFlags};
    use crate::panes::Pane;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn distance(a: Point, b: Point) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    #[test]
    fn test_two_members_at_span_ends() {
        assert_close(fan_angle_degrees(2, 0), -125.0);
        assert_close(fan_angle_degrees(2, 1), -15.0);
    }

    #[test]
    fn test_five_members_evenly_spaced() {
        let angles: Vec<f64> = (0..5).map(|i| fan_angle_degrees(5, i)).collect();
        let expected = [-125.0, -97.5, -70.0, -42.5, -15.0];
        for (angle, want) in angles.iter().zip(expected) {
            assert_close(*angle, want);
        }
    }

    #[test]
    fn test_single_member_sits_at_start() {
        assert_close(fan_angle_degrees(1, 0), -125.0);
    }

    #[test]
    fn test_offsets_lie_on_the_radius_above_the_center() {
        for count in 1..=6 {
            for index in 0..count {
                let offset = fan_offset(count, index, FAN_RADIUS_PX);
                assert_close(distance(Point::default(), offset), FAN_RADIUS_PX);
                // Every angle in [-125, -15] points upwards on screen
                assert!(offset.y < 0.0);
            }
        }
        // -125 degrees is up and to the left
        assert!(fan_offset(2, 0, 1.0).x < 0.0);
        assert!(fan_offset(2, 1, 1.0).x > 0.0);
    }

    #[test]
    fn test_positions_are_radius_pixels_from_center() {
        let projection = SphericalMercator::new(10.0);
        let center = LatLng::new(55.7025, 12.5722);
        let center_point = projection.lat_lng_to_layer_point(center);

        let positions = fan_positions(center, 4, &projection);
        assert_eq!(positions.len(), 4);
        for position in positions {
            let point = projection.lat_lng_to_layer_point(position);
            assert!((distance(point, center_point) - FAN_RADIUS_PX).abs() < 1e-6);
        }
    }

    #[test]
    fn test_expand_group_builds_fanned_markers() {
        let ranking = LeagueRanking::new(vec![vec!["L0".into()], vec!["L1".into()]]);
        let country = CountryContext::new("da");
        let ctx = MarkerContext { ranking: &ranking, country: &country, flags: StyleFlags::default() };
        let center = LatLng::new(55.7025, 12.5722);
        let a = club_at("a", "L0", "s", center);
        let b = club_at("b", "L1", "s", center);

        let projection = SphericalMercator::new(12.0);
        let markers = expand_group(&[&a, &b], center, &projection, &ctx);
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.pane == Pane::FanOut));
        assert_eq!(markers[0].kind, MarkerKind::FanOutChild("a".into()));
        assert_eq!(markers[1].kind, MarkerKind::FanOutChild("b".into()));
        // First member goes up-left (west), second up-right (east)
        assert!(markers[0].position.lng < center.lng);
        assert!(markers[1].position.lng > center.lng);
        assert!(markers.iter().all(|m| m.position.lat > center.lat));

        // Measured back in the pixel plane the members sit at -125 and -15 degrees
        let center_point = projection.lat_lng_to_layer_point(center);
        let angles: Vec<f64> = markers
            .iter()
            .map(|m| {
                let point = projection.lat_lng_to_layer_point(m.position);
                (point.y - center_point.y).atan2(point.x - center_point.x).to_degrees()
            })
            .collect();
        assert!((angles[0] - -125.0).abs() < 1e-6, "{angles:?}");
        assert!((angles[1] - -15.0).abs() < 1e-6, "{angles:?}");
    }

    #[test]
    fn test_five_fanned_positions_keep_their_angles() {
        let projection = SphericalMercator::new(14.0);
        let center = LatLng::new(56.1572, 10.2107);
        let center_point = projection.lat_lng_to_layer_point(center);

        let angles: Vec<f64> = fan_positions(center, 5, &projection)
            .into_iter()
            .map(|position| {
                let point = projection.lat_lng_to_layer_point(position);
                (point.y - center_point.y).atan2(point.x - center_point.x).to_degrees()
            })
            .collect();
        for (angle, want) in angles.iter().zip([-125.0, -97.5, -70.0, -42.5, -15.0]) {
            assert!((angle - want).abs() < 1e-6, "{angles:?}");
        }
    }
}
