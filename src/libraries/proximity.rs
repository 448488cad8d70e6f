use geo::{HaversineDistance, Point};

use crate::models::{CollectionPoint, GeoPoint};

/// A candidate paired with its computed distance. Derived per query, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityResult {
    pub point: CollectionPoint,
    pub distance_meters: f64,
}

/// Calculate distance between two points in meters using Haversine formula
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let p1 = Point::new(a.longitude, a.latitude);
    let p2 = Point::new(b.longitude, b.latitude);

    p1.haversine_distance(&p2)
}

/// Find the candidate closest to `origin`. Ties go to the first candidate in
/// input order; an empty slice means "no data yet" and yields `None`.
pub fn nearest(origin: GeoPoint, candidates: &[CollectionPoint]) -> Option<ProximityResult> {
    let mut best: Option<(usize, f64)> = None;

    for (index, point) in candidates.iter().enumerate() {
        let distance = distance_meters(origin, point.location);
        if best.map_or(true, |(_, current)| distance < current) {
            best = Some((index, distance));
        }
    }

    best.map(|(index, distance_meters)| ProximityResult {
        point: candidates[index].clone(),
        distance_meters,
    })
}

/// Distance from `origin` to every candidate, preserving input order.
pub fn distances_to_all(origin: GeoPoint, candidates: &[CollectionPoint]) -> Vec<ProximityResult> {
    candidates
        .iter()
        .map(|point| ProximityResult {
            point: point.clone(),
            distance_meters: distance_meters(origin, point.location),
        })
        .collect()
}
