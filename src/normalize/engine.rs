//! Geometry engine: validity test and zero-distance buffer repair.

use geo::{
    unary_union, Area, Contains, Coord, Geometry, LineString, MultiPolygon, Point, Polygon,
    Validation,
};

/// Validity and repair primitives the normalizer depends on.
///
/// `buffer_zero` must return geometry of equal or lower topological
/// complexity than its input. It may change area or type in hard cases.
pub trait GeometryEngine {
    /// OGC simple-feature validity
    fn is_valid(&self, geometry: &Geometry<f64>) -> bool;

    /// Human-readable validity state for diagnostics
    fn explain_validity(&self, geometry: &Geometry<f64>) -> String;

    /// Dissolve self-intersections and slivers
    fn buffer_zero(&self, geometry: &Geometry<f64>) -> Geometry<f64>;
}

/// Engine backed by `geo`: `Validation` for validity checks and the
/// overlay engine behind `unary_union` for the zero-width repair.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeometryEngine for GeoEngine {
    fn is_valid(&self, geometry: &Geometry<f64>) -> bool {
        geometry.is_valid()
    }

    fn explain_validity(&self, geometry: &Geometry<f64>) -> String {
        match geometry.check_validation() {
            Ok(()) => "Valid Geometry".to_string(),
            Err(e) => e.to_string(),
        }
    }

    fn buffer_zero(&self, geometry: &Geometry<f64>) -> Geometry<f64> {
        let dissolved = match geometry {
            Geometry::Polygon(p) => unary_union([p]),
            Geometry::MultiPolygon(mp) => unary_union(mp.0.iter()),
            // Zero-width buffer of a non-areal geometry has no area
            _ => MultiPolygon::new(vec![]),
        };

        let polygons: Vec<Polygon<f64>> = dissolved
            .0
            .into_iter()
            .flat_map(split_pinched_polygon)
            .filter(|p| p.unsigned_area() > 0.0)
            .collect();

        Geometry::MultiPolygon(MultiPolygon::new(polygons))
    }
}

/// Split a polygon whose shell touches itself at a vertex into one
/// polygon per lobe. Holes go to the lobe that contains them.
fn split_pinched_polygon(polygon: Polygon<f64>) -> Vec<Polygon<f64>> {
    let (exterior, interiors) = polygon.into_inner();

    let mut shells: Vec<(LineString<f64>, Vec<LineString<f64>>)> = split_pinched_ring(&exterior)
        .into_iter()
        .map(|shell| (shell, Vec::new()))
        .collect();

    if shells.is_empty() {
        return Vec::new();
    }

    for hole in interiors {
        let target = hole
            .0
            .first()
            .and_then(|c| {
                let point = Point::from(*c);
                shells
                    .iter()
                    .position(|(shell, _)| Polygon::new(shell.clone(), vec![]).contains(&point))
            })
            .unwrap_or(0);
        shells[target].1.push(hole);
    }

    shells
        .into_iter()
        .map(|(shell, holes)| Polygon::new(shell, holes))
        .collect()
}

/// Cut a ring into simple closed rings wherever a vertex repeats.
fn split_pinched_ring(ring: &LineString<f64>) -> Vec<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = ring.0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }

    let mut rings = Vec::new();
    let mut path: Vec<Coord<f64>> = Vec::with_capacity(coords.len());

    for c in coords {
        if let Some(pos) = path.iter().position(|p| *p == c) {
            // Loop closed at `c`: path[pos..] is a lobe
            let mut lobe = path.split_off(pos);
            lobe.push(c);
            if lobe.len() >= 4 {
                rings.push(LineString::new(lobe));
            }
            path.push(c);
        } else {
            path.push(c);
        }
    }

    if path.len() >= 3 {
        path.push(path[0]);
        rings.push(LineString::new(path));
    }

    rings
}
