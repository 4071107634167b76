//! Contrôles géométriques d'un contour
//!
//! Le tracé côté carte n'est jamais contrôlé ; ces vérifications servent
//! au contrôle serveur d'une valeur soumise.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Coord, Line};

use crate::types::Boundary;
use crate::BoundaryError;

/// Vérifie plages des coordonnées, aire non nulle et absence d'auto-intersection
pub fn validate(boundary: &Boundary) -> Result<(), BoundaryError> {
    for (index, point) in boundary.points().iter().enumerate() {
        if !point.in_range() {
            return Err(BoundaryError::invalid_coordinate(
                index,
                format!("({}, {}) is out of range", point.lat, point.lng),
            ));
        }
    }

    let area = boundary.to_polygon().unsigned_area();
    if area <= f64::EPSILON {
        return Err(BoundaryError::invalid_geometry("boundary has no area"));
    }

    if let Some((a, b)) = first_self_intersection(boundary) {
        return Err(BoundaryError::invalid_geometry(format!(
            "edges {} and {} intersect",
            a + 1,
            b + 1
        )));
    }

    Ok(())
}

/// Première paire d'arêtes qui se croisent (indices à partir de 0)
///
/// Deux arêtes consécutives partagent un sommet : seul un recouvrement
/// colinéaire compte pour elles.
pub fn first_self_intersection(boundary: &Boundary) -> Option<(usize, usize)> {
    let edges = edges(boundary);
    let n = edges.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match line_intersection(edges[i], edges[j]) {
                None => {}
                Some(LineIntersection::Collinear { intersection }) => {
                    if !adjacent || intersection.start != intersection.end {
                        return Some((i, j));
                    }
                }
                Some(LineIntersection::SinglePoint { .. }) => {
                    if !adjacent {
                        return Some((i, j));
                    }
                }
            }
        }
    }

    None
}

fn edges(boundary: &Boundary) -> Vec<Line> {
    let coords: Vec<Coord> = boundary.points().iter().copied().map(Coord::from).collect();
    (0..coords.len())
        .map(|i| Line::new(coords[i], coords[(i + 1) % coords.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn boundary(points: &[(f64, f64)]) -> Boundary {
        Boundary::new(points.iter().map(|&(lat, lng)| Point::new(lat, lng)).collect()).unwrap()
    }

    #[test]
    fn test_valid_square() {
        let square = boundary(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(validate(&square).is_ok());
    }

    #[test]
    fn test_bow_tie() {
        let bow_tie = boundary(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)]);
        assert_eq!(first_self_intersection(&bow_tie), Some((0, 2)));
        assert!(matches!(
            validate(&bow_tie).unwrap_err(),
            BoundaryError::InvalidGeometry { .. }
        ));
    }

    #[test]
    fn test_collinear_points_have_no_area() {
        let line = boundary(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert!(matches!(
            validate(&line).unwrap_err(),
            BoundaryError::InvalidGeometry { .. }
        ));
    }

    #[test]
    fn test_out_of_range() {
        let far = boundary(&[(0.0, 0.0), (0.0, 181.0), (1.0, 1.0)]);
        assert!(matches!(
            validate(&far).unwrap_err(),
            BoundaryError::InvalidCoordinate { index: 1, .. }
        ));
    }
}
