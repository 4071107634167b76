//! Types de données pour le crate site-boundary

use geo::{BoundingRect, Coord, LineString, Polygon, Rect};

use crate::BoundaryError;

/// Nombre minimal de sommets d'un contour
pub const MIN_POINTS: usize = 3;

/// Une coordonnée géographique (WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude dans [-90, 90] et longitude dans [-180, 180]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

// geo travaille en (x, y) = (lng, lat)
impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

impl From<Coord> for Point {
    fn from(c: Coord) -> Self {
        Point::new(c.y, c.x)
    }
}

/// Contour du site : un anneau fermé implicite d'au moins 3 sommets
///
/// Le dernier sommet n'est pas dupliqué : la fermeture est implicite.
/// L'ordre des sommets est celui du dessin et il est conservé tel quel.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    points: Vec<Point>,
}

impl Boundary {
    /// Construit un contour, refuse moins de [`MIN_POINTS`] sommets
    pub fn new(points: Vec<Point>) -> Result<Self, BoundaryError> {
        if points.len() < MIN_POINTS {
            return Err(BoundaryError::TooFewPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Extrait l'anneau extérieur d'un polygone `geo`
    ///
    /// Les trous sont ignorés. `geo` ferme explicitement ses anneaux, le
    /// sommet de fermeture est donc retiré.
    pub fn from_polygon(polygon: &Polygon) -> Result<Self, BoundaryError> {
        let mut coords: Vec<Coord> = polygon.exterior().0.clone();
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        Self::new(coords.into_iter().map(Point::from).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Polygone `geo` équivalent (anneau fermé, sans trou)
    pub fn to_polygon(&self) -> Polygon {
        let ring: LineString = self.points.iter().copied().map(Coord::from).collect();
        Polygon::new(ring, vec![])
    }

    /// Emprise du contour, pour recadrer la carte
    pub fn bounds(&self) -> Option<Bounds> {
        self.to_polygon().bounding_rect().map(Bounds::from)
    }
}

/// Emprise rectangulaire (sud-ouest / nord-est)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Point,
    pub north_east: Point,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Boundary {
        Boundary::new(vec![
            Point::new(51.0, -0.1),
            Point::new(51.1, -0.1),
            Point::new(51.05, -0.05),
        ])
        .unwrap()
    }

    #[test]
    fn test_too_few_points() {
        let err = Boundary::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]).unwrap_err();
        assert!(matches!(err, BoundaryError::TooFewPoints { count: 2 }));
    }

    #[test]
    fn test_polygon_ring_extraction() {
        let boundary = triangle();
        let polygon = boundary.to_polygon();
        // geo ferme l'anneau
        assert_eq!(polygon.exterior().0.len(), 4);

        let back = Boundary::from_polygon(&polygon).unwrap();
        assert_eq!(back, boundary);
    }

    #[test]
    fn test_bounds() {
        let bounds = triangle().bounds().unwrap();
        assert_eq!(bounds.south_west, Point::new(51.0, -0.1));
        assert_eq!(bounds.north_east, Point::new(51.1, -0.05));
        let center = bounds.center();
        assert!((center.lat - 51.05).abs() < 1e-9);
    }

    #[test]
    fn test_point_range() {
        assert!(Point::new(51.5, -0.09).in_range());
        assert!(!Point::new(91.0, 0.0).in_range());
        assert!(!Point::new(0.0, -180.5).in_range());
    }
}
