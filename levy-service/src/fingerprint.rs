//! Empreinte d'un contour pour détecter les changements
//!
//! L'empreinte est normalisée pour être indépendante du sommet de départ
//! (un même contour tracé depuis un autre sommet a la même empreinte).

use blake3::Hasher;

use site_boundary::{Boundary, Point};

/// Sommet en millionièmes de degré, ordonné (lng, lat)
type Micro = (i64, i64);

fn to_micro(point: &Point) -> Micro {
    // Même précision que le champ sérialisé
    let scale = |v: f64| (v * 1_000_000.0).round() as i64;
    (scale(point.lng), scale(point.lat))
}

/// Calcule une empreinte stable d'un contour
///
/// Les sommets sont ramenés au millionième de degré, puis l'anneau est lu
/// à partir du plus petit (lng, puis lat).
pub fn boundary_hash(boundary: &Boundary) -> [u8; 32] {
    let ring: Vec<Micro> = boundary.points().iter().map(to_micro).collect();
    let start = ring
        .iter()
        .enumerate()
        .min_by_key(|(_, vertex)| **vertex)
        .map_or(0, |(i, _)| i);

    let mut hasher = Hasher::new();
    hasher.update(b"BOUNDARY");
    for (lng, lat) in ring[start..].iter().chain(&ring[..start]) {
        hasher.update(&lng.to_le_bytes());
        hasher.update(&lat.to_le_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Empreinte en hexadécimal
pub fn boundary_fingerprint(boundary: &Boundary) -> String {
    hex::encode(boundary_hash(boundary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(start: usize) -> Boundary {
        let mut points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ];
        points.rotate_left(start);
        Boundary::new(points).unwrap()
    }

    #[test]
    fn test_same_boundary_different_start() {
        let reference = boundary_hash(&square(0));
        for start in 1..4 {
            assert_eq!(
                boundary_hash(&square(start)),
                reference,
                "Same boundary starting at a different vertex should have the same hash"
            );
        }
    }

    #[test]
    fn test_different_boundary_different_hash() {
        let moved = Boundary::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.5),
            Point::new(1.0, 0.0),
        ])
        .unwrap();
        assert_ne!(boundary_hash(&square(0)), boundary_hash(&moved));
    }

    #[test]
    fn test_sub_precision_noise_is_ignored() {
        let noisy = Boundary::new(vec![
            Point::new(0.00000001, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(boundary_fingerprint(&square(0)), boundary_fingerprint(&noisy));
        assert_eq!(boundary_fingerprint(&noisy).len(), 64);
    }

    #[test]
    fn test_noise_does_not_move_start() {
        // Après arrondi les deux sommets ont la même longitude
        let mut points = vec![
            Point::new(0.0, 0.00000004),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, -0.00000004),
        ];
        let reference = boundary_hash(&square(0));
        for _ in 0..4 {
            points.rotate_left(1);
            let noisy = Boundary::new(points.clone()).unwrap();
            assert_eq!(boundary_hash(&noisy), reference);
        }
    }
}
