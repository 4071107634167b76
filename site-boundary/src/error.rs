//! Types d'erreurs pour le crate site-boundary

use thiserror::Error;

/// Erreurs pouvant survenir autour d'un contour de site
///
/// Aucune de ces erreurs n'est fatale pour la page : l'appelant les traite
/// comme un état vide (carte sans polygone) et les journalise.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Données de restauration illisibles (JSON invalide, forme inattendue)
    #[error("Malformed restoration data: {reason}")]
    MalformedRestorationData { reason: String },

    /// Moins de 3 sommets, pas de polygone possible
    #[error("Boundary needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    /// Coordonnée non numérique ou hors plage
    #[error("Invalid coordinate at point {index}: {reason}")]
    InvalidCoordinate { index: usize, reason: String },

    /// Géométrie rejetée par la validation (auto-intersection, aire nulle)
    #[error("Invalid boundary geometry: {reason}")]
    InvalidGeometry { reason: String },

    /// Échec remonté par la surface de dessin
    #[error("Drawing surface error: {0}")]
    Surface(String),
}

impl BoundaryError {
    /// Crée une erreur de restauration avec contexte
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRestorationData {
            reason: reason.into(),
        }
    }

    /// Crée une erreur de coordonnée invalide
    pub fn invalid_coordinate(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            index,
            reason: reason.into(),
        }
    }

    /// Crée une erreur de géométrie invalide
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BoundaryError {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed(e.to_string())
    }
}
