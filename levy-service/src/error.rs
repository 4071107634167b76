//! Types d'erreurs du service

use site_boundary::BoundaryError;
use thiserror::Error;

/// Erreurs des contrôleurs de page et du registre des demandes
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Demande inconnue dans la session
    #[error("Application not found: {0}")]
    ApplicationNotFound(String),

    /// Transition de statut impossible
    #[error("Application {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: &'static str,
        to: &'static str,
    },

    /// Charge utile de formulaire illisible
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Erreur sur le contour
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}
