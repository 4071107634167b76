//! # levy-service
//!
//! Parcours de demande de taxe environnementale : page de tracé du contour,
//! devis et registre des demandes de la session.
//!
//! ## Features
//!
//! - Contrôleur de la page "Draw your development boundary" (restauration, soumission)
//! - Devis : taxe par logement, récapitulatif "Check your answers"
//! - Validation des saisies de localisation et des détails du projet
//! - Registre des demandes en mémoire, paiement simulé
//! - CLI de démonstration
//!
//! ## Usage CLI
//!
//! ```bash
//! # Modèle de vue de la page de tracé, sur retour arrière
//! levy-service render --value '[{"lat":"51.5","lng":"-0.1"}, ...]'
//!
//! # Rejouer un tracé sur une carte en mémoire
//! levy-service draw --script ./gestures.json
//!
//! # Devis pour 150 logements
//! levy-service quote --houses 150
//! ```

pub mod applications;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod forms;

pub use applications::{Application, ApplicationStore, SubmissionStatus};
pub use config::{LevyConfig, ServiceConfig};
pub use error::ServiceError;
pub use fingerprint::boundary_fingerprint;
pub use forms::{
    BoundaryPageController, FieldError, FormContext, PageController, QuotePageController,
    SubmitOutcome, ViewModel,
};
