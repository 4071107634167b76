//! Synchronisation du contour vers le formulaire
//!
//! Projette un contour en deux sorties :
//! - la valeur sérialisée du champ caché (seule valeur soumise au formulaire)
//! - les lignes de coordonnées affichées en lecture seule
//!
//! Une cible absente (gabarit sans conteneur ou sans champ) rend l'opération
//! correspondante inopérante sans bloquer l'autre.

pub mod rows;
pub mod target;

use tracing::debug;

use crate::serialize::{encode_points, serialized_points};
use crate::types::Boundary;

pub use rows::{coordinate_inputs, render_rows_html, Axis, CoordinateInput};
pub use target::{FormField, HiddenField, RowDisplay, RowList};

/// Synchroniseur de coordonnées
#[derive(Debug, Default)]
pub struct CoordinateSynchronizer<F, D> {
    field: Option<F>,
    display: Option<D>,
}

impl<F: FormField, D: RowDisplay> CoordinateSynchronizer<F, D> {
    pub fn new(field: Option<F>, display: Option<D>) -> Self {
        Self { field, display }
    }

    /// Met à jour le champ caché et régénère les lignes
    ///
    /// Retourne la valeur sérialisée écrite (ou qui l'aurait été).
    pub fn sync(&mut self, boundary: &Boundary) -> String {
        let points = serialized_points(boundary);
        let value = encode_points(&points);

        match self.field.as_mut() {
            Some(field) => field.set_value(&value),
            None => debug!("Boundary field not found, skipping value update"),
        }

        match self.display.as_mut() {
            Some(display) => display.replace_rows(&coordinate_inputs(&points)),
            None => debug!("Coordinates container not found, skipping rows"),
        }

        debug!(points = boundary.vertex_count(), "Coordinates synchronised");
        value
    }

    /// Vide le champ caché et supprime toutes les lignes
    pub fn clear(&mut self) {
        if let Some(field) = self.field.as_mut() {
            field.set_value("");
        }
        if let Some(display) = self.display.as_mut() {
            display.clear_rows();
        }
        debug!("Coordinates cleared");
    }

    pub fn field(&self) -> Option<&F> {
        self.field.as_ref()
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }
}
