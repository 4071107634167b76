//! # site-boundary
//!
//! Éditeur de contour de site pour une page de formulaire : un seul polygone
//! tracé sur une carte, synchronisé avec un champ caché et une liste de
//! coordonnées en lecture seule.
//!
//! ## Features
//!
//! - Outil polygone unique, un seul contour à la fois
//! - Restauration d'un contour soumis précédemment (retour arrière, lien "Change")
//! - Format d'échange JSON `[{"lat": "51.505000", "lng": "-0.090000"}, ...]`
//! - Interface [`DrawingSurface`] neutre, implémentable sur tout widget de carte
//! - Types `geo` pour les contrôles géométriques et l'export GeoJSON
//!
//! ## Usage
//!
//! ```rust,ignore
//! use site_boundary::{
//!     BoundaryEditor, CoordinateSynchronizer, EditorSettings, HiddenField,
//!     MemorySurface, RestorationData, RowList,
//! };
//!
//! let sync = CoordinateSynchronizer::new(Some(HiddenField::new("NiAeAB")), Some(RowList::default()));
//! let mut editor = BoundaryEditor::new(EditorSettings::default(), sync);
//!
//! let restoration = RestorationData::from_attribute(existing);
//! editor.init(Some(MemorySurface::new()), restoration.as_ref());
//! ```

pub mod editor;
pub mod error;
pub mod export;
pub mod restore;
pub mod serialize;
pub mod sync;
pub mod types;
pub mod validate;

pub use editor::{
    BoundaryEditor, DrawStyle, DrawTools, DrawingSurface, EditorSettings, InitOutcome, MapView,
    MemorySurface, SurfaceEvent, TileSource,
};
pub use error::BoundaryError;
pub use restore::RestorationData;
pub use serialize::{format_coordinate, serialize_boundary, SerializedPoint};
pub use sync::{CoordinateInput, CoordinateSynchronizer, FormField, HiddenField, RowDisplay, RowList};
pub use types::{Boundary, Bounds, Point, MIN_POINTS};

/// Nom du champ caché qui porte le contour sérialisé
///
/// Partagé entre le gabarit, l'éditeur et la définition du formulaire.
pub const BOUNDARY_FIELD: &str = "NiAeAB";

/// Restaure puis resérialise : la valeur d'un contour déjà sérialisé est stable
pub fn normalize(raw: &str) -> Result<String, BoundaryError> {
    let boundary = RestorationData::Raw(raw.to_string()).parse()?;
    Ok(serialize_boundary(&boundary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = r#"[{"lat":"51.505000","lng":"-0.090000"},{"lat":"51.510000","lng":"-0.080000"},{"lat":"51.500000","lng":"-0.070000"}]"#;
        assert_eq!(normalize(raw).unwrap(), raw);
    }

    #[test]
    fn test_normalize_rounds() {
        let raw = r#"[{"lat":51.5,"lng":-0.123456789},{"lat":"51.6","lng":"0"},{"lat":"51.55","lng":"0.1"}]"#;
        assert_eq!(
            normalize(raw).unwrap(),
            r#"[{"lat":"51.500000","lng":"-0.123457"},{"lat":"51.600000","lng":"0.000000"},{"lat":"51.550000","lng":"0.100000"}]"#
        );
    }
}
