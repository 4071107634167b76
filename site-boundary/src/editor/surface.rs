//! Interface neutre de la surface de dessin (widget de carte)

use serde::{Deserialize, Serialize};

use crate::types::{Boundary, Point};
use crate::BoundaryError;

/// Capacités attendues d'un widget de carte avec outils de dessin
///
/// Les évènements utilisateur (création, édition, suppression) remontent
/// vers [`BoundaryEditor`](super::BoundaryEditor) sous forme de
/// [`SurfaceEvent`](super::SurfaceEvent).
pub trait DrawingSurface {
    /// Centre et zoom de la vue
    fn set_view(&mut self, view: &MapView) -> Result<(), BoundaryError>;

    /// Ajoute le fond de carte tuilé
    fn add_tile_layer(&mut self, tiles: &TileSource) -> Result<(), BoundaryError>;

    /// Enregistre les outils de dessin et d'édition
    fn register_tools(&mut self, tools: &DrawTools) -> Result<(), BoundaryError>;

    /// Ajoute un polygone au groupe des formes dessinées
    fn add_polygon(&mut self, boundary: &Boundary, style: &DrawStyle) -> Result<(), BoundaryError>;

    /// Recadre la vue sur l'emprise du polygone
    fn fit_to_polygon(&mut self, boundary: &Boundary) -> Result<(), BoundaryError>;

    /// Vide le groupe des formes dessinées
    fn clear_all(&mut self);
}

/// Vue initiale de la carte
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl MapView {
    pub fn center(&self) -> Point {
        Point::new(self.center_lat, self.center_lng)
    }
}

impl Default for MapView {
    fn default() -> Self {
        // Londres
        Self {
            center_lat: 51.505,
            center_lng: -0.09,
            zoom: 13,
        }
    }
}

/// Source de tuiles "slippy map"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSource {
    /// Gabarit d'URL avec `{z}`, `{x}`, `{y}`
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl TileSource {
    /// URL d'une tuile
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            attribution: "© OpenStreetMap".to_string(),
        }
    }
}

/// Style de tracé, identique au dessin et à la restauration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStyle {
    pub color: String,
    pub weight: u8,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: "#d4351c".to_string(),
            weight: 3,
        }
    }
}

/// Outils enregistrés sur la surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTools {
    /// Outil polygone et son style ; `None` le désactive
    pub polygon: Option<DrawStyle>,
    pub polyline: bool,
    pub rectangle: bool,
    pub circle: bool,
    pub marker: bool,
    pub circle_marker: bool,
    /// Édition et suppression limitées au groupe des formes dessinées
    pub edit_drawn_layer: bool,
    pub remove: bool,
}

impl DrawTools {
    /// Uniquement l'outil polygone, avec édition et suppression
    pub fn polygon_only(style: DrawStyle) -> Self {
        Self {
            polygon: Some(style),
            polyline: false,
            rectangle: false,
            circle: false,
            marker: false,
            circle_marker: false,
            edit_drawn_layer: true,
            remove: true,
        }
    }

    /// Nombre d'outils de forme actifs
    pub fn enabled_shape_tools(&self) -> usize {
        [
            self.polygon.is_some(),
            self.polyline,
            self.rectangle,
            self.circle,
            self.marker,
            self.circle_marker,
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_only() {
        let tools = DrawTools::polygon_only(DrawStyle::default());
        assert_eq!(tools.enabled_shape_tools(), 1);
        assert!(tools.polygon.is_some());
        assert!(tools.edit_drawn_layer && tools.remove);
    }

    #[test]
    fn test_tile_url() {
        let tiles = TileSource::default();
        assert_eq!(
            tiles.tile_url(13, 4093, 2724),
            "https://tile.openstreetmap.org/13/4093/2724.png"
        );
    }
}
