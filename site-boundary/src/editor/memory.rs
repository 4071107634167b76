//! Surface de dessin en mémoire
//!
//! Simule un widget de carte : vue, fond de carte, outils et groupe des
//! formes dessinées. Les gestes utilisateur (`draw`, `edit`, `delete`)
//! produisent les évènements que le widget réel émettrait.

use tracing::trace;

use super::surface::{DrawStyle, DrawTools, DrawingSurface, MapView, TileSource};
use super::SurfaceEvent;
use crate::types::{Boundary, Bounds};
use crate::BoundaryError;

/// Widget de carte en mémoire
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    view: Option<MapView>,
    tile_layers: Vec<TileSource>,
    tools: Option<DrawTools>,
    layers: Vec<(Boundary, DrawStyle)>,
    fitted: Option<Bounds>,
    reject_tiles: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface dont le fond de carte échoue à se charger
    pub fn with_tile_failure() -> Self {
        Self {
            reject_tiles: true,
            ..Self::default()
        }
    }

    /// L'utilisateur termine le tracé d'un polygone
    ///
    /// Comme un widget réel, la forme n'est pas encore dans le groupe :
    /// c'est l'éditeur qui l'y ajoute.
    pub fn draw(&self, boundary: Boundary) -> SurfaceEvent {
        SurfaceEvent::Created(boundary)
    }

    /// L'utilisateur remodèle la forme dessinée puis valide
    pub fn edit(&mut self, boundary: Boundary) -> SurfaceEvent {
        let mut edited = Vec::new();
        if let Some((shape, _)) = self.layers.first_mut() {
            *shape = boundary;
            edited.push(shape.clone());
        }
        SurfaceEvent::Edited(edited)
    }

    /// L'utilisateur supprime les formes dessinées
    pub fn delete(&mut self) -> SurfaceEvent {
        self.layers.clear();
        SurfaceEvent::Deleted
    }

    pub fn view(&self) -> Option<&MapView> {
        self.view.as_ref()
    }

    pub fn tile_layers(&self) -> &[TileSource] {
        &self.tile_layers
    }

    pub fn tools(&self) -> Option<&DrawTools> {
        self.tools.as_ref()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Boundary> {
        self.layers.iter().map(|(shape, _)| shape)
    }

    pub fn polygon_count(&self) -> usize {
        self.layers.len()
    }

    pub fn styles(&self) -> impl Iterator<Item = &DrawStyle> {
        self.layers.iter().map(|(_, style)| style)
    }

    /// Emprise du dernier recadrage
    pub fn fitted_bounds(&self) -> Option<Bounds> {
        self.fitted
    }
}

impl DrawingSurface for MemorySurface {
    fn set_view(&mut self, view: &MapView) -> Result<(), BoundaryError> {
        self.view = Some(*view);
        Ok(())
    }

    fn add_tile_layer(&mut self, tiles: &TileSource) -> Result<(), BoundaryError> {
        if self.reject_tiles {
            return Err(BoundaryError::Surface(format!(
                "tile source unavailable: {}",
                tiles.url_template
            )));
        }
        self.tile_layers.push(tiles.clone());
        Ok(())
    }

    fn register_tools(&mut self, tools: &DrawTools) -> Result<(), BoundaryError> {
        self.tools = Some(tools.clone());
        Ok(())
    }

    fn add_polygon(&mut self, boundary: &Boundary, style: &DrawStyle) -> Result<(), BoundaryError> {
        if self.tools.as_ref().map_or(true, |t| t.polygon.is_none()) {
            return Err(BoundaryError::Surface("polygon tool not registered".into()));
        }
        self.layers.push((boundary.clone(), style.clone()));
        trace!(layers = self.layers.len(), "Polygon added");
        Ok(())
    }

    fn fit_to_polygon(&mut self, boundary: &Boundary) -> Result<(), BoundaryError> {
        let bounds = boundary
            .bounds()
            .ok_or_else(|| BoundaryError::Surface("empty polygon bounds".into()))?;
        self.fitted = Some(bounds);
        Ok(())
    }

    fn clear_all(&mut self) {
        self.layers.clear();
    }
}
