//! Éditeur de contour : carte, outil polygone unique, restauration
//!
//! Un seul polygone peut exister à la fois : tracer un nouveau contour
//! remplace le précédent. Chaque création, édition ou suppression est
//! répercutée sur le formulaire via le [`CoordinateSynchronizer`].

pub mod memory;
pub mod surface;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::restore::RestorationData;
use crate::sync::{CoordinateSynchronizer, FormField, RowDisplay};
use crate::types::Boundary;
use crate::BoundaryError;

pub use memory::MemorySurface;
pub use surface::{DrawStyle, DrawTools, DrawingSurface, MapView, TileSource};

/// Évènements émis par la surface de dessin
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Un nouveau polygone vient d'être tracé
    Created(Boundary),
    /// Formes remodelées et validées (une seule en pratique)
    Edited(Vec<Boundary>),
    /// Formes supprimées
    Deleted,
}

/// Paramètres de la carte et du tracé
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub view: MapView,
    #[serde(default)]
    pub tiles: TileSource,
    #[serde(default)]
    pub style: DrawStyle,
}

/// Résultat de l'initialisation
#[derive(Debug)]
pub enum InitOutcome {
    /// Pas de conteneur de carte sur la page : rien à faire
    Absent,
    /// Carte vide, aucune donnée à restaurer
    Empty,
    /// Contour restauré depuis l'état précédent
    Restored { points: usize },
    /// Données de restauration ignorées, carte vide
    RestorationSkipped(BoundaryError),
}

/// Éditeur de contour, une instance par chargement de page
pub struct BoundaryEditor<S, F, D> {
    settings: EditorSettings,
    surface: Option<S>,
    synchronizer: CoordinateSynchronizer<F, D>,
    current: Option<Boundary>,
}

impl<S, F, D> BoundaryEditor<S, F, D>
where
    S: DrawingSurface,
    F: FormField,
    D: RowDisplay,
{
    pub fn new(settings: EditorSettings, synchronizer: CoordinateSynchronizer<F, D>) -> Self {
        Self {
            settings,
            surface: None,
            synchronizer,
            current: None,
        }
    }

    /// Initialise la carte dans son conteneur et restaure l'éventuel contour
    ///
    /// Sans conteneur, la fonctionnalité est absente de la page. Les échecs
    /// du widget sont journalisés et n'interrompent pas le chargement.
    pub fn init(
        &mut self,
        container: Option<S>,
        restoration: Option<&RestorationData>,
    ) -> InitOutcome {
        let Some(mut surface) = container else {
            return InitOutcome::Absent;
        };

        info!("Initializing map drawing");

        if let Err(e) = surface.set_view(&self.settings.view) {
            warn!(error = %e, "Failed to set initial map view");
        }
        if let Err(e) = surface.add_tile_layer(&self.settings.tiles) {
            warn!(error = %e, "Failed to load base map tiles");
        }
        let tools = DrawTools::polygon_only(self.settings.style.clone());
        if let Err(e) = surface.register_tools(&tools) {
            warn!(error = %e, "Failed to register drawing tools");
        }

        self.surface = Some(surface);

        let Some(data) = restoration else {
            info!("Map initialized with drawing controls");
            return InitOutcome::Empty;
        };

        match self.restore(data) {
            Ok(points) => {
                info!(points, "Restored existing polygon");
                InitOutcome::Restored { points }
            }
            Err(e) => {
                warn!(error = %e, "Failed to restore existing polygon");
                InitOutcome::RestorationSkipped(e)
            }
        }
    }

    fn restore(&mut self, data: &RestorationData) -> Result<usize, BoundaryError> {
        let boundary = data.parse()?;
        let Some(surface) = self.surface.as_mut() else {
            return Err(BoundaryError::Surface("map not initialized".into()));
        };

        surface.add_polygon(&boundary, &self.settings.style)?;
        if let Err(e) = surface.fit_to_polygon(&boundary) {
            warn!(error = %e, "Failed to fit map to restored polygon");
        }

        self.synchronizer.sync(&boundary);
        let points = boundary.vertex_count();
        self.current = Some(boundary);
        Ok(points)
    }

    /// Aiguille un évènement de la surface
    pub fn handle(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Created(boundary) => self.on_created(boundary),
            SurfaceEvent::Edited(shapes) => self.on_edited(shapes),
            SurfaceEvent::Deleted => self.on_deleted(),
        }
    }

    /// Nouveau tracé : remplace toute forme existante
    pub fn on_created(&mut self, boundary: Boundary) {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Map not initialized, ignoring created event");
            return;
        };

        surface.clear_all();
        if let Err(e) = surface.add_polygon(&boundary, &self.settings.style) {
            warn!(error = %e, "Failed to add drawn polygon to layer group");
        }

        self.synchronizer.sync(&boundary);
        self.current = Some(boundary);
    }

    /// Formes remodelées : resynchronise chacune
    pub fn on_edited(&mut self, shapes: Vec<Boundary>) {
        if self.surface.is_none() {
            debug!("Map not initialized, ignoring edited event");
            return;
        }
        if shapes.len() > 1 {
            warn!(count = shapes.len(), "More than one edited shape");
        }

        for boundary in shapes {
            self.synchronizer.sync(&boundary);
            self.current = Some(boundary);
        }
    }

    /// Formes supprimées : vide le champ et les lignes
    pub fn on_deleted(&mut self) {
        if self.surface.is_none() {
            debug!("Map not initialized, ignoring deleted event");
            return;
        }
        self.synchronizer.clear();
        self.current = None;
    }

    /// Contour actif, s'il y en a un
    pub fn current(&self) -> Option<&Boundary> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Accès à la surface, pour y rejouer des gestes utilisateur
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn synchronizer(&self) -> &CoordinateSynchronizer<F, D> {
        &self.synchronizer
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }
}
