//! Définition et implémentation des commandes CLI
//!
//! Le moteur de formulaires étant externe, la CLI joue son rôle :
//! - `render` : modèle de vue de la page de tracé
//! - `submit` : soumission de la page, puis enregistrement de la demande
//! - `draw` : gestes rejoués sur une carte en mémoire
//! - `quote` : devis pour un nombre de logements
//! - `export` : contour soumis vers GeoJSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use levy_service::forms::boundary::{boundary_payload, revisit_context};
use levy_service::forms::location::{validate_details, DetailsForm};
use levy_service::forms::quote::HOUSES_FIELD;
use levy_service::{
    ApplicationStore, BoundaryPageController, FormContext, PageController, QuotePageController,
    ServiceConfig, SubmitOutcome,
};
use site_boundary::export::to_geojson_string;
use site_boundary::{
    Boundary, BoundaryEditor, CoordinateSynchronizer, HiddenField, InitOutcome, MemorySurface,
    Point, RestorationData, RowList,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Render the boundary page view model (JSON)
    Render {
        /// Previously submitted boundary value (revisit / "Change" link)
        #[arg(long)]
        value: Option<String>,
    },

    /// Submit the boundary page and record the application
    Submit {
        /// Raw hidden-field value, forwarded unchanged
        #[arg(long)]
        value: String,

        /// Development details as JSON (developmentName, housesCount, ...)
        #[arg(long)]
        details: Option<String>,
    },

    /// Replay drawing gestures on an in-memory map
    Draw {
        /// JSON script: [{"draw": [[lat, lng], ...]}, {"edit": [...]}, "delete"]
        #[arg(short, long)]
        script: PathBuf,

        /// Value to restore before replaying
        #[arg(long)]
        value: Option<String>,
    },

    /// Compute the levy quote
    Quote {
        /// Number of houses
        #[arg(long)]
        houses: u64,
    },

    /// Export a submitted boundary to GeoJSON
    Export {
        /// Raw hidden-field value
        #[arg(long)]
        value: String,

        /// Output file (.geojson)
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Geste utilisateur d'un script `draw`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Gesture {
    Draw(Vec<[f64; 2]>),
    Edit(Vec<[f64; 2]>),
    Delete,
}

fn boundary_from_pairs(pairs: &[[f64; 2]]) -> Result<Boundary> {
    let points = pairs.iter().map(|[lat, lng]| Point::new(*lat, *lng)).collect();
    Boundary::new(points).context("Invalid gesture polygon")
}

/// Exécute la commande render
pub fn cmd_render(config: &ServiceConfig, value: Option<&str>) -> Result<()> {
    let controller = BoundaryPageController::new(config);
    let ctx = match value {
        Some(v) => revisit_context(controller.field(), v),
        None => FormContext::default(),
    };

    let vm = controller.view_model(&ctx);
    println!("{}", serde_json::to_string_pretty(&vm)?);
    Ok(())
}

/// Exécute la commande submit
pub fn cmd_submit(config: &ServiceConfig, value: &str, details: Option<&str>) -> Result<()> {
    let details = details
        .map(|raw| -> Result<DetailsForm> {
            let payload: Map<String, Value> =
                serde_json::from_str(raw).context("Failed to parse details JSON")?;
            Ok(DetailsForm::from_payload(&payload)?)
        })
        .transpose()?
        .map(|form| validate_details(&form))
        .transpose()
        .map_err(|errors| {
            for e in &errors {
                warn!(href = %e.href, "{}", e.text);
            }
            anyhow::anyhow!("{} invalid development detail(s)", errors.len())
        })?;

    let controller = BoundaryPageController::new(config);
    let payload = boundary_payload(controller.field(), value);

    let mut state = Map::new();
    if let Some(d) = &details {
        state.insert(HOUSES_FIELD.into(), d.houses_count.into());
    }
    let ctx = FormContext {
        payload: Map::new(),
        state,
    };

    match controller.submit(&ctx, payload) {
        SubmitOutcome::Invalid { errors } => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            anyhow::bail!("Submission rejected");
        }
        SubmitOutcome::Continue { payload } => {
            let forwarded = payload.get(controller.field()).and_then(Value::as_str);
            let mut store = ApplicationStore::new(config.levy.rate_per_house);
            let application = store.submit(details.as_ref(), forwarded);
            info!(id = %application.id, "Submission accepted");
            println!("{}", serde_json::to_string_pretty(application)?);
        }
    }
    Ok(())
}

/// Exécute la commande draw
pub fn cmd_draw(config: &ServiceConfig, script: &Path, value: Option<&str>) -> Result<()> {
    let content = std::fs::read_to_string(script)
        .context(format!("Failed to read gesture script: {}", script.display()))?;
    let gestures: Vec<Gesture> =
        serde_json::from_str(&content).context("Failed to parse gesture script")?;

    let sync = CoordinateSynchronizer::new(
        Some(HiddenField::new(config.boundary_field.clone())),
        Some(RowList::default()),
    );
    let mut editor = BoundaryEditor::new(config.map.clone(), sync);

    let restoration = value.and_then(RestorationData::from_attribute);
    match editor.init(Some(MemorySurface::new()), restoration.as_ref()) {
        InitOutcome::Restored { points } => info!(points, "Starting from restored boundary"),
        InitOutcome::RestorationSkipped(e) => warn!(error = %e, "Starting from an empty map"),
        _ => {}
    }

    for gesture in gestures {
        let Some(surface) = editor.surface_mut() else {
            anyhow::bail!("Map not initialized");
        };
        let event = match gesture {
            Gesture::Draw(pairs) => surface.draw(boundary_from_pairs(&pairs)?),
            Gesture::Edit(pairs) => surface.edit(boundary_from_pairs(&pairs)?),
            Gesture::Delete => surface.delete(),
        };
        editor.handle(event);
    }

    let field = editor.synchronizer().field().map(HiddenField::value).unwrap_or_default();
    let rows = editor.synchronizer().display().map(RowList::inner_html).unwrap_or_default();
    let polygons = editor.surface().map_or(0, MemorySurface::polygon_count);

    println!("=== {} ===", config.boundary_field);
    println!("{}", field);
    println!("\n=== Coordinates ===");
    println!("{}", rows);
    println!("\nPolygons on map: {}", polygons);
    Ok(())
}

/// Exécute la commande quote
pub fn cmd_quote(config: &ServiceConfig, houses: u64) -> Result<()> {
    let controller = QuotePageController::new(config, vec![]);
    let mut state = Map::new();
    state.insert(HOUSES_FIELD.into(), houses.into());
    let ctx = FormContext {
        payload: Map::new(),
        state,
    };

    let vm = controller.view_model(&ctx);
    println!("{}", serde_json::to_string_pretty(&vm["quote"])?);
    Ok(())
}

/// Exécute la commande export
pub fn cmd_export(value: &str, output: &Path) -> Result<()> {
    let boundary = RestorationData::Raw(value.to_string())
        .parse()
        .context("Failed to read boundary value")?;

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(output, to_geojson_string(&boundary))
        .context(format!("Failed to write {}", output.display()))?;

    info!(points = boundary.vertex_count(), output = %output.display(), "Boundary exported");
    println!(
        "Export complete: {} points to {}",
        boundary.vertex_count(),
        output.display()
    );
    Ok(())
}
