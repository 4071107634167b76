//! Configuration du service

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};
use site_boundary::{EditorSettings, BOUNDARY_FIELD};
use tracing::debug;

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Nom affiché dans l'en-tête des pages
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Nom du champ caché qui porte le contour
    #[serde(default = "default_boundary_field")]
    pub boundary_field: String,

    /// Page de synthèse (devis) vers laquelle reviennent les liens "Change"
    #[serde(default = "default_summary_path")]
    pub summary_path: String,

    /// Contrôle serveur du contour soumis
    #[serde(default = "default_true")]
    pub validate_boundary_on_submit: bool,

    /// Carte et style de tracé
    #[serde(default)]
    pub map: EditorSettings,

    /// Tarification de la taxe
    #[serde(default)]
    pub levy: LevyConfig,
}

/// Tarification d'un plan de développement environnemental (EDP)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevyConfig {
    /// Montant par logement, en livres
    #[serde(default = "default_rate")]
    pub rate_per_house: u64,

    #[serde(default = "default_edp_code")]
    pub edp_code: String,

    #[serde(default = "default_edp_name")]
    pub edp_name: String,
}

fn default_service_name() -> String {
    "Nature Restoration Fund User Journey Prototypes".to_string()
}

fn default_boundary_field() -> String {
    BOUNDARY_FIELD.to_string()
}

fn default_summary_path() -> String {
    "/quote".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rate() -> u64 {
    2500
}

fn default_edp_code() -> String {
    "DLL".to_string()
}

fn default_edp_name() -> String {
    "District Level Licensing - Thames Valley".to_string()
}

impl Default for LevyConfig {
    fn default() -> Self {
        Self {
            rate_per_house: default_rate(),
            edp_code: default_edp_code(),
            edp_name: default_edp_name(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            boundary_field: default_boundary_field(),
            summary_path: default_summary_path(),
            validate_boundary_on_submit: default_true(),
            map: EditorSettings::default(),
            levy: LevyConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::load_embedded(include_str!("presets/default.json")),
            "prototype" => Self::load_embedded(include_str!("presets/prototype.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: default, prototype", preset),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Nom de preset ou chemin vers un fichier JSON
    pub fn resolve(spec: &str) -> Result<Self> {
        let path = Path::new(spec);
        if spec.ends_with(".json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(spec)
        }
    }

    /// Applique les surcharges d'environnement
    ///
    /// - `LEVY_RATE_PER_HOUSE` : montant par logement
    /// - `LEVY_TILE_URL` : gabarit d'URL des tuiles
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(rate) = std::env::var("LEVY_RATE_PER_HOUSE")
            .ok()
            .and_then(|r| r.trim().parse().ok())
        {
            debug!(rate, "Levy rate overridden from environment");
            self.levy.rate_per_house = rate;
        }
        if let Ok(url) = std::env::var("LEVY_TILE_URL") {
            if !url.trim().is_empty() {
                self.map.tiles.url_template = url;
            }
        }
        self
    }

    /// Configuration effective : `LEVY_CONFIG` ou preset/chemin donné, puis environnement
    pub fn from_env_or(spec: &str) -> Result<Self> {
        let spec = std::env::var("LEVY_CONFIG").unwrap_or_else(|_| spec.to_string());
        Ok(Self::resolve(&spec)?.with_env_overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_matches_defaults() {
        let preset = ServiceConfig::from_preset("default").unwrap();
        assert_eq!(preset, ServiceConfig::default());
    }

    #[test]
    fn test_prototype_preset_fills_defaults() {
        let preset = ServiceConfig::from_preset("prototype").unwrap();
        assert!(!preset.validate_boundary_on_submit);
        assert_eq!(preset.boundary_field, "NiAeAB");
        assert_eq!(preset.map.style.color, "#d4351c");
        assert_eq!(preset.levy.edp_code, "DLL");
    }

    #[test]
    fn test_unknown_preset() {
        assert!(ServiceConfig::from_preset("nope").is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"levy": {"rate_per_house": 3000}}"#).unwrap();
        assert_eq!(config.levy.rate_per_house, 3000);
        assert_eq!(config.levy.edp_name, "District Level Licensing - Thames Valley");
        assert_eq!(config.map.view.zoom, 13);
    }
}
