//! Lecture des données de restauration d'un contour
//!
//! Les données arrivent soit sous forme de chaîne (attribut
//! `data-existing-coordinates` du conteneur de carte), soit déjà parsées
//! (modèle de vue). Les valeurs lat/lng peuvent être des chaînes ou des nombres.

use serde_json::Value;

use crate::types::{Boundary, Point, MIN_POINTS};
use crate::BoundaryError;

/// Données de restauration fournies au chargement de la page
#[derive(Debug, Clone, PartialEq)]
pub enum RestorationData {
    /// JSON brut, tel que stocké dans le champ ou l'attribut
    Raw(String),
    /// JSON déjà parsé
    Parsed(Value),
}

impl RestorationData {
    /// Lit un attribut de conteneur ; une valeur vide équivaut à une absence
    pub fn from_attribute(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            None
        } else {
            Some(Self::Raw(value.to_string()))
        }
    }

    /// Reconstruit le contour décrit par ces données
    ///
    /// # Errors
    ///
    /// `MalformedRestorationData` si le JSON est invalide ou n'est pas un
    /// tableau de `{lat, lng}`, `TooFewPoints` sous 3 sommets,
    /// `InvalidCoordinate` pour une valeur non numérique ou hors plage.
    pub fn parse(&self) -> Result<Boundary, BoundaryError> {
        match self {
            Self::Raw(raw) => {
                let value: Value = serde_json::from_str(raw)?;
                boundary_from_value(&value)
            }
            Self::Parsed(value) => boundary_from_value(value),
        }
    }
}

impl From<Value> for RestorationData {
    fn from(value: Value) -> Self {
        // Un modèle de vue peut contenir la chaîne non parsée
        match value {
            Value::String(raw) => Self::Raw(raw),
            other => Self::Parsed(other),
        }
    }
}

fn boundary_from_value(value: &Value) -> Result<Boundary, BoundaryError> {
    let Some(entries) = value.as_array() else {
        return Err(BoundaryError::malformed("expected a JSON array of points"));
    };

    if entries.len() < MIN_POINTS {
        return Err(BoundaryError::TooFewPoints {
            count: entries.len(),
        });
    }

    let points = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| point_from_value(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Boundary::new(points)
}

fn point_from_value(index: usize, entry: &Value) -> Result<Point, BoundaryError> {
    let lat = coordinate(index, entry, "lat")?;
    let lng = coordinate(index, entry, "lng")?;
    let point = Point::new(lat, lng);

    if !point.in_range() {
        return Err(BoundaryError::invalid_coordinate(
            index,
            format!("({lat}, {lng}) is out of range"),
        ));
    }

    Ok(point)
}

fn coordinate(index: usize, entry: &Value, key: &str) -> Result<f64, BoundaryError> {
    let value = match entry.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
        None => {
            return Err(BoundaryError::invalid_coordinate(
                index,
                format!("missing `{key}`"),
            ))
        }
    };

    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(BoundaryError::invalid_coordinate(
            index,
            format!("`{key}` is not a number"),
        )),
    }
}
