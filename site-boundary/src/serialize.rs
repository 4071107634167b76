//! Format d'échange du contour (champ caché du formulaire)
//!
//! Tableau JSON de paires `{"lat": "51.505000", "lng": "-0.090000"}`,
//! chaque valeur formatée en virgule fixe à 6 décimales.

use serde::{Deserialize, Serialize};

use crate::types::{Boundary, Point};

/// Nombre de décimales des coordonnées affichées et stockées
pub const COORDINATE_PRECISION: usize = 6;

/// Sommet sérialisé (chaînes à 6 décimales)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedPoint {
    pub lat: String,
    pub lng: String,
}

impl From<&Point> for SerializedPoint {
    fn from(p: &Point) -> Self {
        Self {
            lat: format_coordinate(p.lat),
            lng: format_coordinate(p.lng),
        }
    }
}

/// Décimales de l'écriture quasi exacte utilisée pour arrondir
///
/// Un f64 d'au moins 5e-7 est soit une demi-unité exacte, soit à plus de
/// 1e-29 de celle-ci.
const EXACT_DIGITS: usize = 40;

const SCALE: u64 = 1_000_000;

/// Formate une coordonnée en virgule fixe
///
/// Arrondi décimal standard : une demi-unité exacte s'arrondit en
/// s'éloignant de zéro (`0.0078125` donne `0.007813`).
pub fn format_coordinate(value: f64) -> String {
    // -0.0 s'affiche "0.000000"
    let value = if value == 0.0 { 0.0 } else { value };
    if !value.is_finite() || value.abs() >= 1e12 {
        return format!("{:.*}", COORDINATE_PRECISION, value);
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{:.*}", COORDINATE_PRECISION, value);
    };
    let digits = frac.as_bytes();

    let whole: u64 = int_part.parse().unwrap_or(0);
    let kept: u64 = frac[..COORDINATE_PRECISION].parse().unwrap_or(0);
    let round_up = digits[COORDINATE_PRECISION] >= b'5';
    let scaled = whole * SCALE + kept + u64::from(round_up);

    format!(
        "{}{}.{:0width$}",
        if value < 0.0 { "-" } else { "" },
        scaled / SCALE,
        scaled % SCALE,
        width = COORDINATE_PRECISION
    )
}

/// Sommets sérialisés, dans l'ordre du contour
pub fn serialized_points(boundary: &Boundary) -> Vec<SerializedPoint> {
    boundary.points().iter().map(SerializedPoint::from).collect()
}

/// Valeur du champ caché pour ce contour
pub fn serialize_boundary(boundary: &Boundary) -> String {
    encode_points(&serialized_points(boundary))
}

/// Encode des sommets déjà formatés en JSON compact
pub fn encode_points(points: &[SerializedPoint]) -> String {
    // Vec de structs à champs String : la sérialisation ne peut pas échouer
    serde_json::to_string(points).unwrap_or_default()
}
