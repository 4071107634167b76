//! Saisie de la localisation du site et des détails du projet

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::FieldError;
use crate::error::ServiceError;
use site_boundary::Point;

/// Méthode choisie pour localiser le site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMethod {
    Upload,
    Postcode,
    Coordinates,
    Draw,
}

impl LocationMethod {
    /// Page de saisie correspondante
    pub fn path(self) -> &'static str {
        match self {
            LocationMethod::Upload => "/upload-your-development-boundary-file",
            LocationMethod::Postcode => "/enter-your-development-site-postcode",
            LocationMethod::Coordinates => "/enter-your-development-site-coordinates",
            LocationMethod::Draw => "/draw-your-development-boundary",
        }
    }
}

impl FromStr for LocationMethod {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "upload" => Ok(LocationMethod::Upload),
            "postcode" => Ok(LocationMethod::Postcode),
            "coordinates" => Ok(LocationMethod::Coordinates),
            "draw" => Ok(LocationMethod::Draw),
            "" => Err(FieldError::new(
                "locationMethod",
                "Select how you want to provide your development site location",
            )),
            _ => Err(FieldError::new("locationMethod", "Select a valid location method")),
        }
    }
}

fn postcode_regex() -> &'static Regex {
    static POSTCODE: OnceLock<Regex> = OnceLock::new();
    POSTCODE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{1,2}[0-9][A-Za-z0-9]? ?[0-9][A-Za-z]{2}|[Gg][Ii][Rr] ?0[Aa]{2})$")
            .expect("valid postcode regex")
    })
}

/// Code postal britannique, normalisé en majuscules
pub fn validate_postcode(input: &str) -> Result<String, FieldError> {
    let postcode = input.trim();
    if postcode.is_empty() {
        return Err(FieldError::new("postcode", "Enter a postcode"));
    }
    if !postcode_regex().is_match(postcode) {
        return Err(FieldError::new("postcode", "Enter a valid UK postcode"));
    }
    Ok(postcode.to_uppercase())
}

/// Latitude et longitude saisies séparément
pub fn validate_coordinates(latitude: &str, longitude: &str) -> Result<Point, Vec<FieldError>> {
    let mut errors = Vec::new();

    let lat = parse_in_range(latitude, -90.0, 90.0);
    match lat {
        Err(Missing) => errors.push(FieldError::new("latitude", "Enter a latitude")),
        Err(OutOfRange) => errors.push(FieldError::new(
            "latitude",
            "Enter a valid latitude between -90 and 90",
        )),
        Ok(_) => {}
    }

    let lng = parse_in_range(longitude, -180.0, 180.0);
    match lng {
        Err(Missing) => errors.push(FieldError::new("longitude", "Enter a longitude")),
        Err(OutOfRange) => errors.push(FieldError::new(
            "longitude",
            "Enter a valid longitude between -180 and 180",
        )),
        Ok(_) => {}
    }

    match (lat, lng) {
        (Ok(lat), Ok(lng)) => Ok(Point::new(lat, lng)),
        _ => Err(errors),
    }
}

#[derive(Debug, Clone, Copy)]
enum NumberProblem {
    Missing,
    OutOfRange,
}

use NumberProblem::{Missing, OutOfRange};

fn parse_in_range(input: &str, min: f64, max: f64) -> Result<f64, NumberProblem> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Missing);
    }
    match input.parse::<f64>() {
        Ok(v) if v.is_finite() && (min..=max).contains(&v) => Ok(v),
        _ => Err(OutOfRange),
    }
}

/// Type de projet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevelopmentType {
    Residential,
    Commercial,
    Mixed,
}

/// Formulaire brut des détails du projet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsForm {
    #[serde(default)]
    pub development_name: String,
    #[serde(default)]
    pub houses_count: String,
    #[serde(default)]
    pub development_type: String,
    #[serde(default)]
    pub wastewater_site: String,
}

impl DetailsForm {
    /// Lecture depuis la charge utile du moteur de formulaires
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ServiceError> {
        let text = |key: &str| match payload.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(ServiceError::InvalidPayload(format!(
                "{key}: expected text, got {other}"
            ))),
        };

        Ok(Self {
            development_name: text("developmentName")?,
            houses_count: text("housesCount")?,
            development_type: text("developmentType")?,
            wastewater_site: text("wastewaterSite")?,
        })
    }
}

/// Détails du projet validés
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentDetails {
    pub development_name: String,
    pub houses_count: u32,
    pub development_type: DevelopmentType,
    pub wastewater_site: String,
}

/// Nombre maximal de logements accepté
pub const MAX_HOUSES: u32 = 10_000;

/// Contrôle des détails du projet, toutes les erreurs à la fois
pub fn validate_details(form: &DetailsForm) -> Result<DevelopmentDetails, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = form.development_name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("developmentName", "Enter a development name"));
    } else if name.chars().count() > 200 {
        errors.push(FieldError::new(
            "developmentName",
            "Development name must be less than 200 characters",
        ));
    }

    let houses = form.houses_count.trim();
    let houses_count = if houses.is_empty() {
        errors.push(FieldError::new("housesCount", "Enter the number of houses"));
        None
    } else {
        match houses.parse::<i64>() {
            Ok(n) if n < 1 => {
                errors.push(FieldError::new("housesCount", "Enter a valid number of houses"));
                None
            }
            Ok(n) if n > i64::from(MAX_HOUSES) => {
                errors.push(FieldError::new(
                    "housesCount",
                    "Number of houses must be less than 10,000",
                ));
                None
            }
            Ok(n) => u32::try_from(n).ok(),
            Err(_) => {
                errors.push(FieldError::new("housesCount", "Enter a valid number of houses"));
                None
            }
        }
    };

    let development_type = match form.development_type.trim() {
        "residential" => Some(DevelopmentType::Residential),
        "commercial" => Some(DevelopmentType::Commercial),
        "mixed" => Some(DevelopmentType::Mixed),
        "" => {
            errors.push(FieldError::new("developmentType", "Select a development type"));
            None
        }
        _ => {
            errors.push(FieldError::new("developmentType", "Select a valid development type"));
            None
        }
    };

    let wastewater = form.wastewater_site.trim();
    if wastewater.is_empty() {
        errors.push(FieldError::new(
            "wastewaterSite",
            "Select a wastewater treatment site",
        ));
    }

    match (houses_count, development_type) {
        (Some(houses_count), Some(development_type)) if errors.is_empty() => Ok(DevelopmentDetails {
            development_name: name.to_string(),
            houses_count,
            development_type,
            wastewater_site: wastewater.to_string(),
        }),
        _ => Err(errors),
    }
}
