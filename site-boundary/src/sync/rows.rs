//! Lignes d'affichage des coordonnées (lecture seule)

use serde::Serialize;

use crate::serialize::SerializedPoint;

/// Axe d'une coordonnée affichée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn id_prefix(self) -> &'static str {
        match self {
            Axis::Latitude => "lat",
            Axis::Longitude => "lng",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Axis::Latitude => "Latitude",
            Axis::Longitude => "Longitude",
        }
    }
}

/// Un champ affiché, en lecture seule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateInput {
    /// Identifiant HTML (`lat-0`, `lng-0`, ...)
    pub id: String,
    /// Libellé (`Point 1 - Latitude`)
    pub label: String,
    pub value: String,
    pub axis: Axis,
}

impl CoordinateInput {
    fn new(index: usize, axis: Axis, value: &str) -> Self {
        Self {
            id: format!("{}-{}", axis.id_prefix(), index),
            label: format!("Point {} - {}", index + 1, axis.label()),
            value: value.to_string(),
            axis,
        }
    }
}

/// Deux champs (latitude puis longitude) par sommet, numérotés à partir de 1
pub fn coordinate_inputs(points: &[SerializedPoint]) -> Vec<CoordinateInput> {
    points
        .iter()
        .enumerate()
        .flat_map(|(index, p)| {
            [
                CoordinateInput::new(index, Axis::Latitude, &p.lat),
                CoordinateInput::new(index, Axis::Longitude, &p.lng),
            ]
        })
        .collect()
}

/// Balisage GOV.UK des lignes (une ligne par sommet)
pub fn render_rows_html(inputs: &[CoordinateInput]) -> String {
    let mut html = String::new();
    for pair in inputs.chunks(2) {
        html.push_str(r#"<div class="govuk-form-group coordinate-row">"#);
        for input in pair {
            html.push_str(&format!(
                concat!(
                    r#"<div class="coordinate-cell">"#,
                    r#"<label class="govuk-label" for="{id}">{label}</label>"#,
                    r#"<input class="govuk-input" id="{id}" type="text" value="{value}" readonly>"#,
                    "</div>"
                ),
                id = input.id,
                label = input.label,
                value = escape_attribute(&input.value),
            ));
        }
        html.push_str("</div>");
    }
    html
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
