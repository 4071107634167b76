//! Page "Draw your development boundary"
//!
//! Au rendu, le contour déjà soumis est relu depuis le contexte et passé
//! au gabarit sous `existingCoordinates` pour restauration côté carte.
//! À la soumission, la valeur brute du champ caché est transmise telle quelle.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use site_boundary::{validate::validate, BoundaryError, RestorationData};

use super::{FieldError, FieldSpec, FormContext, PageController, QuestionPage, SubmitOutcome, ViewModel};
use crate::config::ServiceConfig;
use crate::fingerprint::boundary_fingerprint;

/// Clé du modèle de vue lue par l'initialiseur de carte
pub const EXISTING_COORDINATES_KEY: &str = "existingCoordinates";

const BOUNDARY_ERROR: &str = "Draw your development boundary";

/// Contrôleur de la page de tracé du contour
#[derive(Debug, Clone)]
pub struct BoundaryPageController {
    page: QuestionPage,
    field: String,
    validate_on_submit: bool,
    map: Value,
}

impl BoundaryPageController {
    pub fn new(config: &ServiceConfig) -> Self {
        let title = "Draw your development boundary";
        Self {
            page: QuestionPage {
                path: "/draw-your-development-boundary".into(),
                title: title.into(),
                view_name: "map-drawing".into(),
                fields: vec![FieldSpec::required(config.boundary_field.clone(), title)
                    .with_short_description("Map drawing")],
                summary_path: config.summary_path.clone(),
            },
            field: config.boundary_field.clone(),
            validate_on_submit: config.validate_boundary_on_submit,
            map: serde_json::to_value(&config.map).unwrap_or(Value::Null),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Contour déjà soumis, parsé si c'est une chaîne JSON
    ///
    /// Une valeur illisible est journalisée et ignorée : la carte démarre vide.
    pub fn existing_coordinates(&self, ctx: &FormContext) -> Option<Value> {
        let existing = ctx.payload.get(&self.field)?;

        match existing {
            Value::Null => None,
            Value::String(raw) if raw.trim().is_empty() => None,
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!(field = %self.field, error = %e, "Failed to parse existing coordinates");
                    None
                }
            },
            other => Some(other.clone()),
        }
    }

    /// Contrôle serveur d'une valeur soumise
    fn check(&self, raw: &Value) -> Result<(), BoundaryError> {
        let boundary = RestorationData::from(raw.clone()).parse()?;
        validate(&boundary)
    }

    fn log_change(&self, ctx: &FormContext, submitted: &Value) {
        let fingerprint = |v: &Value| {
            RestorationData::from(v.clone())
                .parse()
                .ok()
                .map(|b| boundary_fingerprint(&b))
        };
        let previous = ctx.state.get(&self.field).and_then(fingerprint);
        let current = fingerprint(submitted);

        match (previous, current) {
            (Some(prev), Some(cur)) if prev == cur => debug!("Boundary unchanged"),
            (Some(_), Some(cur)) => info!(fingerprint = %cur, "Boundary changed"),
            (None, Some(cur)) => info!(fingerprint = %cur, "Boundary provided"),
            _ => {}
        }
    }
}

impl PageController for BoundaryPageController {
    fn page(&self) -> &QuestionPage {
        &self.page
    }

    fn view_model(&self, ctx: &FormContext) -> ViewModel {
        let mut vm = self.page.view_model(ctx);
        vm.insert("boundaryField".into(), self.field.clone().into());
        vm.insert("map".into(), self.map.clone());

        if let Some(coordinates) = self.existing_coordinates(ctx) {
            vm.insert(EXISTING_COORDINATES_KEY.into(), coordinates);
        }
        vm
    }

    fn submit(&self, ctx: &FormContext, payload: Map<String, Value>) -> SubmitOutcome {
        // Pas de contour tracé : même message que pour un contour refusé
        if payload.get(&self.field).map_or(true, is_empty) {
            debug!(field = %self.field, "No boundary drawn");
            return SubmitOutcome::Invalid {
                errors: vec![FieldError::new(&self.field, BOUNDARY_ERROR)],
            };
        }

        if self.validate_on_submit {
            if let Some(raw) = payload.get(&self.field).filter(|v| !is_empty(v)) {
                if let Err(e) = self.check(raw) {
                    warn!(field = %self.field, error = %e, "Submitted boundary rejected");
                    return SubmitOutcome::Invalid {
                        errors: vec![FieldError::new(&self.field, BOUNDARY_ERROR)],
                    };
                }
            }
        }

        if let Some(raw) = payload.get(&self.field) {
            self.log_change(ctx, raw);
        }

        // Valeur transmise sans transformation
        self.page.submit(payload)
    }
}

fn is_empty(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str().is_some_and(|s| s.trim().is_empty())
}

/// Valeur de l'attribut `data-existing-coordinates` du conteneur de carte
pub fn container_attribute(view_model: &ViewModel) -> Option<String> {
    match view_model.get(EXISTING_COORDINATES_KEY)? {
        Value::String(raw) => Some(raw.clone()),
        other => Some(other.to_string()),
    }
}

/// Charge utile de soumission pour ce seul champ
pub fn boundary_payload(field: &str, value: impl Into<Value>) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(field.to_string(), value.into());
    payload
}

/// Contexte de retour sur la page avec une valeur déjà soumise
pub fn revisit_context(field: &str, value: &str) -> FormContext {
    FormContext {
        payload: boundary_payload(field, value),
        state: boundary_payload(field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TRIANGLE: &str = r#"[{"lat":"51.000000","lng":"-0.100000"},{"lat":"51.100000","lng":"-0.100000"},{"lat":"51.050000","lng":"-0.050000"}]"#;

    fn controller(validate: bool) -> BoundaryPageController {
        let config = ServiceConfig {
            validate_boundary_on_submit: validate,
            ..ServiceConfig::default()
        };
        BoundaryPageController::new(&config)
    }

    #[test]
    fn test_first_visit_has_no_coordinates() {
        let vm = controller(true).view_model(&FormContext::default());
        assert!(!vm.contains_key(EXISTING_COORDINATES_KEY));
        assert_eq!(vm["viewName"], "map-drawing");
        assert_eq!(vm["boundaryField"], "NiAeAB");
        assert_eq!(vm["map"]["view"]["zoom"], 13);
        assert_eq!(container_attribute(&vm), None);
    }

    #[test]
    fn test_revisit_injects_parsed_coordinates() {
        let ctx = revisit_context("NiAeAB", TRIANGLE);
        let vm = controller(true).view_model(&ctx);

        let coordinates = vm[EXISTING_COORDINATES_KEY].as_array().unwrap();
        assert_eq!(coordinates.len(), 3);
        assert_eq!(coordinates[0]["lat"], "51.000000");
        assert_eq!(container_attribute(&vm).unwrap(), TRIANGLE);
    }

    #[test]
    fn test_unparseable_value_is_omitted() {
        let ctx = revisit_context("NiAeAB", "not json");
        let vm = controller(true).view_model(&ctx);
        assert!(!vm.contains_key(EXISTING_COORDINATES_KEY));
    }

    #[test]
    fn test_pre_parsed_value_is_kept() {
        let ctx = FormContext {
            payload: boundary_payload("NiAeAB", json!([{"lat": "1", "lng": "2"}])),
            state: Map::new(),
        };
        let vm = controller(true).view_model(&ctx);
        assert_eq!(vm[EXISTING_COORDINATES_KEY][0]["lng"], "2");
    }

    #[test]
    fn test_submit_forwards_raw_value() {
        let payload = boundary_payload("NiAeAB", TRIANGLE);
        let outcome = controller(true).submit(&FormContext::default(), payload.clone());
        assert_eq!(outcome, SubmitOutcome::Continue { payload });
    }

    #[test]
    fn test_submit_rejects_invalid_boundary() {
        let bow_tie = r#"[{"lat":"0","lng":"0"},{"lat":"1","lng":"1"},{"lat":"0","lng":"1"},{"lat":"1","lng":"0"}]"#;
        let outcome = controller(true).submit(
            &FormContext::default(),
            boundary_payload("NiAeAB", bow_tie),
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid {
                errors: vec![FieldError::new("NiAeAB", "Draw your development boundary")]
            }
        );
    }

    #[test]
    fn test_submit_without_validation_forwards_anything() {
        let payload = boundary_payload("NiAeAB", "not json");
        let outcome = controller(false).submit(&FormContext::default(), payload.clone());
        assert_eq!(outcome, SubmitOutcome::Continue { payload });
    }

    #[test]
    fn test_submit_empty_asks_to_draw() {
        let expected = SubmitOutcome::Invalid {
            errors: vec![FieldError::new("NiAeAB", "Draw your development boundary")],
        };
        for validate in [true, false] {
            let outcome =
                controller(validate).submit(&FormContext::default(), boundary_payload("NiAeAB", ""));
            assert_eq!(outcome, expected);
        }
        assert_eq!(
            controller(false).submit(&FormContext::default(), Map::new()),
            expected
        );
    }
}
