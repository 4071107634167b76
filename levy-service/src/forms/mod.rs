//! Pont vers le moteur de formulaires
//!
//! Le moteur (routage, persistance de session, enchaînement des pages) est
//! externe. Ce module en reprend le contrat minimal : un contexte de
//! soumission, un modèle de vue JSON et des contrôleurs de page qui
//! surchargent le modèle de vue et le traitement de la soumission.

pub mod boundary;
pub mod location;
pub mod quote;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

pub use boundary::{container_attribute, BoundaryPageController, EXISTING_COORDINATES_KEY};
pub use quote::{calculate_levy, format_gbp, QuotePageController};

/// Modèle de vue passé au gabarit
pub type ViewModel = Map<String, Value>;

/// Contexte de la soumission en cours
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Valeurs déjà soumises pour la page (retour arrière, lien "Change")
    pub payload: Map<String, Value>,
    /// État de session du parcours
    pub state: Map<String, Value>,
}

impl FormContext {
    /// Valeur d'un champ : charge utile d'abord, puis état de session
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.payload
            .get(field)
            .or_else(|| self.state.get(field))
            .filter(|v| !is_blank(v))
    }
}

/// Erreur de champ au format GOV.UK (`errorList`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub text: String,
    pub href: String,
}

impl FieldError {
    pub fn new(field: &str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: format!("#{field}"),
        }
    }
}

/// Issue d'une soumission de page
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Valeurs transmises au moteur, page suivante
    Continue { payload: Map<String, Value> },
    /// Page réaffichée avec les erreurs
    Invalid { errors: Vec<FieldError> },
}

/// Champ déclaré d'une page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    /// Libellé court des messages d'erreur ("Enter ..."), à défaut le titre
    pub short_description: Option<String>,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            short_description: None,
            required: true,
        }
    }

    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }

    /// Message d'un champ requis laissé vide
    pub fn required_message(&self) -> String {
        let label = self.short_description.as_deref().unwrap_or(&self.title);
        format!("Enter {}", lowercase_first(label))
    }
}

/// Page de question de base (comportement standard du moteur)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub path: String,
    pub title: String,
    pub view_name: String,
    pub fields: Vec<FieldSpec>,
    pub summary_path: String,
}

impl QuestionPage {
    /// Modèle de vue standard : titre, chemin et valeurs courantes des champs
    pub fn view_model(&self, ctx: &FormContext) -> ViewModel {
        let mut vm = ViewModel::new();
        vm.insert("pageTitle".into(), self.title.clone().into());
        vm.insert("path".into(), self.path.clone().into());
        vm.insert("viewName".into(), self.view_name.clone().into());
        vm.insert("summaryPath".into(), self.summary_path.clone().into());

        let values: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|f| ctx.value(&f.name).map(|v| (f.name.clone(), v.clone())))
            .collect();
        vm.insert("values".into(), Value::Object(values));
        vm
    }

    /// Soumission standard : champs requis, puis transmission telle quelle
    pub fn submit(&self, payload: Map<String, Value>) -> SubmitOutcome {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter(|f| f.required && payload.get(&f.name).map_or(true, is_blank))
            .map(|f| FieldError::new(&f.name, f.required_message()))
            .collect();

        if !errors.is_empty() {
            debug!(path = %self.path, errors = errors.len(), "Submission rejected");
            return SubmitOutcome::Invalid { errors };
        }

        SubmitOutcome::Continue { payload }
    }
}

/// Contrôleur de page : surcharge du modèle de vue et de la soumission
pub trait PageController {
    fn page(&self) -> &QuestionPage;

    fn view_model(&self, ctx: &FormContext) -> ViewModel {
        self.page().view_model(ctx)
    }

    fn submit(&self, _ctx: &FormContext, payload: Map<String, Value>) -> SubmitOutcome {
        self.page().submit(payload)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> QuestionPage {
        QuestionPage {
            path: "/development-name".into(),
            title: "Development name".into(),
            view_name: "question".into(),
            fields: vec![FieldSpec::required("developmentName", "Development name")],
            summary_path: "/quote".into(),
        }
    }

    #[test]
    fn test_required_field() {
        let outcome = page().submit(Map::new());
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid {
                errors: vec![FieldError::new("developmentName", "Enter development name")]
            }
        );
    }

    #[test]
    fn test_required_message_uses_short_description() {
        let mut page = page();
        page.fields = vec![FieldSpec::required("houses", "How many houses are you building?")
            .with_short_description("Number of houses")];

        assert_eq!(
            page.submit(Map::new()),
            SubmitOutcome::Invalid {
                errors: vec![FieldError::new("houses", "Enter number of houses")]
            }
        );
    }

    #[test]
    fn test_submit_forwards_payload() {
        let payload = json!({"developmentName": "Riverside"}).as_object().unwrap().clone();
        assert_eq!(
            page().submit(payload.clone()),
            SubmitOutcome::Continue { payload }
        );
    }

    #[test]
    fn test_view_model_values() {
        let ctx = FormContext {
            payload: Map::new(),
            state: json!({"developmentName": "Riverside"}).as_object().unwrap().clone(),
        };
        let vm = page().view_model(&ctx);
        assert_eq!(vm["pageTitle"], "Development name");
        assert_eq!(vm["values"]["developmentName"], "Riverside");
    }
}
