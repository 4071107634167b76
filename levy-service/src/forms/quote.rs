//! Page de devis : taxe calculée et récapitulatif des réponses

use serde_json::{json, Value};

use super::{FormContext, PageController, QuestionPage, ViewModel};
use crate::config::{LevyConfig, ServiceConfig};

/// Page de choix de la méthode de localisation du site
pub const LOCATION_METHOD_PATH: &str = "/how-would-you-like-to-provide-your-development-site-location";

/// Champ d'état portant le nombre de logements
pub const HOUSES_FIELD: &str = "numberOfHouses";

const NEXT_STEPS: [&str; 4] = [
    "Review your quote",
    "Accept the terms",
    "Complete payment",
    "Receive confirmation",
];

/// Montant de la taxe, en livres
pub fn calculate_levy(houses: u64, rate_per_house: u64) -> u64 {
    houses.saturating_mul(rate_per_house)
}

/// Entier en tête de valeur, comme un `parseInt` ; 0 sinon
pub fn parse_houses(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let digits: String = s
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Montant en livres sterling, séparateur de milliers : `£375,000.00`
pub fn format_gbp(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("£{grouped}.00")
}

/// Ligne du récapitulatif "Check your answers"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRow {
    pub key: String,
    pub value: String,
    pub change_href: String,
}

/// Contrôleur de la page de devis
#[derive(Debug, Clone)]
pub struct QuotePageController {
    page: QuestionPage,
    levy: LevyConfig,
    journey: Vec<QuestionPage>,
}

impl QuotePageController {
    /// `journey` : pages du parcours, dans l'ordre, pour le récapitulatif
    pub fn new(config: &ServiceConfig, journey: Vec<QuestionPage>) -> Self {
        Self {
            page: QuestionPage {
                path: config.summary_path.clone(),
                title: "Your quote".into(),
                view_name: "quote-page".into(),
                fields: vec![],
                summary_path: config.summary_path.clone(),
            },
            levy: config.levy.clone(),
            journey,
        }
    }

    /// Taxe due pour l'état courant
    pub fn levy_for(&self, ctx: &FormContext) -> u64 {
        calculate_levy(parse_houses(ctx.value(HOUSES_FIELD)), self.levy.rate_per_house)
    }

    /// Récapitulatif des réponses avec liens "Change"
    ///
    /// Les liens reviennent au devis, sauf celui de la méthode de
    /// localisation qui doit repasser par la page de saisie choisie.
    pub fn check_answers(&self, ctx: &FormContext) -> Vec<AnswerRow> {
        let mut rows = Vec::new();
        for page in &self.journey {
            for field in &page.fields {
                let Some(value) = ctx.value(&field.name) else {
                    continue;
                };
                let mut href = format!("{}?returnUrl={}", page.path, self.page.summary_path);
                if href.contains(LOCATION_METHOD_PATH) {
                    href = page.path.clone();
                }
                rows.push(AnswerRow {
                    key: field.title.clone(),
                    value: display_value(value),
                    change_href: href,
                });
            }
        }
        rows
    }
}

impl PageController for QuotePageController {
    fn page(&self) -> &QuestionPage {
        &self.page
    }

    fn view_model(&self, ctx: &FormContext) -> ViewModel {
        let mut vm = self.page.view_model(ctx);

        let houses = parse_houses(ctx.value(HOUSES_FIELD));
        let rate = self.levy.rate_per_house;
        let levy = calculate_levy(houses, rate);

        vm.insert(
            "quote".into(),
            json!({
                "totalLevy": levy,
                "totalLevyFormatted": format_gbp(levy),
                "numberOfHouses": houses,
                "ratePerHouse": rate,
                "ratePerHouseFormatted": format_gbp(rate),
                "edpBreakdown": [{
                    "type": self.levy.edp_code,
                    "description": self.levy.edp_name,
                    "ratePerHouse": rate,
                    "ratePerHouseFormatted": format_gbp(rate),
                    "amount": levy,
                    "amountFormatted": format_gbp(levy),
                }],
            }),
        );
        vm.insert("nextSteps".into(), json!(NEXT_STEPS));

        let rows: Vec<Value> = self
            .check_answers(ctx)
            .into_iter()
            .map(|row| {
                json!({
                    "key": { "text": row.key },
                    "value": { "text": row.value },
                    "actions": { "items": [{ "href": row.change_href, "text": "Change" }] },
                })
            })
            .collect();
        vm.insert("checkAnswers".into(), json!([{ "summaryList": { "rows": rows } }]));

        vm
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
