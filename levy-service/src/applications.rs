//! Registre des demandes de la session
//!
//! Pas de stockage persistant : le registre vit avec la session et démarre
//! avec trois demandes de démonstration.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::error::ServiceError;
use crate::fingerprint::boundary_fingerprint;
use crate::forms::location::DevelopmentDetails;
use crate::forms::{calculate_levy, format_gbp};
use site_boundary::RestorationData;

/// Statut d'une demande
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    /// Soumise, paiement attendu
    PendingPayment,
    /// Payée, en instruction
    Paid,
    /// Acceptée
    Approved,
}

impl SubmissionStatus {
    pub fn code(self) -> &'static str {
        match self {
            SubmissionStatus::PendingPayment => "pending-payment",
            SubmissionStatus::Paid => "paid",
            SubmissionStatus::Approved => "approved",
        }
    }

    /// Libellé affiché dans l'étiquette
    pub fn text(self) -> &'static str {
        match self {
            SubmissionStatus::PendingPayment => "Pending Payment",
            SubmissionStatus::Paid => "Paid",
            SubmissionStatus::Approved => "Approved",
        }
    }

    /// Classe `govuk-tag`
    pub fn tag_class(self) -> &'static str {
        match self {
            SubmissionStatus::PendingPayment => "govuk-tag--orange",
            SubmissionStatus::Paid => "govuk-tag--blue",
            SubmissionStatus::Approved => "govuk-tag--green",
        }
    }
}

/// Demande soumise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    /// Date au format `dd/mm/yyyy`
    pub date: String,
    pub name: String,
    /// `"150 houses"`
    pub houses: String,
    pub status: SubmissionStatus,
    pub levy_amount: String,
    /// Valeur sérialisée du champ caché, telle que soumise
    pub boundary: Option<String>,
    pub boundary_fingerprint: Option<String>,
}

const DEFAULT_NAME: &str = "New Development";

/// Registre en mémoire
#[derive(Debug, Clone)]
pub struct ApplicationStore {
    rate_per_house: u64,
    applications: Option<Vec<Application>>,
}

impl ApplicationStore {
    pub fn new(rate_per_house: u64) -> Self {
        Self {
            rate_per_house,
            applications: None,
        }
    }

    /// Demandes, la plus récente en premier
    pub fn list(&mut self) -> &[Application] {
        self.applications.get_or_insert_with(demo_applications)
    }

    pub fn find(&mut self, id: &str) -> Option<&Application> {
        self.list().iter().find(|a| a.id == id)
    }

    pub fn latest(&mut self) -> Option<&Application> {
        self.list().first()
    }

    /// Enregistre une demande en attente de paiement
    pub fn submit(&mut self, details: Option<&DevelopmentDetails>, boundary: Option<&str>) -> &Application {
        self.submit_at(Local::now(), details, boundary)
    }

    pub fn submit_at(
        &mut self,
        now: DateTime<Local>,
        details: Option<&DevelopmentDetails>,
        boundary: Option<&str>,
    ) -> &Application {
        let houses = details.map_or(0, |d| d.houses_count);
        let levy = calculate_levy(u64::from(houses), self.rate_per_house);

        let boundary = boundary.map(str::trim).filter(|b| !b.is_empty());
        let fingerprint = boundary.and_then(|raw| {
            RestorationData::Raw(raw.to_string())
                .parse()
                .ok()
                .map(|b| boundary_fingerprint(&b))
        });

        let rate = self.rate_per_house;
        let applications = self.applications.get_or_insert_with(demo_applications);

        let mut id = application_id(now.timestamp_millis());
        while applications.iter().any(|a| a.id == id) {
            id = next_id(&id);
        }

        let application = Application {
            id,
            date: now.format("%d/%m/%Y").to_string(),
            name: details
                .map(|d| d.development_name.clone())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            houses: format!("{houses} houses"),
            status: SubmissionStatus::PendingPayment,
            levy_amount: format_gbp(levy),
            boundary: boundary.map(str::to_string),
            boundary_fingerprint: fingerprint,
        };

        info!(
            id = %application.id,
            houses,
            rate,
            levy = %application.levy_amount,
            "Application submitted"
        );

        applications.insert(0, application);
        &applications[0]
    }

    /// Paiement simulé : `pending-payment` vers `paid`
    pub fn pay(&mut self, id: &str) -> Result<&Application, ServiceError> {
        let applications = self.applications.get_or_insert_with(demo_applications);
        let application = applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::ApplicationNotFound(id.to_string()))?;

        if application.status != SubmissionStatus::PendingPayment {
            return Err(ServiceError::InvalidTransition {
                id: id.to_string(),
                from: application.status.code(),
                to: SubmissionStatus::Paid.code(),
            });
        }

        application.status = SubmissionStatus::Paid;
        info!(id, "Payment recorded");
        Ok(&*application)
    }
}

impl Default for ApplicationStore {
    fn default() -> Self {
        Self::new(crate::config::LevyConfig::default().rate_per_house)
    }
}

/// `APP-` suivi des 6 derniers chiffres de l'horodatage en millisecondes
fn application_id(millis: i64) -> String {
    format!("APP-{:06}", millis.rem_euclid(1_000_000))
}

fn next_id(id: &str) -> String {
    let n: i64 = id.trim_start_matches("APP-").parse().unwrap_or(0);
    application_id(n + 1)
}

fn demo_applications() -> Vec<Application> {
    let demo = |id: &str, (y, m, d): (i32, u32, u32), name: &str, houses: u32, status, levy: u64| {
        Application {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            name: name.to_string(),
            houses: format!("{houses} houses"),
            status,
            levy_amount: format_gbp(levy),
            boundary: None,
            boundary_fingerprint: None,
        }
    };

    vec![
        demo(
            "APP-001",
            (2024, 3, 15),
            "Riverside Housing Development",
            150,
            SubmissionStatus::PendingPayment,
            375_000,
        ),
        demo(
            "APP-002",
            (2024, 2, 28),
            "South East Residential Complex",
            200,
            SubmissionStatus::Paid,
            900_000,
        ),
        demo(
            "APP-003",
            (2024, 1, 10),
            "Hampshire Coastal Development",
            75,
            SubmissionStatus::Approved,
            112_500,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::location::DevelopmentType;
    use chrono::TimeZone;

    const TRIANGLE: &str = r#"[{"lat":"51.000000","lng":"-0.100000"},{"lat":"51.100000","lng":"-0.100000"},{"lat":"51.050000","lng":"-0.050000"}]"#;

    fn details() -> DevelopmentDetails {
        DevelopmentDetails {
            development_name: "Kennet Meadows".into(),
            houses_count: 40,
            development_type: DevelopmentType::Residential,
            wastewater_site: "reading".into(),
        }
    }

    fn at(millis: i64) -> DateTime<Local> {
        Local.timestamp_millis_opt(millis).single().unwrap()
    }

    #[test]
    fn test_demo_seed() {
        let mut store = ApplicationStore::default();
        let list = store.list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, "APP-001");
        assert_eq!(list[0].levy_amount, "£375,000.00");
        assert_eq!(list[1].status.tag_class(), "govuk-tag--blue");
        assert_eq!(list[2].houses, "75 houses");
        assert_eq!(list[2].date, "10/01/2024");
    }

    #[test]
    fn test_submit_prepends_pending() {
        let mut store = ApplicationStore::default();
        let app = store
            .submit_at(at(1_710_000_123_456), Some(&details()), Some(TRIANGLE))
            .clone();

        assert_eq!(app.id, "APP-123456");
        assert_eq!(app.status, SubmissionStatus::PendingPayment);
        assert_eq!(app.levy_amount, "£100,000.00");
        assert_eq!(app.houses, "40 houses");
        assert_eq!(app.boundary.as_deref(), Some(TRIANGLE));
        assert_eq!(app.boundary_fingerprint.as_ref().map(String::len), Some(64));

        assert_eq!(store.list().len(), 4);
        assert_eq!(store.latest().unwrap().id, "APP-123456");
    }

    #[test]
    fn test_submit_without_details() {
        let mut store = ApplicationStore::default();
        let app = store.submit_at(at(1_000_000), None, Some("not json")).clone();
        assert_eq!(app.name, "New Development");
        assert_eq!(app.levy_amount, "£0.00");
        assert_eq!(app.boundary.as_deref(), Some("not json"));
        assert_eq!(app.boundary_fingerprint, None);
    }

    #[test]
    fn test_same_millisecond_ids_differ() {
        let mut store = ApplicationStore::default();
        let first = store.submit_at(at(5_000_042), None, None).id.clone();
        let second = store.submit_at(at(5_000_042), None, None).id.clone();
        assert_eq!(first, "APP-000042");
        assert_eq!(second, "APP-000043");
    }

    #[test]
    fn test_pay() {
        let mut store = ApplicationStore::default();
        assert_eq!(store.pay("APP-001").unwrap().status, SubmissionStatus::Paid);

        assert!(matches!(
            store.pay("APP-001"),
            Err(ServiceError::InvalidTransition { from: "paid", .. })
        ));
        assert!(matches!(
            store.pay("APP-999"),
            Err(ServiceError::ApplicationNotFound(_))
        ));
    }
}
