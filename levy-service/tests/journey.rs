//! Parcours complet : rendu de la page, tracé, soumission, retour arrière

use levy_service::forms::boundary::{boundary_payload, revisit_context};
use levy_service::forms::container_attribute;
use levy_service::{
    ApplicationStore, BoundaryPageController, FormContext, PageController, ServiceConfig,
    SubmissionStatus, SubmitOutcome,
};
use site_boundary::{
    Boundary, BoundaryEditor, CoordinateSynchronizer, HiddenField, InitOutcome, MemorySurface,
    Point, RestorationData, RowList,
};

type Editor = BoundaryEditor<MemorySurface, HiddenField, RowList>;

/// Charge la page côté navigateur à partir du modèle de vue
fn load_page(config: &ServiceConfig, ctx: &FormContext) -> (Editor, InitOutcome) {
    let controller = BoundaryPageController::new(config);
    let vm = controller.view_model(ctx);

    let sync = CoordinateSynchronizer::new(
        Some(HiddenField::new(config.boundary_field.clone())),
        Some(RowList::default()),
    );
    let mut editor = BoundaryEditor::new(config.map.clone(), sync);

    let restoration = container_attribute(&vm).and_then(|raw| RestorationData::from_attribute(&raw));
    let outcome = editor.init(Some(MemorySurface::new()), restoration.as_ref());
    (editor, outcome)
}

fn field_value(editor: &Editor) -> String {
    editor
        .synchronizer()
        .field()
        .map(|f| f.value().to_string())
        .unwrap_or_default()
}

fn site() -> Boundary {
    Boundary::new(vec![
        Point::new(51.4545, -0.9781),
        Point::new(51.4601, -0.9702),
        Point::new(51.4567, -0.9633),
        Point::new(51.4512, -0.9688),
    ])
    .unwrap()
}

#[test]
fn test_draw_submit_and_come_back() {
    let config = ServiceConfig::default();
    let controller = BoundaryPageController::new(&config);

    // Première visite : carte vide
    let (mut editor, outcome) = load_page(&config, &FormContext::default());
    assert!(matches!(outcome, InitOutcome::Empty));
    assert_eq!(field_value(&editor), "");

    let event = editor.surface().unwrap().draw(site());
    editor.handle(event);
    let submitted = field_value(&editor);
    assert!(submitted.starts_with(r#"[{"lat":"51.454500","lng":"-0.978100"}"#));

    // Soumission : valeur transmise telle quelle
    let payload = boundary_payload(controller.field(), submitted.as_str());
    let outcome = controller.submit(&FormContext::default(), payload.clone());
    assert_eq!(outcome, SubmitOutcome::Continue { payload });

    // Retour via "Change" : même contour, même valeur
    let ctx = revisit_context(controller.field(), &submitted);
    let (revisited, outcome) = load_page(&config, &ctx);
    assert!(matches!(outcome, InitOutcome::Restored { points: 4 }));
    assert_eq!(field_value(&revisited), submitted);
    assert_eq!(revisited.surface().unwrap().polygon_count(), 1);
    assert_eq!(
        revisited.synchronizer().display().unwrap().row_count(),
        8
    );
    assert_eq!(revisited.current(), Some(&site()));
}

#[test]
fn test_corrupted_state_starts_empty() {
    let config = ServiceConfig::default();
    let ctx = revisit_context(&config.boundary_field, r#"[{"lat":"51.0","lng":"-0.1"}]"#);

    let (mut editor, outcome) = load_page(&config, &ctx);
    assert!(matches!(outcome, InitOutcome::RestorationSkipped(_)));
    assert_eq!(field_value(&editor), "");
    assert_eq!(editor.surface().unwrap().polygon_count(), 0);

    // La carte reste utilisable
    let event = editor.surface().unwrap().draw(site());
    editor.handle(event);
    assert_eq!(editor.surface().unwrap().polygon_count(), 1);
}

#[test]
fn test_submitted_boundary_is_recorded() {
    let config = ServiceConfig::default();
    let (mut editor, _) = load_page(&config, &FormContext::default());
    let event = editor.surface().unwrap().draw(site());
    editor.handle(event);
    let value = field_value(&editor);

    let mut store = ApplicationStore::new(config.levy.rate_per_house);
    let application = store.submit(None, Some(value.as_str())).clone();

    assert_eq!(application.status, SubmissionStatus::PendingPayment);
    assert_eq!(application.boundary.as_deref(), Some(value.as_str()));
    assert_eq!(
        application.boundary_fingerprint.as_deref(),
        Some(levy_service::boundary_fingerprint(&site()).as_str())
    );
    assert_eq!(store.list().len(), 4);
}
