//! End-to-end tests for opening hours.

use reqwest::{Method, StatusCode};
use serde_json::json;
use sucursales_integration_tests::{FakeBackend, TestContext};

fn seeded() -> FakeBackend {
    let backend = FakeBackend::new();
    backend.seed_branch(json!({
        "id": 5,
        "direccion": "Av. Central 100",
        "telefono": "5551234",
        "latitud": -33.4489,
        "longitud": -70.6693,
    }));
    backend
}

#[tokio::test]
async fn test_create_schedule_shows_spanish_day_and_duration() {
    let ctx = TestContext::with_backend(seeded()).await;

    let (status, body) = ctx
        .post_form(
            "/horarios",
            &[
                ("diaSemana", "MONDAY"),
                ("horaApertura", "09:00"),
                ("horaCierre", "17:00"),
                ("sucursalId", "5"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Horario creado"), "success toast after redirect");
    assert_eq!(ctx.backend.count(&Method::POST, "/api/horarios/5"), 1);

    let stored = ctx.backend.schedules();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["diaSemana"], "MONDAY");
    assert_eq!(stored[0]["horaApertura"], "09:00");

    let (_, table) = ctx.get("/horarios/tabla").await;
    assert!(table.contains("Lunes"));
    assert!(table.contains("09:00 - 17:00"));
    assert!(table.contains("8h"));
    assert!(table.contains("Av. Central 100"));
}

#[tokio::test]
async fn test_equal_times_are_rejected_without_backend_call() {
    let ctx = TestContext::with_backend(seeded()).await;

    let (status, body) = ctx
        .post_form(
            "/horarios",
            &[
                ("diaSemana", "MONDAY"),
                ("horaApertura", "09:00"),
                ("horaCierre", "09:00"),
                ("sucursalId", "5"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("hora de cierre debe ser posterior"));
    assert!(body.contains("Formulario incompleto"));
    assert_eq!(ctx.backend.count(&Method::POST, "/api/horarios"), 0);
    assert!(ctx.backend.schedules().is_empty());
}

#[tokio::test]
async fn test_duration_preview_fragment() {
    let ctx = TestContext::start().await;

    let (_, ok) = ctx
        .get("/horarios/duracion?horaApertura=08%3A15&horaCierre=12%3A45")
        .await;
    assert!(ok.contains("4h 30m"));

    let (_, inverted) = ctx
        .get("/horarios/duracion?horaApertura=18%3A00&horaCierre=08%3A00")
        .await;
    assert!(inverted.contains("hora de cierre debe ser posterior"));

    assert!(ctx.backend.requests().is_empty(), "preview never calls the backend");
}

#[tokio::test]
async fn test_update_and_delete_are_reflected_in_list() {
    let backend = seeded();
    let id = backend.seed_schedule(json!({
        "diaSemana": "TUESDAY",
        "horaApertura": "10:00",
        "horaCierre": "14:00",
        "sucursalId": 5,
    }));
    let ctx = TestContext::with_backend(backend).await;

    let (_, before) = ctx.get("/horarios/tabla").await;
    assert!(before.contains("Martes"));
    assert!(before.contains("4h"));

    let (status, body) = ctx
        .post_form(
            &format!("/horarios/{id}"),
            &[
                ("diaSemana", "TUESDAY"),
                ("horaApertura", "10:00"),
                ("horaCierre", "15:30"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Horario actualizado"));

    let (_, after_update) = ctx.get("/horarios/tabla").await;
    assert!(after_update.contains("5h 30m"));

    ctx.post_form(&format!("/horarios/{id}/eliminar"), &[("confirmado", "true")])
        .await;
    assert_eq!(ctx.backend.count(&Method::DELETE, "/api/horarios"), 1);

    let (_, after_delete) = ctx.get("/horarios/tabla").await;
    assert!(after_delete.contains("No hay horarios registrados"));
}

#[tokio::test]
async fn test_edit_unknown_schedule_is_not_found() {
    let ctx = TestContext::start().await;
    let (status, body) = ctx.get("/horarios/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Horario no encontrado"));
}
