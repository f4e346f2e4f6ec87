//! End-to-end tests for writes the backend rejects.

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
    backend.seed_staff(json!({
        "id": 8,
        "nombreCompleto": "Ana Rojas",
        "correoInstitucional": "ana@empresa.com",
        "numerosTelefono": ["5559876"],
        "sucursalId": 5,
    }));
    backend
}

/// List reads that actually reached the backend for `path`.
fn list_reads(ctx: &TestContext, path: &str) -> usize {
    ctx.backend
        .requests()
        .iter()
        .filter(|r| r.method == Method::GET && r.path == path)
        .count()
}

fn assert_error_shown(body: &str, message: &str) {
    assert!(body.contains("toast-error"), "error toast rendered");
    assert!(body.contains(&format!("<p>{message}</p>")), "message in toast");
    assert!(
        body.contains(&format!("<div class=\"alert alert-error\">{message}</div>")),
        "message in banner"
    );
}

#[tokio::test]
async fn test_rejected_branch_create_keeps_dialog_values() {
    let ctx = TestContext::with_backend(seeded()).await;
    ctx.backend.reject_next_write("La dirección ya existe");

    let (status, body) = ctx
        .post_form(
            "/sucursales",
            &[
                ("direccion", "Norte 1"),
                ("telefono", "555 1234"),
                ("latitud", "-33.40"),
                ("longitud", "-70.60"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_error_shown(&body, "La dirección ya existe");
    assert!(body.contains("data-open-on-load"));
    assert!(body.contains("value=\"Norte 1\""));
    assert!(body.contains("value=\"555 1234\""));
    assert_eq!(ctx.backend.count(&Method::POST, "/api/sucursales"), 1);
    assert!(ctx.backend.branch(6).is_none());
}

#[tokio::test]
async fn test_rejected_branch_update_keeps_values_and_cached_list() {
    let ctx = TestContext::with_backend(seeded()).await;
    ctx.get("/sucursales/tabla").await;
    ctx.backend.reject_next_write("Teléfono en uso");

    let (status, body) = ctx
        .post_form(
            "/sucursales/5",
            &[
                ("direccion", "Av. Central 200"),
                ("telefono", "5551234"),
                ("latitud", "-33.4489"),
                ("longitud", "-70.6693"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_error_shown(&body, "Teléfono en uso");
    assert!(body.contains("value=\"Av. Central 200\""));

    let (_, table) = ctx.get("/sucursales/tabla").await;
    assert!(table.contains("Av. Central 100"));
    assert_eq!(list_reads(&ctx, "/api/sucursales"), 1, "list served from cache");
}

#[tokio::test]
async fn test_rejected_staff_create_keeps_form_values() {
    let ctx = TestContext::with_backend(seeded()).await;
    ctx.backend.reject_next_write("Correo ya registrado");

    let (status, body) = ctx
        .post_form(
            "/personal",
            &[
                ("nombreCompleto", "Luis Soto"),
                ("correoInstitucional", "luis@empresa.com"),
                ("numerosTelefono", "5551111"),
                ("sucursalId", "5"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_error_shown(&body, "Correo ya registrado");
    assert!(body.contains("value=\"Luis Soto\""));
    assert!(body.contains("value=\"luis@empresa.com\""));
    assert!(body.contains("5551111"));
    assert_eq!(ctx.backend.staff().len(), 1);
}

#[tokio::test]
async fn test_rejected_schedule_create_keeps_times() {
    let ctx = TestContext::with_backend(seeded()).await;
    ctx.backend.reject_next_write("Horario duplicado");

    let (status, body) = ctx
        .post_form(
            "/horarios",
            &[
                ("diaSemana", "FRIDAY"),
                ("horaApertura", "08:30"),
                ("horaCierre", "12:00"),
                ("sucursalId", "5"),
            ],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_error_shown(&body, "Horario duplicado");
    assert!(body.contains("value=\"08:30\""));
    assert!(body.contains("value=\"12:00\""));
    assert!(ctx.backend.schedules().is_empty());
}

#[tokio::test]
async fn test_rejected_delete_leaves_list_unchanged() {
    let ctx = TestContext::with_backend(seeded()).await;
    let (_, before) = ctx.get("/personal/tabla").await;
    assert!(before.contains("Ana Rojas"));
    ctx.backend.reject_next_write("Personal con turnos asignados");

    let (status, body) = ctx
        .post_form("/personal/8/eliminar", &[("confirmado", "true")])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("toast-error"));
    assert!(body.contains("Personal con turnos asignados"));
    assert_eq!(ctx.backend.count(&Method::DELETE, "/api/personal/8"), 1);
    assert_eq!(ctx.backend.staff().len(), 1);

    let (_, after) = ctx.get("/personal/tabla").await;
    assert!(after.contains("Ana Rojas"));
    assert_eq!(list_reads(&ctx, "/api/personal"), 1, "list served from cache");
}
