//! End-to-end tests for the public landing page.

use reqwest::StatusCode;
use serde_json::json;
use sucursales_integration_tests::{FakeBackend, TestContext};

#[tokio::test]
async fn test_landing_states() {
    let backend = FakeBackend::new();
    backend.seed_branch(json!({
        "id": 5,
        "direccion": "Av. Central 100",
        "telefono": "5551234",
        "latitud": -33.4489,
        "longitud": -70.6693,
        "numerosContacto": ["5550001"],
    }));
    backend.seed_schedule(json!({
        "diaSemana": "WEDNESDAY",
        "horaApertura": "09:00",
        "horaCierre": "18:00",
        "sucursalId": 5,
    }));
    backend.seed_staff(json!({
        "nombreCompleto": "Ana Rojas",
        "correoInstitucional": "ana@empresa.com",
        "numerosTelefono": ["5559876"],
        "sucursalId": 5,
    }));
    let ctx = TestContext::with_backend(backend).await;

    let (status, shell) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(shell.contains("Selecciona una sucursal"));

    let (_, shell) = ctx.get("/?sucursal=5").await;
    assert!(shell.contains("Cargando sucursal..."));
    assert!(shell.contains("/landing/contenido?sucursal=5"));

    let (_, content) = ctx.get("/landing/contenido?sucursal=5").await;
    assert!(content.contains("Bienvenido a nuestra sucursal"));
    assert!(content.contains("Av. Central 100"));
    assert!(content.contains("5550001"));
    assert!(content.contains("Miércoles"));
    assert!(content.contains("09:00 - 18:00"));
    assert!(content.contains("-33.448900"));
    assert!(content.contains("Abrir en Google Maps"));
    assert!(content.contains("Ana Rojas"));

    let (_, missing) = ctx.get("/landing/contenido?sucursal=999").await;
    assert!(missing.contains("Sucursal no encontrada"));
}

#[tokio::test]
async fn test_unparsable_id_is_not_found_without_backend_call() {
    let ctx = TestContext::start().await;

    let (_, content) = ctx.get("/landing/contenido?sucursal=abc").await;
    assert!(content.contains("Sucursal no encontrada"));
    assert!(ctx.backend.requests().is_empty());
}
