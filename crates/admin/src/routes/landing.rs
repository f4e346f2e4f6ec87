//! Public branch landing page.
//!
//! The shell renders immediately; the branch content is a fragment loaded
//! by htmx from `/landing/contenido`. An unparsable id, a 404 and a failed
//! fetch all render the same "not found" state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use sucursales_core::{BranchId, BranchLanding};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::Chrome;
use super::render;
use crate::filters;
use crate::query::Detail;
use crate::state::AppState;

/// `?sucursal=` as typed; parsed leniently.
#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    pub sucursal: Option<String>,
}

impl LandingQuery {
    fn raw(&self) -> Option<&str> {
        self.sucursal.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn branch_id(&self) -> Option<BranchId> {
        self.raw().and_then(|s| s.parse().ok())
    }
}

#[derive(Debug, Clone)]
pub struct OpeningHour {
    pub day: &'static str,
    pub range: String,
}

#[derive(Debug, Clone)]
pub struct VisibleStaff {
    pub full_name: String,
    pub role: Option<String>,
}

/// Everything the landing content shows.
#[derive(Debug, Clone)]
pub struct LandingView {
    pub address: String,
    pub phone: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub contact_numbers: Vec<String>,
    pub hours: Vec<OpeningHour>,
    pub latitude: String,
    pub longitude: String,
    pub maps_url: String,
    pub embed_url: String,
    pub staff: Vec<VisibleStaff>,
}

impl From<&BranchLanding> for LandingView {
    fn from(landing: &BranchLanding) -> Self {
        let branch = &landing.branch;
        let (lat, lng) = (branch.latitude, branch.longitude);
        Self {
            address: branch.address.clone(),
            phone: branch.phone.clone(),
            image_url: branch.image_url.clone().filter(|url| !url.trim().is_empty()),
            active: branch.active,
            contact_numbers: branch.contact_numbers.clone(),
            hours: branch
                .schedules
                .iter()
                .map(|s| OpeningHour {
                    day: s.weekday.label(),
                    range: s.time_range(),
                })
                .collect(),
            latitude: format!("{lat:.6}"),
            longitude: format!("{lng:.6}"),
            maps_url: format!("https://www.google.com/maps/search/?api=1&query={lat},{lng}"),
            embed_url: format!(
                "https://maps.google.com/maps?q={lat},{lng}&t=&z=15&ie=UTF8&iwloc=&output=embed"
            ),
            staff: landing
                .visible_staff
                .iter()
                .flatten()
                .map(|p| VisibleStaff {
                    full_name: p.full_name.clone(),
                    role: p.role.clone(),
                })
                .collect(),
        }
    }
}

/// Landing shell.
#[derive(Template)]
#[template(path = "landing/index.html")]
pub struct LandingTemplate {
    pub chrome: Chrome,
    /// Raw id to load, `None` when no branch was selected.
    pub sucursal: Option<String>,
}

/// Landing content fragment.
#[derive(Template, WebTemplate)]
#[template(path = "landing/_content.html")]
pub struct LandingContentTemplate {
    pub branch: Option<LandingView>,
}

/// Landing shell handler.
#[instrument(skip(session))]
pub async fn index(session: Session, Query(query): Query<LandingQuery>) -> Html<String> {
    let template = LandingTemplate {
        chrome: Chrome::load(&session, "/").await,
        sucursal: query.raw().map(str::to_owned),
    };

    render(&template)
}

/// Landing content fragment handler.
#[instrument(skip(state))]
pub async fn content(
    State(state): State<AppState>,
    Query(query): Query<LandingQuery>,
) -> LandingContentTemplate {
    let branch = match state.queries().branches().landing(query.branch_id()).await {
        Detail::Found(landing) => Some(LandingView::from(landing.as_ref())),
        Detail::Failed(e) => {
            tracing::warn!(sucursal = ?query.sucursal, error = %e, "Landing fetch failed");
            None
        }
        Detail::NotFound | Detail::Disabled => None,
    };

    LandingContentTemplate { branch }
}
