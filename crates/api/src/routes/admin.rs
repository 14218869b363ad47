//! Admin endpoints: the record lifecycle for every content table, the
//! dashboard, and the company profile. Every handler requires a session.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tokatsu_core::company::{CompanyInfo, CompanyInfoPatch, FieldVisibility};
use tokatsu_core::entity::{
    Announcement, BlogPost, Entity, Faq, Orderable, PageSection, SeoSetting, Service,
};
use tokatsu_core::lifecycle::Dashboard;
use tokatsu_core::record::{AdminView, RecordId};
use tokatsu_core::reorder::Direction;

use crate::error::ApiResult;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/company", get(get_company).put(save_company))
        .route(
            "/admin/company/visibility",
            get(company_visibility).put(set_company_visibility),
        )
        .merge(orderable_routes::<Service>())
        .merge(entity_routes::<BlogPost>())
        .merge(orderable_routes::<Faq>())
        .merge(entity_routes::<Announcement>())
        .merge(orderable_routes::<PageSection>())
        .merge(entity_routes::<SeoSetting>())
}

/// List, create, edit, show/hide, delete and restore for one table.
fn entity_routes<E: Entity>() -> Router<AppState> {
    let base = format!("/admin/{}", E::KIND.path());
    Router::new()
        .route(&base, get(list::<E>).post(create::<E>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_one::<E>).patch(update::<E>).delete(soft_delete::<E>),
        )
        .route(&format!("{base}/{{id}}/visibility"), put(set_visibility::<E>))
        .route(&format!("{base}/{{id}}/restore"), post(restore::<E>))
}

/// [`entity_routes`] plus manual reordering.
fn orderable_routes<E: Orderable>() -> Router<AppState> {
    let base = format!("/admin/{}", E::KIND.path());
    entity_routes::<E>().route(&format!("{base}/{{id}}/move"), post(move_record::<E>))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    view: AdminView,
}

async fn list<E: Entity>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<E>>> {
    Ok(Json(state.content().list::<E>(query.view).await?))
}

async fn create<E: Entity>(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    Json(draft): Json<E::Draft>,
) -> ApiResult<(StatusCode, Json<E>)> {
    let record = state.content().create::<E>(draft).await?;
    tracing::debug!(admin = %admin.email, table = E::TABLE.name, "created via admin");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_one<E: Entity>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<E>> {
    Ok(Json(state.content().get::<E>(id).await?))
}

async fn update<E: Entity>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<E::Patch>,
) -> ApiResult<Json<E>> {
    Ok(Json(state.content().update::<E>(id, patch).await?))
}

#[derive(Debug, Deserialize)]
struct VisibilityRequest {
    #[serde(alias = "isVisible")]
    is_visible: bool,
}

async fn set_visibility<E: Entity>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(body): Json<VisibilityRequest>,
) -> ApiResult<Json<E>> {
    Ok(Json(
        state
            .content()
            .set_visibility::<E>(id, body.is_visible)
            .await?,
    ))
}

/// DELETE is a soft delete; the row stays restorable.
async fn soft_delete<E: Entity>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<E>> {
    Ok(Json(state.content().soft_delete::<E>(id).await?))
}

async fn restore<E: Entity>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> ApiResult<Json<E>> {
    Ok(Json(state.content().restore::<E>(id).await?))
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    direction: Direction,
}

/// Responds with the active list in its new order.
async fn move_record<E: Orderable>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(body): Json<MoveRequest>,
) -> ApiResult<Json<Vec<E>>> {
    Ok(Json(
        state
            .content()
            .move_record::<E>(id, body.direction)
            .await?,
    ))
}

/// GET /api/admin/dashboard
async fn dashboard(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.content().dashboard().await?))
}

async fn get_company(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<CompanyInfo>> {
    Ok(Json(state.company().get().await?))
}

async fn save_company(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(patch): Json<CompanyInfoPatch>,
) -> ApiResult<Json<CompanyInfo>> {
    Ok(Json(state.company().upsert(patch).await?))
}

async fn company_visibility(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<FieldVisibility>> {
    Ok(Json(state.company().visibility().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldVisibilityRequest {
    #[serde(alias = "field_name")]
    field_name: String,
    #[serde(alias = "is_visible")]
    is_visible: bool,
}

/// PUT /api/admin/company/visibility
async fn set_company_visibility(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(body): Json<FieldVisibilityRequest>,
) -> ApiResult<Json<FieldVisibility>> {
    Ok(Json(
        state
            .company()
            .set_field_visibility(&body.field_name, body.is_visible)
            .await?,
    ))
}
