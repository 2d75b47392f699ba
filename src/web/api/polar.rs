use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Settings;
use crate::projection::{ScreenPoint, ViewportGeometry};
use crate::scene::{CursorReadout, CursorText, Scene, Shape};
use crate::tracking::Snapshot;
use crate::view::{LoopState, ViewEvent};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SceneResponse {
    pub state: LoopState,
    pub geometry: Option<ViewportGeometry>,
    pub scene: Option<Scene>,
    pub cursor: CursorText,
    /// Number of render updates so far; changes whenever something is redrawn.
    pub draws: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CursorResponse {
    pub readout: CursorReadout,
    pub text: CursorText,
    /// Readout values positioned next to the background captions.
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResizeRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PointerRequest {
    pub x: f64,
    pub y: f64,
}

impl PointerRequest {
    fn point(&self) -> ApiResult<ScreenPoint> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ApiError::Validation(
                "pointer coordinates must be finite".to_string(),
            ));
        }
        Ok(ScreenPoint::new(self.x, self.y))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClickResponse {
    pub catalog_number: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlanetsRequest {
    pub show: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CatalogRequest {
    pub catalog_number: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SnapshotSummary {
    pub satellites: usize,
    pub planets: usize,
    pub following: Option<u32>,
}

impl From<&Snapshot> for SnapshotSummary {
    fn from(snapshot: &Snapshot) -> Self {
        SnapshotSummary {
            satellites: snapshot.satellites.len(),
            planets: snapshot.planets.len(),
            following: snapshot.following,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/polar/scene",
    responses(
        (status = 200, description = "Last composed scene", body = SceneResponse)
    ),
    tag = "polar"
)]
pub async fn scene(State(state): State<AppState>) -> Json<SceneResponse> {
    let view = state.view.lock().await;
    Json(SceneResponse {
        state: view.state(),
        geometry: view.geometry(),
        scene: view.renderer().scene().cloned(),
        cursor: view.renderer().cursor().clone(),
        draws: view.renderer().draws(),
    })
}

#[utoipa::path(
    post,
    path = "/api/polar/start",
    responses(
        (status = 200, description = "Render loop running", body = LoopState)
    ),
    tag = "polar"
)]
pub async fn start(State(state): State<AppState>) -> Json<LoopState> {
    let mut view = state.view.lock().await;
    view.start();
    Json(view.state())
}

#[utoipa::path(
    post,
    path = "/api/polar/stop",
    responses(
        (status = 200, description = "Render loop stopped", body = LoopState)
    ),
    tag = "polar"
)]
pub async fn stop(State(state): State<AppState>) -> Json<LoopState> {
    let mut view = state.view.lock().await;
    view.stop();
    Json(view.state())
}

#[utoipa::path(
    post,
    path = "/api/polar/resize",
    request_body = ResizeRequest,
    responses(
        (status = 200, description = "New viewport geometry", body = ViewportGeometry),
        (status = 409, description = "Container has no usable size", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn resize(
    State(state): State<AppState>,
    Json(request): Json<ResizeRequest>,
) -> ApiResult<Json<ViewportGeometry>> {
    let mut view = state.view.lock().await;
    view.resize(request.width, request.height)
        .map(Json)
        .ok_or(ApiError::Conflict("zero_sized_viewport"))
}

#[utoipa::path(
    get,
    path = "/api/polar/cursor",
    responses(
        (status = 200, description = "Cursor readout", body = CursorResponse)
    ),
    tag = "polar"
)]
pub async fn cursor(State(state): State<AppState>) -> Json<CursorResponse> {
    let view = state.view.lock().await;
    let text = view.renderer().cursor().clone();
    Json(CursorResponse {
        readout: view.readout(),
        shapes: text.shapes(),
        text,
    })
}

#[utoipa::path(
    post,
    path = "/api/polar/pointer",
    request_body = PointerRequest,
    responses(
        (status = 200, description = "Readout at the pointer", body = CursorReadout),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn pointer_moved(
    State(state): State<AppState>,
    Json(request): Json<PointerRequest>,
) -> ApiResult<Json<CursorReadout>> {
    let point = request.point()?;
    let mut view = state.view.lock().await;
    view.pointer_moved(point);
    Ok(Json(view.readout()))
}

#[utoipa::path(
    delete,
    path = "/api/polar/pointer",
    responses(
        (status = 204, description = "Pointer left the view")
    ),
    tag = "polar"
)]
pub async fn pointer_left(State(state): State<AppState>) -> StatusCode {
    state.view.lock().await.pointer_left();
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/api/polar/click",
    request_body = PointerRequest,
    responses(
        (status = 200, description = "Satellite under the pointer, if any", body = ClickResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn click(
    State(state): State<AppState>,
    Json(request): Json<PointerRequest>,
) -> ApiResult<Json<ClickResponse>> {
    let point = request.point()?;
    let catalog_number = state.view.lock().await.click(point);
    Ok(Json(ClickResponse { catalog_number }))
}

#[utoipa::path(
    put,
    path = "/api/polar/planets",
    request_body = PlanetsRequest,
    responses(
        (status = 204, description = "Planet visibility updated")
    ),
    tag = "polar"
)]
pub async fn show_planets(
    State(state): State<AppState>,
    Json(request): Json<PlanetsRequest>,
) -> StatusCode {
    state
        .view
        .lock()
        .await
        .handle(ViewEvent::ShowPlanets(request.show));
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    put,
    path = "/api/polar/snapshot",
    request_body = Snapshot,
    responses(
        (status = 200, description = "Snapshot applied", body = SnapshotSummary),
        (status = 400, description = "Invalid snapshot", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn replace_snapshot(
    State(state): State<AppState>,
    Json(snapshot): Json<Snapshot>,
) -> ApiResult<Json<SnapshotSummary>> {
    snapshot.validate().map_err(ApiError::Snapshot)?;
    let summary = SnapshotSummary::from(&snapshot);
    state.view.lock().await.replace_data(snapshot);
    log::info!(
        "Snapshot replaced: {} satellites, {} planets",
        summary.satellites,
        summary.planets
    );
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/polar/passes/reload",
    responses(
        (status = 204, description = "Pass layer cleared")
    ),
    tag = "polar"
)]
pub async fn reload_passes(State(state): State<AppState>) -> StatusCode {
    state.view.lock().await.handle(ViewEvent::PassSetReloaded);
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    put,
    path = "/api/polar/following",
    request_body = CatalogRequest,
    responses(
        (status = 200, description = "Followed satellite changed", body = SnapshotSummary),
        (status = 404, description = "Satellite not found", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn set_following(
    State(state): State<AppState>,
    Json(request): Json<CatalogRequest>,
) -> ApiResult<Json<SnapshotSummary>> {
    let mut view = state.view.lock().await;
    view.data_mut().set_following(request.catalog_number)?;
    view.handle(ViewEvent::FollowingChanged);
    Ok(Json(SnapshotSummary::from(view.data())))
}

#[utoipa::path(
    put,
    path = "/api/polar/selection",
    request_body = CatalogRequest,
    responses(
        (status = 204, description = "Selection changed"),
        (status = 404, description = "Satellite not found", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<CatalogRequest>,
) -> ApiResult<StatusCode> {
    let mut view = state.view.lock().await;
    let found = view.data_mut().select(request.catalog_number);
    if request.catalog_number.is_some() && !found {
        return Err(ApiError::NotFound("satellite_not_found"));
    }
    view.handle(ViewEvent::DataUpdated);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/polar/settings",
    responses(
        (status = 200, description = "Current view settings", body = Settings)
    ),
    tag = "polar"
)]
pub async fn settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.view.lock().await.settings().clone())
}

#[utoipa::path(
    put,
    path = "/api/polar/settings",
    request_body = Settings,
    responses(
        (status = 200, description = "Settings applied", body = Settings),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "polar"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> ApiResult<Json<Settings>> {
    if !(-90.0..=90.0).contains(&settings.aos_elevation_deg) {
        return Err(ApiError::Validation(format!(
            "aos_elevation_deg must be within -90..90, got {}",
            settings.aos_elevation_deg
        )));
    }
    let mut view = state.view.lock().await;
    view.set_settings(settings);
    log::info!(
        "Settings updated: AoS elevation {} deg",
        view.settings().aos_elevation_deg
    );
    Ok(Json(view.settings().clone()))
}
