use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::polar::{
    CatalogRequest, ClickResponse, CursorResponse, PlanetsRequest, PointerRequest, ResizeRequest,
    SceneResponse, SnapshotSummary,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::polar::scene,
        super::api::polar::start,
        super::api::polar::stop,
        super::api::polar::resize,
        super::api::polar::cursor,
        super::api::polar::pointer_moved,
        super::api::polar::pointer_left,
        super::api::polar::click,
        super::api::polar::show_planets,
        super::api::polar::replace_snapshot,
        super::api::polar::reload_passes,
        super::api::polar::set_following,
        super::api::polar::select,
        super::api::polar::settings,
        super::api::polar::update_settings,
    ),
    components(
        schemas(
            SceneResponse,
            CursorResponse,
            ResizeRequest,
            PointerRequest,
            ClickResponse,
            PlanetsRequest,
            CatalogRequest,
            SnapshotSummary,
            ErrorResponse,
            crate::config::Settings,
            crate::view::LoopState,
            crate::view::OutboundEvent,
            crate::projection::ViewportGeometry,
            crate::projection::ScreenPoint,
            crate::projection::HorizonPoint,
            crate::projection::HorizonFix,
            crate::scene::Scene,
            crate::scene::Shape,
            crate::scene::Stroke,
            crate::scene::Fill,
            crate::scene::Font,
            crate::scene::MarkerHit,
            crate::scene::CursorReadout,
            crate::scene::CursorText,
            crate::tracking::Snapshot,
            crate::tracking::Satellite,
            crate::tracking::Planet,
            crate::tracking::PassPrediction,
            crate::tracking::NextEvent,
            crate::tracking::EventKind,
            crate::pass::PassSample,
        )
    ),
    info(
        title = "Polar View API",
        description = "Azimuth/elevation sky plot of tracked satellites and planets",
        version = "0.1.0"
    ),
    tags(
        (name = "polar", description = "Polar view rendering and interaction")
    )
)]
pub struct ApiDoc;
