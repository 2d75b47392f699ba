use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::scene::IconDirectory;
use crate::tracking::Snapshot;
use crate::view::{
    Collaborators, FixedContainer, FrameTicks, OutboundEvent, RenderLoop, SceneStore,
    TokioFrameScheduler, ViewContext,
};

use super::api::polar as polar_handlers;
use super::api_doc::ApiDoc;
use super::state::{AppState, PolarLoop};

const EVENT_CAPACITY: usize = 64;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let snapshot = match &config.snapshot {
        Some(path) => Snapshot::from_file(path).unwrap_or_else(|e| {
            log::warn!("Failed to load snapshot {}: {}", path.display(), e);
            Snapshot::default()
        }),
        None => Snapshot::default(),
    };

    let (events, receiver) = broadcast::channel(EVENT_CAPACITY);
    let (scheduler, ticks) = TokioFrameScheduler::channel(config.view.frame_interval);

    let collaborators = Collaborators {
        icons: Box::new(IconDirectory::from_config(&config.icons)),
        events: Box::new(events),
        container: Box::new(FixedContainer {
            width: config.view.width,
            height: config.view.height,
        }),
    };
    let context = ViewContext::new(
        config.view.margin,
        config.settings.clone(),
        config.view.show_planets,
    );

    let mut view = RenderLoop::new(
        context,
        scheduler,
        SceneStore::default(),
        snapshot,
        collaborators,
    );
    view.start();

    let state = AppState {
        view: Arc::new(Mutex::new(view)),
    };

    tokio::spawn(drive_frames(state.view.clone(), ticks));
    tokio::spawn(log_events(receiver));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/polar/scene", get(polar_handlers::scene))
        .route("/api/polar/start", post(polar_handlers::start))
        .route("/api/polar/stop", post(polar_handlers::stop))
        .route("/api/polar/resize", post(polar_handlers::resize))
        .route("/api/polar/cursor", get(polar_handlers::cursor))
        .route("/api/polar/pointer", post(polar_handlers::pointer_moved))
        .route("/api/polar/pointer", delete(polar_handlers::pointer_left))
        .route("/api/polar/click", post(polar_handlers::click))
        .route("/api/polar/planets", put(polar_handlers::show_planets))
        .route("/api/polar/snapshot", put(polar_handlers::replace_snapshot))
        .route(
            "/api/polar/passes/reload",
            post(polar_handlers::reload_passes),
        )
        .route("/api/polar/following", put(polar_handlers::set_following))
        .route("/api/polar/selection", put(polar_handlers::select))
        .route(
            "/api/polar/settings",
            get(polar_handlers::settings).put(polar_handlers::update_settings),
        )
        // Icons and other static assets
        .nest_service("/static", ServeDir::new(&config.web.static_dir))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

async fn drive_frames(view: Arc<Mutex<PolarLoop>>, mut ticks: FrameTicks) {
    while ticks.next().await {
        view.lock().await.frame();
    }
    log::info!("Frame driver stopped");
}

async fn log_events(mut receiver: broadcast::Receiver<OutboundEvent>) {
    loop {
        match receiver.recv().await {
            Ok(OutboundEvent::SatelliteClicked { catalog_number }) => {
                log::info!("Click on satellite {}", catalog_number);
            }
            Err(RecvError::Lagged(skipped)) => {
                log::warn!("Event log lagged, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
