//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::records: history and admin tables
//! - routes::upload: file upload form
//! - routes::dataviz: aggregate charts
//! - routes::settings: configuration display

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use finboard_config::Config;
use finboard_core::{Formatter, ProgressIndicator, TableState};
use finboard_gateway::{PollHandle, ProgressPoller, RecordGateway};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn RecordGateway>,
    pub history: Arc<RwLock<TableState>>,
    pub admin: Arc<RwLock<TableState>>,
    progress: Arc<Mutex<Option<PollHandle>>>,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn RecordGateway>) -> Self {
        let table = || {
            Arc::new(RwLock::new(TableState::new(
                config.pagination.records_per_page,
                Formatter::from_config(&config.currency),
            )))
        };
        Self {
            history: table(),
            admin: table(),
            gateway,
            progress: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// Indicator of the current or last categorization poll
    pub async fn progress(&self) -> ProgressIndicator {
        self.progress
            .lock()
            .await
            .as_ref()
            .map(PollHandle::current)
            .unwrap_or_default()
    }

    /// Start polling progress, replacing (and stopping) any earlier poll
    pub async fn start_progress_poll(&self) -> ProgressIndicator {
        let mut slot = self.progress.lock().await;
        let last = slot.as_ref().map(PollHandle::current).unwrap_or_default();
        let handle = ProgressPoller::start(
            self.gateway.clone(),
            Duration::from_millis(self.config.progress.poll_interval_ms),
            last,
        );
        let indicator = handle.current();
        *slot = Some(handle);
        indicator
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dataviz::{api_charts, htmx_charts, page_dataviz};
    use routes::records::{
        api_progress, api_records, htmx_admin_page, htmx_admin_search, htmx_categorize,
        htmx_delete_all, htmx_delete_record, htmx_edit_category, htmx_history_page,
        htmx_history_search, htmx_progress, page_admin, page_history,
    };
    use routes::settings::{api_settings, page_settings};
    use routes::upload::{htmx_upload, page_upload};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/records", get(api_records))
        .route("/api/progress", get(api_progress))
        .route("/api/charts", get(api_charts))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_upload))
        .route("/history", get(page_history))
        .route("/admin", get(page_admin))
        .route("/dataviz", get(page_dataviz))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route(
            "/upload",
            post(htmx_upload).layer(DefaultBodyLimit::disable()),
        )
        .route("/history/records", get(htmx_history_search))
        .route("/history/page/:page", get(htmx_history_page))
        .route("/admin/records", get(htmx_admin_search))
        .route("/admin/page/:page", get(htmx_admin_page))
        .route("/admin/records/:id/category", post(htmx_edit_category))
        .route("/admin/records/:id", delete(htmx_delete_record))
        .route("/admin/delete-all", post(htmx_delete_all))
        .route("/admin/categorize", post(htmx_categorize))
        .route("/admin/progress", get(htmx_progress))
        .route("/dataviz/charts", get(htmx_charts))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Finboard</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Upload", "📤"),
        ("/history", "History", "📋"),
        ("/admin", "Admin", "🛠️"),
        ("/dataviz", "Charts", "📈"),
        ("/settings", "Settings", "⚙️"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Finboard</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Full page for normal navigation, bare content for HTMX requests
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#,
            inner_content
        )
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_path),
                inner_content
            ),
        )
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => log::error!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Start the HTTP server
///
/// Binds `server.host:server.port` and serves until Ctrl-C.
pub async fn start_server(config: Config, gateway: Arc<dyn RecordGateway>) -> std::io::Result<()> {
    let addr = config.listen_addr();
    let backend = config.backend.base_url.clone();
    let router = create_router(AppState::new(config, gateway));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Finboard on http://{}", addr);
    log::info!("Backend: {}", backend);
    log::info!("Available routes:");
    log::info!("  - / (Upload)");
    log::info!("  - /history (Transaction history)");
    log::info!("  - /admin (Edit, delete and categorize)");
    log::info!("  - /dataviz (Charts)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
