use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::{ConnectInfo, DefaultBodyLimit, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::commands::sweep;
use crate::controllers::paste;
use crate::error::ApiError;
use crate::store::PasteStore;
use crate::{views, App};

#[derive(Deserialize)]
struct NewPaste {
    text: Option<String>,
}

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::new(app.config.bind, app.config.port);

    let sweeper = sweep::spawn(app.clone());

    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?
        .serve(router(app).into_make_service_with_connect_info::<SocketAddr>());

    info!("listening on http://{addr}");
    server.with_graceful_shutdown(shutdown_signal()).await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }

    Ok(())
}

pub fn router(app: App) -> Router {
    Router::new()
        .route("/", get(index).post(create_paste))
        .route("/:id", get(view_paste))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

async fn shutdown_signal() {
    // if the handler can't be installed, run until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn index() -> Html<String> {
    views::index()
}

async fn create_paste(
    State(store): State<PasteStore>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    form: Option<Form<NewPaste>>,
) -> crate::ApiResult<impl IntoResponse> {
    let source = connect_info.map(|ConnectInfo(addr)| addr.ip());
    // a body that isn't a usable form carries no text
    let text = form.and_then(|Form(form)| form.text);
    let key = paste::create(&store, text, source)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, format!("/{key}"))]))
}

async fn view_paste(
    State(store): State<PasteStore>,
    Path(key): Path<String>,
) -> crate::ApiResult<Html<String>> {
    let text = paste::view(&store, &key)?;
    Ok(views::paste(&key, &text))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
