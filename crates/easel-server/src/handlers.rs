//! Request handlers. Each one is a thin wrapper over the canvas store or renderer.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use bytes::Bytes;
use easel_core::{
    CanvasDocument, CanvasError, Circle, Element, ElementId, ElementPatch, Image, Line, Rectangle, Shape, Text,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitRequest {
    pub canvas_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub url: String,
}

/// Health check
pub async fn health() -> &'static str {
    "ok"
}

pub async fn init_canvas(State(state): State<AppState>, Json(req): Json<InitRequest>) -> Json<CanvasDocument> {
    info!("Initializing canvas {} ({}x{})", req.canvas_id, req.width, req.height);
    Json(state.store.initialize(req.canvas_id, req.width, req.height))
}

pub async fn get_canvas(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
) -> ApiResult<Json<CanvasDocument>> {
    Ok(Json(state.store.get(&canvas_id)?))
}

pub async fn add_rectangle(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    Json(rectangle): Json<Rectangle>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.add_rectangle(&canvas_id, rectangle)?))
}

pub async fn add_circle(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    Json(circle): Json<Circle>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.add_circle(&canvas_id, circle)?))
}

pub async fn add_text(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    Json(text): Json<Text>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.add_text(&canvas_id, text)?))
}

pub async fn add_line(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    Json(line): Json<Line>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.add_line(&canvas_id, line)?))
}

/// Any element kind, selected by the body's `type` field.
pub async fn add_element(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    Json(shape): Json<Shape>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.add_element(&canvas_id, shape)?))
}

/// Multipart upload: an `image` file plus `x`, `y`, `width` and `height` fields.
///
/// Omitted geometry fields are stored as NaN; the element then draws nothing.
pub async fn add_image(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<Element>> {
    // Fail before storing the upload.
    if !state.store.contains(&canvas_id) {
        return Err(CanvasError::CanvasNotFound(canvas_id).into());
    }

    let mut upload: Option<(Option<String>, Bytes)> = None;
    let (mut x, mut y, mut width, mut height) = (f64::NAN, f64::NAN, f64::NAN, f64::NAN);

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                upload = Some((file_name, field.bytes().await?));
            }
            "x" => x = parse_number(&name, &field.text().await?)?,
            "y" => y = parse_number(&name, &field.text().await?)?,
            "width" => width = parse_number(&name, &field.text().await?)?,
            "height" => height = parse_number(&name, &field.text().await?)?,
            _ => debug!("Ignoring multipart field {:?}", name),
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| ApiError::BadRequest("missing image file".into()))?;
    let size = bytes.len();
    let path = state.uploads.store(file_name.as_deref(), bytes).await?;
    info!("Stored upload {} ({} bytes) for canvas {}", path, size, canvas_id);

    Ok(Json(state.store.add_image(&canvas_id, Image::new(x, y, width, height, path))?))
}

fn parse_number(field: &str, value: &str) -> ApiResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("field {field} is not a number: {value:?}")))
}

pub async fn update_element(
    State(state): State<AppState>,
    Path((canvas_id, element_id)): Path<(String, ElementId)>,
    Json(patch): Json<ElementPatch>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.update_element(&canvas_id, element_id, &patch)?))
}

pub async fn delete_element(
    State(state): State<AppState>,
    Path((canvas_id, element_id)): Path<(String, ElementId)>,
) -> ApiResult<Json<Element>> {
    Ok(Json(state.store.delete_element(&canvas_id, element_id)?))
}

pub async fn clear_canvas(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
) -> ApiResult<Json<CanvasDocument>> {
    Ok(Json(state.store.clear(&canvas_id)?))
}

pub async fn undo(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
) -> ApiResult<Json<CanvasDocument>> {
    Ok(Json(state.store.undo(&canvas_id)?))
}

pub async fn element_at(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
    Query(point): Query<PointQuery>,
) -> ApiResult<Json<Option<Element>>> {
    Ok(Json(state.store.element_at(&canvas_id, point.x, point.y)?))
}

pub async fn preview(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let doc = state.store.get(&canvas_id)?;
    let png = state.renderer.render_png(doc.width, doc.height, &doc.elements).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, png.len().to_string()),
        ],
        png,
    ))
}

pub async fn export(
    State(state): State<AppState>,
    Path(canvas_id): Path<String>,
) -> ApiResult<Json<ExportResponse>> {
    let doc = state.store.get(&canvas_id)?;
    let pdf = state.renderer.render_pdf(doc.width, doc.height, &doc.elements).await?;
    let url = state.exports.write(&canvas_id, &pdf).await?;
    info!("Exported canvas {} to {}", canvas_id, url);
    Ok(Json(ExportResponse { url }))
}
