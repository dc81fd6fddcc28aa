//! Route table.

use crate::handlers::{
    add_circle, add_element, add_image, add_line, add_rectangle, add_text, clear_canvas, delete_element,
    element_at, export, get_canvas, health, init_canvas, preview, undo, update_element,
};
use crate::state::AppState;
use crate::storage::ExportStore;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted image upload.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());
    let exports = ServeDir::new(state.exports.dir());

    Router::new()
        .route("/health", get(health))
        .route("/api/canvas/init", post(init_canvas))
        .route("/api/canvas/{canvas_id}", get(get_canvas))
        .route("/api/canvas/{canvas_id}/rectangle", post(add_rectangle))
        .route("/api/canvas/{canvas_id}/circle", post(add_circle))
        .route("/api/canvas/{canvas_id}/text", post(add_text))
        .route("/api/canvas/{canvas_id}/line", post(add_line))
        .route(
            "/api/canvas/{canvas_id}/image",
            post(add_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/canvas/{canvas_id}/element", post(add_element))
        .route(
            "/api/canvas/{canvas_id}/element/{element_id}",
            put(update_element).delete(delete_element),
        )
        .route("/api/canvas/{canvas_id}/element-at", get(element_at))
        .route("/api/canvas/{canvas_id}/clear", post(clear_canvas))
        .route("/api/canvas/{canvas_id}/undo", post(undo))
        .route("/api/canvas/{canvas_id}/preview", get(preview))
        .route("/api/canvas/{canvas_id}/export", post(export))
        .nest_service("/uploads", uploads)
        .nest_service(ExportStore::URL_PREFIX, exports)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsUploadStore;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use easel_core::CanvasStore;
    use easel_render::{Color, FontBook, FsAssetLoader, Pixmap, RasterRenderer, encode_png};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        state: AppState,
        _dir: TempDir,
    }

    fn app_with(store: CanvasStore) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let uploads = FsUploadStore::new(dir.path().join("uploads")).unwrap();
        let exports = ExportStore::new(dir.path().join("exports")).unwrap();
        let renderer = RasterRenderer::new(FontBook::empty(), Arc::new(FsAssetLoader::new()));
        let state = AppState::new(store, renderer, Arc::new(uploads), exports);
        TestApp {
            router: router(state.clone()),
            state,
            _dir: dir,
        }
    }

    fn app() -> TestApp {
        app_with(CanvasStore::new())
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
            (status, headers, body)
        }

        async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let (status, _, body) = self.send(request).await;
            // Extractor rejections answer in plain text.
            let value = serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
            (status, value)
        }

        async fn init(&self, id: &str, width: u32, height: u32) {
            let (status, _) = self
                .call(
                    Method::POST,
                    "/api/canvas/init",
                    Some(json!({ "canvasId": id, "width": width, "height": height })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, _, body) = app
            .send(Request::get("/health").body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_reference_flow() {
        let app = app();
        app.init("c1", 100, 100).await;

        let (status, rect) = app
            .call(
                Method::POST,
                "/api/canvas/c1/rectangle",
                Some(json!({ "x": 10, "y": 10, "width": 20, "height": 20, "color": "#000", "isFilled": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rect["type"], "rectangle");
        assert_eq!(rect["isFilled"], true);

        let (_, circle) = app
            .call(
                Method::POST,
                "/api/canvas/c1/circle",
                Some(json!({ "x": 50, "y": 50, "radius": 10, "color": "#f00", "isFilled": false })),
            )
            .await;
        assert!(circle["id"].as_u64().unwrap() > rect["id"].as_u64().unwrap());

        let (status, canvas) = app.call(Method::POST, "/api/canvas/c1/undo", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(canvas["elements"], json!([rect.clone()]));

        let (_, hit) = app.call(Method::GET, "/api/canvas/c1/element-at?x=15&y=15", None).await;
        assert_eq!(hit, rect);
        let (status, miss) = app.call(Method::GET, "/api/canvas/c1/element-at?x=5&y=5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(miss, Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_canvas_is_404() {
        let app = app();
        for (method, uri) in [
            (Method::GET, "/api/canvas/nope"),
            (Method::POST, "/api/canvas/nope/undo"),
            (Method::GET, "/api/canvas/nope/preview"),
            (Method::POST, "/api/canvas/nope/export"),
            (Method::GET, "/api/canvas/nope/element-at?x=1&y=1"),
        ] {
            let (status, body) = app.call(method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert!(body["error"].as_str().unwrap().contains("nope"));
        }
    }

    #[tokio::test]
    async fn test_undo_without_history_is_404() {
        let app = app();
        app.init("c1", 10, 10).await;
        let (status, body) = app.call(Method::POST, "/api/canvas/c1/undo", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_generic_element_route() {
        let app = app();
        app.init("c1", 50, 50).await;

        let (status, element) = app
            .call(
                Method::POST,
                "/api/canvas/c1/element",
                Some(json!({ "type": "line", "startX": 0, "startY": 0, "endX": 5, "endY": 5, "color": "#00f", "extra": 1 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(element["type"], "line");
        assert!(element.get("extra").is_none());

        let (status, _) = app
            .call(Method::POST, "/api/canvas/c1/element", Some(json!({ "type": "hexagon" })))
            .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_create_with_missing_geometry() {
        let app = app();
        app.init("c1", 50, 50).await;

        let (status, rect) = app
            .call(
                Method::POST,
                "/api/canvas/c1/rectangle",
                Some(json!({ "y": 1, "width": 2, "height": 3, "color": "#000", "isFilled": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rect["x"], Value::Null);
        assert_eq!(rect["y"], 1.0);

        // Stored and previewable; the shape itself draws nothing.
        let (status, canvas) = app.call(Method::GET, "/api/canvas/c1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(canvas["elements"][0], rect);
        let (status, _, _) = app
            .send(Request::get("/api/canvas/c1/preview").body(Body::empty()).unwrap())
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_overwrites_absent_fields() {
        let app = app();
        app.init("c1", 50, 50).await;
        let (_, circle) = app
            .call(
                Method::POST,
                "/api/canvas/c1/circle",
                Some(json!({ "x": 1, "y": 2, "radius": 3, "color": "#f00", "isFilled": true })),
            )
            .await;
        let uri = format!("/api/canvas/c1/element/{}", circle["id"]);

        let (status, updated) = app.call(Method::PUT, &uri, Some(json!({ "radius": 7 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["radius"], 7.0);
        assert_eq!(updated["x"], Value::Null);
        assert_eq!(updated["color"], "");
        assert_eq!(updated["isFilled"], false);

        let (status, _) = app
            .call(Method::PUT, "/api/canvas/c1/element/999", Some(json!({ "x": 1 })))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_partial_update_mode() {
        let app = app_with(CanvasStore::new().with_update_mode(easel_core::UpdateMode::Partial));
        app.init("c1", 50, 50).await;
        let (_, rect) = app
            .call(
                Method::POST,
                "/api/canvas/c1/rectangle",
                Some(json!({ "x": 1, "y": 2, "width": 3, "height": 4, "color": "#f00", "isFilled": true })),
            )
            .await;
        let uri = format!("/api/canvas/c1/element/{}", rect["id"]);

        let (_, updated) = app.call(Method::PUT, &uri, Some(json!({ "width": 9 }))).await;
        assert_eq!(updated["x"], 1.0);
        assert_eq!(updated["width"], 9.0);
        assert_eq!(updated["color"], "#f00");
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let app = app();
        app.init("c1", 50, 50).await;
        let (_, text) = app
            .call(
                Method::POST,
                "/api/canvas/c1/text",
                Some(json!({ "x": 0, "y": 0, "text": "hi", "fontSize": 12, "color": "#000" })),
            )
            .await;
        assert_eq!(text["fontSize"], 12.0);

        let uri = format!("/api/canvas/c1/element/{}", text["id"]);
        let (status, deleted) = app.call(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, text);

        let (_, canvas) = app.call(Method::POST, "/api/canvas/c1/clear", None).await;
        assert_eq!(canvas["elements"], json!([]));
        assert_eq!(app.state.store.history_depth("c1").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_preview_png() {
        let app = app();
        app.init("c1", 30, 20).await;
        let (status, headers, body) = app
            .send(Request::get("/api/canvas/c1/preview").body(Body::empty()).unwrap())
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(headers[header::CONTENT_LENGTH], body.len().to_string().as_str());
        assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_zero_sized_canvas_preview_is_422() {
        let app = app();
        app.init("c1", 0, 20).await;
        let (status, body) = app.call(Method::GET, "/api/canvas/c1/preview", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_export_writes_pdf() {
        let app = app();
        app.init("my canvas", 30, 20).await;
        let (status, body) = app.call(Method::POST, "/api/canvas/my%20canvas/export", None).await;
        assert_eq!(status, StatusCode::OK);

        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("/exports/canvas-my_canvas-"));
        assert!(url.ends_with(".pdf"));

        let (status, _, pdf) = app.send(Request::get(url).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_image_upload() {
        let app = app();
        app.init("c1", 20, 20).await;

        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(Color::from_rgba8(0, 0, 255, 255));
        let png = encode_png(&pixmap).unwrap();

        let boundary = "XBOUNDARYX";
        let mut body = Vec::new();
        for (name, value) in [("x", "2"), ("y", "3"), ("width", "10"), ("height", "10")] {
            body.extend_from_slice(
                format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                    .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"dot.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&png);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::post("/api/canvas/c1/image")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();
        let (status, _, body) = app.send(request).await;
        assert_eq!(status, StatusCode::OK);

        let element: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(element["type"], "image");
        assert_eq!(element["x"], 2.0);
        assert_eq!(element["height"], 10.0);
        let path = element["path"].as_str().unwrap();
        assert!(path.ends_with(".png"));
        assert_eq!(std::fs::read(path).unwrap(), png);

        // The stored upload is drawn by the preview.
        let doc = app.state.store.get("c1").unwrap();
        let raster = app.state.renderer.render(20, 20, &doc.elements).await.unwrap();
        let c = raster.pixel(7, 8).unwrap().demultiply();
        assert_eq!((c.red(), c.green(), c.blue()), (0, 0, 255));
    }

    #[tokio::test]
    async fn test_image_upload_requires_file() {
        let app = app();
        app.init("c1", 20, 20).await;
        let boundary = "B";
        let body = format!("--{boundary}\r\nContent-Disposition: form-data; name=\"x\"\r\n\r\n1\r\n--{boundary}--\r\n");
        let request = Request::post("/api/canvas/c1/image")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();
        let (status, _, _) = app.send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
