//! Upload fragment - forwards the chosen file to the backend

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::response::Html;
use finboard_utils::escape_html;

use crate::AppState;

pub const SELECT_FILE_MESSAGE: &str = "Please select a file.";

/// First `file` part of the form, `None` when no file was chosen
async fn read_file(multipart: &mut Multipart) -> Result<Option<(String, Vec<u8>)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Ok(None);
        }
        let bytes = field.bytes().await?;
        return Ok(Some((file_name, bytes.to_vec())));
    }
    Ok(None)
}

/// The backend's answer is shown as-is
pub async fn htmx_upload(State(state): State<AppState>, mut multipart: Multipart) -> Html<String> {
    let (file_name, bytes) = match read_file(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return Html(format!("<p class='text-red-600'>{}</p>", SELECT_FILE_MESSAGE));
        }
        Err(e) => {
            log::error!("Failed to read upload form: {}", e);
            return Html(String::new());
        }
    };

    match state.gateway.upload(&file_name, bytes).await {
        Ok(text) => {
            log::info!("Uploaded {}", file_name);
            Html(format!("<p class='text-gray-700'>{}</p>", escape_html(&text)))
        }
        Err(e) => {
            log::error!("Failed to upload {}: {}", file_name, e);
            Html(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SELECT_FILE_MESSAGE;
    use crate::tests::{get, send, test_state, FakeGateway};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;

    fn multipart_request(file_name: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: text/csv\r\n\r\n{}\r\n--XBOUNDARY--\r\n",
            file_name, content
        );
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_forwards_file() {
        let gateway = Arc::new(FakeGateway::default());
        let state = test_state(gateway.clone());

        let (_, body) = send(&state, multipart_request("extrato.csv", "a,b,c")).await;
        assert!(body.contains("File uploaded successfully"));
        assert_eq!(
            *gateway.uploads.lock().unwrap(),
            vec![("extrato.csv".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn test_upload_large_file() {
        let gateway = Arc::new(FakeGateway::default());
        let state = test_state(gateway.clone());

        let content = "x".repeat(3 * 1024 * 1024);
        let (_, body) = send(&state, multipart_request("big.csv", &content)).await;
        assert!(!body.contains(SELECT_FILE_MESSAGE));
        assert_eq!(
            *gateway.uploads.lock().unwrap(),
            vec![("big.csv".to_string(), content.len())]
        );
    }

    #[tokio::test]
    async fn test_truncated_form_is_not_a_missing_file() {
        let gateway = Arc::new(FakeGateway::default());
        let state = test_state(gateway.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(
                "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.csv\"\r\n\r\na,b",
            ))
            .unwrap();
        let (_, body) = send(&state, request).await;
        assert!(body.is_empty());
        assert!(gateway.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_file() {
        let gateway = Arc::new(FakeGateway::default());
        let state = test_state(gateway.clone());

        let (_, body) = send(&state, multipart_request("", "")).await;
        assert!(body.contains(SELECT_FILE_MESSAGE));
        assert!(gateway.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_page_has_form() {
        let state = test_state(Arc::new(FakeGateway::default()));
        let (_, body) = send(&state, get("/")).await;
        assert!(body.contains("hx-encoding='multipart/form-data'"));
        assert!(body.contains("name='file'"));
    }
}
