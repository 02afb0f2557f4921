//! Remote data gateway for the transaction backend
//!
//! Every call goes to one configured base URL. Nothing is retried; callers
//! log failures and keep their state.

pub mod error;
pub mod poller;

use async_trait::async_trait;
use finboard_core::{
    AggregateQuery, AggregateRow, DataEnvelope, ProgressSnapshot, Record, RecordId,
};
use reqwest::{multipart, Client, Response, Url};
use serde::de::DeserializeOwned;

pub use error::{GatewayError, GatewayResult};
pub use poller::{PollHandle, ProgressPoller};

/// Backend operations used by the dashboard
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// `GET /data`
    async fn list(&self) -> GatewayResult<Vec<Record>>;

    /// `POST /admin/edit/{id}` with `{"category": ...}`, returns the updated record
    async fn edit_category(&self, id: &RecordId, category: &str) -> GatewayResult<Record>;

    /// `DELETE /admin/delete/{id}`
    async fn delete_one(&self, id: &RecordId) -> GatewayResult<()>;

    /// `POST /admin/delete-all`
    async fn delete_all(&self) -> GatewayResult<()>;

    /// `POST /upload` as multipart field `file`; the response text is passed through
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> GatewayResult<String>;

    /// `POST /categorize-transactions`
    async fn trigger_categorization(&self) -> GatewayResult<()>;

    /// `GET /categorize-progress`
    async fn progress(&self) -> GatewayResult<ProgressSnapshot>;

    /// `GET /agg_data`
    async fn aggregates(&self, query: &AggregateQuery) -> GatewayResult<Vec<AggregateRow>>;
}

/// reqwest-backed gateway
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        let invalid = |reason: &str| GatewayError::InvalidUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base"));
        }

        Ok(Self {
            client: Client::new(),
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> GatewayResult<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| GatewayError::transport(endpoint, e))?;
    serde_json::from_slice(&body)
        .map_err(|e| GatewayError::decode(endpoint, format!("{} (status {})", e, status)))
}

fn warn_unless_success(endpoint: &str, response: &Response) {
    if !response.status().is_success() {
        log::warn!("{} answered {}, continuing", endpoint, response.status());
    }
}

#[async_trait]
impl RecordGateway for HttpGateway {
    async fn list(&self) -> GatewayResult<Vec<Record>> {
        let endpoint = "/data";
        log::debug!("GET {}", endpoint);
        let response = self
            .client
            .get(self.url(&["data"])?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))?;
        let envelope: DataEnvelope<Record> = decode(endpoint, response).await?;
        Ok(envelope.data)
    }

    async fn edit_category(&self, id: &RecordId, category: &str) -> GatewayResult<Record> {
        let id = id.to_string();
        let endpoint = format!("/admin/edit/{}", id);
        log::debug!("POST {} category={}", endpoint, category);
        let response = self
            .client
            .post(self.url(&["admin", "edit", &id])?)
            .json(&serde_json::json!({ "category": category }))
            .send()
            .await
            .map_err(|e| GatewayError::transport(&endpoint, e))?;
        decode(&endpoint, response).await
    }

    async fn delete_one(&self, id: &RecordId) -> GatewayResult<()> {
        let id = id.to_string();
        let endpoint = format!("/admin/delete/{}", id);
        log::debug!("DELETE {}", endpoint);
        let response = self
            .client
            .delete(self.url(&["admin", "delete", &id])?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(&endpoint, e))?;
        warn_unless_success(&endpoint, &response);
        Ok(())
    }

    async fn delete_all(&self) -> GatewayResult<()> {
        let endpoint = "/admin/delete-all";
        log::debug!("POST {}", endpoint);
        let response = self
            .client
            .post(self.url(&["admin", "delete-all"])?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))?;
        warn_unless_success(endpoint, &response);
        Ok(())
    }

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> GatewayResult<String> {
        let endpoint = "/upload";
        log::debug!("POST {} file={} ({} bytes)", endpoint, file_name, bytes.len());
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url(&["upload"])?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))?;
        warn_unless_success(endpoint, &response);
        response
            .text()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))
    }

    async fn trigger_categorization(&self) -> GatewayResult<()> {
        let endpoint = "/categorize-transactions";
        log::debug!("POST {}", endpoint);
        let response = self
            .client
            .post(self.url(&["categorize-transactions"])?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))?;
        warn_unless_success(endpoint, &response);
        Ok(())
    }

    async fn progress(&self) -> GatewayResult<ProgressSnapshot> {
        let endpoint = "/categorize-progress";
        let response = self
            .client
            .get(self.url(&["categorize-progress"])?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))?;
        decode(endpoint, response).await
    }

    async fn aggregates(&self, query: &AggregateQuery) -> GatewayResult<Vec<AggregateRow>> {
        let endpoint = "/agg_data";
        let pairs = query.to_query_pairs();
        log::debug!("GET {} {:?}", endpoint, pairs);
        let response = self
            .client
            .get(self.url(&["agg_data"])?)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| GatewayError::transport(endpoint, e))?;
        let envelope: DataEnvelope<AggregateRow> = decode(endpoint, response).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, Path, RawQuery, State};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use finboard_core::TransactionType;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Seen {
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl Seen {
        fn push(&self, entry: String) {
            self.requests.lock().unwrap().push(entry);
        }

        fn all(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    async fn mock_backend() -> (HttpGateway, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route(
                "/data",
                get(|| async {
                    Json(serde_json::json!({"data": [
                        {"id": 1, "date": "02/01/2024", "description": "Market", "source": "checking", "category": null, "value": -54.3},
                        {"id": 2, "date": "03/01/2024", "description": "Salary", "source": "checking", "category": "Income", "value": "5000"}
                    ]}))
                }),
            )
            .route(
                "/admin/edit/:id",
                post(
                    |State(seen): State<Seen>, Path(id): Path<String>, Json(body): Json<serde_json::Value>| async move {
                        seen.push(format!("edit {} {}", id, body));
                        if id == "404" {
                            return (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "not found"})));
                        }
                        (
                            StatusCode::OK,
                            Json(serde_json::json!({
                                "id": id.parse::<i64>().unwrap(),
                                "date": "02/01/2024",
                                "description": "Market",
                                "category": body["category"],
                                "value": -54.3
                            })),
                        )
                    },
                ),
            )
            .route(
                "/admin/delete/:id",
                delete(|State(seen): State<Seen>, Path(id): Path<String>| async move {
                    seen.push(format!("delete {}", id));
                    StatusCode::INTERNAL_SERVER_ERROR
                }),
            )
            .route(
                "/admin/delete-all",
                post(|State(seen): State<Seen>| async move {
                    seen.push("delete-all".to_string());
                    StatusCode::OK
                }),
            )
            .route(
                "/upload",
                post(|State(seen): State<Seen>, mut multipart: Multipart| async move {
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        let name = field.name().unwrap_or_default().to_string();
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        let bytes = field.bytes().await.unwrap();
                        seen.push(format!("upload {} {} {}", name, file_name, bytes.len()));
                    }
                    "File uploaded successfully"
                }),
            )
            .route(
                "/categorize-progress",
                get(|| async { Json(serde_json::json!({"current": 3, "total": 8})) }),
            )
            .route(
                "/agg_data",
                get(|State(seen): State<Seen>, RawQuery(query): RawQuery| async move {
                    seen.push(format!("agg {}", query.unwrap_or_default()));
                    Json(serde_json::json!({"data": [
                        {"category": "Food", "date": "01/01/2024", "sum": -120.5, "count": 4}
                    ]}))
                }),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (HttpGateway::new(&format!("http://{}", addr)).unwrap(), seen)
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpGateway::new("not a url"),
            Err(GatewayError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpGateway::new("ftp://example.com"),
            Err(GatewayError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_url_joins_segments() {
        let gateway = HttpGateway::new("http://127.0.0.1:5000/").unwrap();
        let url = gateway.url(&["admin", "edit", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/admin/edit/a%2Fb");
    }

    #[tokio::test]
    async fn test_list_decodes_records() {
        let (gateway, _) = mock_backend().await;
        let records = gateway.list().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[1].amount(), Some(5000.0));
        assert_eq!(records[1].category.as_deref(), Some("Income"));
    }

    #[tokio::test]
    async fn test_edit_sends_category_body() {
        let (gateway, seen) = mock_backend().await;
        let record = gateway.edit_category(&RecordId::Int(42), "Food").await.unwrap();

        assert_eq!(seen.all(), vec![r#"edit 42 {"category":"Food"}"#.to_string()]);
        assert_eq!(record.id, RecordId::Int(42));
        assert_eq!(record.category.as_deref(), Some("Food"));
        assert_eq!(record.source, None);
    }

    #[tokio::test]
    async fn test_edit_error_body_is_decode_error() {
        let (gateway, _) = mock_backend().await;
        let result = gateway.edit_category(&RecordId::Int(404), "Food").await;
        assert!(matches!(result, Err(GatewayError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_delete_tolerates_server_error() {
        let (gateway, seen) = mock_backend().await;
        gateway.delete_one(&RecordId::Int(7)).await.unwrap();
        gateway.delete_all().await.unwrap();
        assert_eq!(seen.all(), vec!["delete 7".to_string(), "delete-all".to_string()]);
    }

    #[tokio::test]
    async fn test_upload_sends_file_field() {
        let (gateway, seen) = mock_backend().await;
        let text = gateway
            .upload("extrato.csv", b"date,description,value\n".to_vec())
            .await
            .unwrap();

        assert_eq!(text, "File uploaded successfully");
        assert_eq!(seen.all(), vec!["upload file extrato.csv 23".to_string()]);
    }

    #[tokio::test]
    async fn test_progress_snapshot() {
        let (gateway, _) = mock_backend().await;
        let snapshot = gateway.progress().await.unwrap();
        assert_eq!(snapshot, ProgressSnapshot { current: 3, total: 8 });
    }

    #[tokio::test]
    async fn test_aggregates_repeat_filters() {
        let (gateway, seen) = mock_backend().await;
        let query = AggregateQuery {
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            group_by: Default::default(),
            transaction_types: vec![TransactionType::Credit, TransactionType::Debit],
            transaction_sources: vec!["checking".to_string(), "credit_card".to_string()],
        };
        let rows = gateway.aggregates(&query).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 4);
        assert_eq!(
            seen.all(),
            vec!["agg start_date=2024-01-01&end_date=2024-01-31&group_by=month&transaction_type=credit&transaction_type=debit&transaction_source=checking&transaction_source=credit_card".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:1").unwrap();
        let result = gateway.list().await;
        assert!(matches!(result, Err(GatewayError::Transport { .. })));
    }
}
