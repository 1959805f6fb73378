//! REST key-value backend (Upstash/Vercel KV protocol).
//!
//! `GET {url}/get/{key}` answers `{"result": <string|null>}` and
//! `POST {url}/set/{key}` stores the request body. Both take a bearer token.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Record, StorageError};

#[derive(Debug, Deserialize)]
struct KvResponse {
    #[serde(default)]
    result: Option<Value>,
}

/// Client for a REST key-value store.
pub struct KvStore {
    inner: reqwest::Client,
    base_url: String,
    token: String,
}

impl KvStore {
    /// Create a new key-value client.
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Read every record of a dataset.
    ///
    /// The value is normally a JSON string holding an array, but clients
    /// that store the array directly are read as well.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        let key = R::DATASET.key();
        let records = match self.get(key).await? {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
            Some(Value::String(s)) => serde_json::from_str(&s)?,
            Some(value) => serde_json::from_value(value)?,
        };

        debug!(key = %key, count = records.len(), "Loaded records from key-value store");
        Ok(records)
    }

    /// Overwrite a dataset with a JSON array.
    pub async fn save<R: Record>(&self, records: &[R]) -> Result<(), StorageError> {
        let key = R::DATASET.key();
        let body = serde_json::to_string(records)?;
        self.set(key, body).await?;

        debug!(key = %key, count = records.len(), "Saved records to key-value store");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let url = format!("{}/get/{}", self.base_url, key);
        debug!(url = %url, "GET request");

        let response = self.inner.get(&url).bearer_auth(&self.token).send().await?;
        let response = check_status(response).await?;
        let body: KvResponse = response.json().await?;
        Ok(body.result)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let url = format!("{}/set/{}", self.base_url, key);
        debug!(url = %url, bytes = value.len(), "POST request");

        let response = self
            .inner
            .post(&url)
            .bearer_auth(&self.token)
            .body(value)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = %status, body = %body, "Key-value store request failed");
    Err(StorageError::Backend {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfloor_core::{AttendanceRecord, MaterialRecord};
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_parses_string_value() {
        let server = MockServer::start().await;
        let stored = r#"[{"date":"2024-05-01","shift":"A","emp_id":"E1","present":true}]"#;
        Mock::given(method("GET"))
            .and(path("/get/attendance_data"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": stored })))
            .mount(&server)
            .await;

        let store = KvStore::new(&server.uri(), "secret");
        let records: Vec<AttendanceRecord> = store.load().await.unwrap();

        assert_eq!(records, vec![AttendanceRecord::new("2024-05-01", "A", "E1", true)]);
    }

    #[tokio::test]
    async fn test_load_accepts_decoded_array_and_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get/attendance_data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [{"date": "2024-05-01", "shift": "A", "emp_id": "E2", "present": "False"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/get/material_data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": null })))
            .mount(&server)
            .await;

        let store = KvStore::new(&server.uri(), "secret");
        let attendance: Vec<AttendanceRecord> = store.load().await.unwrap();
        let materials: Vec<MaterialRecord> = store.load().await.unwrap();

        assert_eq!(attendance.len(), 1);
        assert!(!attendance[0].present);
        assert!(materials.is_empty());
    }

    #[tokio::test]
    async fn test_save_posts_json_array() {
        let server = MockServer::start().await;
        let records = vec![AttendanceRecord::new("2024-05-01", "A", "E1", false)];
        let expected = serde_json::to_string(&records).unwrap();
        Mock::given(method("POST"))
            .and(path("/set/attendance_data"))
            .and(body_string(expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "OK" })))
            .expect(1)
            .mount(&server)
            .await;

        let store = KvStore::new(&format!("{}/", server.uri()), "secret");
        store.save(&records).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_value_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get/attendance_data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "not json" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/get/material_data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": {"date": "2024-05-01"} })))
            .mount(&server)
            .await;

        let store = KvStore::new(&server.uri(), "secret");

        let attendance = store.load::<AttendanceRecord>().await;
        assert!(matches!(attendance, Err(StorageError::Json(_))));

        let materials = store.load::<MaterialRecord>().await;
        assert!(matches!(materials, Err(StorageError::Json(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let store = KvStore::new(&server.uri(), "wrong");
        let result = store.load::<AttendanceRecord>().await;

        assert!(matches!(
            result,
            Err(StorageError::Backend { status: 401, ref body }) if body == "unauthorized"
        ));
    }
}
