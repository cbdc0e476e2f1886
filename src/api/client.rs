use serde_json::Value;

use super::error::ApiError;
use super::wire::{self, ApiVersion, Task, TaskRequest, API_VERSION_HEADER};

/// HTTP client for the todo-list service.
///
/// Cheap to clone; every call carries the dialect it was issued under in the
/// `API-Version` header. No retry and no timeout, matching the service
/// contract: a hung server simply leaves the call pending.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the full task list under the given dialect.
    ///
    /// A non-success status and a non-JSON body are both reported as errors;
    /// shape mismatches below the JSON level (not an array, missing `tasks`
    /// field) decode to an empty list instead, see [`wire::decode_tasks`].
    pub async fn fetch_tasks(&self, version: ApiVersion) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/api/"))
            .header(API_VERSION_HEADER, version.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        Ok(wire::decode_tasks(version, body))
    }

    /// Add a task with the given description.
    ///
    /// Fire-and-forget beyond the transport level: the response status is not
    /// inspected, and the v2 response body (the created task) is parsed only
    /// to be logged. The subsequent reload is what actually updates the list.
    pub async fn add_task(&self, version: ApiVersion, description: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/tasks"))
            .header(API_VERSION_HEADER, version.as_str())
            .json(&TaskRequest { description })
            .send()
            .await?;

        if version == ApiVersion::V2 {
            match response.json::<Value>().await {
                Ok(body) => tracing::debug!("add response: {body}"),
                Err(e) => tracing::debug!("add response body was not JSON: {e}"),
            }
        }

        Ok(())
    }

    /// Delete the task with the given description.
    ///
    /// Deletion is keyed by description under both dialects, even when v2
    /// supplies an id. Same fire-and-forget semantics as [`Self::add_task`].
    pub async fn delete_task(
        &self,
        version: ApiVersion,
        description: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/delete"))
            .header(API_VERSION_HEADER, version.as_str())
            .json(&TaskRequest { description })
            .send()
            .await?;

        if version == ApiVersion::V2 {
            match response.json::<Value>().await {
                Ok(body) => tracing::debug!("delete response: {body}"),
                Err(e) => tracing::debug!("delete response body was not JSON: {e}"),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// An address nothing is listening on, for transport-failure tests.
    fn dead_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[tokio::test]
    async fn test_fetch_tasks_v1() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(header("API-Version", "v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"description": "Buy groceries"},
                {"description": "Walk the dog"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let tasks = client.fetch_tasks(ApiVersion::V1).await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "Buy groceries");
    }

    #[tokio::test]
    async fn test_fetch_tasks_v2_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(header("API-Version", "v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": "v2",
                "count": 1,
                "tasks": [{"description": "Ship it", "id": 3, "status": "open"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let tasks = client.fetch_tasks(ApiVersion::V2).await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, Some(3));
    }

    #[tokio::test]
    async fn test_fetch_tasks_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.fetch_tasks(ApiVersion::V1).await.unwrap_err();

        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_fetch_tasks_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.fetch_tasks(ApiVersion::V1).await.unwrap_err();

        assert!(matches!(err, ApiError::Shape(_)));
    }

    #[tokio::test]
    async fn test_add_task_sends_description_and_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .and(header("API-Version", "v1"))
            .and(body_json(json!({"description": "Buy milk"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        client.add_task(ApiVersion::V1, "Buy milk").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_task_ignores_error_status() {
        // The add call is fire-and-forget: a 409 from the server still
        // resolves successfully at the transport level.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "error": "Task already exists"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        assert!(client.add_task(ApiVersion::V2, "dup").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_task_sends_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/delete"))
            .and(header("API-Version", "v2"))
            .and(body_json(json!({"description": "Walk the dog"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Task deleted successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        client
            .delete_task(ApiVersion::V2, "Walk the dog")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let client = ApiClient::new(dead_endpoint());

        let err = client.fetch_tasks(ApiVersion::V1).await.unwrap_err();
        assert!(err.is_transport());

        let err = client.add_task(ApiVersion::V1, "x").await.unwrap_err();
        assert!(err.is_transport());
    }
}
