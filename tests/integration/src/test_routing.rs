//! Routing, health, and common header tests.

#[cfg(test)]
mod tests {
    use crate::TestServer;

    #[tokio::test]
    async fn test_should_answer_health_probe() {
        let server = TestServer::empty().await;

        for path in ["/health", "/_health"] {
            let resp = server.get(path).await;
            assert_eq!(resp.status(), 200, "path: {path}");

            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["status"], "running");
            assert_eq!(body["service"], "psdapi");
        }
    }

    #[tokio::test]
    async fn test_should_set_common_headers() {
        let server = TestServer::empty().await;

        let first = server.get("/health").await;
        let second = server.get("/health").await;

        assert_eq!(first.headers()["server"], "psdapi");
        let first_id = first.headers()["x-request-id"].to_str().unwrap().to_owned();
        let second_id = second.headers()["x-request-id"].to_str().unwrap().to_owned();
        assert!(!first_id.is_empty());
        assert_ne!(first_id, second_id);
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_unknown_path() {
        let server = TestServer::empty().await;

        let resp = server.get("/api/unknown").await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, serde_json::json!({"detail": "Not Found"}));
    }

    #[tokio::test]
    async fn test_should_reject_non_get_methods() {
        let server = TestServer::empty().await;

        let resp = server
            .request(reqwest::Method::POST, "/api/psd?filename=x")
            .await;
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "GET");

        let resp = server
            .request(reqwest::Method::DELETE, "/api/id?psd_number=x")
            .await;
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn test_should_accept_trailing_slash() {
        let server = TestServer::empty().await;

        let resp = server
            .get("/api/psd/?filename=LegalEntityMapping_SFDC-PSD-1_2")
            .await;
        assert_eq!(resp.status(), 200);
    }
}
