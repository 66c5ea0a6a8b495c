//! Parent ID lookup endpoint tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use psdapi_core::store::UnavailableStore;

    use crate::{TestServer, main_parent, unreachable_cosmos_source};

    #[tokio::test]
    async fn test_should_return_parent_id_of_active_record() {
        let server =
            TestServer::with_documents([main_parent("SFDC-PSD-076858", "0015g00000ABCDE", 10)])
                .await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-076858").await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "success",
                "data": {
                    "psd_number": "SFDC-PSD-076858",
                    "parent_id": "0015g00000ABCDE",
                }
            })
        );
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_unknown_psd_number() {
        let server =
            TestServer::with_documents([main_parent("SFDC-PSD-076858", "0015g00000ABCDE", 10)])
                .await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-000000").await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "not_found",
                "message": "No parent ID found for PSD: SFDC-PSD-000000",
            })
        );
    }

    #[tokio::test]
    async fn test_should_ignore_inactive_and_other_record_types() {
        let mut inactive = main_parent("SFDC-PSD-1", "inactive", 10);
        inactive["active"] = serde_json::json!(false);
        let mut child = main_parent("SFDC-PSD-1", "child", 20);
        child["dType"] = serde_json::json!("entity");

        let server = TestServer::with_documents([inactive, child]).await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-1").await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_should_treat_record_without_parent_id_as_not_found() {
        let server = TestServer::with_documents([serde_json::json!({
            "dType": "main_parent",
            "psd_number": "SFDC-PSD-1",
            "active": true,
        })])
        .await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-1").await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_should_prefer_most_recently_written_record() {
        let server = TestServer::with_documents([
            main_parent("SFDC-PSD-1", "old", 100),
            main_parent("SFDC-PSD-1", "new", 300),
            main_parent("SFDC-PSD-1", "mid", 200),
        ])
        .await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-1").await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["parent_id"], "new");
    }

    #[tokio::test]
    async fn test_should_report_store_connection_failure() {
        let server = TestServer::start(unreachable_cosmos_source().await).await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-1").await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "error");
        let message = body["message"].as_str().unwrap();
        assert!(
            message.starts_with("Failed to fetch parent ID: "),
            "message: {message}"
        );
    }

    #[tokio::test]
    async fn test_should_report_missing_store_configuration() {
        let source = Arc::new(UnavailableStore::new(
            "Missing required environment variables: COSMOS_DB_URL and COSMOS_DB_KEY must be set",
        ));
        let server = TestServer::start(source).await;

        let resp = server.get("/api/id?psd_number=SFDC-PSD-1").await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body["message"],
            "Failed to fetch parent ID: Missing required environment variables: \
             COSMOS_DB_URL and COSMOS_DB_KEY must be set"
        );
    }

    #[tokio::test]
    async fn test_should_require_psd_number_parameter() {
        let server = TestServer::empty().await;

        for path in ["/api/id", "/api/id?psd_number="] {
            let resp = server.get(path).await;
            assert_eq!(resp.status(), 422, "path: {path}");

            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["detail"][0]["type"], "missing");
            assert_eq!(body["detail"][0]["loc"][1], "psd_number");
        }
    }
}
