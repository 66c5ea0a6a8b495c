//! Filename parsing endpoint tests.

#[cfg(test)]
mod tests {
    use crate::TestServer;

    #[tokio::test]
    async fn test_should_extract_psd_number_from_filename() {
        let server = TestServer::empty().await;

        let resp = server
            .get("/api/psd?filename=LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv")
            .await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "success",
                "data": {
                    "filename": "LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv",
                    "psd_number": "SFDC-PSD-076858",
                }
            })
        );
    }

    #[tokio::test]
    async fn test_should_decode_percent_encoded_filename() {
        let server = TestServer::empty().await;

        let resp = server
            .get("/api/psd?filename=LegalEntityMapping_SFDC-PSD-000123_42%20copy.xlsx")
            .await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["psd_number"], "SFDC-PSD-000123");
        assert_eq!(
            body["data"]["filename"],
            "LegalEntityMapping_SFDC-PSD-000123_42 copy.xlsx"
        );
    }

    #[tokio::test]
    async fn test_should_reject_filename_outside_pattern() {
        let server = TestServer::empty().await;

        let resp = server.get("/api/psd?filename=bad_name.csv").await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "error");
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("'bad_name.csv'"), "message: {message}");
        assert!(
            message.contains("LegalEntityMapping_SFDC-PSD-{number}_{timestamp}"),
            "message: {message}"
        );
    }

    #[tokio::test]
    async fn test_should_require_filename_parameter() {
        let server = TestServer::empty().await;

        for path in ["/api/psd", "/api/psd?filename=", "/api/psd?other=x"] {
            let resp = server.get(path).await;
            assert_eq!(resp.status(), 422, "path: {path}");

            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(
                body["detail"][0]["loc"],
                serde_json::json!(["query", "filename"]),
                "path: {path}"
            );
        }
    }

    #[tokio::test]
    async fn test_should_parse_without_document_store() {
        let server = TestServer::start(crate::unreachable_cosmos_source().await).await;

        let resp = server
            .get("/api/psd?filename=LegalEntityMapping_SFDC-PSD-1_2")
            .await;
        assert_eq!(resp.status(), 200);
    }
}
