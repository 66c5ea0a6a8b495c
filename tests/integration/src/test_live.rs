//! Smoke tests against an externally started server.

#[cfg(test)]
mod tests {
    use crate::{http_client, live_endpoint_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_running_server_healthy() {
        let resp = http_client()
            .get(format!("{}/health", live_endpoint_url()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_parse_filename_on_running_server() {
        let resp = http_client()
            .get(format!(
                "{}/api/psd?filename=LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv",
                live_endpoint_url()
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["psd_number"], "SFDC-PSD-076858");
    }
}
