//! POST integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use reqwest::header::{ACCEPT, CONTENT_TYPE};
    use serde_json::json;

    use crate::{GRAPHQL_RESPONSE, endpoint_url, graphql_body, http_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_execute_post_request() {
        let response = http_client()
            .post(endpoint_url())
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .json(&json!({"query": "{ hello }", "operationName": "Hello", "variables": {"n": 1}}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = graphql_body(response).await.unwrap();
        assert_eq!(body["data"]["echo"]["query"], "{ hello }");
        assert_eq!(body["data"]["echo"]["operationName"], "Hello");
        assert_eq!(body["data"]["echo"]["variables"]["n"], 1);
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_post_without_accept() {
        let response = http_client()
            .post(endpoint_url())
            .header(CONTENT_TYPE, "application/json")
            .body(r#"{"query":"{ hello }"}"#)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = graphql_body(response).await.unwrap();
        assert!(body.get("data").is_none());
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_post_with_unacceptable_accept() {
        let response = http_client()
            .post(endpoint_url())
            .header(ACCEPT, "application/json")
            .json(&json!({"query": "{ hello }"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_post_with_malformed_body() {
        let response = http_client()
            .post(endpoint_url())
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .header(CONTENT_TYPE, "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = graphql_body(response).await.unwrap();
        assert_eq!(body["errors"][0]["message"], "Bad Request");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_put() {
        let response = http_client()
            .put(endpoint_url())
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
