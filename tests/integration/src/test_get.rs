//! GET integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use reqwest::header::{ACCEPT, CONTENT_TYPE};

    use crate::{GRAPHQL_RESPONSE, get_url, graphql_body, http_client};

    const FORM: &str = "application/x-www-form-urlencoded";

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_execute_get_query() {
        let url = get_url(&[
            ("query", "query Q($id: Int) { item(id: $id) }"),
            ("operationName", "Q"),
            ("variables", r#"{"id":3}"#),
        ])
        .unwrap();

        let response = http_client()
            .get(url)
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .header(CONTENT_TYPE, FORM)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = graphql_body(response).await.unwrap();
        assert_eq!(body["data"]["echo"]["operationName"], "Q");
        assert_eq!(body["data"]["echo"]["variables"]["id"], 3);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_get_mutation() {
        let url = get_url(&[("query", "mutation { reset }")]).unwrap();

        let response = http_client()
            .get(url)
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .header(CONTENT_TYPE, FORM)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_get_without_query() {
        let url = get_url(&[("operationName", "Q")]).unwrap();

        let response = http_client()
            .get(url)
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .header(CONTENT_TYPE, FORM)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_collapse_get_accept_failure_to_bad_request() {
        let url = get_url(&[("query", "query { a }")]).unwrap();

        let response = http_client()
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, FORM)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_variables_json() {
        let url = get_url(&[("query", "query { a }"), ("variables", "{oops")]).unwrap();

        let response = http_client()
            .get(url)
            .header(ACCEPT, GRAPHQL_RESPONSE)
            .header(CONTENT_TYPE, FORM)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
