use entity_lookup::lookup::UNEXPECTED_ERROR_MESSAGE;
use entity_lookup::{
    BackendError, EntityLookup, HttpSearchBackend, LookupConfig, LookupError, SearchBackend,
    SearchOutcome, SearchRequest, SearchType,
};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn posts_request_and_parses_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "searchTerm": "51824753556",
            "searchType": "ABN"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {"abnNumber": "51824753556", "entityName": "Big Bang"},
                "totalCount": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let backend = HttpSearchBackend::new(&format!("{}/search", server.url())).unwrap();
    let response = backend
        .search(SearchRequest::new("51824753556", SearchType::Abn))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.total_count, Some(1));
    assert_eq!(response.data["entityName"], "Big Bang");
    mock.assert_async().await;
}

#[tokio::test]
async fn sends_page_parameters_when_present() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .match_body(Matcher::PartialJson(json!({"pageNumber": 2, "pageSize": 10})))
        .with_status(200)
        .with_body(r#"{"success": true, "data": []}"#)
        .create_async()
        .await;

    let backend = HttpSearchBackend::new(&format!("{}/search", server.url())).unwrap();
    backend
        .search(SearchRequest::new("acme", SearchType::Name).with_page(2, 10))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_is_a_transport_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(502)
        .with_body("upstream register unavailable")
        .create_async()
        .await;

    let backend = HttpSearchBackend::new(&format!("{}/search", server.url())).unwrap();
    let err = backend
        .search(SearchRequest::new("acme", SearchType::Name))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 502, ref body } if body.contains("unavailable")));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let backend = HttpSearchBackend::new(&format!("{}/search", server.url())).unwrap();
    let err = backend
        .search(SearchRequest::new("acme", SearchType::Name))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn lookup_over_http_hides_transport_detail() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(500)
        .with_body("stack trace: NullPointerException at Registry.java:42")
        .create_async()
        .await;

    let backend = HttpSearchBackend::new(&format!("{}/search", server.url())).unwrap();
    let config = LookupConfig::builder().component_name("abnLookup").build().unwrap();
    let lookup = EntityLookup::new(config, backend);
    lookup.input("acme").unwrap();

    let err = lookup.search().await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(BackendError::Status { status: 500, .. })));
    assert_eq!(lookup.state().error_message(), Some(UNEXPECTED_ERROR_MESSAGE));
}

#[tokio::test]
async fn lookup_over_http_normalizes_results() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "data": [
                    {"abnNumber": "51824753556", "entityName": "Big Bang", "abnStatus": "Active"},
                    {"abnNumber": "33051775556", "entityName": "Small Bang"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let backend = HttpSearchBackend::new(&format!("{}/search", server.url())).unwrap();
    let config = LookupConfig::builder().component_name("abnLookup").build().unwrap();
    let lookup = EntityLookup::new(config, backend);
    lookup.input("bang").unwrap();

    assert_eq!(lookup.search().await.unwrap(), SearchOutcome::Results { count: 2 });
    let rows = lookup.current_page().items;
    assert_eq!(rows[0].formatted_identifier(), "51 824 753 556");
    assert_eq!(rows[1].entity_status, "N/A");
}

#[tokio::test]
async fn client_timeout_is_reported_as_timeout() {
    // Accepts the connection and never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let address = listener.local_addr().expect("listener address");
    let _hold = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let limit = std::time::Duration::from_millis(150);
    let backend = HttpSearchBackend::with_timeout(&format!("http://{address}/search"), limit)
        .expect("valid endpoint");
    assert_eq!(backend.timeout(), limit);

    let err = backend
        .search(SearchRequest::new("acme", SearchType::Name))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Timeout(d) if d == limit), "got {err:?}");
    assert!(err.is_connection_failure());
}
