use crate::{
    ExporterError, NodeCollector, NodeNameFilter, NodeUrl, StatsFetcher, build_http_client,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn create_test_collector(mock_server: &MockServer, node_name: Option<&str>) -> NodeCollector {
    let fetcher = StatsFetcher::new(build_http_client().unwrap());
    NodeCollector::new(
        fetcher,
        NodeUrl::new(mock_server.uri()).unwrap(),
        NodeNameFilter::from_option(node_name.map(str::to_string)),
    )
}

fn two_node_cluster() -> serde_json::Value {
    serde_json::json!({
        "name": "default",
        "storageTotals": {
            "ram": { "total": 16000, "quotaTotal": 8000, "used": 12000, "usedByData": 1000 },
            "hdd": { "total": 900000, "quotaTotal": 900000, "used": 300000, "usedByData": 20000, "free": 600000 }
        },
        "nodes": [
            {
                "hostname": "web-1:8091",
                "status": "healthy",
                "uptime": "3600",
                "systemStats": {
                    "cpu_utilization_rate": 35.5,
                    "swap_total": 2048,
                    "swap_used": 128,
                    "mem_total": 8192,
                    "mem_free": 4096
                },
                "interestingStats": {
                    "cmd_get": 12.9,
                    "curr_items": 42,
                    "curr_items_tot": 84,
                    "get_hits": 11.2,
                    "mem_used": 512,
                    "ops": 25.7,
                    "vb_replica_curr_items": 42
                }
            },
            {
                "hostname": "db-1:8091",
                "status": "unhealthy",
                "uptime": "60",
                "interestingStats": { "curr_items": 7 }
            }
        ]
    })
}

#[tokio::test]
async fn test_collect_full_cluster() {
    let mock_server = MockServer::start().await;
    let collector = create_test_collector(&mock_server, None);

    Mock::given(method("GET"))
        .and(path("/pools/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_node_cluster()))
        .mount(&mock_server)
        .await;

    let samples = collector.collect().await.unwrap();
    assert_eq!(samples.len(), 7 + 19 * 2);

    let source = mock_server.uri();
    let value_of = |name: &str, hostname: Option<&str>| {
        samples
            .iter()
            .find(|s| s.name() == name && s.label("hostname") == hostname)
            .map(|s| s.value())
            .unwrap()
    };

    assert_eq!(value_of("storage_hdd_used", None), 300000);
    assert_eq!(value_of("storage_hdd_free", None), 600000);
    assert_eq!(value_of("storage_ram_usedbydata", None), 1000);
    assert_eq!(value_of("curr_items", Some("web-1:8091")), 42);
    assert_eq!(value_of("curr_items", Some("db-1:8091")), 7);
    assert_eq!(value_of("cmd_get", Some("web-1:8091")), 12);
    assert_eq!(value_of("cpu_utilization_rate", Some("web-1:8091")), 35);
    assert_eq!(value_of("mem_total", Some("db-1:8091")), 0);
    assert_eq!(value_of("uptime", Some("web-1:8091")), 3600);
    assert_eq!(value_of("status", Some("web-1:8091")), 1);
    assert_eq!(value_of("status", Some("db-1:8091")), 0);
    assert!(samples.iter().all(|s| s.label("source") == Some(source.as_str())));
}

#[tokio::test]
async fn test_collect_with_node_name_filter() {
    let mock_server = MockServer::start().await;
    let collector = create_test_collector(&mock_server, Some("web"));

    Mock::given(method("GET"))
        .and(path("/pools/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_node_cluster()))
        .mount(&mock_server)
        .await;

    let samples = collector.collect().await.unwrap();
    assert_eq!(samples.len(), 7 + 19);
    assert!(
        samples
            .iter()
            .all(|s| s.label("hostname").is_none_or(|h| h == "web-1:8091"))
    );
}

#[tokio::test]
async fn test_collect_upstream_failure() {
    let mock_server = MockServer::start().await;
    let collector = create_test_collector(&mock_server, None);

    Mock::given(method("GET"))
        .and(path("/pools/default"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Node is not ready"))
        .mount(&mock_server)
        .await;

    let result = collector.collect().await;
    assert!(matches!(
        result,
        Err(ExporterError::Upstream { status: 503, ref body }) if body == "Node is not ready"
    ));
}

#[tokio::test]
async fn test_collect_malformed_body() {
    let mock_server = MockServer::start().await;
    let collector = create_test_collector(&mock_server, None);

    Mock::given(method("GET"))
        .and(path("/pools/default"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    assert!(matches!(
        collector.collect().await,
        Err(ExporterError::Decode(_))
    ));
}
