use neugraph_server::{NeugraphServer, ServerConfig, ServerError};
use neugraph_store::{save_graph, Graph, GraphError, Link, Node};
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        port: 0,
        bind_address: "127.0.0.1".to_string(),
        graph_file: dir.path().join("graph.json"),
        static_dir: None,
        log_level: "debug".to_string(),
        json_logs: false,
    }
}

#[tokio::test]
async fn test_open_loads_configured_file() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let graph = Graph::new(
        vec![Node::new("A", 1, 1), Node::new("B", 1, 2)],
        vec![Link::new("A", "B", 5.0)],
    );
    save_graph(&config.graph_file, &graph).await.unwrap();

    let server = NeugraphServer::open(config).await.unwrap();
    assert_eq!(*server.store().get_graph().await, graph);
}

#[tokio::test]
async fn test_open_fails_without_graph_file() {
    let dir = TempDir::new().unwrap();

    let result = NeugraphServer::open(config_for(&dir)).await;
    assert!(matches!(result, Err(ServerError::Store(GraphError::Io { .. }))));
}

#[tokio::test]
async fn test_open_fails_on_dangling_links() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let graph = Graph::new(vec![Node::new("A", 1, 1)], vec![Link::new("A", "B", 1.0)]);
    save_graph(&config.graph_file, &graph).await.unwrap();

    let result = NeugraphServer::open(config).await;
    assert!(matches!(result, Err(ServerError::Store(GraphError::InvalidGraph(_)))));
}

#[tokio::test]
async fn test_run_reports_bind_failure() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    save_graph(&config.graph_file, &Graph::new(vec![Node::new("A", 1, 1)], vec![]))
        .await
        .unwrap();

    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    config.port = taken.local_addr().unwrap().port();

    let server = NeugraphServer::open(config).await.unwrap();
    match server.run().await {
        Err(ServerError::Bind { address, .. }) => assert!(address.starts_with("127.0.0.1:")),
        other => panic!("unexpected result: {:?}", other),
    }
}
