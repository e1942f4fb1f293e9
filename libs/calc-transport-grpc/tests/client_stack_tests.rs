#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Client connection stack against a real listener.

use std::time::{Duration, Instant};

use calc_transport_grpc::client::{GrpcClientConfig, connect_with_retry, connect_with_stack};
use calc_transport_grpc::{BoundGrpcServer, GrpcServerConfig};
use tokio_util::sync::CancellationToken;
use tonic::service::RoutesBuilder;
use tonic::transport::Channel;

struct RawClient {
    _channel: Channel,
}

impl From<Channel> for RawClient {
    fn from(channel: Channel) -> Self {
        Self { _channel: channel }
    }
}

fn fast_config() -> GrpcClientConfig {
    GrpcClientConfig::new("test")
        .with_connect_timeout(Duration::from_millis(200))
        .with_backoff(Duration::from_millis(5), Duration::from_millis(10))
}

/// Bind and immediately release an ephemeral port so nothing listens on it.
async fn closed_port_uri() -> String {
    let cfg = GrpcServerConfig::new("127.0.0.1:0".parse().unwrap());
    let server = BoundGrpcServer::bind(&cfg).await.unwrap();
    let uri = server.endpoint();
    drop(server);
    uri
}

#[tokio::test]
async fn connects_to_running_server() {
    let cfg = GrpcServerConfig::new("127.0.0.1:0".parse().unwrap());
    let server = BoundGrpcServer::bind(&cfg).await.unwrap();
    let uri = server.endpoint();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(server.serve(RoutesBuilder::default().routes(), cancel.clone()));

    let client = connect_with_stack::<RawClient>(uri, &fast_config()).await;
    assert!(client.is_ok(), "should connect to a listening server");

    cancel.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn invalid_uri_is_rejected() {
    let result = connect_with_stack::<RawClient>("not a uri", &fast_config()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn retry_gives_up_on_closed_port() {
    let uri = closed_port_uri().await;
    let cfg = fast_config().with_max_retries(2);

    let started = Instant::now();
    let err = connect_with_retry::<RawClient>(uri.clone(), &cfg)
        .await
        .err()
        .expect("nothing is listening");

    let message = format!("{err:#}");
    assert!(message.contains("after 3 attempts"), "unexpected error: {message}");
    assert!(message.contains(&uri), "error should name the uri: {message}");
    assert!(started.elapsed() >= Duration::from_millis(15));
}

#[tokio::test]
async fn retry_without_retries_fails_once() {
    let uri = closed_port_uri().await;
    let cfg = fast_config().with_max_retries(0);

    let err = connect_with_retry::<RawClient>(uri, &cfg)
        .await
        .err()
        .expect("nothing is listening");

    assert!(format!("{err:#}").contains("after 1 attempts"));
}
