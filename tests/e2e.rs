//! End-to-end flows across the workspace: a runtime registers over
//! HTTP, a knowledge object activates against it, and execution
//! round-trips through the bound executor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use synapse_api::test_utils::MemoryArtifacts;
use synapse_api::{Adapter, AdapterError, ClientRequest, DeploymentSpec, Executor};
use synapse_client::RemoteClient;
use synapse_http::AppState;
use synapse_proxy::{ProxyAdapter, ProxyConfig};
use synapse_registry::RuntimeRegistry;
use synapse_script::ScriptAdapter;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> RemoteClient {
    RemoteClient::new().with_timeout(Duration::from_secs(2))
}

struct Proxy {
    base: String,
    registry: Arc<RuntimeRegistry>,
    artifacts: Arc<MemoryArtifacts>,
}

/// The proxy service as a host wires it: shared registry, in-memory
/// shelf, real HTTP surface on a random port.
async fn start_proxy() -> Proxy {
    let registry = Arc::new(RuntimeRegistry::new(client()));
    let artifacts = Arc::new(MemoryArtifacts::new());
    let state = Arc::new(AppState::new(registry.clone(), artifacts.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        synapse_http::serve(listener, state).await.unwrap();
    });

    Proxy {
        base: format!("http://{addr}"),
        registry,
        artifacts,
    }
}

/// Register an engine the way a runtime service does at startup.
async fn register_over_http(proxy: &Proxy, engine: &str, url: &str) {
    let reply = client()
        .post_json(
            &format!("{}/environments", proxy.base),
            &json!({"engine": engine, "url": url, "version": "1.0"}),
            &HashMap::new(),
        )
        .await
        .unwrap();
    assert!(reply.is_success(), "registration failed: {}", reply.body);
}

fn welcome_spec() -> DeploymentSpec {
    DeploymentSpec::from_value(json!({
        "engine": "node",
        "artifact": ["src/welcome.js"],
        "function": "welcome",
    }))
    .unwrap()
}

#[tokio::test]
async fn healthy_runtime_activates_and_executes() {
    let runtime = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "up"})))
        .mount(&runtime)
        .await;

    let proxy = start_proxy().await;
    proxy.artifacts.insert(
        "node/welcome-1.0/src/welcome.js",
        b"module.exports = { welcome: n => `Welcome, ${n.name}` }".to_vec(),
    );
    register_over_http(&proxy, "node", &runtime.uri()).await;

    // The runtime must see the deployment spec rewritten to pull
    // artifacts back from the proxy.
    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .and(body_json(json!({
            "engine": "node",
            "artifact": ["src/welcome.js"],
            "function": "welcome",
            "baseUrl": format!("{}/artifacts/node/welcome-1.0", proxy.base),
            "uri": "welcome",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endpoint": "/h1"})))
        .expect(1)
        .mount(&runtime)
        .await;
    Mock::given(method("POST"))
        .and(path("/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Welcome, Bob"})))
        .expect(1)
        .mount(&runtime)
        .await;

    let adapter = ProxyAdapter::new(
        proxy.registry.clone(),
        client(),
        ProxyConfig::new(&proxy.base),
    );
    let executor = adapter
        .activate("node/welcome-1.0", "welcome", &welcome_spec())
        .await
        .unwrap();

    // What the runtime does with the injected baseUrl: pull the bytes.
    let artifact = client()
        .get_json(&format!(
            "{}/artifacts/node/welcome-1.0/src/welcome.js",
            proxy.base
        ))
        .await
        .unwrap();
    assert!(artifact.is_success());
    assert!(artifact.body.contains("Welcome, ${n.name}"));

    let response = executor
        .execute(ClientRequest::new(json!({"name": "Bob"})))
        .await
        .unwrap();
    assert_eq!(response.body, json!("Welcome, Bob"));

    // The surface reports what the probes saw.
    let record = client()
        .get_json(&format!("{}/environments/node", proxy.base))
        .await
        .unwrap();
    let record: Value = record.json().unwrap();
    assert_eq!(record["status"], "up");
}

#[tokio::test]
async fn down_runtime_blocks_activation() {
    let runtime = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&runtime)
        .await;
    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endpoint": "/h1"})))
        .expect(0)
        .mount(&runtime)
        .await;

    let proxy = start_proxy().await;
    register_over_http(&proxy, "node", &runtime.uri()).await;

    let adapter = ProxyAdapter::new(
        proxy.registry.clone(),
        client(),
        ProxyConfig::new(&proxy.base),
    );
    let err = adapter
        .activate("node/welcome-1.0", "welcome", &welcome_spec())
        .await
        .unwrap_err();

    assert!(matches!(err, AdapterError::RemoteUnavailable { .. }));
    let msg = err.to_string();
    assert!(msg.contains("node"), "expected engine name in: {msg}");
    assert!(msg.contains(&runtime.uri()), "expected address in: {msg}");
}

#[tokio::test]
async fn rejected_activation_carries_the_runtimes_reason() {
    let runtime = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "up"})))
        .mount(&runtime)
        .await;
    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"description": "bad spec"})),
        )
        .mount(&runtime)
        .await;

    let proxy = start_proxy().await;
    register_over_http(&proxy, "node", &runtime.uri()).await;

    let adapter = ProxyAdapter::new(
        proxy.registry.clone(),
        client(),
        ProxyConfig::new(&proxy.base),
    );
    let err = adapter
        .activate("node/welcome-1.0", "welcome", &welcome_spec())
        .await
        .unwrap_err();

    assert!(matches!(&err, AdapterError::Client { .. }));
    assert!(err.to_string().contains("bad spec"));
}

#[tokio::test]
async fn local_and_remote_backends_share_one_contract() {
    let runtime = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "up"})))
        .mount(&runtime)
        .await;
    Mock::given(method("POST"))
        .and(path("/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endpoint": "/h1"})))
        .mount(&runtime)
        .await;
    Mock::given(method("POST"))
        .and(path("/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "remote says hi"})))
        .mount(&runtime)
        .await;

    let proxy = start_proxy().await;
    register_over_http(&proxy, "node", &runtime.uri()).await;
    proxy.artifacts.insert(
        "objects/hi-1.0/src/hi.rhai",
        "fn hi(input) { \"local says hi\" }".as_bytes().to_vec(),
    );

    let remote = ProxyAdapter::new(
        proxy.registry.clone(),
        client(),
        ProxyConfig::new(&proxy.base),
    );
    let local = ScriptAdapter::new(proxy.artifacts.clone());

    let remote_spec = DeploymentSpec::from_value(json!({
        "engine": "node",
        "artifact": "src/hi.js",
        "function": "hi",
    }))
    .unwrap();
    let local_spec = DeploymentSpec::from_value(json!({
        "engine": "rhai",
        "artifact": "src/hi.rhai",
        "function": "hi",
    }))
    .unwrap();

    // Backend choice happens at activation; afterwards both are just
    // executors.
    let executors: Vec<Arc<dyn Executor>> = vec![
        remote
            .activate("objects/hi-1.0", "hi", &remote_spec)
            .await
            .unwrap(),
        local
            .activate("objects/hi-1.0", "hi", &local_spec)
            .await
            .unwrap(),
    ];

    let mut replies = Vec::new();
    for executor in &executors {
        let response = executor
            .execute(ClientRequest::new(json!({})))
            .await
            .unwrap();
        replies.push(response.body);
    }
    assert_eq!(replies, vec![json!("remote says hi"), json!("local says hi")]);
}
