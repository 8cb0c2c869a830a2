//! End-to-end tests against a real server on a loopback port.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use base64::prelude::*;
use coasters::{AdminGate, Coaster, Error, Store, serve_with_shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const PASSWORD: &str = "correct horse";

struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<(), Error>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = coasters::app(Arc::new(Store::new()), Arc::new(AdminGate::new(PASSWORD)));

        let (shutdown, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(serve_with_shutdown(listener, app, async {
            let _ = rx.await;
        }));

        Self { addr, shutdown, task }
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.task.await.unwrap().unwrap();
    }
}

struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Reply {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends one HTTP/1.1 request on a fresh connection and reads the reply.
async fn send(addr: SocketAddr, method: &str, path: &str, headers: &[(&str, &str)], body: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut raw = format!(
        "{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\ncontent-length: {}\r\n",
        body.len()
    );
    for (name, value) in headers {
        raw.push_str(&format!("{name}: {value}\r\n"));
    }
    raw.push_str("\r\n");
    raw.push_str(body);
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let text = String::from_utf8(buf).unwrap();

    let (head, body) = text.split_once("\r\n\r\n").unwrap();
    let mut lines = head.lines();
    let status = lines.next().unwrap().split_whitespace().nth(1).unwrap().parse().unwrap();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect();

    Reply { status, headers, body: body.to_owned() }
}

async fn post_json(addr: SocketAddr, body: &str) -> Reply {
    send(addr, "POST", "/coasters", &[("content-type", "application/json")], body).await
}

async fn get(addr: SocketAddr, path: &str) -> Reply {
    send(addr, "GET", path, &[], "").await
}

#[tokio::test]
async fn fury_325_round_trip() {
    let server = TestServer::start().await;

    let reply = post_json(
        server.addr,
        r#"{"name":"Fury 325","height":99,"in_park":"Carowinds","manufacturer":"B+M"}"#,
    )
    .await;
    assert_eq!(reply.status, 200);
    let created: Coaster = serde_json::from_str(&reply.body).unwrap();
    assert!(!created.id.is_empty());

    let location = reply.header("location").unwrap().to_owned();
    assert_eq!(location, format!("/coasters/{}", created.id));

    let reply = get(server.addr, &location).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.header("content-type"), Some("application/json"));
    let fetched: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(
        fetched,
        serde_json::json!({
            "name": "Fury 325",
            "id": created.id,
            "in_park": "Carowinds",
            "height": 99,
        })
    );

    server.stop().await;
}

#[tokio::test]
async fn list_after_posts_returns_exactly_those_records() {
    let server = TestServer::start().await;

    let mut expected = HashSet::new();
    for (i, name) in ["Kingda Ka", "Top Thrill 2", "Steel Vengeance"].iter().enumerate() {
        let body = format!(r#"{{"name":"{name}","manufacturer":"Intamin","height":{}}}"#, 100 + i);
        let reply = post_json(server.addr, &body).await;
        let created: Coaster = serde_json::from_str(&reply.body).unwrap();
        expected.insert(created.id);
    }

    let reply = get(server.addr, "/coasters").await;
    assert_eq!(reply.status, 200);
    let listed: Vec<Coaster> = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|c| c.manufacturer == "Intamin"));
    let ids: HashSet<String> = listed.into_iter().map(|c| c.id).collect();
    assert_eq!(ids, expected);

    server.stop().await;
}

#[tokio::test]
async fn random_redirect() {
    let server = TestServer::start().await;

    let reply = get(server.addr, "/coasters/random").await;
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body, "No rollercoasters in the list");
    assert_eq!(reply.header("location"), None);

    let created: Coaster = serde_json::from_str(&post_json(server.addr, r#"{"name":"solo"}"#).await.body).unwrap();

    for _ in 0..5 {
        let reply = get(server.addr, "/coasters/random").await;
        assert_eq!(reply.status, 302);
        assert_eq!(reply.header("location"), Some(format!("/coasters/{}", created.id).as_str()));
    }

    server.stop().await;
}

#[tokio::test]
async fn client_errors() {
    let server = TestServer::start().await;

    assert_eq!(get(server.addr, "/coasters/doesnotexist").await.status, 404);
    assert_eq!(get(server.addr, "/coasters/a/b").await.status, 404);
    assert_eq!(get(server.addr, "/nowhere").await.status, 404);

    let reply = post_json(server.addr, "{not json").await;
    assert_eq!(reply.status, 400);

    let reply = send(server.addr, "DELETE", "/coasters", &[], "").await;
    assert_eq!(reply.status, 405);
    assert_eq!(reply.body, "method not allowed");

    let reply = send(server.addr, "PROPFIND", "/coasters", &[], "").await;
    assert_eq!(reply.status, 405);

    let listed: Vec<Coaster> = serde_json::from_str(&get(server.addr, "/coasters").await.body).unwrap();
    assert!(listed.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn wrong_content_type_is_reported_but_stored() {
    let server = TestServer::start().await;

    let reply = send(
        server.addr,
        "POST",
        "/coasters",
        &[("content-type", "text/plain")],
        r#"{"name":"The Beast"}"#,
    )
    .await;
    assert_eq!(reply.status, 415);
    assert_eq!(reply.body, "Need content-type 'application/json' but got 'text/plain'");

    let location = reply.header("location").unwrap().to_owned();
    let fetched: Coaster = serde_json::from_str(&get(server.addr, &location).await.body).unwrap();
    assert_eq!(fetched.name, "The Beast");

    server.stop().await;
}

#[tokio::test]
async fn admin_gate() {
    let server = TestServer::start().await;
    let auth = |creds: &str| format!("Basic {}", BASE64_STANDARD.encode(creds));

    let reply = get(server.addr, "/admin").await;
    assert_eq!(reply.status, 401);
    assert_eq!(reply.body, "username or password is incorrect");

    let wrong = auth("admin:wrongpass");
    let reply = send(server.addr, "GET", "/admin", &[("authorization", wrong.as_str())], "").await;
    assert_eq!(reply.status, 401);

    let right = auth(&format!("admin:{PASSWORD}"));
    let reply = send(server.addr, "GET", "/admin", &[("authorization", right.as_str())], "").await;
    assert_eq!(reply.status, 200);
    assert!(reply.body.contains("Admin Portal"));

    server.stop().await;
}

#[tokio::test]
async fn health_endpoints() {
    let server = TestServer::start().await;

    assert_eq!(get(server.addr, "/healthz").await.body, "ok");
    assert_eq!(get(server.addr, "/readyz").await.body, "ready");

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_posts_are_all_kept() {
    let server = TestServer::start().await;
    let addr = server.addr;

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            tokio::spawn(async move {
                let reply = post_json(addr, &format!(r#"{{"name":"coaster {i}"}}"#)).await;
                assert_eq!(reply.status, 200);
                serde_json::from_str::<Coaster>(&reply.body).unwrap().id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), 100);

    let listed: Vec<Coaster> = serde_json::from_str(&get(addr, "/coasters").await.body).unwrap();
    let listed: HashSet<String> = listed.into_iter().map(|c| c.id).collect();
    assert_eq!(listed, ids);

    server.stop().await;
}
