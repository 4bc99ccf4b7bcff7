use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use service::{slash::directory::Directory, storage::PersDict};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes::{self, CceState, CerinoState, MemeState, ServerState};

const MEME_TOKEN: &str = "meme-secret";
const CCE_TOKEN: &str = "cce-secret";
const CERINO_TOKEN: &str = "cerino-secret";

struct TestApp {
    base_url: String,
    store: Arc<PersDict>,
    store_path: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated store file per test run
    let store_path = std::env::temp_dir().join(format!("slashbots_e2e_{}.json", Uuid::new_v4()));
    let store = PersDict::open(&store_path).await?;
    let directory = Directory::from_names(["ada.lovelace", "alan.turing"], "https://example.org/{name}.jpg");

    let state = ServerState {
        meme: MemeState { store: Arc::clone(&store), token: MEME_TOKEN.into() },
        cce: Some(CceState { directory: Arc::new(directory), token: CCE_TOKEN.into() }),
        cerino: Some(CerinoState { token: CERINO_TOKEN.into() }),
    };

    let app: Router = routes::build_router(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, store, store_path })
}

impl TestApp {
    async fn slash(&self, route: &str, token: &str, text: &str) -> anyhow::Result<reqwest::Response> {
        let form = [("token", token), ("command", route), ("text", text), ("user_name", "tester")];
        let res = reqwest::Client::new()
            .post(format!("{}{}", self.base_url, route))
            .form(&form)
            .send()
            .await?;
        Ok(res)
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_file(&self.store_path).await;
    }
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_wrong_token_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.slash("/meme", "nope", "list").await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["text"], "invalid request");

    // the token of one command does not open another
    let res = app.slash("/cce", MEME_TOKEN, "ada").await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_meme_add_list_lookup() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app.slash("/meme", MEME_TOKEN, "list").await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["response_type"], "ephemeral");
    assert_eq!(body["text"], "no entries available");

    let body = app.slash("/meme", MEME_TOKEN, "add lol http://x").await?.json::<serde_json::Value>().await?;
    assert_eq!(body["text"], "OK");
    assert_eq!(app.store.keys().await, vec!["lol".to_string()]);

    let body = app.slash("/meme", MEME_TOKEN, "lol").await?.json::<serde_json::Value>().await?;
    assert_eq!(body["response_type"], "in_channel");
    assert_eq!(body["text"], "http://x");

    // persisted to disk as a flat JSON object
    let on_disk: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&app.store_path).await?)?;
    assert_eq!(on_disk, serde_json::json!({"lol": "http://x"}));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_meme_empty_text_is_help() -> anyhow::Result<()> {
    let app = start_server().await?;
    let empty = app.slash("/meme", MEME_TOKEN, "").await?.json::<serde_json::Value>().await?;
    let help = app.slash("/meme", MEME_TOKEN, "help").await?.json::<serde_json::Value>().await?;
    assert_eq!(empty, help);
    assert_eq!(help["response_type"], "ephemeral");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_cce_lookup() -> anyhow::Result<()> {
    let app = start_server().await?;
    let body = app.slash("/cce", CCE_TOKEN, "Turing").await?.json::<serde_json::Value>().await?;
    assert_eq!(body["response_type"], "in_channel");
    assert_eq!(body["text"], "![](https://example.org/alan.turing.jpg)");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_cerino_pick() -> anyhow::Result<()> {
    let app = start_server().await?;
    let body = app.slash("/cerino", CERINO_TOKEN, "tea coffee").await?.json::<serde_json::Value>().await?;
    assert_eq!(body["response_type"], "in_channel");
    let text = body["text"].as_str().unwrap_or_default();
    assert!(text.starts_with("Out of the following candidates: tea,coffee\n"), "{text}");

    let body = app.slash("/cerino", CERINO_TOKEN, "tea").await?.json::<serde_json::Value>().await?;
    assert_eq!(body["response_type"], "ephemeral");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_unconfigured_command_is_not_routed() -> anyhow::Result<()> {
    let store_path = std::env::temp_dir().join(format!("slashbots_e2e_{}.json", Uuid::new_v4()));
    let state = ServerState {
        meme: MemeState { store: PersDict::open(&store_path).await?, token: MEME_TOKEN.into() },
        cce: None,
        cerino: None,
    };
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, routes::build_router(state)).await;
    });

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/cerino"))
        .form(&[("token", CERINO_TOKEN), ("command", "/cerino"), ("text", "a b")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.slash("/meme", MEME_TOKEN, "list").await?;
    let text = reqwest::get(format!("{}/metrics", app.base_url)).await?.text().await?;
    assert!(text.contains("slashbots_requests_total"));
    app.cleanup().await;
    Ok(())
}
