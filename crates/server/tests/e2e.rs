use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = server::build_app(&AppConfig::default());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_attendance_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/subjects", app.base_url)).json(&json!({"name": "Math"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let subject = res.json::<serde_json::Value>().await?;
    let sid = subject["id"].as_u64().expect("subject id");

    let res = c
        .post(format!("{}/subjects/{}/students", app.base_url, sid))
        .json(&json!({"name": "Ann"}))
        .send()
        .await?;
    let student = res.json::<serde_json::Value>().await?;
    assert_eq!(student["status"], "Absent");

    let res = c
        .post(format!("{}/subjects/{}/attendance/{}", app.base_url, sid, student["id"]))
        .json(&json!({"status": "Present"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let list = c.get(format!("{}/subjects", app.base_url)).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(list[0]["students"][0]["status"], "Present");
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_is_permitted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/subjects", app.base_url))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
