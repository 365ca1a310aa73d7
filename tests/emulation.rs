//! Load balancer emulation tests: plain HTTP through the adapter.

use alb_bridge::adapter::Adapter;
use alb_bridge::http::ResponseRecorder;
use alb_bridge::runtime::EchoHandler;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_echo_through_emulation() {
    let runtime = common::start_runtime(Adapter::wrap(EchoHandler)).await;

    let res = common::client()
        .get(runtime.url("/hello?name=a%20b"))
        .header("X-Custom", "yes")
        .send()
        .await
        .expect("Runtime unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[CONTENT_TYPE.as_str()], "application/json");
    let echo: Value = res.json().await.unwrap();
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["url"], format!("http://{}/hello?name=a+b", runtime.addr));
    assert_eq!(echo["headers"]["x-custom"][0], "yes");
    assert_eq!(echo["headers"]["x-forwarded-proto"][0], "http");
}

#[tokio::test]
async fn test_binary_body_survives_both_directions() {
    let adapter = Adapter::wrap(|request: Request<Bytes>, recorder: &mut ResponseRecorder| {
        recorder.write(request.body());
    });
    let runtime = common::start_runtime(adapter).await;

    let payload: Vec<u8> = (0..=255u8).rev().collect();
    let res = common::client()
        .post(runtime.url("/upload"))
        .body(payload.clone())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[CONTENT_TYPE.as_str()], "application/octet-stream");
    assert_eq!(res.bytes().await.unwrap().to_vec(), payload);
}

#[tokio::test]
async fn test_multi_mode_repeated_response_headers() {
    let adapter = Adapter::wrap(|_: Request<Bytes>, recorder: &mut ResponseRecorder| {
        recorder.set_status(StatusCode::CREATED);
        recorder.headers_mut().append(SET_COOKIE, HeaderValue::from_static("a=1"));
        recorder.headers_mut().append(SET_COOKIE, HeaderValue::from_static("b=2"));
    })
    .multi_value_headers(true);
    let runtime = common::start_runtime(adapter).await;

    let res = common::client().put(runtime.url("/session")).send().await.unwrap();

    assert_eq!(res.status(), 201);
    let cookies: Vec<_> = res
        .headers()
        .get_all(SET_COOKIE.as_str())
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

#[tokio::test]
async fn test_single_mode_collapses_repeated_response_headers() {
    let adapter = Adapter::wrap(|_: Request<Bytes>, recorder: &mut ResponseRecorder| {
        recorder.headers_mut().append(SET_COOKIE, HeaderValue::from_static("a=1"));
        recorder.headers_mut().append(SET_COOKIE, HeaderValue::from_static("b=2"));
    });
    let runtime = common::start_runtime(adapter).await;

    let res = common::client().get(runtime.url("/session")).send().await.unwrap();

    let cookies: Vec<_> = res.headers().get_all(SET_COOKIE.as_str()).iter().collect();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0], "a=1");
}
