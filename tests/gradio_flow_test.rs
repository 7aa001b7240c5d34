//! Gradio space 呼び出しのテスト
//!
//! ローカルのHTTPサーバーで upload → call → イベントストリーム の3段階を再現する

mod support;

use health_ai_common::{
    validate_image, AnalysisOutcome, AnalysisSession, Category, ChatTranscript, Detection, Notice,
    UploadCandidate,
};
use health_ai_rust::analyzer::run_analysis;
use health_ai_rust::api::{Classifier, GradioChatBackend, GradioClient, GradioSkinClassifier};
use health_ai_rust::chat::send_message;
use health_ai_rust::error::HealthAiError;
use std::time::Duration;
use support::{FakeServer, Reply};

const UPLOADED_PATH: &str = "/tmp/gradio/abc123/mole.jpg";

fn client(server: &FakeServer, token: Option<&str>) -> GradioClient {
    GradioClient::new(
        &server.base_url,
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .expect("client build failed")
}

/// 予測結果 `prediction`（JSON）を返す皮膚解析space
async fn skin_space(prediction: &'static str) -> FakeServer {
    FakeServer::start(move |request| match request.line().as_str() {
        "POST /gradio_api/upload" => Reply::json(format!("[\"{}\"]", UPLOADED_PATH)),
        "POST /gradio_api/call/predict" => Reply::json(r#"{"event_id":"abc"}"#),
        "GET /gradio_api/call/predict/abc" => Reply::event_stream(format!(
            "event: generating\ndata: null\n\nevent: complete\ndata: [{}]\n\n",
            prediction
        )),
        other => Reply::error(404, format!("unexpected request: {}", other)),
    })
    .await
}

#[tokio::test]
async fn test_skin_prediction_runs_three_steps() {
    let server = skin_space(r#""Melanoma (92.5%)""#).await;
    let classifier = GradioSkinClassifier::new(client(&server, Some("hf_test")));
    let image = validate_image("mole.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff]).unwrap();

    let detection = classifier.classify(&[image]).await.unwrap();
    assert_eq!(detection, Detection::condition("Melanoma", Some(92.5)));

    assert_eq!(
        server.request_lines(),
        vec![
            "POST /gradio_api/upload",
            "POST /gradio_api/call/predict",
            "GET /gradio_api/call/predict/abc",
        ]
    );

    let requests = server.requests();
    for request in &requests {
        assert_eq!(request.header("authorization"), Some("Bearer hf_test"));
    }

    let upload = &requests[0];
    assert!(upload
        .header("content-type")
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    assert!(upload.body_text().contains("name=\"files\""));
    assert!(upload.body_text().contains("filename=\"mole.jpg\""));

    let call = requests[1].body_json();
    assert_eq!(call["data"][0]["path"], UPLOADED_PATH);
    assert_eq!(call["data"][0]["orig_name"], "mole.jpg");
    assert_eq!(call["data"][0]["meta"]["_type"], "gradio.FileData");
}

#[tokio::test]
async fn test_anonymous_access_sends_no_authorization() {
    let server = skin_space(r#""Acne""#).await;
    let classifier = GradioSkinClassifier::new(client(&server, None));
    let image = validate_image("spot.png", "image/png", vec![1]).unwrap();

    let detection = classifier.classify(&[image]).await.unwrap();
    assert_eq!(detection, Detection::condition("Acne", Some(90.0)));

    for request in server.requests() {
        assert!(request.header("authorization").is_none());
    }
}

#[tokio::test]
async fn test_label_prediction_through_session() {
    let server = skin_space(
        r#"{"label":"Nevus","confidences":[{"label":"Nevus","confidence":0.75},{"label":"Melanoma","confidence":0.2}]}"#,
    )
    .await;
    let classifier = GradioSkinClassifier::new(client(&server, None));

    let mut session = AnalysisSession::single(Category::Skin);
    session
        .select_image(UploadCandidate::new("mole.jpg", "image/jpeg", vec![1, 2]))
        .unwrap();

    let outcome = run_analysis(&mut session, &classifier).await.unwrap();
    assert_eq!(outcome.notice(), Notice::AnalysisCompleted);

    let result = session.result().unwrap();
    assert_eq!(result.condition, "Nevus");
    assert!(result.recognized);
    assert!((result.confidence.unwrap() - 75.0).abs() < 1e-3);
}

#[tokio::test]
async fn test_upload_error_is_truncated() {
    let server = FakeServer::start(|_| Reply::error(500, "x".repeat(500))).await;
    let classifier = GradioSkinClassifier::new(client(&server, None));
    let image = validate_image("mole.jpg", "image/jpeg", vec![1]).unwrap();

    let err = classifier.classify(&[image]).await.unwrap_err();
    match err {
        HealthAiError::ApiCall(message) => {
            assert!(message.contains("500"));
            assert!(message.ends_with(&"x".repeat(200)));
            assert!(!message.contains(&"x".repeat(201)));
        }
        other => panic!("ApiCall expected: {:?}", other),
    }

    // 失敗したら後続の呼び出しはしない
    assert_eq!(server.request_lines(), vec!["POST /gradio_api/upload"]);
}

#[tokio::test]
async fn test_stream_error_becomes_failed_outcome() {
    let server = FakeServer::start(|request| match request.line().as_str() {
        "POST /gradio_api/upload" => Reply::json(format!("[\"{}\"]", UPLOADED_PATH)),
        "POST /gradio_api/call/predict" => Reply::json(r#"{"event_id":"e1"}"#),
        _ => Reply::event_stream("event: error\ndata: \"GPU quota exceeded\"\n\n"),
    })
    .await;
    let classifier = GradioSkinClassifier::new(client(&server, None));

    let mut session = AnalysisSession::single(Category::Skin);
    session
        .select_image(UploadCandidate::new("mole.jpg", "image/jpeg", vec![1]))
        .unwrap();

    let outcome = run_analysis(&mut session, &classifier).await.unwrap();
    match &outcome {
        AnalysisOutcome::Failed { reason } => assert!(reason.contains("GPU quota exceeded")),
        other => panic!("Failed expected: {:?}", other),
    }
    assert_eq!(outcome.notice(), Notice::AnalysisFailed);
    assert!(!session.is_analyzing());
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_chat_request_and_reply() {
    let server = FakeServer::start(|request| match request.line().as_str() {
        "POST /gradio_api/call/chat" => Reply::json(r#"{"event_id":"c1"}"#),
        "GET /gradio_api/call/chat/c1" => {
            Reply::event_stream("event: complete\ndata: [\"Take a deep breath.\"]\n\n")
        }
        other => Reply::error(404, format!("unexpected request: {}", other)),
    })
    .await;
    let backend = GradioChatBackend::new(client(&server, None));
    let mut transcript = ChatTranscript::new();

    let reply = send_message(&mut transcript, &backend, "I feel anxious")
        .await
        .unwrap();
    assert_eq!(reply.text, "Take a deep breath.");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let body = requests[0].body_json();
    let data = &body["data"];
    assert_eq!(data[0], "I feel anxious");
    assert_eq!(
        data[1],
        "You are Dr. Well Being, a mental health assistant. Provide supportive, empathetic responses."
    );
    assert_eq!(data[2], 256);
    assert!((data[3].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert!((data[4].as_f64().unwrap() - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn test_chat_service_down_appends_apology() {
    let server = FakeServer::start(|_| Reply::error(503, "sleeping")).await;
    let backend = GradioChatBackend::new(client(&server, None));
    let mut transcript = ChatTranscript::new();

    let reply = send_message(&mut transcript, &backend, "hello").await.unwrap();
    assert_eq!(reply.text, health_ai_common::chat::CHAT_APOLOGY);
    assert_eq!(transcript.len(), 3);
}
