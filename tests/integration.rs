use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use study_assistant::{
    ai::{GeminiTextClient, MockTextGenerator},
    app::{App, Tab},
    diagram::extract_diagram,
    gateway::{StudyGateway, QUIZ_FAILED, QUIZ_INVALID_FORMAT, QUIZ_INVALID_OPTIONS},
    models::Config,
    quiz::{self, AnswerSheet},
    views::ViewStatus,
    GatewayErrorKind,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn five_question_payload() -> String {
    let items: Vec<_> = (0..5)
        .map(|i| {
            json!({
                "question": format!("Question {}?", i + 1),
                "options": [
                    format!("{}-A", i),
                    format!("{}-B", i),
                    format!("{}-C", i),
                    format!("{}-D", i)
                ],
                "correctAnswer": format!("{}-C", i),
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_explain_with_diagram_end_to_end() {
    let response = "## Photosynthesis\n\nPlants convert light into chemical energy.\n\n```mermaid\ngraph TD\n    Sun --> Leaf\n    Leaf --> Glucose\n```\n\n- Occurs in chloroplasts\n";
    let mock = MockTextGenerator::new().with_response(response);
    let mut app = App::with_backend(Arc::new(mock));

    assert!(app.explain("Explain photosynthesis").await);

    let view = app.solver_mut();
    assert_eq!(view.status(), ViewStatus::Succeeded);
    assert!(!view.explanation().contains("```"));
    assert_eq!(
        view.explanation(),
        "## Photosynthesis\n\nPlants convert light into chemical energy.\n\n\n\n- Occurs in chloroplasts"
    );
    assert_eq!(
        view.take_render_request().as_deref(),
        Some("graph TD\n    Sun --> Leaf\n    Leaf --> Glucose")
    );
}

#[tokio::test]
async fn test_quiz_all_correct_scores_full_marks() {
    let mock = MockTextGenerator::new().with_response(five_question_payload());
    let mut app = App::with_backend(Arc::new(mock));

    assert!(app.generate_quiz("Some source passage.", 5).await);
    assert_eq!(app.active_tab(), Tab::Quiz);

    let questions = app.quiz().questions().unwrap().to_vec();
    assert_eq!(questions.len(), 5);
    for q in &questions {
        assert_eq!(q.options.len(), 4);
        assert!(q.options.contains(&q.correct_answer));
    }

    for (i, q) in questions.iter().enumerate() {
        assert!(app.quiz_mut().select_answer(i, &q.correct_answer));
    }
    assert_eq!(app.quiz_mut().submit_answers(), Some(5));
}

#[tokio::test]
async fn test_quiz_with_three_options_is_rejected() {
    let payload = json!([
        { "question": "Q1", "options": ["a", "b", "c", "d"], "correctAnswer": "a" },
        { "question": "Q2", "options": ["a", "b", "c"], "correctAnswer": "a" }
    ])
    .to_string();
    let mock = MockTextGenerator::new().with_response(payload);
    let mut app = App::with_backend(Arc::new(mock));

    assert!(app.generate_quiz("text", 2).await);
    assert_eq!(app.quiz().error(), Some(QUIZ_INVALID_OPTIONS));
    assert!(app.quiz().questions().is_none());
}

#[tokio::test]
async fn test_gateway_over_http_quiz_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(&five_question_payload())))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiTextClient::new(
        "test-key".to_string(),
        "gemini-2.5-flash".to_string(),
        Duration::from_secs(5),
    )
    .with_base_url(server.uri());
    let gateway = StudyGateway::new(Arc::new(client));

    let questions = gateway.generate_quiz("Cell biology notes", 5).await.unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0].question, "Question 1?");

    let answers: AnswerSheet = (0..5).map(|i| (i, format!("{}-C", i))).collect();
    assert_eq!(quiz::score(&questions, &answers), 5);
}

#[tokio::test]
async fn test_gateway_over_http_maps_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let config = Config {
        api_key: "k".to_string(),
        model: "gemini-2.5-flash".to_string(),
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
    };
    let gateway = StudyGateway::new(Arc::new(GeminiTextClient::from_config(&config)));

    let err = gateway.generate_quiz("text", 3).await.unwrap_err();
    assert_eq!(err.kind(), GatewayErrorKind::Transport);
    assert_eq!(err.to_string(), QUIZ_FAILED);
    assert!(!err.to_string().contains("exploded"));
}

#[tokio::test]
async fn test_gateway_over_http_malformed_json_is_format_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("[{\"question\": \"Q\"")))
        .mount(&server)
        .await;

    let client = GeminiTextClient::new("k".to_string(), "gemini-2.5-flash".to_string(), Duration::from_secs(5))
        .with_base_url(server.uri());
    let gateway = StudyGateway::new(Arc::new(client));

    let err = gateway.generate_quiz("text", 1).await.unwrap_err();
    assert_eq!(err.kind(), GatewayErrorKind::Format);
    assert_eq!(err.message(), QUIZ_INVALID_FORMAT);
}

#[tokio::test]
async fn test_gateway_over_http_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_reply("late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = GeminiTextClient::new("k".to_string(), "gemini-2.5-flash".to_string(), Duration::from_millis(50))
        .with_base_url(server.uri());
    let gateway = StudyGateway::new(Arc::new(client));

    let err = gateway.summarize("notes").await.unwrap_err();
    assert_eq!(err.kind(), GatewayErrorKind::Transport);
}

#[test]
fn test_extraction_without_block_is_identity() {
    let prose = "Just text.\n\nNo diagrams.";
    let extracted = extract_diagram(prose);
    assert_eq!(extracted.prose, prose);
    assert_eq!(extracted.diagram, None);
}

#[test]
fn test_missing_credential_is_fatal_config_error() {
    let err = Config::from_lookup(|_| None).unwrap_err();
    let normalized: study_assistant::GatewayError = err.into();
    assert_eq!(normalized.kind(), GatewayErrorKind::Config);
}
