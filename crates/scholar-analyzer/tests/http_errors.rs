//! End-to-end analyzer tests against an in-process fake Gemini endpoint

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use scholar_analyzer::protocol::{AnalysisReply, Message, Reply};
use scholar_analyzer::{Analyzer, AnalyzerConfig, AnalyzerError, ProviderConfig};
use scholar_llm::{GeminiProvider, LlmError};
use serde_json::json;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn analyzer(base_url: &str) -> Analyzer<GeminiProvider> {
    let config = AnalyzerConfig {
        provider: ProviderConfig {
            endpoint: base_url.to_string(),
            ..ProviderConfig::default()
        },
        ..AnalyzerConfig::default()
    };
    let provider = config
        .provider
        .build_provider(Some("test-key".to_string()))
        .unwrap();
    Analyzer::new(provider, config)
}

#[tokio::test]
async fn test_quota_exceeded_is_reported_not_fatal() {
    let app = Router::new().fallback(|| async {
        (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": {"status": "RESOURCE_EXHAUSTED"}})))
            .into_response()
    });
    let analyzer = analyzer(&spawn_server(app).await);

    let err = analyzer.analyze("paper").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Dispatch(LlmError::HttpStatus { status: 429, .. })));
    assert_eq!(err.user_message(), "API quota exceeded. Please try again later.");
    assert!(!analyzer.status().running);

    let report = analyzer.analyze_report("paper").await;
    assert_eq!(report.analysis.confidence, 0);
    assert_eq!(report.error.as_deref(), Some("API quota exceeded. Please try again later."));

    let reply = analyzer
        .handle_message(Message::StartAnalysis { text: "paper".into() })
        .await;
    assert_eq!(reply, Reply::error("API quota exceeded. Please try again later."));
}

#[tokio::test]
async fn test_successful_round_trip() {
    let app = Router::new().fallback(|| async {
        Json(json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "1. Summary: S\n2. Methodology: M\n3. Bias: B\n4. Gaps: G"}]
                }
            }]
        }))
    });
    let analyzer = analyzer(&spawn_server(app).await);

    let reply = analyzer
        .handle_message(Message::StartAnalysis { text: "paper".into() })
        .await;
    match reply {
        Reply::Analysis(AnalysisReply::Done { result }) => {
            assert_eq!(result.summary, "S");
            assert_eq!(result.research_gaps, "G");
            assert_eq!(result.confidence, 95);
        }
        other => panic!("Expected done reply, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let analyzer = analyzer("http://127.0.0.1:1");
    let report = analyzer.analyze_report("paper").await;
    assert!(report.analysis.is_failed());
    assert!(report.error.unwrap().starts_with("Request failed:"));
}
