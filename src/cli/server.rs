// ============================================================
// Layer 1 — HTTP Server
// ============================================================
// JSON front end for the sentiment analyzer:
//
//   POST    /analyze   {"text": "..."} → {overall, paragraphs}
//   OPTIONS /analyze   CORS preflight
//   GET     /health    "ok"
//
// Every response carries Access-Control-Allow-Origin: * so a
// browser page on any origin can call the service.
//
// The analyzer (and its lexicon) is built before the listener
// opens and shared read-only by all requests.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::analyze_use_case::{DocumentAnalysis, SentimentAnalyzer};
use crate::domain::traits::PolarityScorer;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalyzeRequest {
    text: String,
}

pub fn router<S>(analyzer: Arc<SentimentAnalyzer<S>>) -> Router
where
    S: PolarityScorer + 'static,
{
    Router::new()
        .route("/analyze", post(analyze::<S>).options(preflight))
        .route("/health", get(health))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(analyzer)
}

pub async fn run<S>(bind: &str, analyzer: SentimentAnalyzer<S>) -> Result<()>
where
    S: PolarityScorer + 'static,
{
    let app = router(Arc::new(analyzer));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Cannot bind {bind}"))?;

    tracing::info!("Sentiment server listening on http://{}", bind);
    tracing::info!("  POST /analyze  — sentiment + speech parameters");
    tracing::info!("  GET  /health   — health check");

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}

async fn analyze<S: PolarityScorer>(
    State(analyzer): State<Arc<SentimentAnalyzer<S>>>,
    Json(body): Json<AnalyzeRequest>,
) -> Json<DocumentAnalysis> {
    tracing::debug!("Analyzing {} chars", body.text.len());
    Json(analyzer.analyze_document(&body.text))
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn health() -> &'static str {
    "ok"
}

async fn allow_any_origin(mut res: Response) -> Response {
    res.headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::{PolarityScores, SentimentLabel};

    struct Fixed(f64);

    impl PolarityScorer for Fixed {
        fn polarity_scores(&self, _text: &str) -> PolarityScores {
            PolarityScores { positive: 0.0, negative: 0.0, neutral: 1.0, compound: self.0 }
        }
    }

    #[tokio::test]
    async fn test_analyze_handler() {
        let state = Arc::new(SentimentAnalyzer::new(Fixed(1.0)));
        let req   = AnalyzeRequest { text: "one\n\ntwo".into() };

        let Json(doc) = analyze(State(state), Json(req)).await;
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.overall.sentiment, SentimentLabel::Positive);
        assert_eq!(doc.overall.score, 1.0);
    }

    #[tokio::test]
    async fn test_missing_text_is_blank() {
        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        let state = Arc::new(SentimentAnalyzer::new(Fixed(1.0)));

        let Json(doc) = analyze(State(state), Json(req)).await;
        assert!(doc.paragraphs.is_empty());
        assert_eq!(doc.overall.sentiment, SentimentLabel::Neutral);
        assert_eq!(doc.overall.score, 0.5);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let res = allow_any_origin(preflight().await.into_response()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }
}
