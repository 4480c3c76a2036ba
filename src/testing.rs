//! In-process stand-ins for the weather and completion APIs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::llm::{LlmClient, LlmConfig};
use crate::services::ReportService;
use crate::weather::{WeatherClient, WeatherConfig};

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Clone, Default)]
struct FakeState {
    weather_fails: bool,
    completion_fails: bool,
    weather_calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

/// Fake weather + completion API pair.
pub struct FakeApis {
    pub base_url: String,
    state: FakeState,
}

impl FakeApis {
    pub async fn start() -> Self {
        Self::with_failures(false, false).await
    }

    pub async fn with_failures(weather_fails: bool, completion_fails: bool) -> Self {
        let state = FakeState {
            weather_fails,
            completion_fails,
            ..Default::default()
        };
        let app = Router::new()
            .route("/history.json", get(fake_history))
            .route("/v1/chat/completions", post(fake_completion))
            .layer(DefaultBodyLimit::disable())
            .with_state(state.clone());
        let base_url = spawn_upstream(app).await;
        Self { base_url, state }
    }

    pub fn weather_calls(&self) -> usize {
        self.state.weather_calls.load(Ordering::SeqCst)
    }

    /// User prompts received by the completion endpoint, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().unwrap().clone()
    }

    pub fn service(&self) -> ReportService {
        let llm = LlmClient::new(
            LlmConfig::default()
                .with_endpoint(&self.base_url)
                .with_api_key("sk-test"),
        )
        .unwrap();
        let weather = WeatherClient::new(
            WeatherConfig::default()
                .with_endpoint(&self.base_url)
                .with_api_key("wx-test"),
        )
        .unwrap();
        ReportService::new(llm, weather)
    }
}

async fn fake_history(State(state): State<FakeState>) -> Response {
    state.weather_calls.fetch_add(1, Ordering::SeqCst);
    if state.weather_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "weather service down").into_response();
    }
    Json(json!({
        "forecast": {
            "forecastday": [{
                "day": {
                    "maxtemp_f": 81.0,
                    "mintemp_f": 58.3,
                    "avgtemp_f": 69.6,
                    "totalprecip_in": 0.42,
                    "avghumidity": 71,
                    "condition": { "text": "Thundery outbreaks with hail" }
                },
                "hour": [
                    { "time": "2014-03-28 15:00", "gust_mph": 41.2 },
                    { "time": "2014-03-28 16:00", "gust_mph": 66.7 }
                ]
            }]
        }
    }))
    .into_response()
}

async fn fake_completion(State(state): State<FakeState>, Json(body): Json<Value>) -> Response {
    if state.completion_fails {
        return (StatusCode::TOO_MANY_REQUESTS, "quota exceeded").into_response();
    }
    let prompt = body["messages"][1]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.prompts.lock().unwrap().push(prompt);
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": "Generated section text." } }]
    }))
    .into_response()
}
