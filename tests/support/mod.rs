//! Scripted transport shared by the behavior suites.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use glance_core::{
    ApiKey, GlanceConfig, GlassnodeApi, HttpClient, HttpError, HttpRequest, HttpResponse,
    StaticCredential,
};

pub const ASSETS_BODY: &str = r#"{"data":[
    {"id":2,"attributes":{"name":"Ethereum","symbol":"ETH"}},
    {"id":1,"attributes":{"name":"Bitcoin","symbol":"BTC"}}
]}"#;

pub const METRICS_BODY: &str = r#"{"data":[
    {"id":10,"attributes":{"name":"Addresses in Profit","shortName":"In Profit",
      "path":"/addresses/profit_count",
      "metric_assets":{"data":[{"id":1,"attributes":{"symbol":"BTC"}},{"id":2,"attributes":{"symbol":"ETH"}}]}}},
    {"id":20,"attributes":{"name":"Hash Rate","path":"/mining/hash_rate_mean",
      "metric_assets":{"data":[{"id":1,"attributes":{"symbol":"BTC"}}]}}},
    {"id":30,"attributes":{"name":"Gas Used","path":"/fees/gas_used_sum",
      "metric_assets":{"data":[{"id":2,"attributes":{"symbol":"ETH"}}]}}}
]}"#;

/// Replies by matching URL fragments; unmatched requests get a 404.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<(String, Result<HttpResponse, HttpError>)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard catalog plus the given series body for every metric path.
    pub fn with_catalog(series_body: &str) -> Self {
        Self::new()
            .route("/api/metric-assets", 200, ASSETS_BODY)
            .route("/api/metrics", 200, METRICS_BODY)
            .route("/v1/metrics/", 200, series_body)
    }

    pub fn route(self, fragment: &str, status: u16, body: &str) -> Self {
        self.routes
            .lock()
            .expect("routes lock")
            .push((fragment.to_owned(), Ok(HttpResponse::new(status, body))));
        self
    }

    pub fn route_error(self, fragment: &str, error: HttpError) -> Self {
        self.routes
            .lock()
            .expect("routes lock")
            .push((fragment.to_owned(), Err(error)));
        self
    }

    /// Replaces the reply for an existing fragment.
    pub fn reroute(&self, fragment: &str, status: u16, body: &str) {
        let mut routes = self.routes.lock().expect("routes lock");
        for route in routes.iter_mut().filter(|(f, _)| f == fragment) {
            route.1 = Ok(HttpResponse::new(status, body));
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn count_matching(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.url.contains(fragment))
            .count()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let reply = self
            .routes
            .lock()
            .expect("routes lock")
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "")));
        self.requests.lock().expect("requests lock").push(request);

        Box::pin(async move {
            tokio::task::yield_now().await;
            reply
        })
    }
}

pub fn test_config() -> GlanceConfig {
    GlanceConfig::default().with_base_urls("https://api.test", "https://cms.test")
}

pub fn api(client: Arc<ScriptedHttpClient>, key: Option<&str>) -> GlassnodeApi {
    let credentials = match key {
        Some(key) => StaticCredential::new(ApiKey::parse(key).expect("valid key")),
        None => StaticCredential::absent(),
    };
    GlassnodeApi::new(client, Arc::new(credentials), test_config())
}
