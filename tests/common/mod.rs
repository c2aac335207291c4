#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use obana_gateway::config::{Config, CorsConfig};
use obana_gateway::connectors::{
    ConnectorError, Connectors, GeoConnector, MediaConnector, NewsletterConnector,
    SheetsConnector, ShippingConnector, SignupConnector, StateQuery, Upload, UploadedMedia,
    UpstreamResponse,
};

pub struct FakeNewsletter {
    pub result: Result<String, ConnectorError>,
    pub emails: Mutex<Vec<String>>,
}

#[async_trait]
impl NewsletterConnector for FakeNewsletter {
    async fn subscribe(&self, email: &str) -> Result<String, ConnectorError> {
        self.emails.lock().unwrap().push(email.to_string());
        self.result.clone()
    }
}

pub struct FakeSheets {
    pub error: Option<ConnectorError>,
    pub rows: Mutex<Vec<(String, Vec<String>)>>,
}

#[async_trait]
impl SheetsConnector for FakeSheets {
    async fn append_row(&self, tab: &str, row: Vec<String>) -> Result<(), ConnectorError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.rows.lock().unwrap().push((tab.to_string(), row));
        Ok(())
    }
}

pub struct FakeMedia;

#[async_trait]
impl MediaConnector for FakeMedia {
    async fn upload(&self, file: Upload) -> Result<UploadedMedia, ConnectorError> {
        Ok(UploadedMedia {
            url: format!("https://res.cloudinary.com/demo/{}", file.file_name),
            public_id: format!("uploads/{}/{}", file.bytes.len(), file.file_name),
        })
    }
}

pub struct FakeGeo {
    pub fail: bool,
}

#[async_trait]
impl GeoConnector for FakeGeo {
    async fn search_states(&self, query: &StateQuery) -> Result<Value, ConnectorError> {
        if self.fail {
            return Err(ConnectorError::with_status("daily limit exceeded", 503));
        }
        Ok(json!({
            "totalResultsCount": 1,
            "geonames": [{ "name": "Lagos", "countryCode": query.country }],
        }))
    }
}

pub struct FakeShipping;

#[async_trait]
impl ShippingConnector for FakeShipping {
    async fn countries(&self) -> Result<Value, ConnectorError> {
        Ok(json!([{ "name": "Nigeria", "isoCode": "NG" }]))
    }

    async fn states(&self, country_code: &str) -> Result<Value, ConnectorError> {
        Ok(json!([{ "name": "Lagos", "isoCode": "LA", "countryCode": country_code }]))
    }

    async fn cities(&self, country_code: &str, state_code: &str) -> Result<Value, ConnectorError> {
        if country_code == "XX" {
            return Err(ConnectorError::with_status("Country not supported", 400));
        }
        Ok(json!([{ "name": "Ikeja", "stateCode": state_code }]))
    }
}

pub struct FakeSignup {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Bytes,
    pub received: Mutex<Vec<Bytes>>,
}

#[async_trait]
impl SignupConnector for FakeSignup {
    async fn sign_up(&self, body: Bytes) -> Result<UpstreamResponse, ConnectorError> {
        self.received.lock().unwrap().push(body);
        Ok(UpstreamResponse {
            status: self.status,
            content_type: Some(self.content_type.to_string()),
            body: self.body.clone(),
        })
    }
}

pub struct TestOptions {
    pub newsletter: Result<String, ConnectorError>,
    pub sheets_error: Option<ConnectorError>,
    pub geo_fails: bool,
    pub signup_status: u16,
    pub signup_content_type: &'static str,
    pub signup_body: Bytes,
    pub cors: CorsConfig,
    pub max_body_size: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            newsletter: Ok("A confirmation email is sent to the user.".to_string()),
            sheets_error: None,
            geo_fails: false,
            signup_status: 201,
            signup_content_type: "application/json",
            signup_body: Bytes::from(json!({ "message": "User created" }).to_string()),
            cors: CorsConfig::default(),
            max_body_size: 1_048_576,
        }
    }
}

/// A running gateway backed by in-memory fake connectors.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub newsletter: Arc<FakeNewsletter>,
    pub sheets: Arc<FakeSheets>,
    pub signup: Arc<FakeSignup>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// POST JSON with an Origin header, return (body, status, allow-origin).
    pub async fn post_json(
        &self,
        path: &str,
        origin: Option<&str>,
        body: &Value,
    ) -> (Value, StatusCode, Option<String>) {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(origin) = origin {
            req = req.header("Origin", origin);
        }
        let resp = req.send().await.expect("post request failed");
        let status = resp.status();
        let allow_origin = allow_origin(&resp);
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status, allow_origin)
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn allow_origin(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

pub fn test_config(options: &TestOptions) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        max_body_size: options.max_body_size,
        upstream_timeout: Duration::from_secs(5),
        cors: options.cors.clone(),
        zoho: None,
        sheets: None,
        cloudinary: None,
        geonames: None,
        terminal: None,
        shop: None,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default()).await
}

pub async fn spawn_app_with(options: TestOptions) -> TestApp {
    let config = test_config(&options);

    let newsletter = Arc::new(FakeNewsletter {
        result: options.newsletter,
        emails: Mutex::new(Vec::new()),
    });
    let sheets = Arc::new(FakeSheets {
        error: options.sheets_error,
        rows: Mutex::new(Vec::new()),
    });
    let signup = Arc::new(FakeSignup {
        status: options.signup_status,
        content_type: options.signup_content_type,
        body: options.signup_body,
        received: Mutex::new(Vec::new()),
    });

    let connectors = Connectors {
        newsletter: newsletter.clone(),
        sheets: sheets.clone(),
        media: Arc::new(FakeMedia),
        geo: Arc::new(FakeGeo {
            fail: options.geo_fails,
        }),
        shipping: Arc::new(FakeShipping),
        signup: signup.clone(),
    };

    let app = obana_gateway::build_app_with(config, connectors).expect("Failed to build app");
    let addr = serve(app).await;

    TestApp {
        addr,
        client: Client::new(),
        newsletter,
        sheets,
        signup,
    }
}

/// Serve `app` on a random local port in the background.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}
