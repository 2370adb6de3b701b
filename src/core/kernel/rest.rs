use crate::core::config::HttpConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{encode_params, SignInput, Signer};
use crate::core::kernel::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::core::types::Params;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Where a POST or DELETE carries its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    /// Everything in the query string, no body.
    #[default]
    Query,
    /// Everything, signature included, in a form-encoded body.
    Form,
    /// Auth parameters in the query string, business parameters as a JSON body.
    Json,
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    pub post_encoding: BodyEncoding,
    pub delete_encoding: BodyEncoding,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            exchange_name,
            post_encoding: BodyEncoding::Query,
            delete_encoding: BodyEncoding::Query,
        }
    }

    pub const fn with_post_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.post_encoding = encoding;
        self
    }

    pub const fn with_delete_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.delete_encoding = encoding;
        self
    }

    pub fn encoding_for(&self, method: &Method) -> BodyEncoding {
        if *method == Method::POST || *method == Method::PUT {
            self.post_encoding
        } else if *method == Method::DELETE {
            self.delete_encoding
        } else {
            BodyEncoding::Query
        }
    }
}

/// One logical call, before encoding and signing.
#[derive(Debug, Clone, PartialEq)]
pub struct RestCall {
    pub method: Method,
    pub path: String,
    pub params: Params,
    /// Explicit JSON body (batch payloads). Only used with [`BodyEncoding::Json`].
    pub body: Option<Value>,
    pub signed: bool,
}

impl RestCall {
    pub fn new(method: Method, path: impl Into<String>, params: Params, signed: bool) -> Self {
        Self {
            method,
            path: path.into(),
            params,
            body: None,
            signed,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The transport outcome with the wall-clock bounds of the call.
#[derive(Debug)]
pub struct TimedOutcome {
    pub outcome: Result<HttpResponse, ExchangeError>,
    pub started_at_ms: i64,
    pub finished_at_ms: i64,
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
            transport: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<RestClient, ExchangeError> {
        let parsed = url::Url::parse(&self.config.base_url).map_err(|e| {
            ExchangeError::Configuration(format!(
                "Invalid base URL '{}': {}",
                self.config.base_url, e
            ))
        })?;
        let host = parsed
            .host_str()
            .ok_or_else(|| {
                ExchangeError::Configuration(format!(
                    "Base URL '{}' has no host",
                    self.config.base_url
                ))
            })?
            .to_string();

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&HttpConfig::default())?),
        };

        Ok(RestClient {
            config: self.config,
            host,
            signer: self.signer,
            transport,
        })
    }
}

/// Builds, signs and dispatches requests for one exchange.
#[derive(Clone)]
pub struct RestClient {
    config: RestClientConfig,
    host: String,
    signer: Option<Arc<dyn Signer>>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    pub const fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    /// Encode and, if asked, sign `call`. Fails before any I/O when signing is impossible.
    pub fn build_request(
        &self,
        call: &RestCall,
        now: DateTime<Utc>,
    ) -> Result<HttpRequest, ExchangeError> {
        let encoding = self.config.encoding_for(&call.method);
        let (mut carried, json_body) = match encoding {
            BodyEncoding::Query | BodyEncoding::Form => (call.params.clone(), None),
            BodyEncoding::Json => {
                let body = match &call.body {
                    Some(body) => serde_json::to_string(body)?,
                    None => serde_json::to_string(&call.params)?,
                };
                (Params::new(), Some(body))
            }
        };

        let mut headers = Vec::new();
        let mut trailing = Vec::new();
        if call.signed {
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::Configuration(
                    "credentials are required for signed requests".to_string(),
                )
            })?;
            let signature = signer.sign(
                &SignInput {
                    method: &call.method,
                    host: &self.host,
                    path: &call.path,
                    params: &carried,
                    body: json_body.as_deref().unwrap_or(""),
                },
                now,
            )?;
            carried.extend(signature.params);
            headers = signature.headers;
            trailing = signature.trailing;
        }

        let mut encoded = encode_params(&carried);
        for (key, value) in &trailing {
            if !encoded.is_empty() {
                encoded.push('&');
            }
            encoded.push_str(key);
            encoded.push('=');
            encoded.extend(form_urlencoded::byte_serialize(value.as_bytes()));
        }

        let mut url = format!("{}{}", self.config.base_url, call.path);
        let body = match encoding {
            BodyEncoding::Query => {
                append_query(&mut url, &encoded);
                None
            }
            BodyEncoding::Form => {
                headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
                Some(encoded)
            }
            BodyEncoding::Json => {
                append_query(&mut url, &encoded);
                headers.push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
                json_body
            }
        };

        Ok(HttpRequest {
            method: call.method.clone(),
            url,
            headers,
            body,
        })
    }

    /// Build, sign and send `call`, recording when it started and finished.
    #[instrument(skip(self, call), fields(exchange = %self.config.exchange_name, method = %call.method, path = %call.path))]
    pub async fn send(&self, call: RestCall) -> TimedOutcome {
        let started_at_ms = Utc::now().timestamp_millis();
        let outcome = match self.build_request(&call, Utc::now()) {
            Ok(request) => {
                debug!(signed = call.signed, "dispatching request");
                self.transport.execute(request).await
            }
            Err(err) => Err(err),
        };
        let finished_at_ms = Utc::now().timestamp_millis().max(started_at_ms);

        TimedOutcome {
            outcome,
            started_at_ms,
            finished_at_ms,
        }
    }
}

fn append_query(url: &mut String, encoded: &str) {
    if !encoded.is_empty() {
        url.push('?');
        url.push_str(encoded);
    }
}
