use crate::core::errors::ExchangeError;
use crate::core::types::Params;
use base64::engine::general_purpose;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use md5::{Digest as _, Md5};
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use sha2::{Sha256, Sha512};
use url::form_urlencoded;
use zeroize::Zeroizing;

/// Everything a strategy may look at when signing one request.
#[derive(Debug, Clone, Copy)]
pub struct SignInput<'a> {
    pub method: &'a Method,
    /// Host of the base URL, without scheme.
    pub host: &'a str,
    pub path: &'a str,
    /// The parameter set that carries the signature (query string or form body).
    pub params: &'a Params,
    /// Serialized JSON body, empty when the request has none.
    pub body: &'a str,
}

/// Output of a signer: auth headers, parameters merged into the signed set,
/// and parameters appended after encoding (the signature itself, where the venue wants it last).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub headers: Vec<(String, String)>,
    pub params: Params,
    pub trailing: Vec<(String, String)>,
}

/// Signer trait for request authentication
///
/// Each exchange picks one implementation. The timestamp is supplied by the request builder,
/// taken immediately before signing.
pub trait Signer: Send + Sync {
    fn sign(&self, input: &SignInput<'_>, now: DateTime<Utc>) -> Result<Signature, ExchangeError>;
}

/// `key=value&...` with form url encoding, keys in byte order.
pub fn encode_params(params: &Params) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

pub fn hmac_sha256(secret: &[u8], payload: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| ExchangeError::Signing(format!("Invalid secret key: {}", e)))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn hmac_sha512(secret: &[u8], payload: &[u8]) -> Result<Vec<u8>, ExchangeError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret)
        .map_err(|e| ExchangeError::Signing(format!("Invalid secret key: {}", e)))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn md5_hex(payload: &[u8]) -> String {
    hex::encode(Md5::digest(payload))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digest {
    /// Plain MD5 over `payload + secret`.
    Md5WithSecretSuffix,
    HmacSha256Hex,
    HmacSha512Hex,
}

impl Digest {
    fn compute(self, secret: &Secret<String>, payload: &str) -> Result<String, ExchangeError> {
        match self {
            Self::Md5WithSecretSuffix => {
                let mut salted = Zeroizing::new(String::with_capacity(payload.len() + 64));
                salted.push_str(payload);
                salted.push_str(secret.expose_secret());
                Ok(md5_hex(salted.as_bytes()))
            }
            Self::HmacSha256Hex => Ok(hex::encode(hmac_sha256(
                secret.expose_secret().as_bytes(),
                payload.as_bytes(),
            )?)),
            Self::HmacSha512Hex => Ok(hex::encode(hmac_sha512(
                secret.expose_secret().as_bytes(),
                payload.as_bytes(),
            )?)),
        }
    }
}

/// How sorted pairs are laid out before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairLayout {
    UrlEncoded,
    /// `k=v&k=v` without escaping.
    Raw,
    /// `kvkv` without separators.
    Concat,
}

impl PairLayout {
    fn render(self, params: &Params) -> String {
        match self {
            Self::UrlEncoded => encode_params(params),
            Self::Raw => params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&"),
            Self::Concat => params.iter().fold(String::new(), |mut acc, (k, v)| {
                acc.push_str(k);
                acc.push_str(v);
                acc
            }),
        }
    }
}

/// Auth parameter added before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    ApiKey(&'static str),
    TimestampMs(&'static str),
    TimestampSecs(&'static str),
    /// Unix seconds with the first three digits dropped.
    ShortNonce(&'static str),
    /// UTC wall clock, `2020-01-02T03:04:05`.
    UtcTimestamp(&'static str),
    Fixed(&'static str, &'static str),
}

impl Injection {
    fn apply(&self, api_key: &str, now: DateTime<Utc>, params: &mut Params) {
        let (key, value) = match self {
            Self::ApiKey(key) => (*key, api_key.to_string()),
            Self::TimestampMs(key) => (*key, now.timestamp_millis().to_string()),
            Self::TimestampSecs(key) => (*key, now.timestamp().to_string()),
            Self::ShortNonce(key) => {
                let secs = now.timestamp().to_string();
                (*key, secs.get(3..).unwrap_or_default().to_string())
            }
            Self::UtcTimestamp(key) => (*key, now.format("%Y-%m-%dT%H:%M:%S").to_string()),
            Self::Fixed(key, value) => (*key, (*value).to_string()),
        };
        params.insert(key.to_string(), value);
    }
}

/// Where the signature ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Merged into the parameter set under this key.
    Param(&'static str),
    /// Appended after the encoded parameters under this key.
    Trailing(&'static str),
    /// Api key and signature as headers.
    Headers {
        key_header: &'static str,
        sign_header: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignScope {
    /// Request parameters plus injected ones.
    All,
    /// Only the injected parameters.
    InjectedOnly,
}

/// Sorted-query signing: inject, sort by key, lay out, hash.
pub struct SortedQuerySigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
    digest: Digest,
    layout: PairLayout,
    scope: SignScope,
    injections: Vec<Injection>,
    placement: Placement,
    api_key_header: Option<&'static str>,
}

impl SortedQuerySigner {
    pub fn new(
        api_key: Secret<String>,
        secret_key: Secret<String>,
        digest: Digest,
        layout: PairLayout,
        placement: Placement,
    ) -> Self {
        Self {
            api_key,
            secret_key,
            digest,
            layout,
            scope: SignScope::All,
            injections: Vec::new(),
            placement,
            api_key_header: None,
        }
    }

    #[must_use]
    pub fn inject(mut self, injection: Injection) -> Self {
        self.injections.push(injection);
        self
    }

    #[must_use]
    pub const fn scope(mut self, scope: SignScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub const fn api_key_header(mut self, header: &'static str) -> Self {
        self.api_key_header = Some(header);
        self
    }
}

impl Signer for SortedQuerySigner {
    fn sign(&self, input: &SignInput<'_>, now: DateTime<Utc>) -> Result<Signature, ExchangeError> {
        let api_key = self.api_key.expose_secret();
        let mut injected = Params::new();
        for injection in &self.injections {
            injection.apply(api_key, now, &mut injected);
        }

        let payload = match self.scope {
            SignScope::InjectedOnly => self.layout.render(&injected),
            SignScope::All => {
                let mut all = input.params.clone();
                all.extend(injected.clone());
                self.layout.render(&all)
            }
        };
        let digest = self.digest.compute(&self.secret_key, &payload)?;

        let mut signature = Signature {
            params: injected,
            ..Signature::default()
        };
        if let Some(header) = self.api_key_header {
            signature.headers.push((header.to_string(), api_key.clone()));
        }
        match &self.placement {
            Placement::Param(key) => {
                signature.params.insert((*key).to_string(), digest);
            }
            Placement::Trailing(key) => signature.trailing.push(((*key).to_string(), digest)),
            Placement::Headers {
                key_header,
                sign_header,
            } => {
                signature
                    .headers
                    .push(((*key_header).to_string(), api_key.clone()));
                signature.headers.push(((*sign_header).to_string(), digest));
            }
        }
        Ok(signature)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Hex,
    Base64,
}

impl Encoding {
    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Header names used by [`CanonicalHeaderSigner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalHeaders {
    pub key: &'static str,
    pub sign: &'static str,
    pub timestamp: &'static str,
    pub passphrase: &'static str,
}

/// `timestamp + METHOD + path + (body | ?query)` signed with HMAC, carried in headers.
pub struct CanonicalHeaderSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
    passphrase: Option<Secret<String>>,
    headers: CanonicalHeaders,
    sha512: bool,
    encoding: Encoding,
}

impl CanonicalHeaderSigner {
    pub fn new(
        api_key: Secret<String>,
        secret_key: Secret<String>,
        passphrase: Option<Secret<String>>,
        headers: CanonicalHeaders,
    ) -> Self {
        Self {
            api_key,
            secret_key,
            passphrase,
            headers,
            sha512: false,
            encoding: Encoding::Base64,
        }
    }

    #[must_use]
    pub const fn sha512(mut self) -> Self {
        self.sha512 = true;
        self
    }

    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The string that gets signed; exposed for tests.
    pub fn prehash(timestamp: &str, input: &SignInput<'_>) -> String {
        let tail = if input.body.is_empty() {
            let query = encode_params(input.params);
            if query.is_empty() {
                String::new()
            } else {
                format!("?{}", query)
            }
        } else {
            input.body.to_string()
        };
        format!("{}{}{}{}", timestamp, input.method.as_str(), input.path, tail)
    }
}

impl Signer for CanonicalHeaderSigner {
    fn sign(&self, input: &SignInput<'_>, now: DateTime<Utc>) -> Result<Signature, ExchangeError> {
        let passphrase = self.passphrase.as_ref().ok_or_else(|| {
            ExchangeError::Configuration("passphrase is required for signed requests".to_string())
        })?;
        let timestamp = now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
        let prehash = Self::prehash(&timestamp, input);
        let secret = self.secret_key.expose_secret().as_bytes();
        let mac = if self.sha512 {
            hmac_sha512(secret, prehash.as_bytes())?
        } else {
            hmac_sha256(secret, prehash.as_bytes())?
        };

        Ok(Signature {
            headers: vec![
                (
                    self.headers.key.to_string(),
                    self.api_key.expose_secret().clone(),
                ),
                (self.headers.sign.to_string(), self.encoding.encode(&mac)),
                (self.headers.timestamp.to_string(), timestamp),
                (
                    self.headers.passphrase.to_string(),
                    passphrase.expose_secret().clone(),
                ),
            ],
            ..Signature::default()
        })
    }
}

/// `METHOD\nhost\npath\nencodedParams` signed with HMAC-SHA256, appended as a trailing parameter.
pub struct RequestLineSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
    include_host: bool,
    encoding: Encoding,
    injections: Vec<Injection>,
    signature_key: &'static str,
}

impl RequestLineSigner {
    pub fn new(
        api_key: Secret<String>,
        secret_key: Secret<String>,
        encoding: Encoding,
        signature_key: &'static str,
    ) -> Self {
        Self {
            api_key,
            secret_key,
            include_host: true,
            encoding,
            injections: Vec::new(),
            signature_key,
        }
    }

    #[must_use]
    pub const fn without_host(mut self) -> Self {
        self.include_host = false;
        self
    }

    #[must_use]
    pub fn inject(mut self, injection: Injection) -> Self {
        self.injections.push(injection);
        self
    }

    pub fn request_line(&self, input: &SignInput<'_>, encoded: &str) -> String {
        if self.include_host {
            format!(
                "{}\n{}\n{}\n{}",
                input.method.as_str(),
                input.host,
                input.path,
                encoded
            )
        } else {
            format!("{}\n{}\n{}", input.method.as_str(), input.path, encoded)
        }
    }
}

impl Signer for RequestLineSigner {
    fn sign(&self, input: &SignInput<'_>, now: DateTime<Utc>) -> Result<Signature, ExchangeError> {
        let mut injected = Params::new();
        for injection in &self.injections {
            injection.apply(self.api_key.expose_secret(), now, &mut injected);
        }
        let mut all = input.params.clone();
        all.extend(injected.clone());

        let line = self.request_line(input, &encode_params(&all));
        let mac = hmac_sha256(self.secret_key.expose_secret().as_bytes(), line.as_bytes())?;

        Ok(Signature {
            params: injected,
            trailing: vec![(self.signature_key.to_string(), self.encoding.encode(&mac))],
            ..Signature::default()
        })
    }
}

/// `Authorization: Basic base64(key:secret)`. Not time bound.
pub struct BasicAuthSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl BasicAuthSigner {
    pub fn new(api_key: Secret<String>, secret_key: Secret<String>) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }
}

impl Signer for BasicAuthSigner {
    fn sign(&self, _input: &SignInput<'_>, _now: DateTime<Utc>) -> Result<Signature, ExchangeError> {
        let credentials = Zeroizing::new(format!(
            "{}:{}",
            self.api_key.expose_secret(),
            self.secret_key.expose_secret()
        ));
        Ok(Signature {
            headers: vec![(
                "Authorization".to_string(),
                format!("Basic {}", general_purpose::STANDARD.encode(credentials.as_bytes())),
            )],
            ..Signature::default()
        })
    }
}
