/// Transport kernel shared by every exchange.
///
/// - [`signer`]: the signing strategies (`SortedQuerySigner`, `CanonicalHeaderSigner`,
///   `RequestLineSigner`, `BasicAuthSigner`)
/// - [`rest`]: request envelope builder and dispatch (`RestClient`)
/// - [`transport`]: the HTTP collaborator (`HttpTransport`, `ReqwestTransport`)
/// - [`normalizer`]: raw response to canonical envelope (`ResponseNormalizer`)
///
/// Nothing in here knows about a specific exchange; venues plug in through configuration.
///
/// ```rust,no_run
/// use coinbridge::core::kernel::*;
/// use reqwest::Method;
///
/// # async fn example() -> Result<(), coinbridge::ExchangeError> {
/// let config = RestClientConfig::new("https://api.binance.com".to_string(), "binance".to_string());
/// let rest = RestClientBuilder::new(config).build()?;
/// let timed = rest
///     .send(RestCall::new(Method::GET, "/api/v3/time", Default::default(), false))
///     .await;
/// let normalizer = ResponseNormalizer::new(ResponseShape::plain());
/// let envelope = normalizer.normalize(
///     timed.outcome,
///     Unwrap::None,
///     None,
///     timed.started_at_ms,
///     timed.finished_at_ms,
/// );
/// println!("{}", serde_json::to_string(&envelope).unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub mod normalizer;
pub mod rest;
pub mod signer;
pub mod transport;

pub use normalizer::{
    ErrorRule, ErrorTable, MessageSource, ResponseNormalizer, ResponseShape, Unwrap,
};
pub use rest::{BodyEncoding, RestCall, RestClient, RestClientBuilder, RestClientConfig, TimedOutcome};
pub use signer::{
    BasicAuthSigner, CanonicalHeaderSigner, CanonicalHeaders, Digest, Encoding, Injection,
    PairLayout, Placement, RequestLineSigner, SignInput, SignScope, Signature, Signer,
    SortedQuerySigner,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
