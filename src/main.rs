use anyhow::Context;
use coinbridge::{AdapterBuilder, DepthOptions, ExchangeConfig, MarketDataSource, Symbol};
use tracing_subscriber::EnvFilter;

/// Usage: `coinbridge [exchange] [symbol]`, e.g. `coinbridge huobi ETH/USDT`.
///
/// Credentials are read from `<EXCHANGE>_API_KEY` and friends when present.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let exchange = args.next().unwrap_or_else(|| "binance".to_string());
    let symbol: Symbol = args
        .next()
        .as_deref()
        .unwrap_or("BTC/USDT")
        .parse()
        .context("symbol must look like BTC/USDT")?;

    let config = ExchangeConfig::from_env(&exchange.to_uppercase())
        .unwrap_or_else(|_| ExchangeConfig::read_only());
    let adapter = AdapterBuilder::new()
        .with_config(config)
        .build(&exchange)
        .with_context(|| format!("cannot build adapter for {exchange}"))?;

    println!("Fetching {} depth from {}...", symbol, adapter.exchange_name());
    let response = adapter.get_depth(&symbol, 20, &DepthOptions::default()).await;
    if !response.is_success() {
        println!("Request failed: {} ({})", response.msg(), response.error());
    }
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
