use chrono::{TimeZone, Utc};
use coinbridge::core::kernel::{
    Digest, Injection, PairLayout, Placement, SignInput, Signer, SortedQuerySigner,
};
use coinbridge::exchanges::profile::{clamp_depth, Case, SymbolFormat};
use coinbridge::{Params, Symbol};
use proptest::collection::btree_map;
use proptest::prelude::*;
use reqwest::Method;
use secrecy::Secret;

fn currency() -> impl Strategy<Value = String> {
    "[a-zA-Z]{2,6}"
}

fn signer() -> SortedQuerySigner {
    SortedQuerySigner::new(
        Secret::new("api-key".to_string()),
        Secret::new("secret".to_string()),
        Digest::HmacSha256Hex,
        PairLayout::UrlEncoded,
        Placement::Trailing("signature"),
    )
    .inject(Injection::TimestampMs("timestamp"))
}

fn sign(params: &Params) -> String {
    let now = Utc.timestamp_millis_opt(1_600_000_000_000).unwrap();
    let input = SignInput {
        method: &Method::GET,
        host: "api.example.com",
        path: "/order",
        params,
        body: "",
    };
    let signature = signer().sign(&input, now).unwrap();
    signature.trailing[0].1.clone()
}

proptest! {
    #[test]
    fn symbol_format_is_concatenation(base in currency(), quote in currency(), sep in "[-_/]?") {
        let symbol = Symbol::new(base.clone(), quote.clone());
        prop_assert_eq!(symbol.format(&sep), format!("{}{}{}", base, sep, quote));
    }

    #[test]
    fn symbol_reverse_is_involution(base in currency(), quote in currency()) {
        let symbol = Symbol::new(base, quote);
        prop_assert_eq!(symbol.reverse().reverse(), symbol);
    }

    #[test]
    fn upper_format_ignores_input_case(base in currency(), quote in currency()) {
        let format = SymbolFormat::new("_", Case::Upper);
        let lower = Symbol::new(base.to_lowercase(), quote.to_lowercase());
        let upper = Symbol::new(base.to_uppercase(), quote.to_uppercase());
        prop_assert_eq!(format.apply(&lower), format.apply(&upper));
    }

    #[test]
    fn signature_ignores_insertion_order(
        pairs in btree_map("[a-z]{1,8}", "[a-zA-Z0-9.]{1,12}", 1..8)
    ) {
        let forward: Params = pairs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let mut backward = Params::new();
        for (k, v) in pairs.iter().rev() {
            backward.insert(k.clone(), v.clone());
        }
        prop_assert_eq!(sign(&forward), sign(&backward));
    }

    #[test]
    fn depth_never_below_request_within_buckets(size in 0u32..6000) {
        let buckets = [5, 10, 20, 50, 100, 500, 1000, 5000];
        let depth = clamp_depth(size, &buckets);
        prop_assert!(buckets.contains(&depth));
        if size <= 5000 {
            prop_assert!(depth >= size);
        } else {
            prop_assert_eq!(depth, 5000);
        }
    }
}

#[test]
fn test_signature_changes_with_values() {
    let mut params = Params::new();
    params.insert("symbol".to_string(), "BTCUSDT".to_string());
    let first = sign(&params);
    params.insert("symbol".to_string(), "ETHUSDT".to_string());
    assert_ne!(first, sign(&params));
}
