//! Recognition of allow-listed payment request URIs.
//!
//! Only two schemes are recognised: `monero:` and `bitcoin:`. Each accepts a
//! fixed address shape and an optional query string restricted to the keys
//! the respective wallet URI formats define. Matching is anchored to the whole
//! input; a URI with anything trailing the recognised shape is rejected.
//! Query values run up to the next `&`, so a value may itself contain `?`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static MONERO_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^monero:(?://)?[a-zA-Z0-9]{95}(?:\?(?:tx_amount|recipient_name|tx_description)=[^&]+(?:&(?:tx_amount|recipient_name|tx_description)=[^&]+)*)?$",
    )
    .expect("monero uri pattern must compile")
});

static BITCOIN_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^bitcoin:(?:[a-zA-Z0-9]{26,35}|[a-zA-Z0-9]{42})(?:\?(?:amount|label|message)=[^&]+(?:&(?:amount|label|message)=[^&]+)*)?$",
    )
    .expect("bitcoin uri pattern must compile")
});

static PAYMENT_SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(monero|bitcoin):").expect("payment scheme pattern must compile")
});

/// Payment schemes rendered without the default external-link attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentScheme {
    Monero,
    Bitcoin,
}

impl PaymentScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentScheme::Monero => "monero",
            PaymentScheme::Bitcoin => "bitcoin",
        }
    }
}

impl fmt::Display for PaymentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `uri`, returning the scheme when it is an allow-listed payment URI.
pub fn classify_payment_uri(uri: &str) -> Option<PaymentScheme> {
    if MONERO_URI.is_match(uri) {
        Some(PaymentScheme::Monero)
    } else if BITCOIN_URI.is_match(uri) {
        Some(PaymentScheme::Bitcoin)
    } else {
        None
    }
}

/// Returns `true` when `uri` is an allow-listed `monero:` or `bitcoin:` URI.
pub fn is_payment_uri(uri: &str) -> bool {
    classify_payment_uri(uri).is_some()
}

/// The payment scheme `uri` starts with, whether or not the rest of it is well
/// formed. Case-insensitive, as URL schemes are.
pub fn payment_scheme_prefix(uri: &str) -> Option<PaymentScheme> {
    let captures = PAYMENT_SCHEME_PREFIX.captures(uri)?;
    if captures[1].eq_ignore_ascii_case("monero") {
        Some(PaymentScheme::Monero)
    } else {
        Some(PaymentScheme::Bitcoin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONERO_ADDRESS: &str = "83UXh3SQZGk63yCWA8cQcQFrYL6xat3aNASZcz7USgy94neK8proFxU1BJhxr4PWNPJy1ScKX2oxy6TX3BmcGJk67JbJmXG";
    const BITCOIN_ADDRESS: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

    fn monero(suffix: &str) -> String {
        format!("monero:{MONERO_ADDRESS}{suffix}")
    }

    fn bitcoin(suffix: &str) -> String {
        format!("bitcoin:{BITCOIN_ADDRESS}{suffix}")
    }

    #[test]
    fn accepts_bare_monero_address() {
        assert_eq!(MONERO_ADDRESS.len(), 95);
        assert_eq!(
            classify_payment_uri(&monero("")),
            Some(PaymentScheme::Monero)
        );
        assert!(is_payment_uri(&format!("monero://{MONERO_ADDRESS}")));
    }

    #[test]
    fn accepts_monero_query_keys() {
        for suffix in [
            "?tx_amount=0.123",
            "?recipient_name=John%20Wick",
            "?recipient_name=John%20Wick&tx_amount=1",
            "?tx_description=Loan",
            "?tx_amount=1&tx_amount=2",
        ] {
            assert!(is_payment_uri(&monero(suffix)), "rejected {suffix}");
        }
    }

    #[test]
    fn rejects_monero_with_unknown_or_malformed_query() {
        for suffix in [
            "?amount=1",
            "?tx_amount=",
            "?tx_amount=1&",
            "&tx_amount=1",
        ] {
            assert!(!is_payment_uri(&monero(suffix)), "accepted {suffix}");
        }
    }

    #[test]
    fn rejects_monero_address_of_wrong_length() {
        let short = &MONERO_ADDRESS[..94];
        assert!(!is_payment_uri(&format!("monero:{short}")));
        assert!(!is_payment_uri(&format!("monero:{MONERO_ADDRESS}A")));
    }

    #[test]
    fn accepts_bitcoin_addresses_and_query_keys() {
        assert_eq!(
            classify_payment_uri(&bitcoin("")),
            Some(PaymentScheme::Bitcoin)
        );
        for suffix in [
            "?amount=1",
            "?amount=1&label=thx",
            "?label=loan",
            "?message=hello%20there",
        ] {
            assert!(is_payment_uri(&bitcoin(suffix)), "rejected {suffix}");
        }

        let bech32 = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
        assert_eq!(bech32.len(), 42);
        assert!(is_payment_uri(&format!("bitcoin:{bech32}")));
        assert!(is_payment_uri(&format!("bitcoin:{}", "a".repeat(26))));
    }

    #[test]
    fn query_values_may_contain_question_marks() {
        assert!(is_payment_uri(&bitcoin("?amount=1?label=a")));
        assert!(is_payment_uri(&bitcoin("?message=why?")));
        assert!(is_payment_uri(&monero("?tx_amount=1?tx_amount=2")));
        assert!(!is_payment_uri(&bitcoin("??amount=1")));
        assert!(!is_payment_uri(&bitcoin("?amount=1&?label=a")));
    }

    #[test]
    fn rejects_bitcoin_addresses_outside_allowed_lengths() {
        for len in [25, 36, 41, 43] {
            let uri = format!("bitcoin:{}", "a".repeat(len));
            assert!(!is_payment_uri(&uri), "accepted length {len}");
        }
        assert!(!is_payment_uri(&bitcoin("?tx_amount=1")));
    }

    #[test]
    fn matching_is_anchored() {
        assert!(!is_payment_uri(&format!(" {}", bitcoin(""))));
        assert!(!is_payment_uri(&format!("{} ", bitcoin(""))));
        assert!(!is_payment_uri(&format!("https://x/?u={}", bitcoin(""))));
        assert!(!is_payment_uri(&format!("BITCOIN:{BITCOIN_ADDRESS}")));
        assert!(!is_payment_uri("https://example.com/"));
        assert!(!is_payment_uri(""));
    }

    #[test]
    fn scheme_prefix_ignores_address_shape() {
        assert_eq!(
            payment_scheme_prefix("bitcoin:tooshort"),
            Some(PaymentScheme::Bitcoin)
        );
        assert_eq!(
            payment_scheme_prefix(" MONERO:x"),
            Some(PaymentScheme::Monero)
        );
        assert_eq!(payment_scheme_prefix(&monero("")), Some(PaymentScheme::Monero));
        assert_eq!(payment_scheme_prefix("https://bitcoin.org/"), None);
        assert_eq!(payment_scheme_prefix("bitcoins:x"), None);
    }

    #[test]
    fn scheme_display_matches_uri_prefix() {
        assert_eq!(PaymentScheme::Monero.to_string(), "monero");
        assert_eq!(PaymentScheme::Bitcoin.as_str(), "bitcoin");
    }
}
