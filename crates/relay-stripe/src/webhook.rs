//! # Stripe Webhook Verification
//!
//! Verifies the `Stripe-Signature` header and parses the event.
//!
//! The header has the form `t=<unix seconds>,v1=<hex>[,v1=<hex>...]`. The
//! expected `v1` value is HMAC-SHA256 over `"<t>.<raw body>"` keyed with the
//! endpoint's signing secret.

use chrono::Utc;
use hmac::{Hmac, Mac};
use relay_core::{RelayError, RelayResult, WebhookEvent};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Only signatures under this scheme are checked
const EXPECTED_SCHEME: &str = "v1";

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> RelayResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            EXPECTED_SCHEME => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        RelayError::SignatureVerification(
            "Unable to extract timestamp and signatures from header".to_string(),
        )
    })?;

    if signatures.is_empty() {
        return Err(RelayError::SignatureVerification(
            "No signatures found with expected scheme v1 for payload".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn signed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Hex-encoded `v1` signature of `payload` at `timestamp`
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    hex::encode(signed_mac(secret, timestamp, payload).finalize().into_bytes())
}

/// Full `Stripe-Signature` header value for `payload`, as Stripe would send it
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!(
        "t={},{}={}",
        timestamp,
        EXPECTED_SCHEME,
        compute_signature(secret, timestamp, payload)
    )
}

/// Check `header` against `payload` as of `now` (unix seconds).
///
/// Any matching `v1` signature passes; comparison is constant-time.
/// Timestamps older than `tolerance_secs` are rejected.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> RelayResult<()> {
    let parsed = parse_signature_header(header)?;
    let mac = signed_mac(secret, parsed.timestamp, payload);

    let valid = parsed
        .signatures
        .iter()
        .filter_map(|sig| hex::decode(sig).ok())
        .any(|sig| mac.clone().verify_slice(&sig).is_ok());

    if !valid {
        return Err(RelayError::SignatureVerification(
            "No signatures found matching the expected signature for payload".to_string(),
        ));
    }

    if tolerance_secs > 0 && parsed.timestamp < now - tolerance_secs {
        return Err(RelayError::SignatureVerification(format!(
            "Timestamp outside the tolerance zone ({})",
            parsed.timestamp
        )));
    }

    Ok(())
}

/// Verify a webhook and parse it into a typed event
pub fn construct_event(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> RelayResult<WebhookEvent> {
    verify_signature(payload, header, secret, tolerance_secs, Utc::now().timestamp())?;

    let event: WebhookEvent = serde_json::from_slice(payload)
        .map_err(|e| RelayError::Parse(format!("Invalid payload: {}", e)))?;

    debug!("Verified Stripe webhook: type={}, id={}", event.event_type, event.id);

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"id":"evt_1","type":"checkout.session.completed",
"created":1700000000,"data":{"object":{"id":"cs_test_123"}}}"#;

    #[test]
    fn test_parse_signature_header() {
        let header = "t=1234567890,v1=abc123,v1=def456,v0=ignored";
        let parsed = parse_signature_header(header).unwrap();

        assert_eq!(parsed.timestamp, 1234567890);
        assert_eq!(parsed.signatures, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_header_without_timestamp() {
        let err = parse_signature_header("v1=abc123").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Unable to extract timestamp and signatures from header"
        );
    }

    #[test]
    fn test_header_without_v1() {
        let err = parse_signature_header("t=1234567890,v0=abc").err().unwrap();
        assert!(matches!(err, RelayError::SignatureVerification(_)));
    }

    #[test]
    fn test_signature_is_hex_sha256() {
        let sig = compute_signature(SECRET, 1234567890, b"{}");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_valid_signature() {
        let now = 1_700_000_100;
        let header = sign_payload(SECRET, now - 10, PAYLOAD);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, now).is_ok());
    }

    #[test]
    fn test_any_matching_signature_passes() {
        let now = 1_700_000_100;
        let good = compute_signature(SECRET, now, PAYLOAD);
        let header = format!("t={},v1={},v1={}", now, "00".repeat(32), good);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, now).is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let now = 1_700_000_100;
        let header = sign_payload("whsec_other", now, PAYLOAD);
        let err = verify_signature(PAYLOAD, &header, SECRET, 300, now).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No signatures found matching the expected signature for payload"
        );
    }

    #[test]
    fn test_tampered_payload() {
        let now = 1_700_000_100;
        let header = sign_payload(SECRET, now, PAYLOAD);
        let tampered = br#"{"id":"evt_1","type":"checkout.session.completed",
"created":1700000000,"data":{"object":{"id":"cs_evil"}}}"#;
        assert!(verify_signature(tampered, &header, SECRET, 300, now).is_err());
    }

    #[test]
    fn test_stale_timestamp() {
        let now = 1_700_000_000;
        let header = sign_payload(SECRET, now - 600, PAYLOAD);
        let err = verify_signature(PAYLOAD, &header, SECRET, 300, now).unwrap_err();
        assert!(err.to_string().starts_with("Timestamp outside the tolerance zone"));

        // Zero tolerance disables the age check
        assert!(verify_signature(PAYLOAD, &header, SECRET, 0, now).is_ok());
    }

    #[test]
    fn test_construct_event() {
        let header = sign_payload(SECRET, Utc::now().timestamp(), PAYLOAD);
        let event = construct_event(PAYLOAD, &header, SECRET, 300).unwrap();

        assert!(event.is_checkout_completed());
        assert_eq!(event.object_id(), Some("cs_test_123"));
    }

    #[test]
    fn test_construct_event_malformed_payload() {
        let payload = b"not json";
        let header = sign_payload(SECRET, Utc::now().timestamp(), payload);
        let err = construct_event(payload, &header, SECRET, 300).unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));
    }
}
