//! Square webhook signature verification.
//!
//! Square signs each webhook delivery with HMAC-SHA256 over the raw request
//! body using the subscription's signature key, and sends the base64 digest
//! in the signature header. Verification recomputes the digest and compares
//! in constant time.

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verify a webhook signature against the raw request body.
///
/// Returns true iff `signature` equals `base64(HMAC-SHA256(signature_key,
/// body))` exactly. Callers must reject any request for which this returns
/// false; no other validation is implied.
pub fn verify_webhook_signature(signature_key: &str, body: &[u8], signature: &str) -> bool {
    let mut mac = HmacSha256::new_from_slice(signature_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body);

    let expected = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64(HMAC-SHA256("secret", "{}"))
    const KNOWN_DIGEST: &str = "dzJZAsrKgS3CWXM6rNBGtzgXNyx3e42VtAJkdHRRbhM=";

    #[test]
    fn accepts_known_vector() {
        assert!(verify_webhook_signature("secret", b"{}", KNOWN_DIGEST));
    }

    #[test]
    fn rejects_mutated_body() {
        assert!(!verify_webhook_signature("secret", b"{ }", KNOWN_DIGEST));
        assert!(!verify_webhook_signature("secret", b"{}x", KNOWN_DIGEST));
        assert!(!verify_webhook_signature("secret", b"", KNOWN_DIGEST));
    }

    #[test]
    fn rejects_mutated_signature() {
        // Flip one character at each position
        for i in 0..KNOWN_DIGEST.len() {
            let mut mutated = KNOWN_DIGEST.as_bytes().to_vec();
            mutated[i] = if mutated[i] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(mutated).unwrap();
            assert!(
                !verify_webhook_signature("secret", b"{}", &mutated),
                "mutation at position {} should fail",
                i
            );
        }
    }

    #[test]
    fn rejects_wrong_key() {
        assert!(!verify_webhook_signature("Secret", b"{}", KNOWN_DIGEST));
        assert!(!verify_webhook_signature("", b"{}", KNOWN_DIGEST));
    }

    #[test]
    fn rejects_truncated_signature() {
        let truncated = &KNOWN_DIGEST[..KNOWN_DIGEST.len() - 1];
        assert!(!verify_webhook_signature("secret", b"{}", truncated));
    }

    #[test]
    fn round_trips_arbitrary_payload() {
        use base64::{engine::general_purpose, Engine as _};
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        let key = "wh_key";
        let body = br#"{"type":"payment.updated","data":{"id":"pay_9"}}"#;

        let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes()).unwrap();
        mac.update(body);
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        assert!(verify_webhook_signature(key, body, &signature));
        assert!(!verify_webhook_signature(key, b"tampered", &signature));
    }
}
