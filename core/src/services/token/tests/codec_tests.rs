//! Unit tests for the token codec

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use fc_shared::config::{JwtConfig, MAX_TOKEN_LIFETIME_SECONDS};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::clock::ManualClock;
use crate::domain::entities::TokenClass;
use crate::errors::{DomainError, TokenError};
use crate::services::token::codec::JwtClaims;
use crate::services::token::{TokenCodec, TokenCodecConfig};

const SECRET: &str = "unit-test-secret-that-is-at-least-32-bytes";
const START: i64 = 1_700_000_000;

fn setup(access_secs: i64, refresh_secs: i64) -> (TokenCodec, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at_timestamp(START));
    let config = TokenCodecConfig::new(
        SECRET,
        Duration::seconds(access_secs),
        Duration::seconds(refresh_secs),
    );
    let codec = TokenCodec::new(config, clock.clone()).unwrap();
    (codec, clock)
}

fn forge(claims: &JwtClaims, algorithm: Algorithm, secret: &str) -> String {
    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn wire_claims(class: &str) -> JwtClaims {
    JwtClaims {
        sub: Uuid::new_v4().to_string(),
        role: "user".to_string(),
        token_type: class.to_string(),
        email: None,
        iat: START,
        exp: START + 60,
        jti: Uuid::new_v4().to_string(),
    }
}

#[test]
fn test_access_token_round_trip() {
    let (codec, _clock) = setup(900, 604800);
    let subject = Uuid::new_v4();

    let token = codec
        .issue(subject, "admin", TokenClass::Access, Some("ada@example.com"))
        .unwrap();
    let claims = codec.verify(&token).unwrap();

    assert_eq!(claims.subject_id(), subject);
    assert_eq!(claims.role(), "admin");
    assert_eq!(claims.class(), TokenClass::Access);
    assert_eq!(claims.email(), Some("ada@example.com"));
    assert_eq!(claims.issued_at().timestamp(), START);
    assert_eq!(claims.expires_at().timestamp(), START + 900);
}

#[test]
fn test_refresh_token_never_carries_email() {
    let (codec, _clock) = setup(900, 604800);

    let token = codec
        .issue(Uuid::new_v4(), "user", TokenClass::Refresh, Some("ada@example.com"))
        .unwrap();
    let claims = codec.verify(&token).unwrap();

    assert_eq!(claims.class(), TokenClass::Refresh);
    assert_eq!(claims.email(), None);
    assert_eq!(claims.expires_at().timestamp(), START + 604800);
}

#[test]
fn test_expiry_boundary_on_manual_clock() {
    let (codec, clock) = setup(1, 60);
    let token = codec
        .issue(Uuid::new_v4(), "user", TokenClass::Access, None)
        .unwrap();

    clock.advance(Duration::milliseconds(999));
    assert!(codec.verify(&token).is_ok());

    clock.advance(Duration::milliseconds(2));
    assert_eq!(codec.verify(&token), Err(TokenError::Expired));
}

#[test]
fn test_token_expired_exactly_at_exp() {
    let (codec, clock) = setup(10, 60);
    let token = codec
        .issue(Uuid::new_v4(), "user", TokenClass::Access, None)
        .unwrap();

    clock.advance(Duration::seconds(10));
    assert_eq!(codec.verify(&token), Err(TokenError::Expired));
}

#[test]
fn test_tokens_issued_in_same_second_are_distinct() {
    let (codec, _clock) = setup(900, 604800);
    let subject = Uuid::new_v4();

    let first = codec.issue(subject, "user", TokenClass::Refresh, None).unwrap();
    let second = codec.issue(subject, "user", TokenClass::Refresh, None).unwrap();

    assert_ne!(first, second);
    assert_ne!(
        codec.verify(&first).unwrap().token_id(),
        codec.verify(&second).unwrap().token_id()
    );
}

#[test]
fn test_tampered_signature_is_rejected() {
    let (codec, _clock) = setup(900, 604800);
    let token = codec
        .issue(Uuid::new_v4(), "user", TokenClass::Access, None)
        .unwrap();

    let (body, signature) = token.rsplit_once('.').unwrap();
    let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();

    for index in [0, bytes.len() / 2, bytes.len() - 1] {
        bytes[index] ^= 0x01;
        let tampered = format!("{}.{}", body, URL_SAFE_NO_PAD.encode(&bytes));
        assert_eq!(codec.verify(&tampered), Err(TokenError::InvalidSignature));
        bytes[index] ^= 0x01;
    }
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let (codec, _clock) = setup(900, 604800);
    let token = forge(
        &wire_claims("access"),
        Algorithm::HS256,
        "another-secret-that-is-also-32-bytes-long",
    );

    assert_eq!(codec.verify(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_garbage_is_malformed() {
    let (codec, _clock) = setup(900, 604800);

    assert_eq!(codec.verify(""), Err(TokenError::Malformed));
    assert_eq!(codec.verify("not-a-token"), Err(TokenError::Malformed));
    assert_eq!(codec.verify("a.b.c"), Err(TokenError::Malformed));
}

#[test]
fn test_non_uuid_subject_is_malformed() {
    let (codec, _clock) = setup(900, 604800);
    let mut claims = wire_claims("access");
    claims.sub = "42".to_string();

    let token = forge(&claims, Algorithm::HS256, SECRET);
    assert_eq!(codec.verify(&token), Err(TokenError::Malformed));
}

#[test]
fn test_unknown_class_is_unsupported() {
    let (codec, _clock) = setup(900, 604800);
    let token = forge(&wire_claims("password-reset"), Algorithm::HS256, SECRET);

    assert_eq!(codec.verify(&token), Err(TokenError::Unsupported));
}

#[test]
fn test_other_hmac_algorithm_is_unsupported() {
    let (codec, _clock) = setup(900, 604800);
    let token = forge(&wire_claims("access"), Algorithm::HS512, SECRET);

    assert_eq!(codec.verify(&token), Err(TokenError::Unsupported));
}

#[test]
fn test_unsigned_token_is_unsupported() {
    let (codec, _clock) = setup(900, 604800);
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&wire_claims("access")).unwrap());
    let token = format!("{}.{}.", header, payload);

    assert_eq!(codec.verify(&token), Err(TokenError::Unsupported));
}

#[test]
fn test_short_secret_is_rejected_at_construction() {
    let clock = Arc::new(ManualClock::at_timestamp(START));
    let config = TokenCodecConfig::new("short", Duration::seconds(900), Duration::seconds(60));

    let result = TokenCodec::new(config, clock);
    assert!(matches!(result, Err(DomainError::Configuration { .. })));
}

#[test]
fn test_non_positive_lifetime_is_rejected_at_construction() {
    let clock = Arc::new(ManualClock::at_timestamp(START));
    let config = TokenCodecConfig::new(SECRET, Duration::zero(), Duration::seconds(60));
    assert!(TokenCodec::new(config, clock.clone()).is_err());

    let config = TokenCodecConfig::new(SECRET, Duration::seconds(60), Duration::seconds(-1));
    assert!(TokenCodec::new(config, clock).is_err());
}

#[test]
fn test_lifetime_beyond_ceiling_is_rejected_at_construction() {
    let clock = Arc::new(ManualClock::at_timestamp(START));
    let config = TokenCodecConfig::new(
        SECRET,
        Duration::seconds(10_000_000_000_000),
        Duration::seconds(60),
    );

    let result = TokenCodec::new(config, clock);
    assert!(matches!(result, Err(DomainError::Configuration { .. })));
}

#[test]
fn test_longest_accepted_lifetime_still_verifies() {
    let (codec, _clock) = setup(MAX_TOKEN_LIFETIME_SECONDS, MAX_TOKEN_LIFETIME_SECONDS);

    let token = codec
        .issue(Uuid::new_v4(), "user", TokenClass::Refresh, None)
        .unwrap();
    assert!(codec.verify(&token).is_ok());
}

#[test]
fn test_huge_configured_lifetime_fails_validation_without_panicking() {
    let mut jwt = JwtConfig::new(SECRET);
    jwt.access_token_expiry = i64::MAX;

    let config = TokenCodecConfig::from(&jwt);
    assert!(matches!(
        config.validate(),
        Err(DomainError::Configuration { .. })
    ));
}
