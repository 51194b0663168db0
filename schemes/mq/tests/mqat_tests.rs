//! Integration tests for MQAT token issuance.

use pqsigs_mq::{
    error::{MqError, VerificationFailure},
    field::{Field, Gf256},
    mq::QuadraticMap,
    mqat::{
        commitment_value, keygen, sign0, user0, user1, verify, verify_bool, PublicKey, SecretKey,
        Token,
    },
    params::{MqatParams, MQAT_DEMO, MQAT_L1},
    uov,
};
use rand::rngs::OsRng;

fn issue(pk: &PublicKey, sk: &SecretKey) -> Token {
    let (session, query) = user0(&mut OsRng, pk).unwrap();
    let response = sign0(sk, &query).unwrap();
    user1(pk, &session, &response).unwrap()
}

// ============================================================================
// Issuance Tests
// ============================================================================

#[test]
fn hundred_sessions_all_verify() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    for _ in 0..100 {
        let token = issue(&pk, &sk);
        assert!(verify(&pk, &token).is_ok());
    }
}

#[test]
fn query_hides_committed_value() {
    let (pk, _) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (session, query) = user0(&mut OsRng, &pk).unwrap();

    let w_bytes: Vec<u8> = session.w.iter().map(|e| e.value()).collect();
    assert_eq!(query.blinded.len(), MQAT_DEMO.uov.m);
    assert_ne!(query.blinded, w_bytes);
    assert_eq!(
        session.w,
        commitment_value(&MQAT_DEMO, &session.t, &session.salt)
    );
}

#[test]
fn response_unblinds_to_committed_value() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (session, query) = user0(&mut OsRng, &pk).unwrap();
    let response = sign0(&sk, &query).unwrap();

    let mut x = response.x.clone();
    x.extend_from_slice(&session.z_star);
    assert_eq!(pk.blinded_system().eval(&x).unwrap(), session.w);
}

#[test]
fn sessions_produce_distinct_tokens() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let t1 = issue(&pk, &sk);
    let t2 = issue(&pk, &sk);
    assert_ne!(t1.t, t2.t);
    assert_ne!(t1.signature, t2.signature);
}

// ============================================================================
// Protocol Error Tests
// ============================================================================

#[test]
fn corrupted_response_fails_binding() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (session, query) = user0(&mut OsRng, &pk).unwrap();
    let mut response = sign0(&sk, &query).unwrap();

    response.x[0] += Gf256::ONE;
    assert_eq!(
        user1(&pk, &session, &response),
        Err(MqError::ProtocolBindingFailure)
    );
}

#[test]
fn truncated_response_fails_binding() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (session, query) = user0(&mut OsRng, &pk).unwrap();
    let mut response = sign0(&sk, &query).unwrap();

    response.x.pop();
    assert_eq!(
        user1(&pk, &session, &response),
        Err(MqError::ProtocolBindingFailure)
    );
}

#[test]
fn response_from_other_issuer_fails_binding() {
    let (pk, _) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (_, other_sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (session, query) = user0(&mut OsRng, &pk).unwrap();
    let response = sign0(&other_sk, &query).unwrap();

    assert_eq!(
        user1(&pk, &session, &response),
        Err(MqError::ProtocolBindingFailure)
    );
}

#[test]
fn keygen_rejects_invalid_params() {
    let bad = MqatParams::new_unchecked(MQAT_DEMO.uov, 0, 16, 16, 16);
    assert!(matches!(
        keygen(&mut OsRng, bad),
        Err(MqError::InvalidParams { .. })
    ));
}

// ============================================================================
// Token Verification Tests
// ============================================================================

#[test]
fn tampered_token_value_rejected() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let mut token = issue(&pk, &sk);
    token.t[0] ^= 0x01;
    assert!(!verify_bool(&pk, &token));
}

#[test]
fn tampered_salt_rejected() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let mut token = issue(&pk, &sk);
    token.salt[3] ^= 0x80;
    assert!(verify(&pk, &token).is_err());
}

#[test]
fn wrong_length_token_value_rejected() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let mut token = issue(&pk, &sk);
    token.t.push(0);
    assert_eq!(
        verify(&pk, &token),
        Err(MqError::VerificationFailed(VerificationFailure::InvalidLength))
    );
}

#[test]
fn token_from_other_issuer_rejected() {
    let (pk1, sk1) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let (pk2, _) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let token = issue(&pk1, &sk1);
    assert!(verify(&pk1, &token).is_ok());
    assert!(!verify_bool(&pk2, &token));
}

#[test]
fn every_byte_flip_in_token_rejected() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let bytes = issue(&pk, &sk).to_bytes();

    for i in 0..bytes.len() {
        let mut corrupted = bytes.clone();
        corrupted[i] ^= 0x5A;
        let accepted = Token::from_bytes(&MQAT_DEMO, &corrupted)
            .map(|token| verify_bool(&pk, &token))
            .unwrap_or(false);
        assert!(!accepted, "corruption of byte {} was accepted", i);
    }
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn token_bytes_roundtrip() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let token = issue(&pk, &sk);

    let bytes = token.to_bytes();
    assert_eq!(bytes.len(), MQAT_DEMO.token_size::<Gf256>());
    let decoded = Token::from_bytes(&MQAT_DEMO, &bytes).unwrap();
    assert_eq!(decoded, token);
    assert!(verify(&pk, &decoded).is_ok());

    assert!(matches!(
        Token::from_bytes(&MQAT_DEMO, &bytes[1..]),
        Err(MqError::DecodingError { .. })
    ));
}

#[test]
fn public_key_bytes_roundtrip() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let restored = PublicKey::from_bytes(MQAT_DEMO, &pk.to_bytes()).unwrap();
    assert_eq!(restored, pk);

    let token = issue(&pk, &sk);
    assert!(verify(&restored, &token).is_ok());
}

#[test]
fn issuer_key_is_a_working_uov_key() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_DEMO).unwrap();
    let target = uov::hash_message(&MQAT_DEMO.uov, b"plain uov use");
    let sig = uov::sign(&sk.uov, &target).unwrap();
    assert!(uov::verify(&pk.uov, &target, &sig).is_ok());
}

// ============================================================================
// Parameter Set Tests
// ============================================================================

#[test]
#[ignore = "MQAT L1 issuance is slow in debug mode, run with --release"]
fn issuance_l1() {
    let (pk, sk) = keygen(&mut OsRng, MQAT_L1).unwrap();
    let token = issue(&pk, &sk);
    assert!(verify(&pk, &token).is_ok());
}
