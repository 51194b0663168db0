//! # pqsigs-mq
//!
//! Multivariate-quadratic (MQ) post-quantum signatures and anonymous tokens.
//!
//! ## Overview
//!
//! Security rests on the hardness of solving random systems of quadratic
//! equations over a finite field. The crate provides three constructions:
//!
//! - [`uov`]: the Unbalanced Oil and Vinegar trapdoor signature over GF(256).
//! - [`mqdss`]: a Fiat-Shamir signature proving knowledge of a preimage
//!   under a public quadratic map, over GF(256) or GF(31).
//! - [`mqat`]: a blind token issuance protocol in which the issuer signs with
//!   UOV and the user turns the result into an MQDSS-signed token.
//!
//! This implementation is intended for **educational and experimental purposes only**.
//! It has not been audited for production use and may contain timing side-channels.
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use pqsigs_mq::{params::UOV_DEMO, uov};
//!
//! // Generate a key pair
//! let (pk, sk) = uov::keygen(&mut OsRng, UOV_DEMO).expect("keygen should succeed");
//!
//! // Sign a message digest
//! let target = uov::hash_message(&UOV_DEMO, b"Hello, post-quantum world!");
//! let sig = uov::sign(&sk, &target).expect("signing should succeed");
//!
//! // Verify the signature
//! assert!(uov::verify(&pk, &target, &sig).is_ok());
//! ```
//!
//! Token issuance runs over four calls:
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use pqsigs_mq::{mqat, params::MQAT_DEMO};
//!
//! let (pk, sk) = mqat::keygen(&mut OsRng, MQAT_DEMO).unwrap();
//! let (session, query) = mqat::user0(&mut OsRng, &pk).unwrap();
//! let response = mqat::sign0(&sk, &query).unwrap();
//! let token = mqat::user1(&pk, &session, &response).unwrap();
//! assert!(mqat::verify_bool(&pk, &token));
//! ```
//!
//! ## Parameter Sets
//!
//! - [`params::UOV_DEMO`], [`params::UOV_L1`], [`params::UOV_L3`], [`params::UOV_L5`]
//! - [`params::MQDSS_DEMO`], [`params::MQDSS_256_L1`] over GF(256);
//!   [`params::MQDSS_31_48`], [`params::MQDSS_31_64`] over GF(31)
//! - [`params::MQAT_DEMO`], [`params::MQAT_L1`]
//!
//! The `DEMO` sets are small and NOT secure.
//!
//! ## Modules
//!
//! - [`error`]: Error types
//! - [`field`]: GF(2^8) and GF(31) arithmetic
//! - [`expand`]: SHA3/SHAKE hashing and seed expansion
//! - [`packing`]: Element packing for serialization
//! - [`matrix`]: Matrices and borrowed transposed/triangular views
//! - [`mq`]: Quadratic maps and their polar forms
//! - [`params`]: Parameter sets and validation
//!
//! ## Features
//!
//! - `parallel`: runs MQDSS rounds and UOV vinegar trials on a rayon pool.
//!   Output is identical with or without it.
//!
//! ## Security Warning
//!
//! This implementation:
//! - Is NOT constant-time and may leak information through timing
//! - Has NOT been audited by security professionals
//! - Should NOT be used in production systems
//!
//! Use only for learning, experimentation, and research.

#![warn(missing_docs)]

pub mod error;
pub mod expand;
pub mod field;
pub mod matrix;
pub mod mq;
pub mod mqat;
pub mod mqdss;
pub mod packing;
pub mod params;
pub mod uov;

// Re-export commonly used types at crate root for convenience
pub use error::{MqError, Result, VerificationFailure};
pub use field::{Field, Gf256, Gf31};
pub use matrix::{Matrix, MatrixRef, View, ViewKind, ViewMut};
pub use mq::{DenseSystem, QuadraticMap};
pub use params::{
    MqatParams, MqdssParams, UovParams, MQAT_DEMO, MQAT_L1, MQDSS_256_L1, MQDSS_31_48,
    MQDSS_31_64, MQDSS_DEMO, UOV_DEMO, UOV_L1, UOV_L3, UOV_L5,
};
