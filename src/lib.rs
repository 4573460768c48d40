//! AWS Signature Version 4 request signing for S3-compatible object stores.
//!
//! This crate produces single-shot, header-based SigV4 signatures: given a
//! credential, a [`SigningContext`] (host, region, service), and one request
//! descriptor, it derives the `Authorization` header plus the `x-amz-date`
//! and `x-amz-content-sha256` companion headers that any SigV4-compatible
//! verifier can recompute and check.
//!
//! The signer is a pure computation. It performs no network I/O, keeps no
//! state between calls, and may be used concurrently from multiple threads.
//!
//! ## Example
//!
//! ```no_run
//! use http::Method;
//! use s3_sigv4::{DefaultCredentialProvider, ProvideCredential, Signer, SigningContext, SigningRequest};
//!
//! # fn main() -> s3_sigv4::Result<()> {
//! let credential = DefaultCredentialProvider::new()
//!     .provide_credential()?
//!     .expect("no credential found");
//!
//! let signer = Signer::new(SigningContext::new(
//!     "examplebucket.s3.amazonaws.com",
//!     "us-east-1",
//!     "s3",
//! ));
//!
//! let signed = signer.sign(
//!     &credential,
//!     SigningRequest::new(Method::GET).with_query_string("versions=0"),
//! )?;
//!
//! // Merge signed.headers into the outbound HTTP request.
//! println!("{}", signed.authorization);
//! # Ok(())
//! # }
//! ```
//!
//! ## Scope
//!
//! Only the `AWS4-HMAC-SHA256` header-based scheme is implemented. Query
//! pre-signing, chunked payload signatures, and multipart uploads are out of
//! scope. The query string is signed verbatim; multi-parameter queries must
//! be canonicalized first, see [`query::canonicalize`].

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod query;
pub mod time;

mod constants;
mod error;
pub use error::{Error, ErrorKind, Result};
mod credential;
pub use credential::Credential;
mod provide;
pub use provide::{
    DefaultCredentialProvider, EnvCredentialProvider, ProfileCredentialProvider,
    ProvideCredential, ProvideCredentialChain, StaticCredentialProvider,
};
mod payload;
pub use payload::Payload;
mod sign;
pub use sign::{generate_signing_key, SignedRequest, Signer, SigningContext, SigningRequest};
