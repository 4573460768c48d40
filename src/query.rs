//! Opt-in query string canonicalization.
//!
//! [`Signer::sign`](crate::Signer::sign) passes query strings through
//! verbatim, which is only correct for zero- or one-parameter queries (or
//! queries the caller has already sorted and encoded). Callers with
//! multiple parameters canonicalize first:
//!
//! ```
//! use s3_sigv4::query;
//!
//! let canonical = query::canonicalize("prefix=CI/&max-keys=3");
//! assert_eq!(canonical, "max-keys=3&prefix=CI%2F");
//! ```

use crate::constants::AWS_QUERY_ENCODE_SET;
use percent_encoding::utf8_percent_encode;

/// Sort a query string by parameter name and percent-encode names and
/// values with the AWS query encode set.
///
/// The input is parsed as `application/x-www-form-urlencoded`, so values
/// that are already percent-encoded are decoded and re-encoded rather than
/// double-encoded. A parameter without `=` keeps an empty value
/// (`lifecycle` becomes `lifecycle=`), matching what a SigV4 verifier
/// expects to see in the canonical request.
pub fn canonicalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    // Sort by param name
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
