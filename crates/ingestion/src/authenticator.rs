//! Request authentication for inbound Storyblok webhooks.
//!
//! Storyblok signs each delivery with a lowercase-hex HMAC-SHA1 of the raw
//! body, keyed by the shared webhook secret, and sends it in the
//! `webhook-signature` header. Deployments that cannot use the header may
//! temporarily pass the secret as a URL parameter instead.
//!
//! The two modes are mutually exclusive. A request that carries a valid
//! signature *and* a URL secret is rejected: the fallback URL should have
//! been retired when signing was enabled.
//!
//! # Security
//!
//! Signature and secret comparisons go through [`subtle::ConstantTimeEq`] so
//! their timing does not reveal where a mismatch occurred.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::{AuthenticationFailure, WebhookConfig};

type HmacSha1 = Hmac<Sha1>;

/// Name of the header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "webhook-signature";

/// Everything needed to authenticate one request.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticationCredentials<'a> {
    /// The configured shared secret; `""` when none is configured.
    pub configured_secret: &'a str,
    /// Whether the URL secret fallback is enabled.
    pub allow_url_secret: bool,
    /// The `webhook-signature` header; `""` when absent.
    pub signature: &'a str,
    /// The secret passed in the URL, if any.
    pub url_secret: Option<&'a str>,
}

impl<'a> AuthenticationCredentials<'a> {
    /// Combines the configuration snapshot with the request's credentials.
    pub fn new(
        config: &'a WebhookConfig,
        signature: Option<&'a str>,
        url_secret: Option<&'a str>,
    ) -> Self {
        Self {
            configured_secret: config.secret(),
            allow_url_secret: config.url_secret_allowed(),
            signature: signature.unwrap_or(""),
            url_secret,
        }
    }
}

/// Computes the lowercase-hex HMAC-SHA1 signature of `body`.
///
/// Returns `None` only if the key is rejected, which HMAC never does.
pub fn sign(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}

/// Verifies the request, returning the reason on failure.
///
/// The rules are evaluated in order and the first match decides:
///
/// 1. Valid signature and a URL secret → [`AuthenticationFailure::BothCredentialsPresent`].
/// 2. Valid signature → accepted.
/// 3. URL secret with the fallback disabled → [`AuthenticationFailure::UrlSecretNotAllowed`].
/// 4. URL secret with the fallback enabled → accepted iff it equals the configured secret.
/// 5. Otherwise accepted only when neither a signature nor a secret exists.
///
/// Critical anomalies (1 and 3) are logged here.
///
/// # Errors
///
/// Returns the [`AuthenticationFailure`] describing the rejected rule.
pub fn verify(
    body: &[u8],
    credentials: &AuthenticationCredentials<'_>,
) -> Result<(), AuthenticationFailure> {
    let signature_valid = sign(credentials.configured_secret, body)
        .is_some_and(|expected| constant_time_eq(&expected, credentials.signature));

    if signature_valid {
        if credentials.url_secret.is_some() {
            tracing::error!(
                severity = "critical",
                anomaly = AuthenticationFailure::BothCredentialsPresent.anomaly(),
                "Storyblok webhook: detected both webhook signature and url secret. \
                 Disable the URL secret, update the webhook URL and rotate the secret."
            );
            return Err(AuthenticationFailure::BothCredentialsPresent);
        }
        return Ok(());
    }

    if let Some(url_secret) = credentials.url_secret {
        if !credentials.allow_url_secret {
            tracing::error!(
                severity = "critical",
                anomaly = AuthenticationFailure::UrlSecretNotAllowed.anomaly(),
                "Storyblok webhook: detected url secret even though it is disabled. \
                 Update the webhook URL and rotate the secret."
            );
            return Err(AuthenticationFailure::UrlSecretNotAllowed);
        }

        return if constant_time_eq(credentials.configured_secret, url_secret) {
            Ok(())
        } else {
            Err(AuthenticationFailure::UrlSecretMismatch)
        };
    }

    // Unsecured deployments: no secret configured and nothing sent.
    if credentials.signature.is_empty() && credentials.configured_secret.is_empty() {
        return Ok(());
    }

    Err(AuthenticationFailure::SignatureMismatch)
}

/// Boolean form of [`verify`] taking each credential separately.
///
/// `configured_secret` of `None` and `Some("")` are equivalent.
pub fn authenticate(
    body: &[u8],
    signature: Option<&str>,
    configured_secret: Option<&str>,
    url_secret: Option<&str>,
    allow_url_secret: bool,
) -> bool {
    let credentials = AuthenticationCredentials {
        configured_secret: configured_secret.unwrap_or(""),
        allow_url_secret,
        signature: signature.unwrap_or(""),
        url_secret,
    };
    verify(body, &credentials).is_ok()
}

#[cfg(test)]
#[path = "authenticator_tests.rs"]
mod tests;
