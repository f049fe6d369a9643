//! Form bodies for the signed-in joke actions.
//!
//! The gated handlers take the raw [`web::Payload`] and only read it once the
//! auth gate has let the request through, so an anonymous caller is always
//! redirected to login whatever the body looks like.

use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use url::form_urlencoded;

use crate::domain::{Error, FORM_SUBMITTED_INCORRECTLY};

/// Largest form body accepted; the same as actix's `web::Form` default.
pub const FORM_BODY_LIMIT: usize = 16 * 1024;
/// 400 message for a body over [`FORM_BODY_LIMIT`].
pub const FORM_TOO_LARGE_MESSAGE: &str = "Form submission is too large";

/// Read and decode a form body of at most [`FORM_BODY_LIMIT`] bytes.
///
/// # Errors
///
/// `invalid_request` when the body is too large, cannot be read, or does not
/// fit `T`.
pub async fn read_form<T: DeserializeOwned>(payload: web::Payload) -> Result<T, Error> {
    let body = payload
        .to_bytes_limited(FORM_BODY_LIMIT)
        .await
        .map_err(|_| Error::invalid_request(FORM_TOO_LARGE_MESSAGE))?
        .map_err(|err| {
            debug!(error = %err, "form body could not be read");
            Error::invalid_request(FORM_SUBMITTED_INCORRECTLY)
        })?;
    decode_form(&body)
}

/// Decode `application/x-www-form-urlencoded` pairs into `T`.
///
/// The content type is not checked: a body that is not a form simply yields
/// no usable fields, which the caller's validation reports. A repeated key
/// keeps its last value.
pub fn decode_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    let fields: Map<String, Value> = form_urlencoded::parse(body)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();
    serde_json::from_value(Value::Object(fields))
        .map_err(|_| Error::invalid_request(FORM_SUBMITTED_INCORRECTLY))
}
