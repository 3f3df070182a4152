use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use userbase_core::AppError;

/// Turns a body rejection into a client-facing message.
///
/// serde reports a missing field as ``missing field `name` ``; that name is
/// surfaced as `name is required`.
fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
        JsonRejection::JsonDataError(_) => {
            let text = rejection.body_text();
            match text
                .split_once("missing field `")
                .and_then(|(_, rest)| rest.split_once('`'))
            {
                Some((field, _)) => format!("{field} is required"),
                None if text.contains("invalid type") => "Invalid field type in request".to_string(),
                None => "Invalid request body".to_string(),
            }
        }
        _ => "Invalid request body".to_string(),
    }
}

/// Joins every failed rule into one message, sorted so the output does not
/// depend on field iteration order.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// JSON body extractor that also runs `validator` rules.
///
/// Every rejection, whether malformed JSON or a failed rule, is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(rejection_message(&rejection))))?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!(validation_message(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
