//! Normalization boundary for heterogeneous API response shapes.
//!
//! The server is inconsistent about envelopes: some endpoints return the
//! record directly, others nest it under `data`. Every endpoint response
//! passes through exactly one function here, so callers never guess field
//! paths.

use reqwest::StatusCode;
use serde_json::Value;

use crate::auth::models::LoginTokens;
use crate::errors::{ClientError, ClientResult};

/// Unwrap the `data` envelope when present, otherwise take the body as-is.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Extract tokens from a login response, tolerating both the flat
/// `{accessToken}` and the nested `{data: {accessToken}}` shapes.
pub fn login_tokens(body: &Value) -> ClientResult<LoginTokens> {
    let root = match body.get("data") {
        Some(data) if data.get("accessToken").is_some() => data,
        _ => body,
    };

    let access_token = root
        .get("accessToken")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::unexpected_response("login response has no accessToken"))?
        .to_string();

    let refresh_token = root
        .get("refreshToken")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(LoginTokens {
        access_token,
        refresh_token,
    })
}

/// User-visible message for a non-2xx response: the server's `message`
/// field verbatim, falling back to the HTTP status text.
pub fn error_message(status: StatusCode, body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_tokens_flat_shape() {
        let body = json!({"accessToken": "aaa", "refreshToken": "rrr"});
        let tokens = login_tokens(&body).unwrap();
        assert_eq!(tokens.access_token, "aaa");
        assert_eq!(tokens.refresh_token.as_deref(), Some("rrr"));
    }

    #[test]
    fn test_login_tokens_nested_shape() {
        let body = json!({"data": {"accessToken": "aaa"}, "message": "ok"});
        let tokens = login_tokens(&body).unwrap();
        assert_eq!(tokens.access_token, "aaa");
        assert_eq!(tokens.refresh_token, None);
    }

    #[test]
    fn test_login_tokens_missing_token_is_an_error() {
        let body = json!({"data": {"user": {}}});
        assert!(login_tokens(&body).is_err());
    }

    #[test]
    fn test_unwrap_data() {
        assert_eq!(
            unwrap_data(json!({"data": [1, 2]})),
            json!([1, 2])
        );
        assert_eq!(unwrap_data(json!([3])), json!([3]));
        assert_eq!(unwrap_data(json!({"id": "x"})), json!({"id": "x"}));
    }

    #[test]
    fn test_error_message_prefers_server_message() {
        let body = json!({"message": "Email already registered"});
        assert_eq!(
            error_message(StatusCode::CONFLICT, &body),
            "Email already registered"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, &json!({})),
            "Bad Gateway"
        );
    }
}
