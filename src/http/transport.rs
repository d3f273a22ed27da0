use async_trait::async_trait;
use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
    multipart::Form,
};
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Body, Transport};
use crate::error::ApiError;

/// The bottom of the stack: a shared `reqwest::Client` bound to a base URL.
///
/// Every request carries `Accept: application/json`. Bodies go out as
/// multipart form data unless the request asks for JSON. No retries and no
/// timeout: failures surface to the caller immediately.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        // leading slash would discard the base URL path prefix
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Request(format!("invalid path {path}: {e}")))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        tracing::debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Form(value) => builder.multipart(to_multipart(&value)?),
            Body::Json(value) => builder.json(&value),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), "received response");
        Ok(ApiResponse { status, body })
    }
}

/// Flattens a JSON object into form fields: nested objects become
/// `key[child]`, arrays become repeated `key[]`, nulls are skipped.
pub(crate) fn form_fields(value: &Value) -> Result<Vec<(String, String)>, ApiError> {
    let mut fields = Vec::new();
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, v) in map {
                flatten_into(&mut fields, key.clone(), v);
            }
        }
        other => {
            return Err(ApiError::Request(format!(
                "form body must be an object, got {other}"
            )));
        }
    }
    Ok(fields)
}

fn flatten_into(fields: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => fields.push((key, s.clone())),
        Value::Bool(_) | Value::Number(_) => fields.push((key, value.to_string())),
        Value::Array(items) => {
            for item in items {
                flatten_into(fields, format!("{key}[]"), item);
            }
        }
        Value::Object(map) => {
            for (child, v) in map {
                flatten_into(fields, format!("{key}[{child}]"), v);
            }
        }
    }
}

fn to_multipart(value: &Value) -> Result<Form, ApiError> {
    Ok(form_fields(value)?
        .into_iter()
        .fold(Form::new(), |form, (k, v)| form.text(k, v)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn form_fields_flatten_nested_values() {
        let fields = form_fields(&json!({
            "name": "Awa",
            "age": 31,
            "active": true,
            "note": null,
            "days": ["monday", "friday"],
            "address": { "city": "Bamako" }
        }))
        .unwrap();

        assert!(fields.contains(&("name".into(), "Awa".into())));
        assert!(fields.contains(&("age".into(), "31".into())));
        assert!(fields.contains(&("active".into(), "true".into())));
        assert!(fields.contains(&("days[]".into(), "monday".into())));
        assert!(fields.contains(&("days[]".into(), "friday".into())));
        assert!(fields.contains(&("address[city]".into(), "Bamako".into())));
        assert!(!fields.iter().any(|(k, _)| k == "note"));
    }

    #[test]
    fn form_body_must_be_object() {
        assert!(matches!(form_fields(&json!([1, 2])), Err(ApiError::Request(_))));
        assert!(form_fields(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn paths_keep_base_prefix() {
        let transport =
            ReqwestTransport::new(Url::parse("http://localhost:8000/api/").unwrap()).unwrap();
        let url = transport.url_for("/shifts/5").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/shifts/5");

        let url = transport
            .url_for("/attendances/summary?period=monthly&page=2&")
            .unwrap();
        assert_eq!(url.query(), Some("period=monthly&page=2&"));
    }
}
