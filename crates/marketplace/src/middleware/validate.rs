use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Query, Request},
    http::{StatusCode, header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

type Rejection = (StatusCode, Json<Value>);

/// JSON body extractor that runs `validator` rules before the handler sees the value.
pub struct SimpleValidatedJson<T>(pub T);

/// Query-string counterpart of [`SimpleValidatedJson`].
pub struct SimpleValidatedQuery<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| malformed("Invalid JSON", rejection.status(), rejection.body_text()))?;

        value.validate().map_err(|errors| invalid(&errors))?;

        Ok(Self(value))
    }
}

impl<S, T> FromRequestParts<S> for SimpleValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                malformed("Invalid query string", rejection.status(), rejection.body_text())
            })?;

        value.validate().map_err(|errors| invalid(&errors))?;

        Ok(Self(value))
    }
}

/// Form fields whose text is parsed as JSON (numbers, booleans, arrays)
/// instead of being taken as a plain string.
pub trait FormFields {
    const TYPED_FIELDS: &'static [&'static str];
}

/// File part of a multipart body.
#[derive(Debug, Clone)]
pub struct FormFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Accepts either a JSON body or `multipart/form-data` carrying the same
/// fields plus an optional `image` file. Both are validated the same way.
pub struct ValidatedJsonOrForm<T> {
    pub body: T,
    pub image: Option<FormFile>,
}

impl<S, T> FromRequest<S> for ValidatedJsonOrForm<T>
where
    T: DeserializeOwned + Validate + FormFields + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let SimpleValidatedJson(body) = SimpleValidatedJson::<T>::from_request(req, state).await?;
            return Ok(Self { body, image: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| malformed("Invalid form", rejection.status(), rejection.body_text()))?;

        let mut fields = Map::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| malformed("Invalid form", e.status(), e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "image" || field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| malformed("Invalid form", e.status(), e.body_text()))?;

                if !bytes.is_empty() {
                    image = Some(FormFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| malformed("Invalid form", e.status(), e.body_text()))?;
            fields.insert(name.clone(), form_value::<T>(&name, text));
        }

        let body: T = serde_json::from_value(Value::Object(fields))
            .map_err(|e| malformed("Invalid form", StatusCode::BAD_REQUEST, e.to_string()))?;
        body.validate().map_err(|errors| invalid(&errors))?;

        Ok(Self { body, image })
    }
}

fn form_value<T: FormFields>(name: &str, text: String) -> Value {
    if !T::TYPED_FIELDS.contains(&name) {
        return Value::String(text);
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or(Value::String(text))
}

fn malformed(kind: &str, status: StatusCode, detail: String) -> Rejection {
    let status = if status.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        status
    };

    (
        status,
        Json(json!({
            "status": "error",
            "message": format!("{kind}: {detail}"),
        })),
    )
}

fn invalid(errors: &ValidationErrors) -> Rejection {
    let mut summary = Vec::new();
    let mut details = Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| describe(&field, e))
            .collect();

        summary.extend(messages.iter().map(|m| format!("{field}: {m}")));
        details.insert(field.to_string(), json!(messages));
    }

    summary.sort();
    let message = if summary.is_empty() {
        "Validation failed".to_string()
    } else {
        summary.join("; ")
    };

    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": "error",
            "message": message,
            "details": details,
        })),
    )
}

fn describe(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "required" => format!("{field} is required"),
            _ => format!("Invalid {field}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::product::FindAllProducts;
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    async fn page_size(SimpleValidatedQuery(q): SimpleValidatedQuery<FindAllProducts>) -> String {
        q.page_size.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/", get(page_size));
        app.oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[test]
    fn typed_form_fields_are_parsed_as_json() {
        struct Listing;
        impl FormFields for Listing {
            const TYPED_FIELDS: &'static [&'static str] = &["price", "checklist", "is_available"];
        }

        assert_eq!(form_value::<Listing>("price", "15000".into()), json!(15000));
        assert_eq!(form_value::<Listing>("is_available", "false".into()), json!(false));
        assert_eq!(
            form_value::<Listing>("checklist", r#"["masih segar"]"#.into()),
            json!(["masih segar"])
        );
        assert_eq!(form_value::<Listing>("price", " ".into()), Value::Null);
        assert_eq!(form_value::<Listing>("name", "123".into()), json!("123"));
    }

    #[tokio::test]
    async fn query_defaults_and_bounds() {
        assert_eq!(status_for("/").await, StatusCode::OK);
        assert_eq!(status_for("/?page_size=100").await, StatusCode::OK);
        assert_eq!(status_for("/?page_size=101").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?page=abc").await, StatusCode::BAD_REQUEST);
    }
}
