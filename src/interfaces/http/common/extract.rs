//! Request extractors for the JSON API
//!
//! Drop-in replacements for `Json`, `Query` and `Path` whose rejections
//! answer with the `{success:false, error}` envelope instead of axum's
//! plain-text bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// `Query<T>` with an enveloped 400 on malformed parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiRejection))]
pub struct ApiQuery<T>(pub T);

/// `Path<T>` with an enveloped 400 on unparsable segments.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiRejection))]
pub struct ApiPath<T>(pub T);

/// JSON body checked against its `validator` rules.
///
/// Malformed or incomplete JSON is a 400, a body that parses but breaks a
/// field rule is a 422 naming every broken rule.
pub struct ValidatedJson<T>(pub T);

pub enum ApiRejection {
    Json(JsonRejection),
    Query(QueryRejection),
    Path(PathRejection),
    Rules(validator::ValidationErrors),
}

impl From<JsonRejection> for ApiRejection {
    fn from(r: JsonRejection) -> Self {
        Self::Json(r)
    }
}

impl From<QueryRejection> for ApiRejection {
    fn from(r: QueryRejection) -> Self {
        Self::Query(r)
    }
}

impl From<PathRejection> for ApiRejection {
    fn from(r: PathRejection) -> Self {
        Self::Path(r)
    }
}

fn broken_rules(errors: &validator::ValidationErrors) -> String {
    let mut rules: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    rules.sort();

    if rules.is_empty() {
        "Validation failed".to_string()
    } else {
        rules.join("; ")
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Json(r) => (StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", r.body_text())),
            Self::Query(r) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid query: {}", r.body_text()),
            ),
            // A missing path parameter is a routing bug, keep axum's 500.
            Self::Path(r) => (r.status(), format!("Invalid path: {}", r.body_text())),
            Self::Rules(errors) => (StatusCode::UNPROCESSABLE_ENTITY, broken_rules(&errors)),
        };
        tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(ApiRejection::Rules)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::{get, put};
    use axum::Router;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct MeterBody {
        #[validate(length(min = 1, max = 20))]
        status: String,
        #[validate(range(min = 0.0))]
        kwh: f64,
    }

    #[derive(Debug, Deserialize)]
    struct ClientFilter {
        client_id: Option<i32>,
    }

    async fn update_meter(
        ApiPath(_id): ApiPath<i32>,
        ValidatedJson(_body): ValidatedJson<MeterBody>,
    ) -> &'static str {
        "ok"
    }

    async fn filter(ApiQuery(f): ApiQuery<ClientFilter>) -> String {
        format!("{:?}", f.client_id)
    }

    fn app() -> Router {
        Router::new()
            .route("/meter/{id}", put(update_meter))
            .route("/meters", get(filter))
    }

    async fn put_meter(uri: &str, body: Body) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn body(value: Value) -> Body {
        Body::from(value.to_string())
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let (status, _) = put_meter("/meter/1", body(json!({"status": "ok", "kwh": 12.5}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_or_incomplete_json_is_enveloped_400() {
        let (status, resp) = put_meter("/meter/1", Body::from("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["success"], false);

        let (status, resp) = put_meter("/meter/1", body(json!({"status": "ok"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(resp["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn broken_rules_are_422_listing_each_field() {
        let (status, resp) = put_meter("/meter/1", body(json!({"status": "", "kwh": -1.0}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error = resp["error"].as_str().unwrap();
        assert!(error.contains("kwh") && error.contains("status"), "{error}");
    }

    #[tokio::test]
    async fn unparsable_path_and_query_are_enveloped_400() {
        let (status, resp) = put_meter("/meter/abc", body(json!({"status": "ok", "kwh": 1.0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["success"], false);
        assert!(resp["error"].as_str().unwrap().starts_with("Invalid path"));

        let req = Request::builder()
            .uri("/meters?client_id=abc")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let resp: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(resp["error"].as_str().unwrap().starts_with("Invalid query"));
    }
}
