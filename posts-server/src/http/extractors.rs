//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde_json::Value;

use super::error::{ApiError, Operation};
use crate::models::{NewPost, PostId, PostPayload};

/// Extract and validate a post write body.
///
/// Malformed JSON, non-object bodies and failed field checks all reject with
/// a 400 before the handler runs, so no statement is issued for a bad payload.
pub struct ValidPost(pub NewPost);

impl<S> FromRequest<S> for ValidPost
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let op = Operation::for_method(req.method());

        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody {
                op,
                detail: rejection.body_text(),
            })?;

        // Derived struct deserializers also accept sequences; only objects count
        if !body.is_object() {
            return Err(ApiError::MalformedBody {
                op,
                detail: "request body must be a JSON object".into(),
            });
        }

        let payload: PostPayload =
            serde_json::from_value(body).map_err(|e| ApiError::MalformedBody {
                op,
                detail: e.to_string(),
            })?;

        let post = payload.validate()?;
        Ok(Self(post))
    }
}

/// Extract a post id from the path.
///
/// An id that cannot be an integer matches no row, so it rejects with the
/// not-found wording of the operation implied by the request method.
pub struct ValidPostId(pub PostId);

impl<S> FromRequestParts<S> for ValidPostId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let op = Operation::for_method(&parts.method);

        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound(op))?;

        let id = PostId::parse(&id).ok_or(ApiError::NotFound(op))?;
        Ok(Self(id))
    }
}

/// Query string extractor that rejects with a JSON 400.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidQuery {
                detail: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
