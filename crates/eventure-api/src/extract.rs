use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections (bad syntax, wrong types, missing
/// content type) are reported as a 400 with the usual `{"message"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
