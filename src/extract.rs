//! Request extractors

use axum::extract::FromRequest;

use crate::AppError;

/// `Json` whose rejections become `400 {detail}` instead of axum's plain-text 422
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
