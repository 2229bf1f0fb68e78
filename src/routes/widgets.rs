//! Widget CRUD routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::debug;

use crate::services::record::Widget;
use crate::services::widget::{WidgetError, WidgetSpec};
use crate::state::AppState;

/// Body for `POST /widget` and `PUT /widget/:id`. Geometry is required;
/// `zIndex` is optional and also accepted as `zindex`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBody {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    #[serde(alias = "zindex")]
    pub z_index: Option<i32>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl TryFrom<WidgetBody> for WidgetSpec {
    type Error = RequestError;

    fn try_from(body: WidgetBody) -> Result<Self, Self::Error> {
        Ok(Self {
            x: body.x.ok_or(RequestError::MissingField("x"))?,
            y: body.y.ok_or(RequestError::MissingField("y"))?,
            width: body.width.ok_or(RequestError::MissingField("width"))?,
            height: body.height.ok_or(RequestError::MissingField("height"))?,
            z_index: body.z_index,
        })
    }
}

pub(crate) fn request_error_to_status(err: RequestError) -> StatusCode {
    debug!(error = %err, "rejected widget body");
    match err {
        RequestError::MissingField(_) => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn widget_error_to_status(err: WidgetError) -> StatusCode {
    debug!(error = %err, "widget lookup failed");
    match err {
        WidgetError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

/// `POST /widget` — create a widget.
pub async fn create_widget(
    State(state): State<AppState>,
    Json(body): Json<WidgetBody>,
) -> Result<(StatusCode, Json<Widget>), StatusCode> {
    let spec = WidgetSpec::try_from(body).map_err(request_error_to_status)?;
    let widget = state.widgets.create(spec);
    Ok((StatusCode::CREATED, Json(widget)))
}

/// `GET /widget/:id` — fetch one widget.
pub async fn get_widget(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Widget>, StatusCode> {
    let widget = state.widgets.get(id).map_err(widget_error_to_status)?;
    Ok(Json(widget))
}

/// `PUT /widget/:id` — replace geometry and move to a new z-index.
///
/// The body is validated before the id is looked up, so a malformed body on a
/// missing widget is a 400, not a 404.
pub async fn update_widget(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<WidgetBody>,
) -> Result<Json<Widget>, StatusCode> {
    let spec = WidgetSpec::try_from(body).map_err(request_error_to_status)?;
    let widget = state
        .widgets
        .update(id, spec)
        .map_err(widget_error_to_status)?;
    Ok(Json(widget))
}

/// `DELETE /widget/:id` — remove a widget and return it.
pub async fn delete_widget(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Widget>, StatusCode> {
    let widget = state.widgets.delete(id).map_err(widget_error_to_status)?;
    Ok(Json(widget))
}

/// `GET /widgets` — all widgets ordered by z-index.
pub async fn list_widgets(State(state): State<AppState>) -> Json<Vec<Widget>> {
    Json(state.widgets.list())
}

#[cfg(test)]
#[path = "widgets_test.rs"]
mod tests;
