//! Webhook ingestor for the identity provider's account-lifecycle events.
//! Stateless: each call is gated only by an exact match of the `User-Agent`
//! header value against the configured constant. Replies always carry a
//! `{message, status}` body whose status field matches the HTTP status.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    handlers::AppState,
    models::{user::QuotaSnapshot, AccountSnapshot, QuotaEvent, UpdateEvent},
};

fn webhook_reply(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "message": message.into(), "status": status.as_u16() })),
    )
        .into_response()
}

/// Rejects calls whose `User-Agent` value is not the expected constant.
/// Header name lookup is case-insensitive on every endpoint; value
/// comparison is exact. The store is never touched on rejection.
fn reject_unknown_agent(headers: &HeaderMap, expected: &str) -> Option<Response> {
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if agent == expected {
        None
    } else {
        tracing::warn!("webhook rejected: invalid user agent {:?}", agent);
        Some(webhook_reply(
            StatusCode::FORBIDDEN,
            format!("Invalid user agent: {agent}"),
        ))
    }
}

fn parse_event<T: DeserializeOwned>(body: &Bytes) -> std::result::Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("webhook payload rejected: {}", e);
        webhook_reply(StatusCode::BAD_REQUEST, format!("An error occurred: {e}"))
    })
}

fn valid_timestamps(snapshot: &AccountSnapshot) -> bool {
    snapshot.created_at().is_some() && snapshot.updated_at().is_some()
}

#[utoipa::path(
    post,
    path = "/user_create",
    tag = "webhooks",
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Malformed payload"),
        (status = 403, description = "Invalid user agent"),
    )
)]
pub async fn user_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(reject) = reject_unknown_agent(&headers, &state.config.webhook_user_agent) {
        return reject;
    }
    let snapshot: AccountSnapshot = match parse_event(&body) {
        Ok(event) => event,
        Err(reply) => return reply,
    };
    if !valid_timestamps(&snapshot) {
        return webhook_reply(
            StatusCode::BAD_REQUEST,
            "An error occurred: timestamp out of range",
        );
    }

    tracing::info!(user_id = %snapshot.id, "user_create event");
    match state.database.create_user(&snapshot).await {
        Ok(()) => webhook_reply(StatusCode::CREATED, "User created successfully"),
        Err(e) => {
            tracing::error!("user_create failed: {}", e);
            webhook_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {e}"),
            )
        }
    }
}

#[utoipa::path(
    post,
    path = "/user_update",
    tag = "webhooks",
    responses(
        (status = 201, description = "Update processed; writes only when a field changed"),
        (status = 400, description = "Malformed payload"),
        (status = 403, description = "Invalid user agent"),
    )
)]
pub async fn user_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(reject) = reject_unknown_agent(&headers, &state.config.webhook_user_agent) {
        return reject;
    }
    let event: UpdateEvent = match parse_event(&body) {
        Ok(event) => event,
        Err(reply) => return reply,
    };
    if !valid_timestamps(&event.after) {
        return webhook_reply(
            StatusCode::BAD_REQUEST,
            "An error occurred: timestamp out of range",
        );
    }

    // Full "after" snapshot is written, but only when something changed.
    if event.before.differs_from(&event.after) {
        tracing::info!(user_id = %event.after.id, "user_update event: writing after snapshot");
        if let Err(e) = state.database.update_user(&event.after).await {
            tracing::error!("user_update failed: {}", e);
            return webhook_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {e}"),
            );
        }
    } else {
        tracing::info!(user_id = %event.after.id, "user_update event: no field changed");
    }

    webhook_reply(StatusCode::CREATED, "User updated successfully")
}

#[utoipa::path(
    post,
    path = "/user_quota",
    tag = "webhooks",
    responses(
        (status = 201, description = "Quota snapshot overwritten"),
        (status = 400, description = "Malformed payload"),
        (status = 403, description = "Invalid user agent"),
    )
)]
pub async fn user_quota(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(reject) = reject_unknown_agent(&headers, &state.config.webhook_user_agent) {
        return reject;
    }
    let event: QuotaEvent = match parse_event(&body) {
        Ok(event) => event,
        Err(reply) => return reply,
    };

    let quota = QuotaSnapshot {
        quota_usage: Some(event.quota_info.current_usage_count),
        quota_usage_percent: Some(event.quota_info.current_usage_percentage),
        is_quota_exceeded: Some(event.quota_info.is_quota_exceeded),
        quota_interval: Some(event.quota_info.quota_interval.clone()),
        quota_limit: Some(event.quota_info.quota_limit),
    };

    tracing::info!(user_id = %event.member.id, "user_quota event");
    match state
        .database
        .update_user_quota(&event.member.id, &quota)
        .await
    {
        Ok(()) => webhook_reply(StatusCode::CREATED, "User quota processed successfully"),
        Err(e) => {
            tracing::error!("user_quota failed: {}", e);
            webhook_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {e}"),
            )
        }
    }
}
