//! User pages: list, create, edit, delete.
//!
//! Each route is split in two: an orchestration function that talks to the
//! backend and records the outcome in any `NotificationStore`, and a thin
//! axum handler that binds it to the signed-cookie store and renders.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use crate::api::{ApiClient, ApiError, BackendResponse, User, UserEnvelope, UserList, UserPayload};
use crate::flash::{FlashCookie, NotificationStore};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pages::error::{not_found_page, PageError};
use crate::pages::form::{FormValues, UserForm};
use crate::pages::templates::{FormMode, PageContent, UserFormHtml, UsersHtml};

pub const LIST_FAILED: &str = "Failed to load users from API";
pub const LIST_UNREADABLE: &str = "Error connecting to backend API";
pub const CREATED: &str = "User created successfully! 🎉";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const UPDATED: &str = "User updated successfully! ✅";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const NOT_FOUND: &str = "User not found";
pub const DELETED: &str = "User deleted successfully! 🗑️";
pub const DELETE_FAILED: &str = "Failed to delete user";

/// Fetch the user list. Any failure yields an empty list and one error
/// notification: an absent or refused response reports the load failure,
/// a body that cannot be decoded reports the connection error.
pub async fn load_users<N: NotificationStore>(api: &ApiClient, notes: &mut N) -> Vec<User> {
    match api.list_users().await {
        Ok(response) if response.is(StatusCode::OK) => match response.json::<UserList>() {
            Ok(list) => list.data,
            Err(e) => {
                tracing::error!(error = %e, "User list body not understood");
                notes.error(LIST_UNREADABLE);
                Vec::new()
            }
        },
        Ok(response) => {
            tracing::warn!(status = %response.status, "Backend refused user list");
            notes.error(LIST_FAILED);
            Vec::new()
        }
        Err(_) => {
            notes.error(LIST_FAILED);
            Vec::new()
        }
    }
}

/// Submit a new user. Returns true when the backend created it.
pub async fn create_user<N: NotificationStore>(
    api: &ApiClient,
    payload: &UserPayload,
    notes: &mut N,
) -> bool {
    let outcome = api.create_user(payload).await;
    record_write(outcome, StatusCode::CREATED, CREATED, CREATE_FAILED, notes)
}

/// Fetch one user for the edit form. `None` queues an error notification.
pub async fn load_user<N: NotificationStore>(
    api: &ApiClient,
    id: i64,
    notes: &mut N,
) -> Option<User> {
    let user = match api.get_user(id).await {
        Ok(response) if response.is(StatusCode::OK) => match response.json::<UserEnvelope>() {
            Ok(envelope) => Some(envelope.data),
            Err(e) => {
                tracing::warn!(user_id = id, error = %e, "User body not understood");
                None
            }
        },
        Ok(response) => {
            tracing::debug!(user_id = id, status = %response.status, "User lookup refused");
            None
        }
        Err(_) => None,
    };

    if user.is_none() {
        notes.error(NOT_FOUND);
    }
    user
}

/// Submit changes to an existing user. Returns true when the backend accepted.
pub async fn update_user<N: NotificationStore>(
    api: &ApiClient,
    id: i64,
    payload: &UserPayload,
    notes: &mut N,
) -> bool {
    let outcome = api.update_user(id, payload).await;
    record_write(outcome, StatusCode::OK, UPDATED, UPDATE_FAILED, notes)
}

/// Delete a user. The outcome only changes the notification category.
pub async fn delete_user<N: NotificationStore>(api: &ApiClient, id: i64, notes: &mut N) -> bool {
    match api.delete_user(id).await {
        Ok(response) if response.is(StatusCode::OK) => {
            notes.success(DELETED);
            true
        }
        _ => {
            notes.error(DELETE_FAILED);
            false
        }
    }
}

fn record_write<N: NotificationStore>(
    outcome: Result<BackendResponse, ApiError>,
    expected: StatusCode,
    success: &str,
    fallback: &str,
    notes: &mut N,
) -> bool {
    match outcome {
        Ok(response) if response.is(expected) => {
            notes.success(success);
            true
        }
        Ok(response) => {
            let message = response
                .error_message()
                .unwrap_or_else(|| fallback.to_string());
            notes.error(message);
            false
        }
        Err(_) => {
            notes.error(fallback);
            false
        }
    }
}

fn render<C: PageContent>(content: C, mut flash: FlashCookie) -> Response {
    let notifications = flash.drain();
    (flash, Html(content.page(notifications).to_string())).into_response()
}

fn to_list(flash: FlashCookie) -> Response {
    (flash, Redirect::to("/")).into_response()
}

/// Parse a user id path segment. Only plain decimal digits name a user;
/// signs, blanks and out-of-range values do not.
pub fn parse_user_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn user_id(id: Result<Path<String>, PathRejection>) -> Option<i64> {
    id.ok().and_then(|Path(raw)| parse_user_id(&raw))
}

fn form_page(mode: FormMode, values: FormValues, flash: FlashCookie) -> Response {
    render(UserFormHtml { mode, values }, flash)
}

/// `GET /`
pub async fn index(State(state): State<AppState>, mut flash: FlashCookie) -> Response {
    let users = load_users(&state.api, &mut flash).await;
    metrics::record_page("users", 200);
    render(
        UsersHtml {
            users,
            api_url: state.config.backend.api_base_url.clone(),
        },
        flash,
    )
}

/// `GET /add_user`
pub async fn add_user_form(flash: FlashCookie) -> Response {
    form_page(FormMode::Create, FormValues::default(), flash)
}

/// `POST /add_user`
pub async fn add_user(
    State(state): State<AppState>,
    mut flash: FlashCookie,
    Form(form): Form<UserForm>,
) -> Result<Response, PageError> {
    let payload = form.payload()?;
    if create_user(&state.api, &payload, &mut flash).await {
        return Ok(to_list(flash));
    }
    Ok(form_page(FormMode::Create, FormValues::from(&form), flash))
}

/// `GET /edit_user/{id}`
pub async fn edit_user_form(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    mut flash: FlashCookie,
) -> Response {
    let Some(id) = user_id(id) else {
        return not_found_page();
    };

    match load_user(&state.api, id, &mut flash).await {
        Some(user) => form_page(FormMode::Edit(id), FormValues::from(&user), flash),
        None => to_list(flash),
    }
}

/// `POST /edit_user/{id}`
pub async fn edit_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    mut flash: FlashCookie,
    Form(form): Form<UserForm>,
) -> Result<Response, PageError> {
    let Some(id) = user_id(id) else {
        return Ok(not_found_page());
    };

    let payload = form.payload()?;
    if update_user(&state.api, id, &payload, &mut flash).await {
        return Ok(to_list(flash));
    }
    Ok(form_page(FormMode::Edit(id), FormValues::from(&form), flash))
}

/// `POST /delete_user/{id}`
pub async fn remove_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    mut flash: FlashCookie,
) -> Response {
    let Some(id) = user_id(id) else {
        return not_found_page();
    };

    delete_user(&state.api, id, &mut flash).await;
    to_list(flash)
}
