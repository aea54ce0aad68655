//! Builders for the `{status, message, data}` replies the backend sends.

use serde_json::{Value, json};

/// Successful envelope carrying `data`.
#[must_use]
pub fn success(message: &str, data: Value) -> Value {
    json!({"status": "success", "message": message, "data": data})
}

/// Successful envelope without a payload.
#[must_use]
pub fn success_message(message: &str) -> Value {
    json!({"status": "success", "message": message})
}

/// Error envelope as returned alongside non-2xx statuses.
#[must_use]
pub fn failure(message: &str) -> Value {
    json!({"status": "error", "message": message})
}

/// Paginated list in the `[rows, paginationInfo]` shape.
#[must_use]
pub fn paged_tuple(rows: Value, total: u64, current_page: u32, last_page: u32) -> Value {
    success(
        "Fetched",
        json!([rows, {"total": total, "currentPage": current_page, "lastPage": last_page}]),
    )
}

/// Paginated list in the `{rows, pagination}` shape.
#[must_use]
pub fn paged_record(rows: Value, total: u64, current_page: u32, last_page: u32) -> Value {
    success(
        "Fetched",
        json!({
            "rows": rows,
            "pagination": {"total": total, "currentPage": current_page, "lastPage": last_page}
        }),
    )
}

/// Identity record as embedded in a login reply.
#[must_use]
pub fn session_user() -> Value {
    json!({
        "user_uuid": "9b2f6a9e-4c1d-4e8a-9a51-3f1c2d7e8b10",
        "full_name": "Amina Clerk",
        "email": "amina@example.com",
        "email_verified_at": null,
        "active": 1,
        "deleted_at": null,
        "created_at": "2025-01-01T08:00:00.000Z",
        "updated_at": "2025-01-01T08:00:00.000Z",
        "role_name": "Admin"
    })
}

/// Successful login reply.
#[must_use]
pub fn login_success(token: &str, expires_in: i64) -> Value {
    success(
        "Login successful",
        json!({"token": token, "user": session_user(), "expires_in": expires_in}),
    )
}
