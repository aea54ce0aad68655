//! Access control resources: users, roles, permissions and login.

use serde::{Deserialize, Serialize};

use crate::envelope::ApiEnvelope;
use crate::validate::{FormErrors, Rules, Validate};

/// Role row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable identifier.
    pub roles_uuid: String,
    /// Display name.
    pub role_name: String,
    /// URL-safe slug.
    #[serde(default)]
    pub role_slug: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// Create-role form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// Display name.
    pub role_name: String,
    /// Free-form description.
    pub description: String,
}

impl Validate for NewRole {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.length(
            "role_name",
            &self.role_name,
            2,
            Some(50),
            (
                Some("Role name must be at least 2 characters"),
                Some("Role name must be less than 50 characters"),
            ),
        );
        rules.length(
            "description",
            &self.description,
            5,
            Some(200),
            (
                Some("Description must be at least 5 characters"),
                Some("Description must be less than 200 characters"),
            ),
        );
        rules.finish()
    }
}

/// Permission row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable identifier.
    pub permission_uuid: String,
    /// Display name.
    pub permission_name: String,
    /// URL-safe slug.
    #[serde(default)]
    pub permission_slug: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Action the permission grants.
    #[serde(default)]
    pub permission_action: String,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// Create-permission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPermission {
    /// Display name.
    pub permission_name: String,
    /// Free-form description.
    pub description: String,
    /// Action the permission grants.
    pub permission_action: String,
}

impl Validate for NewPermission {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.length("permission_name", &self.permission_name, 2, None, (None, None));
        rules.length("description", &self.description, 5, None, (None, None));
        rules.length(
            "permission_action",
            &self.permission_action,
            3,
            None,
            (None, None),
        );
        rules.finish()
    }
}

/// Role joined with the permissions currently granted to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWithPermissions {
    /// Role columns.
    #[serde(flatten)]
    pub role: Role,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// User row as listed by the user management screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier.
    pub user_uuid: String,
    /// Display name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Verification timestamp.
    #[serde(default)]
    pub email_verified_at: Option<String>,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Roles assigned to the user.
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Create-user form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role to assign.
    pub role_uuid: String,
    /// Must repeat `password`.
    pub password_confirmation: String,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.length("full_name", &self.full_name, 2, Some(100), (None, None));
        rules.email("email", &self.email, "Invalid email address");
        rules.length("password", &self.password, 8, Some(150), (None, None));
        if self.password_confirmation != self.password {
            rules.push("password_confirmation", "Passwords do not match");
        }
        rules.finish()
    }
}

/// Identity record held by the session after login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable identifier.
    pub user_uuid: String,
    /// Display name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Verification timestamp.
    #[serde(default)]
    pub email_verified_at: Option<String>,
    /// `1` when active.
    #[serde(default)]
    pub active: i32,
    /// Soft-delete timestamp.
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Name of the user's role.
    #[serde(default)]
    pub role_name: String,
}

/// Login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Keep the session after the browser closes.
    #[serde(default)]
    pub remember: bool,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FormErrors> {
        let mut rules = Rules::new();
        rules.email("email", &self.email, "Invalid email address");
        rules.required("password", &self.password, "Password is required");
        rules.finish()
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    /// Bearer token.
    pub token: String,
    /// Authenticated identity.
    pub user: SessionUser,
    /// Token lifetime in seconds from now.
    pub expires_in: i64,
}

/// Reply to `POST login`; `data` is absent when the login is refused.
pub type LoginResponse = ApiEnvelope<Option<LoginData>>;
