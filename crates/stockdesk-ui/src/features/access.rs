//! Users, roles and permissions.

use stockdesk_api_models::{NewPermission, NewRole, NewUser, Permission, Role, User};

use crate::core::resource::{
    ActiveListing, Creatable, Listable, Mutable, Resource, SoftDeletable,
    StatusToggle, Updatable,
};
use crate::core::store::ResourceStore;

/// User list and actions.
pub type UserStore = ResourceStore<User>;
/// Role list and actions.
pub type RoleStore = ResourceStore<Role>;
/// Permission list and actions.
pub type PermissionStore = ResourceStore<Permission>;

impl Resource for User {
    const PATH: &'static str = "users";
}

impl Listable for User {}
impl ActiveListing for User {}

impl Mutable for User {
    const ID_FIELD: &'static str = "user_uuid";
}

impl Creatable for User {
    type Draft = NewUser;
    const CREATE_LABEL: &'static str = "Create User";
}

impl Updatable for User {
    const UPDATE_LABEL: &'static str = "Update User";
}

impl SoftDeletable for User {
    const DELETE_LABEL: &'static str = "Delete User";
    const RESTORE_LABEL: &'static str = "Restore User";
}

impl StatusToggle for User {
    const STATUS_ENDPOINT: &'static str = "updateUserStatus";
    const STATUS_FIELD: &'static str = "status";
    const ACTIVATE_LABEL: &'static str = "Activate User";
    const DEACTIVATE_LABEL: &'static str = "Deactivate User";
}

impl Resource for Role {
    const PATH: &'static str = "roles";
}

// The role list is small and served unpaginated.
impl Listable for Role {
    const PAGINATED: bool = false;
}

impl ActiveListing for Role {}

impl Mutable for Role {
    const ID_FIELD: &'static str = "roles_uuid";
}

impl Creatable for Role {
    type Draft = NewRole;
    const CREATE_LABEL: &'static str = "Create Role";
}

impl Updatable for Role {
    const UPDATE_LABEL: &'static str = "Update Role";
}

impl SoftDeletable for Role {
    const DELETE_LABEL: &'static str = "Delete Role";
    const RESTORE_LABEL: &'static str = "Restore Role";
}

impl StatusToggle for Role {
    const ACTIVATE_LABEL: &'static str = "Activate Role";
    const DEACTIVATE_LABEL: &'static str = "Deactivate Role";
}

impl Resource for Permission {
    const PATH: &'static str = "permissions";
}

impl Listable for Permission {}

impl Mutable for Permission {
    const ID_FIELD: &'static str = "permission_uuid";
}

impl Creatable for Permission {
    type Draft = NewPermission;
    const CREATE_LABEL: &'static str = "Create Permission";
}

impl Updatable for Permission {
    const UPDATE_LABEL: &'static str = "Update Permission";
}

impl SoftDeletable for Permission {
    const DELETE_LABEL: &'static str = "Delete Permission";
    const RESTORE_LABEL: &'static str = "Restore Permission";
}

impl StatusToggle for Permission {
    const ACTIVATE_LABEL: &'static str = "Activate Permission";
    const DEACTIVATE_LABEL: &'static str = "Deactivate Permission";
}
