use serde::{Deserialize, Serialize};
use std::fmt;

/// Account roles as stored in `users.role_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    SuperAdmin = 1,
    Admin = 2,
    Customer = 3,
}

/// Roles allowed to manage the catalogue, schedule and other accounts.
pub const MANAGEMENT_ROLES: &[Role] = &[Role::SuperAdmin, Role::Admin];

impl Role {
    pub fn id(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Role {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::SuperAdmin),
            2 => Ok(Role::Admin),
            3 => Ok(Role::Customer),
            other => Err(format!("unknown role_id {}", other)),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::Admin => "Admin",
            Role::Customer => "Customer",
        };
        f.write_str(name)
    }
}
