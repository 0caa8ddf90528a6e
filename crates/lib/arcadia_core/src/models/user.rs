//! Principal model: accounts, roles, and derived authorities.

/// Account role. ADMIN implicitly also holds USER's authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Storage representation (`user_role` Postgres enum).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Coarse permission tag consumed by route-level policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    RoleUser,
    RoleAdmin,
}

impl Authority {
    pub fn as_str(self) -> &'static str {
        match self {
            Authority::RoleUser => "ROLE_USER",
            Authority::RoleAdmin => "ROLE_ADMIN",
        }
    }
}

/// Expands a role into its authority set.
pub fn authorities_for(role: Role) -> &'static [Authority] {
    match role {
        Role::Admin => &[Authority::RoleAdmin, Authority::RoleUser],
        Role::User => &[Authority::RoleUser],
    }
}

/// An account row. The password hash stays inside the crate; this type is
/// deliberately not serializable.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_both_authorities() {
        let authorities = authorities_for(Role::Admin);
        assert!(authorities.contains(&Authority::RoleAdmin));
        assert!(authorities.contains(&Authority::RoleUser));
        assert_eq!(authorities.len(), 2);
    }

    #[test]
    fn user_holds_only_user_authority() {
        assert_eq!(authorities_for(Role::User), &[Authority::RoleUser]);
    }

    #[test]
    fn role_storage_round_trip() {
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
        assert_eq!(Role::parse(Role::User.as_str()), Some(Role::User));
        assert_eq!(Role::parse("SUPERUSER"), None);
    }
}
