//! Role-based navigation.
//!
//! A static table of destinations and the roles allowed to see them. The
//! cached user profile decides which entries are shown; the server remains
//! the authority on what a user may actually do.

use crate::types::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    /// CLI invocation that opens this destination.
    pub command: &'static str,
    pub roles: &'static [Role],
}

const STAFF: &[Role] = &[Role::Admin, Role::Rh, Role::Manager];
const HR: &[Role] = &[Role::Admin, Role::Rh];
const EMPLOYEE: &[Role] = &[Role::Employee];
const EVERYONE: &[Role] = &[Role::Admin, Role::Rh, Role::Manager, Role::Employee];

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Tableau de bord", path: "manager-dashboard", command: "stats today", roles: STAFF },
    NavItem { label: "Heures de travail", path: "shift", command: "shifts", roles: HR },
    NavItem { label: "Tableau de bord", path: "employee-dashboard", command: "attendance mine", roles: EMPLOYEE },
    NavItem { label: "Personnel", path: "employees", command: "employees", roles: HR },
    NavItem { label: "Days off", path: "days_off", command: "day-offs", roles: STAFF },
    NavItem { label: "Présences", path: "attendance", command: "attendance summary", roles: STAFF },
    NavItem { label: "Présences", path: "employee-attendance", command: "attendance mine", roles: EMPLOYEE },
    NavItem { label: "Permissions", path: "permission", command: "permissions", roles: STAFF },
    NavItem { label: "Congés", path: "leaves", command: "leaves", roles: STAFF },
    NavItem { label: "Mes demandes", path: "employee-permissions", command: "permissions mine", roles: EMPLOYEE },
    NavItem { label: "Mes Congés", path: "employee-leaves", command: "leaves mine", roles: EMPLOYEE },
    NavItem { label: "Rapports", path: "reports", command: "stats monthly", roles: STAFF },
    NavItem { label: "Mon Profil", path: "profile", command: "me", roles: EVERYONE },
];

/// Entries visible to `user`, in table order. Nothing without a user.
pub fn items_for(user: Option<&User>) -> Vec<&'static NavItem> {
    let Some(user) = user else {
        return Vec::new();
    };

    NAV_ITEMS
        .iter()
        .filter(|item| item.roles.contains(&user.role))
        .collect()
}

pub fn role_title(role: Role) -> &'static str {
    match role {
        Role::Admin => "Administrateur",
        Role::Rh => "Ressources humaines",
        Role::Manager => "Manager",
        Role::Employee => "Employé",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 1,
            first_name: "Test".into(),
            last_name: "User".into(),
            name: None,
            email: None,
            role,
            department: None,
            avatar: None,
        }
    }

    fn paths(role: Role) -> Vec<&'static str> {
        items_for(Some(&user(role))).iter().map(|i| i.path).collect()
    }

    #[test]
    fn no_user_sees_nothing() {
        assert!(items_for(None).is_empty());
    }

    #[test]
    fn employee_menu() {
        assert_eq!(
            paths(Role::Employee),
            vec![
                "employee-dashboard",
                "employee-attendance",
                "employee-permissions",
                "employee-leaves",
                "profile"
            ]
        );
    }

    #[test]
    fn manager_cannot_manage_shifts_or_staff() {
        let manager = paths(Role::Manager);
        assert!(!manager.contains(&"shift"));
        assert!(!manager.contains(&"employees"));
        assert!(manager.contains(&"days_off"));
    }

    #[test]
    fn rh_sees_shifts_first_after_dashboard() {
        let rh = paths(Role::Rh);
        assert_eq!(&rh[..2], &["manager-dashboard", "shift"]);
    }
}
