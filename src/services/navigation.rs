// src/services/navigation.rs

use crate::models::{admin::AdminRole, navigation::NavItem};
use crate::models::admin::AdminRole::{Cashier, Employee, SuperAdmin};

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";
pub const FALLBACK_SECTION_LABEL: &str = "Admin";

const EVERYONE: &[AdminRole] = &[SuperAdmin, Employee, Cashier];
const STAFF: &[AdminRole] = &[SuperAdmin, Employee];
const SUPER_ADMIN_ONLY: &[AdminRole] = &[SuperAdmin];

// Barra lateral, na ordem em que aparece
pub static NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Overview", href: "/admin/dashboard", icon: "layout-dashboard", allowed_roles: EVERYONE },
    NavItem { label: "Tables", href: "/admin/tables", icon: "grid-3x3", allowed_roles: EVERYONE },
    NavItem { label: "Live Orders", href: "/admin/orders", icon: "shopping-bag", allowed_roles: STAFF },
    NavItem { label: "Menu Management", href: "/admin/menu", icon: "menu", allowed_roles: STAFF },
    NavItem { label: "Gallery", href: "/admin/gallery", icon: "image", allowed_roles: STAFF },
    NavItem { label: "Reports", href: "/admin/reports", icon: "bar-chart-3", allowed_roles: STAFF },
    NavItem { label: "Settings", href: "/admin/settings", icon: "settings", allowed_roles: SUPER_ADMIN_ONLY },
];

// Menu da conta (dropdown do avatar)
pub static MENU_ITEMS: &[NavItem] = &[
    NavItem { label: "My Profile", href: "/admin/profile", icon: "user", allowed_roles: EVERYONE },
    NavItem { label: "Manage Employees", href: "/admin/employees", icon: "users", allowed_roles: SUPER_ADMIN_ONLY },
    NavItem { label: "Login History", href: "/admin/login-history", icon: "history", allowed_roles: EVERYONE },
    NavItem { label: "Settings", href: "/admin/settings", icon: "settings", allowed_roles: SUPER_ADMIN_ONLY },
];

pub fn visible_items(role: AdminRole) -> Vec<NavItem> {
    filter_for(NAV_ITEMS, role)
}

pub fn visible_menu_items(role: AdminRole) -> Vec<NavItem> {
    filter_for(MENU_ITEMS, role)
}

fn filter_for(items: &'static [NavItem], role: AdminRole) -> Vec<NavItem> {
    items.iter().filter(|item| item.allows(role)).cloned().collect()
}

// Procura a seção nas duas listas. Seção desconhecida => ninguém acessa.
pub fn allowed_roles_for(href: &str) -> &'static [AdminRole] {
    NAV_ITEMS
        .iter()
        .chain(MENU_ITEMS.iter())
        .find(|item| item.href == href)
        .map(|item| item.allowed_roles)
        .unwrap_or(&[])
}

pub fn can_access(role: AdminRole, href: &str) -> bool {
    allowed_roles_for(href).contains(&role)
}

pub fn section_label(path: &str) -> &'static str {
    NAV_ITEMS
        .iter()
        .find(|item| item.href == path)
        .map(|item| item.label)
        .unwrap_or(FALLBACK_SECTION_LABEL)
}
