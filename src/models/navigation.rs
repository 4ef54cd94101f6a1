// src/models/navigation.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::admin::AdminRole;

// Item de navegação estático (configuração, não entidade)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    #[schema(value_type = String, example = "Live Orders")]
    pub label: &'static str,
    #[schema(value_type = String, example = "/admin/orders")]
    pub href: &'static str,
    // Nome do ícone lucide usado pelo front
    #[schema(value_type = String, example = "shopping-bag")]
    pub icon: &'static str,
    #[schema(value_type = Vec<AdminRole>)]
    pub allowed_roles: &'static [AdminRole],
}

impl NavItem {
    pub fn allows(&self, role: AdminRole) -> bool {
        self.allowed_roles.contains(&role)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShellUser {
    pub name: String,
    pub initial: String,
    pub role: AdminRole,
    #[schema(value_type = String, example = "Cashier")]
    pub role_label: &'static str,
}

// O layout autenticado, pronto para o front desenhar
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
    pub user: ShellUser,
    pub nav: Vec<NavItem>,
    pub menu: Vec<NavItem>,
    #[schema(value_type = String, example = "Tables")]
    pub section_label: &'static str,
    pub unread_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShellOutcome {
    // A própria tela de login não passa pelo portão
    LoginScreen,
    RedirectToLogin {
        #[schema(value_type = String, example = "/admin/login")]
        to: &'static str,
    },
    Render(ShellView),
}
