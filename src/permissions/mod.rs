// 权限模块
// 角色到能力的静态映射，以及唯一的授权判断入口
// 处理函数不直接比较角色，统一通过 `authorize` 检查能力

mod role;

pub use role::Role;

use serde::Serialize;

use crate::auth::AuthSession;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    ManageCatalog,
    PromoteUsers,
    DeleteUsers,
    ManageSettings,
    ManageTeams,
    ManageRequirements,
    ViewAllCertifications,
    EditOwnCertifications,
    EditTeamCertifications,
    VerifyCertifications,
    ViewAuditLog,
    ExportReports,
    ViewAnalytics,
    ManageNotifications,
    ViewTeamDashboard,
    ViewExecutiveDashboard,
}

impl Capability {
    pub const ALL: [Capability; 16] = [
        Capability::ManageCatalog,
        Capability::PromoteUsers,
        Capability::DeleteUsers,
        Capability::ManageSettings,
        Capability::ManageTeams,
        Capability::ManageRequirements,
        Capability::ViewAllCertifications,
        Capability::EditOwnCertifications,
        Capability::EditTeamCertifications,
        Capability::VerifyCertifications,
        Capability::ViewAuditLog,
        Capability::ExportReports,
        Capability::ViewAnalytics,
        Capability::ManageNotifications,
        Capability::ViewTeamDashboard,
        Capability::ViewExecutiveDashboard,
    ];
}

/// 单个角色的能力标记，供前端直接使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub can_manage_catalog: bool,
    pub can_promote_users: bool,
    pub can_delete_users: bool,
    pub can_manage_settings: bool,
    pub can_manage_teams: bool,
    pub can_manage_requirements: bool,
    pub can_view_all_certifications: bool,
    pub can_edit_own_certifications: bool,
    pub can_edit_team_certifications: bool,
    pub can_verify_certifications: bool,
    pub can_view_audit_log: bool,
    pub can_export_reports: bool,
    pub can_view_analytics: bool,
    pub can_manage_notifications: bool,
    pub can_view_team_dashboard: bool,
    pub can_view_executive_dashboard: bool,
}

impl Permissions {
    const NONE: Permissions = Permissions {
        can_manage_catalog: false,
        can_promote_users: false,
        can_delete_users: false,
        can_manage_settings: false,
        can_manage_teams: false,
        can_manage_requirements: false,
        can_view_all_certifications: false,
        can_edit_own_certifications: false,
        can_edit_team_certifications: false,
        can_verify_certifications: false,
        can_view_audit_log: false,
        can_export_reports: false,
        can_view_analytics: false,
        can_manage_notifications: false,
        can_view_team_dashboard: false,
        can_view_executive_dashboard: false,
    };

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCatalog => self.can_manage_catalog,
            Capability::PromoteUsers => self.can_promote_users,
            Capability::DeleteUsers => self.can_delete_users,
            Capability::ManageSettings => self.can_manage_settings,
            Capability::ManageTeams => self.can_manage_teams,
            Capability::ManageRequirements => self.can_manage_requirements,
            Capability::ViewAllCertifications => self.can_view_all_certifications,
            Capability::EditOwnCertifications => self.can_edit_own_certifications,
            Capability::EditTeamCertifications => self.can_edit_team_certifications,
            Capability::VerifyCertifications => self.can_verify_certifications,
            Capability::ViewAuditLog => self.can_view_audit_log,
            Capability::ExportReports => self.can_export_reports,
            Capability::ViewAnalytics => self.can_view_analytics,
            Capability::ManageNotifications => self.can_manage_notifications,
            Capability::ViewTeamDashboard => self.can_view_team_dashboard,
            Capability::ViewExecutiveDashboard => self.can_view_executive_dashboard,
        }
    }
}

pub const fn permissions_for(role: Role) -> Permissions {
    match role {
        Role::Admin => Permissions {
            can_manage_catalog: true,
            can_promote_users: true,
            can_delete_users: true,
            can_manage_settings: true,
            can_manage_teams: true,
            can_manage_requirements: true,
            can_view_all_certifications: true,
            can_edit_own_certifications: true,
            can_edit_team_certifications: true,
            can_verify_certifications: true,
            can_view_audit_log: true,
            can_export_reports: true,
            can_view_analytics: true,
            can_manage_notifications: true,
            can_view_team_dashboard: true,
            can_view_executive_dashboard: true,
        },
        Role::Manager => Permissions {
            can_manage_teams: true,
            can_manage_requirements: true,
            can_edit_own_certifications: true,
            can_edit_team_certifications: true,
            can_verify_certifications: true,
            can_export_reports: true,
            can_view_analytics: true,
            can_manage_notifications: true,
            can_view_team_dashboard: true,
            ..Permissions::NONE
        },
        Role::Executive => Permissions {
            can_view_all_certifications: true,
            can_edit_own_certifications: true,
            can_export_reports: true,
            can_view_analytics: true,
            can_view_team_dashboard: true,
            can_view_executive_dashboard: true,
            ..Permissions::NONE
        },
        Role::Auditor => Permissions {
            can_view_all_certifications: true,
            can_edit_own_certifications: true,
            can_view_audit_log: true,
            can_export_reports: true,
            ..Permissions::NONE
        },
        Role::User => Permissions {
            can_edit_own_certifications: true,
            ..Permissions::NONE
        },
    }
}

/// 按存储的角色名获取权限，缺失或未知角色按最低权限处理
pub fn permissions_for_name(role: Option<&str>) -> Permissions {
    permissions_for(Role::from_name(role))
}

pub fn authorize(session: &AuthSession, capability: Capability) -> Result<(), AppError> {
    if permissions_for(session.role).allows(capability) {
        return Ok(());
    }

    tracing::info!(
        user_id = %session.user_id,
        role = %session.role,
        ?capability,
        "authorization denied"
    );
    Err(AppError::Forbidden)
}
