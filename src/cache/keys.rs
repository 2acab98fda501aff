/// 仪表盘缓存键前缀
pub const DASHBOARD_PREFIX: &str = "dashboard:";

/// 报表缓存键前缀
const REPORT_PREFIX: &str = "report:";

/// 用户缓存键前缀
const USER_PREFIX: &str = "user:";

/// 生成组织级仪表盘汇总缓存键
pub fn dashboard_summary_key() -> String {
    format!("{}summary:org", DASHBOARD_PREFIX)
}

/// 生成即将过期证书报表缓存键
pub fn expiring_report_key(days: u32) -> String {
    format!("{}{}expiring:{}", DASHBOARD_PREFIX, REPORT_PREFIX, days)
}

/// 生成用户相关缓存键的命名空间，末尾带分隔符以避免 `user:1` 匹配到 `user:10`
pub fn user_key(user_id: &str) -> String {
    format!("{}{}:", USER_PREFIX, user_id)
}

/// 生成用户证书列表缓存键
pub fn user_certifications_key(user_id: &str) -> String {
    format!("{}certifications", user_key(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keys_fall_under_dashboard_prefix() {
        assert!(expiring_report_key(30).starts_with(DASHBOARD_PREFIX));
        assert!(dashboard_summary_key().starts_with(DASHBOARD_PREFIX));
    }

    #[test]
    fn user_key_is_separator_terminated() {
        assert_eq!(user_key("1"), "user:1:");
        assert!(!user_key("10").contains(&user_key("1")));
        assert!(user_certifications_key("10").starts_with(&user_key("10")));
    }
}
