//! 사용자 역할.
//!
//! 역할 사이에 계층은 없습니다. 접근 제어는 허용 목록에 정확히 포함되는지로만
//! 판단합니다 ([`super::RoleGuard`] 참고).

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 토큰의 `role` 클레임 값이며 JSON에서는 `"user"`, `"admin"`,
/// `"super-admin"`으로 표현됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// 일반 사용자 (클레임이 없을 때의 기본값)
    #[default]
    User,
    /// 관리자
    Admin,
    /// 최고 관리자
    SuperAdmin,
}

impl Role {
    /// 정규 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super-admin",
        }
    }

    /// 문자열에서 역할 파싱 (대소문자 무시, `super_admin`/`superadmin` 허용).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "super-admin" | "super_admin" | "superadmin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| format!("unknown role: {}", s))
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}
