use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListParams {
    pub role: Option<UserRole>,
}

// 用户创建请求（存储层，password 已是哈希值）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub avatar: Option<String>,
    pub grade: Option<String>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub department: Option<String>,
}

// 用户资料更新请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub grade: Option<String>,
    pub section: Option<String>,
    pub department: Option<String>,
}
