use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求，name 与 subject 不能为空
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub subject: String,
    pub schedule: String,
    pub room: String,
}

// 更新班级请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub schedule: Option<String>,
    pub room: Option<String>,
}
