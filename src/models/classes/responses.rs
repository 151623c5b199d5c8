use serde::Serialize;
use ts_rs::TS;

use super::entities::Class;

/// 课表中的一行（一个时间段）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct TimetableRow {
    pub time: String,
    /// 与 `Timetable::days` 一一对应，空位为 null
    pub cells: Vec<Option<Class>>,
}

/// 周课表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Timetable {
    pub days: Vec<String>,
    pub rows: Vec<TimetableRow>,
}
