use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 出勤汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    /// 出勤率，四舍五入到整数
    pub percentage: i64,
}

impl AttendanceSummary {
    pub fn from_counts(total: i64, present: i64, absent: i64, late: i64) -> Self {
        let percentage = if total > 0 {
            (present as f64 / total as f64 * 100.0).round() as i64
        } else {
            0
        };
        Self {
            total,
            present,
            absent,
            late,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(AttendanceSummary::from_counts(3, 2, 1, 0).percentage, 67);
        assert_eq!(AttendanceSummary::from_counts(8, 1, 7, 0).percentage, 13);
        assert_eq!(AttendanceSummary::from_counts(4, 4, 0, 0).percentage, 100);
        // 0.5 远离零取整
        assert_eq!(AttendanceSummary::from_counts(8, 5, 2, 1).percentage, 63);
    }

    #[test]
    fn test_empty_total_is_zero() {
        let summary = AttendanceSummary::from_counts(0, 0, 0, 0);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary, AttendanceSummary::default());
    }
}
