use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Fee, FeeStatus};

// 费用汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeSummary {
    /// 未缴金额（PENDING + OVERDUE）
    pub total_due: f64,
    pub total_paid: f64,
    pub pending: i64,
    pub overdue: i64,
}

impl FeeSummary {
    pub fn from_fees(fees: &[Fee]) -> Self {
        fees.iter().fold(Self::default(), |mut acc, fee| {
            match fee.status {
                FeeStatus::Paid => acc.total_paid += fee.amount,
                FeeStatus::Pending => {
                    acc.total_due += fee.amount;
                    acc.pending += 1;
                }
                FeeStatus::Overdue => {
                    acc.total_due += fee.amount;
                    acc.overdue += 1;
                }
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fee(amount: f64, status: FeeStatus) -> Fee {
        Fee {
            id: 1,
            user_id: 1,
            title: "Tuition".to_string(),
            amount,
            due_date: Utc::now(),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user: None,
        }
    }

    #[test]
    fn test_summary_partitions_by_status() {
        let fees = vec![
            fee(1200.0, FeeStatus::Paid),
            fee(450.0, FeeStatus::Pending),
            fee(300.0, FeeStatus::Overdue),
            fee(50.0, FeeStatus::Pending),
        ];
        let summary = FeeSummary::from_fees(&fees);
        assert_eq!(summary.total_paid, 1200.0);
        assert_eq!(summary.total_due, 800.0);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.overdue, 1);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(FeeSummary::from_fees(&[]), FeeSummary::default());
    }
}
