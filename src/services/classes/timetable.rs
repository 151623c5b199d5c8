//! 周课表
//!
//! 课表是展示用的占位网格：行是固定的时间段，列是周一到周五。
//! 第 i 个时间段、第 j 天的格子在 `(i + j) % 3 != 0` 时放入
//! `classes[(i + j) % n]`，否则留空；没有班级时整张表为空。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::{
    entities::Class,
    responses::{Timetable, TimetableRow},
};
use crate::models::{ApiResponse, ErrorCode};

pub const DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub const TIME_SLOTS: [&str; 6] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "02:00 PM", "03:00 PM",
];

pub fn build_timetable(classes: &[Class]) -> Timetable {
    let n = classes.len().max(1);

    let rows = TIME_SLOTS
        .iter()
        .enumerate()
        .map(|(i, time)| TimetableRow {
            time: time.to_string(),
            cells: (0..DAYS.len())
                .map(|j| {
                    let k = i + j;
                    if classes.is_empty() || k % 3 == 0 {
                        None
                    } else {
                        classes.get(k % n).cloned()
                    }
                })
                .collect(),
        })
        .collect();

    Timetable {
        days: DAYS.iter().map(|d| d.to_string()).collect(),
        rows,
    }
}

pub async fn get_timetable(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_classes().await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            build_timetable(&classes),
            "Timetable retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to build timetable: {}", e);
            Ok(ApiResponse::respond_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve timetable",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: i64) -> Class {
        let now = chrono::Utc::now();
        Class {
            id,
            name: format!("Class {id}"),
            subject: "Mathematics".to_string(),
            schedule: "Mon/Wed".to_string(),
            room: format!("R{id}"),
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(table: &Timetable) -> Vec<Vec<Option<i64>>> {
        table
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.as_ref().map(|c| c.id)).collect())
            .collect()
    }

    #[test]
    fn test_grid_shape() {
        let table = build_timetable(&[class(1)]);
        assert_eq!(table.days.len(), 5);
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.rows[0].time, "09:00 AM");
        assert_eq!(table.rows[5].time, "03:00 PM");
        assert!(table.rows.iter().all(|r| r.cells.len() == 5));
    }

    #[test]
    fn test_empty_classes_give_empty_grid() {
        let table = build_timetable(&[]);
        assert!(table.rows.iter().flat_map(|r| &r.cells).all(Option::is_none));
    }

    #[test]
    fn test_modular_placement() {
        let classes = vec![class(10), class(20), class(30), class(40)];
        let grid = ids(&build_timetable(&classes));

        for (i, row) in grid.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let k = i + j;
                let expected = if k % 3 == 0 {
                    None
                } else {
                    Some(classes[k % 4].id)
                };
                assert_eq!(*cell, expected, "slot {i}, day {j}");
            }
        }

        // 第一行：k = 0..4
        assert_eq!(grid[0], vec![None, Some(20), Some(30), None, Some(10)]);
    }

    #[test]
    fn test_single_class_fills_non_blank_cells() {
        let grid = ids(&build_timetable(&[class(7)]));
        assert_eq!(grid[1], vec![Some(7), Some(7), None, Some(7), Some(7)]);
    }
}
