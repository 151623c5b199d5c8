pub mod create;
pub mod delete;
pub mod list;
pub mod timetable;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::{CreateClassRequest, UpdateClassRequest};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取班级列表
    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_classes(self, request).await
    }

    pub async fn create_class(
        &self,
        req: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, req, class_data).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, req, class_id, update_data).await
    }

    // 根据班级 ID 删除班级
    pub async fn delete_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, req, class_id).await
    }

    // 周课表
    pub async fn get_timetable(&self, req: &HttpRequest) -> ActixResult<HttpResponse> {
        timetable::get_timetable(self, req).await
    }
}

/// 名称与科目不能为空，更新时只校验提供了的字段
fn validate_class_fields(name: Option<&str>, subject: Option<&str>) -> Result<(), String> {
    if let Some(name) = name {
        validate_required("name", name)?;
    }
    if let Some(subject) = subject {
        validate_required("subject", subject)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_class_fields;

    #[test]
    fn test_validate_class_fields() {
        assert!(validate_class_fields(Some("10-A"), Some("Physics")).is_ok());
        assert!(validate_class_fields(None, None).is_ok());
        assert_eq!(
            validate_class_fields(Some(" "), Some("Physics")).unwrap_err(),
            "name is required"
        );
        assert_eq!(
            validate_class_fields(None, Some("")).unwrap_err(),
            "subject is required"
        );
    }
}
