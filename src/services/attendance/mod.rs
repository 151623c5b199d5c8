pub mod bulk;
pub mod create;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListParams, BulkAttendanceRequest, CreateAttendanceRequest, UpdateAttendanceRequest,
    UserScopeParams,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn get_summary(
        &self,
        request: &HttpRequest,
        query: UserScopeParams,
    ) -> ActixResult<HttpResponse> {
        summary::get_summary(self, request, query).await
    }

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        body: CreateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, request, body).await
    }

    // 批量点名
    pub async fn bulk_create(
        &self,
        request: &HttpRequest,
        body: BulkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_create(self, request, body).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, request, id, body).await
    }
}
