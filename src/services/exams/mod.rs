pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod upcoming;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::storage::Storage;

/// 首页展示的即将到来的考试数量
pub const UPCOMING_EXAM_LIMIT: u64 = 5;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_exams(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_exams(self, request).await
    }

    pub async fn list_upcoming(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        upcoming::list_upcoming(self, request).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        body: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, body).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, id, body).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, id).await
    }
}
