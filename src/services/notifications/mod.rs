pub mod broadcast;
pub mod count;
pub mod create;
pub mod list;
pub mod mark_read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::{
    BroadcastNotificationRequest, CreateNotificationRequest,
};
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_notifications(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request).await
    }

    pub async fn get_unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        count::get_unread_count(self, request).await
    }

    pub async fn create_notification(
        &self,
        request: &HttpRequest,
        body: CreateNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_notification(self, request, body).await
    }

    // 发给全部学生
    pub async fn broadcast(
        &self,
        request: &HttpRequest,
        body: BroadcastNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        broadcast::broadcast(self, request, body).await
    }

    pub async fn mark_read(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mark_read::mark_read(self, request, id).await
    }

    pub async fn mark_all_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        mark_read::mark_all_read(self, request).await
    }
}
