pub mod create;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::UserScopeParams;
use crate::models::fees::requests::{CreateFeeRequest, UpdateFeeRequest};
use crate::storage::Storage;

pub struct FeeService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_fees(
        &self,
        request: &HttpRequest,
        query: UserScopeParams,
    ) -> ActixResult<HttpResponse> {
        list::list_fees(self, request, query).await
    }

    pub async fn get_summary(
        &self,
        request: &HttpRequest,
        query: UserScopeParams,
    ) -> ActixResult<HttpResponse> {
        summary::get_summary(self, request, query).await
    }

    pub async fn create_fee(
        &self,
        request: &HttpRequest,
        body: CreateFeeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_fee(self, request, body).await
    }

    pub async fn update_fee(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateFeeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_fee(self, request, id, body).await
    }
}
