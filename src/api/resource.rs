use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::join_path;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;

/// Standard CRUD + bulk surface for one REST collection.
///
/// `T` is the entity shape; `serde_json::Value` works for anything the
/// client has no model for.
pub struct ResourceClient<T = Value> {
    dispatcher: RequestDispatcher,
    base_path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            base_path: self.base_path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> ResourceClient<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(dispatcher: RequestDispatcher, base_path: impl Into<String>) -> Self {
        Self {
            dispatcher,
            base_path: base_path.into(),
            _entity: PhantomData,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub(crate) fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    pub(crate) fn path(&self, segments: &[&str]) -> Result<String, ApiError> {
        join_path(&self.base_path, segments)
    }

    pub async fn get_all(&self) -> Result<Vec<T>, ApiError> {
        self.dispatcher
            .send_as(ApiRequest::get(self.path(&[])?))
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<T, ApiError> {
        self.dispatcher
            .send_as(ApiRequest::get(self.path(&[id])?))
            .await
    }

    pub async fn create(&self, entity: &T) -> Result<T, ApiError> {
        let request = ApiRequest::post(self.path(&[])?).with_body(entity)?;
        self.dispatcher.send_as(request).await
    }

    pub async fn update(&self, id: &str, entity: &T) -> Result<T, ApiError> {
        let request = ApiRequest::put(self.path(&[id])?).with_body(entity)?;
        self.dispatcher.send_as(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(ApiRequest::delete(self.path(&[id])?))
            .await
    }

    pub async fn bulk_create(&self, entities: &[T]) -> Result<Value, ApiError> {
        let request = ApiRequest::post(self.path(&["bulk"])?).with_body(entities)?;
        self.dispatcher.send(request).await
    }
}
