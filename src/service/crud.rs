//! Generic CRUD over the backend REST API, driven by an entity configuration.

use crate::client::ApiClient;
use crate::config::{
    CreateOverride, CustomMethod, DeleteOverride, EntityConfig, Payload, UpdateOverride, GET_ONE_METHOD,
};
use crate::error::ApiError;
use crate::query::filters_to_pairs;
use crate::response::{normalize_list, unwrap_data, PaginatedResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// The five standard operations. Implemented by [`CrudService`] and
/// [`ExtendedService`](crate::service::ExtendedService).
#[async_trait]
pub trait CrudApi<T>: Send + Sync {
    async fn get_list(&self, filters: &[(String, Value)]) -> Result<PaginatedResponse<T>, ApiError>;
    async fn get_one(&self, id: &str) -> Result<T, ApiError>;
    async fn create(&self, data: Payload) -> Result<T, ApiError>;
    async fn update(&self, id: &str, data: Payload) -> Result<T, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// How one operation is carried out; chosen once when the service is built.
enum Strategy<F> {
    Generic,
    Override(F),
}

impl<F: Clone> Strategy<F> {
    fn resolve(f: Option<&F>) -> Self {
        match f {
            Some(f) => Strategy::Override(f.clone()),
            None => Strategy::Generic,
        }
    }
}

impl<F: Clone> Clone for Strategy<F> {
    fn clone(&self) -> Self {
        match self {
            Strategy::Generic => Strategy::Generic,
            Strategy::Override(f) => Strategy::Override(f.clone()),
        }
    }
}

/// Stateless CRUD service for one entity. Every call is one independent request.
pub struct CrudService<T> {
    config: Arc<EntityConfig<T>>,
    client: ApiClient,
    get_one: Strategy<CustomMethod>,
    create: Strategy<CreateOverride<T>>,
    update: Strategy<UpdateOverride<T>>,
    delete: Strategy<DeleteOverride>,
}

impl<T> Clone for CrudService<T> {
    fn clone(&self) -> Self {
        CrudService {
            config: self.config.clone(),
            client: self.client.clone(),
            get_one: self.get_one.clone(),
            create: self.create.clone(),
            update: self.update.clone(),
            delete: self.delete.clone(),
        }
    }
}

/// Build the CRUD service for one entity configuration.
pub fn create_crud_service<T>(config: impl Into<Arc<EntityConfig<T>>>, client: ApiClient) -> CrudService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    CrudService::new(config.into(), client)
}

impl<T> CrudService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(config: Arc<EntityConfig<T>>, client: ApiClient) -> Self {
        let service = &config.service;
        CrudService {
            get_one: Strategy::resolve(service.custom_methods.get(GET_ONE_METHOD)),
            create: Strategy::resolve(service.create.as_ref()),
            update: Strategy::resolve(service.update.as_ref()),
            delete: Strategy::resolve(service.delete.as_ref()),
            config,
            client,
        }
    }

    pub fn config(&self) -> &EntityConfig<T> {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// List entities. Null filters are dropped; the response envelope is normalized
    /// and `map_response` runs on each item.
    pub async fn get_list(&self, filters: &[(String, Value)]) -> Result<PaginatedResponse<T>, ApiError> {
        let result = self.fetch_list(filters).await;
        if let Err(e) = &result {
            tracing::error!(entity = %self.config.name.plural, error = %e, "error fetching list");
        }
        result
    }

    async fn fetch_list(&self, filters: &[(String, Value)]) -> Result<PaginatedResponse<T>, ApiError> {
        let api = &self.config.api;
        let mut query = api.list_params.clone();
        query.extend(filters_to_pairs(filters));
        let response = self.client.get(&api.list_path(), &query).await?;
        let page = normalize_list(response, &self.config.name.plural);
        let data = page
            .items
            .into_iter()
            .map(|item| self.map_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PaginatedResponse {
            data,
            pagination: page.pagination,
        })
    }

    /// Fetch one entity. A `getOne` custom method replaces the request and mapping entirely.
    pub async fn get_one(&self, id: &str) -> Result<T, ApiError> {
        let result = match &self.get_one {
            Strategy::Override(method) => match method(self.client.clone(), Value::String(id.to_string())).await {
                Ok(v) => serde_json::from_value(v).map_err(ApiError::from),
                Err(e) => Err(e),
            },
            Strategy::Generic => self.fetch_one(id).await,
        };
        if let Err(e) = &result {
            tracing::error!(entity = %self.config.name.singular, id = %id, error = %e, "error fetching entity");
        }
        result
    }

    async fn fetch_one(&self, id: &str) -> Result<T, ApiError> {
        let response = self.client.get(&self.config.api.get_path(id), &[]).await?;
        self.map_item(unwrap_data(response.unwrap_or(Value::Null)))
    }

    /// before_create -> map_request -> POST -> unwrap -> map_response -> after_create.
    /// A `create` override replaces everything up to after_create.
    pub async fn create(&self, data: Payload) -> Result<T, ApiError> {
        let result = self.create_inner(data).await;
        if let Err(e) = &result {
            tracing::error!(entity = %self.config.name.singular, error = %e, "error creating entity");
        }
        result
    }

    async fn create_inner(&self, data: Payload) -> Result<T, ApiError> {
        let hooks = &self.config.hooks;
        let created = match &self.create {
            Strategy::Override(create) => {
                let token = self.client.token().await;
                create(self.client.clone(), data, token).await?
            }
            Strategy::Generic => {
                let data = match &hooks.before_create {
                    Some(before) => before(data).await?,
                    None => data,
                };
                let body = self.request_body(data);
                let response = self.client.post(&self.config.api.create_path(), &body).await?;
                self.map_item(unwrap_data(response.unwrap_or(Value::Null)))?
            }
        };
        match &hooks.after_create {
            Some(after) => after(created).await,
            None => Ok(created),
        }
    }

    /// Same pipeline as [`create`](Self::create) with PUT on the update endpoint.
    pub async fn update(&self, id: &str, data: Payload) -> Result<T, ApiError> {
        let result = self.update_inner(id, data).await;
        if let Err(e) = &result {
            tracing::error!(entity = %self.config.name.singular, id = %id, error = %e, "error updating entity");
        }
        result
    }

    async fn update_inner(&self, id: &str, data: Payload) -> Result<T, ApiError> {
        let hooks = &self.config.hooks;
        let updated = match &self.update {
            Strategy::Override(update) => {
                let token = self.client.token().await;
                update(self.client.clone(), id.to_string(), data, token).await?
            }
            Strategy::Generic => {
                let data = match &hooks.before_update {
                    Some(before) => before(id.to_string(), data).await?,
                    None => data,
                };
                let body = self.request_body(data);
                let response = self.client.put(&self.config.api.update_path(id), &body).await?;
                self.map_item(unwrap_data(response.unwrap_or(Value::Null)))?
            }
        };
        match &hooks.after_update {
            Some(after) => after(updated).await,
            None => Ok(updated),
        }
    }

    /// Delete by id. `before_delete` returning false cancels without any request.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let result = self.delete_inner(id).await;
        match &result {
            Err(ApiError::Cancelled) => {
                tracing::info!(entity = %self.config.name.singular, id = %id, "delete cancelled by hook");
            }
            Err(e) => {
                tracing::error!(entity = %self.config.name.singular, id = %id, error = %e, "error deleting entity");
            }
            Ok(()) => {}
        }
        result
    }

    async fn delete_inner(&self, id: &str) -> Result<(), ApiError> {
        let hooks = &self.config.hooks;
        if let Some(before) = &hooks.before_delete {
            if !before(id.to_string()).await? {
                return Err(ApiError::Cancelled);
            }
        }
        match &self.delete {
            Strategy::Override(delete) => {
                let token = self.client.token().await;
                delete(self.client.clone(), id.to_string(), token).await?;
            }
            Strategy::Generic => {
                self.client.delete(&self.config.api.delete_path(id)).await?;
            }
        }
        if let Some(after) = &hooks.after_delete {
            after(id.to_string()).await?;
        }
        Ok(())
    }

    fn map_item(&self, raw: Value) -> Result<T, ApiError> {
        match &self.config.service.map_response {
            Some(map) => map(raw),
            None => Ok(serde_json::from_value(raw)?),
        }
    }

    fn request_body(&self, data: Payload) -> Value {
        match &self.config.service.map_request {
            Some(map) => map(data),
            None => Value::Object(data),
        }
    }
}

#[async_trait]
impl<T> CrudApi<T> for CrudService<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn get_list(&self, filters: &[(String, Value)]) -> Result<PaginatedResponse<T>, ApiError> {
        CrudService::get_list(self, filters).await
    }

    async fn get_one(&self, id: &str) -> Result<T, ApiError> {
        CrudService::get_one(self, id).await
    }

    async fn create(&self, data: Payload) -> Result<T, ApiError> {
        CrudService::create(self, data).await
    }

    async fn update(&self, id: &str, data: Payload) -> Result<T, ApiError> {
        CrudService::update(self, id, data).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        CrudService::delete(self, id).await
    }
}
