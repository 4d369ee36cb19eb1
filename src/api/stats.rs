use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::items::ItemError;
use crate::services::TokenService;
use crate::stores::{ItemStore, UserStore};
use crate::types::dto::stats::StatsResponse;

/// Admin dashboard counters
pub struct StatsApi {
    item_store: Arc<ItemStore>,
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl StatsApi {
    pub fn new(
        item_store: Arc<ItemStore>,
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            item_store,
            user_store,
            token_service,
        }
    }

    fn current_user(&self, auth: &BearerAuth) -> Result<String, ItemError> {
        let claims = self
            .token_service
            .validate_jwt(&auth.0.token)
            .map_err(|err| ItemError::unauthorized(err.message()))?;
        Ok(claims.sub)
    }
}

/// API tags for stats endpoints
#[derive(Tags)]
enum StatsTags {
    /// Dashboard statistics endpoints
    Stats,
}

#[OpenApi(prefix_path = "/stats")]
impl StatsApi {
    /// Open lost, open found, and reunited item counts. Admin accounts only.
    #[oai(path = "/", method = "get", tag = "StatsTags::Stats")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<StatsResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;

        let caller = self
            .user_store
            .find_by_id(&user_id)
            .await
            .map_err(|err| ItemError::unauthorized(err.message()))?;
        if !caller.is_admin {
            return Err(ItemError::forbidden("Not authorized to view stats"));
        }

        let stats = self.item_store.stats().await?;

        Ok(Json(StatsResponse {
            success: true,
            stats,
        }))
    }
}
