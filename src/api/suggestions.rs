use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::items::ItemError;
use crate::services::TokenService;
use crate::stores::{SuggestionStore, UserStore};
use crate::types::db::suggestion;
use crate::types::dto::common::AckResponse;
use crate::types::dto::feedback::{
    SuggestionBody, SuggestionListResponse, SuggestionResponse, SuggestionView,
};
use crate::types::dto::user::UserSummary;

/// Platform feedback endpoints
pub struct SuggestionsApi {
    suggestion_store: Arc<SuggestionStore>,
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl SuggestionsApi {
    pub fn new(
        suggestion_store: Arc<SuggestionStore>,
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            suggestion_store,
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

    async fn views_for(
        &self,
        suggestions: &[suggestion::Model],
    ) -> Result<Vec<SuggestionView>, ItemError> {
        let ids: HashSet<String> = suggestions.iter().map(|s| s.user_id.clone()).collect();
        let summaries: HashMap<String, UserSummary> = self
            .user_store
            .find_many(ids)
            .await
            .map_err(ItemError::internal_error)?
            .iter()
            .map(|u| (u.id.clone(), UserSummary::from_model(u)))
            .collect();

        Ok(suggestions
            .iter()
            .map(|s| SuggestionView::from_model(s, summaries.get(&s.user_id).cloned()))
            .collect())
    }
}

/// API tags for suggestion endpoints
#[derive(Tags)]
enum SuggestionTags {
    /// Platform suggestion endpoints
    Suggestions,
}

#[OpenApi(prefix_path = "/suggestions")]
impl SuggestionsApi {
    /// Submit a suggestion
    #[oai(path = "/", method = "post", tag = "SuggestionTags::Suggestions")]
    async fn create_suggestion(
        &self,
        auth: BearerAuth,
        body: Json<SuggestionBody>,
    ) -> Result<Json<SuggestionResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let created = self.suggestion_store.create(&user_id, &body.content).await?;

        let author = self
            .user_store
            .find_by_id(&user_id)
            .await
            .ok()
            .map(|u| UserSummary::from_model(&u));

        Ok(Json(SuggestionResponse {
            success: true,
            suggestion: SuggestionView::from_model(&created, author),
        }))
    }

    /// All suggestions, newest first; `posted_by` accepts a user id or "me"
    #[oai(path = "/", method = "get", tag = "SuggestionTags::Suggestions")]
    async fn list_suggestions(
        &self,
        auth: BearerAuth,
        posted_by: Query<Option<String>>,
    ) -> Result<Json<SuggestionListResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;

        let author = posted_by.0.map(|v| if v == "me" { user_id.clone() } else { v });
        let suggestions = self.suggestion_store.list(author.as_deref()).await?;
        let views = self.views_for(&suggestions).await?;

        Ok(Json(SuggestionListResponse {
            success: true,
            suggestions: views,
        }))
    }

    /// Edit one of the caller's suggestions
    #[oai(
        path = "/:suggestion_id",
        method = "put",
        tag = "SuggestionTags::Suggestions"
    )]
    async fn update_suggestion(
        &self,
        auth: BearerAuth,
        suggestion_id: Path<String>,
        body: Json<SuggestionBody>,
    ) -> Result<Json<SuggestionResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let updated = self
            .suggestion_store
            .update(&suggestion_id.0, &user_id, &body.content)
            .await?;

        let author = self
            .user_store
            .find_by_id(&user_id)
            .await
            .ok()
            .map(|u| UserSummary::from_model(&u));

        Ok(Json(SuggestionResponse {
            success: true,
            suggestion: SuggestionView::from_model(&updated, author),
        }))
    }

    /// Delete one of the caller's suggestions
    #[oai(
        path = "/:suggestion_id",
        method = "delete",
        tag = "SuggestionTags::Suggestions"
    )]
    async fn delete_suggestion(
        &self,
        auth: BearerAuth,
        suggestion_id: Path<String>,
    ) -> Result<Json<AckResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        self.suggestion_store.delete(&suggestion_id.0, &user_id).await?;

        Ok(Json(AckResponse {
            success: true,
            message: "Suggestion deleted successfully".to_string(),
        }))
    }
}
