use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::items::ItemError;
use crate::services::TokenService;
use crate::stores::{CommentStore, UserStore};
use crate::types::db::comment;
use crate::types::dto::common::AckResponse;
use crate::types::dto::feedback::{
    CommentBody, CommentListResponse, CommentResponse, CommentView,
};
use crate::types::dto::user::UserSummary;

/// Public discussion threads under item listings
pub struct CommentsApi {
    comment_store: Arc<CommentStore>,
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl CommentsApi {
    pub fn new(
        comment_store: Arc<CommentStore>,
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            comment_store,
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
        comments: &[comment::Model],
    ) -> Result<Vec<CommentView>, ItemError> {
        let ids: HashSet<String> = comments.iter().map(|c| c.user_id.clone()).collect();
        let summaries: HashMap<String, UserSummary> = self
            .user_store
            .find_many(ids)
            .await
            .map_err(ItemError::internal_error)?
            .iter()
            .map(|u| (u.id.clone(), UserSummary::from_model(u)))
            .collect();

        Ok(comments
            .iter()
            .map(|c| CommentView::from_model(c, summaries.get(&c.user_id).cloned()))
            .collect())
    }
}

/// API tags for comment endpoints
#[derive(Tags)]
enum CommentTags {
    /// Item comment endpoints
    Comments,
}

#[OpenApi]
impl CommentsApi {
    /// Post a comment under an item
    #[oai(
        path = "/items/:item_id/comments",
        method = "post",
        tag = "CommentTags::Comments"
    )]
    async fn create_comment(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        body: Json<CommentBody>,
    ) -> Result<Json<CommentResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let created = self
            .comment_store
            .create(&item_id.0, &user_id, &body.content)
            .await?;

        let author = self
            .user_store
            .find_by_id(&user_id)
            .await
            .ok()
            .map(|u| UserSummary::from_model(&u));

        Ok(Json(CommentResponse {
            success: true,
            comment: CommentView::from_model(&created, author),
        }))
    }

    /// Comments under one item, newest first
    #[oai(
        path = "/items/:item_id/comments",
        method = "get",
        tag = "CommentTags::Comments"
    )]
    async fn list_item_comments(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
    ) -> Result<Json<CommentListResponse>, ItemError> {
        self.current_user(&auth)?;
        let comments = self.comment_store.list_for_item(&item_id.0).await?;
        let views = self.views_for(&comments).await?;

        Ok(Json(CommentListResponse {
            success: true,
            comments: views,
        }))
    }

    /// All comments, newest first; `posted_by` accepts a user id or "me"
    #[oai(path = "/comments", method = "get", tag = "CommentTags::Comments")]
    async fn list_comments(
        &self,
        auth: BearerAuth,
        posted_by: Query<Option<String>>,
    ) -> Result<Json<CommentListResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;

        let author = posted_by.0.map(|v| if v == "me" { user_id.clone() } else { v });
        let comments = self.comment_store.list(author.as_deref()).await?;
        let views = self.views_for(&comments).await?;

        Ok(Json(CommentListResponse {
            success: true,
            comments: views,
        }))
    }

    /// Edit one of the caller's comments
    #[oai(
        path = "/comments/:comment_id",
        method = "put",
        tag = "CommentTags::Comments"
    )]
    async fn update_comment(
        &self,
        auth: BearerAuth,
        comment_id: Path<String>,
        body: Json<CommentBody>,
    ) -> Result<Json<CommentResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let updated = self
            .comment_store
            .update(&comment_id.0, &user_id, &body.content)
            .await?;

        let author = self
            .user_store
            .find_by_id(&user_id)
            .await
            .ok()
            .map(|u| UserSummary::from_model(&u));

        Ok(Json(CommentResponse {
            success: true,
            comment: CommentView::from_model(&updated, author),
        }))
    }

    /// Delete a comment; allowed for its author and the item's owner
    #[oai(
        path = "/comments/:comment_id",
        method = "delete",
        tag = "CommentTags::Comments"
    )]
    async fn delete_comment(
        &self,
        auth: BearerAuth,
        comment_id: Path<String>,
    ) -> Result<Json<AckResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        self.comment_store.delete(&comment_id.0, &user_id).await?;

        Ok(Json(AckResponse {
            success: true,
            message: "Comment deleted successfully".to_string(),
        }))
    }
}
