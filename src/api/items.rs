use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::items::ItemError;
use crate::services::TokenService;
use crate::stores::item_store::{ItemFilter, RequestPayload};
use crate::stores::ItemStore;
use crate::types::dto::common::AckResponse;
use crate::types::dto::items::{
    CreateItemRequest, ItemListResponse, ItemResponse, ItemView, UpdateItemRequest,
};
use crate::types::dto::requests::{
    ApproveRequestBody, ContactInfoResponse, RejectRequestBody, RejectionReasonResponse,
    SubmitClaimRequest, SubmitInformRequest,
};

/// Item registry and reconciliation endpoints.
///
/// Every route is authenticated; the caller's identity drives both
/// authorization and the per-viewer redaction applied when bundles are
/// rendered into views.
pub struct ItemsApi {
    item_store: Arc<ItemStore>,
    token_service: Arc<TokenService>,
}

impl ItemsApi {
    pub fn new(item_store: Arc<ItemStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            item_store,
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

/// API tags for item endpoints
#[derive(Tags)]
enum ItemTags {
    /// Lost and found item endpoints
    Items,
    /// Claim and inform request endpoints
    Requests,
}

#[OpenApi(prefix_path = "/items")]
impl ItemsApi {
    /// Post a new lost or found item
    #[oai(path = "/", method = "post", tag = "ItemTags::Items")]
    async fn create_item(
        &self,
        auth: BearerAuth,
        body: Json<CreateItemRequest>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self.item_store.create_item(&user_id, body.0).await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Browse items. Claimed items are hidden unless `include_reunited` is
    /// set or an explicit `status` is given. `posted_by` and `claimed_by`
    /// accept a user id or the literal "me".
    #[oai(path = "/", method = "get", tag = "ItemTags::Items")]
    #[allow(clippy::too_many_arguments)]
    async fn list_items(
        &self,
        auth: BearerAuth,
        #[oai(name = "type")] item_type: Query<Option<String>>,
        search: Query<Option<String>>,
        posted_by: Query<Option<String>>,
        claimed_by: Query<Option<String>>,
        status: Query<Option<String>>,
        include_reunited: Query<Option<bool>>,
    ) -> Result<Json<ItemListResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;

        let resolve_me = |value: Option<String>| {
            value.map(|v| if v == "me" { user_id.clone() } else { v })
        };

        let bundles = self
            .item_store
            .list_items(ItemFilter {
                item_type: item_type.0,
                search: search.0,
                posted_by: resolve_me(posted_by.0),
                claimed_by: resolve_me(claimed_by.0),
                status: status.0,
                include_reunited: include_reunited.0.unwrap_or(false),
            })
            .await?;

        Ok(Json(ItemListResponse {
            success: true,
            items: bundles
                .iter()
                .map(|b| ItemView::from_bundle(b, &user_id))
                .collect(),
        }))
    }

    /// Fetch a single item, counting the view
    #[oai(path = "/:item_id", method = "get", tag = "ItemTags::Items")]
    async fn get_item(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self.item_store.get_item(&item_id.0).await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Edit an item; owner only, type immutable
    #[oai(path = "/:item_id", method = "put", tag = "ItemTags::Items")]
    async fn update_item(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        body: Json<UpdateItemRequest>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self
            .item_store
            .update_item(&item_id.0, &user_id, body.0)
            .await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Delete an item; owner only
    #[oai(path = "/:item_id", method = "delete", tag = "ItemTags::Items")]
    async fn delete_item(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
    ) -> Result<Json<AckResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        self.item_store.delete_item(&item_id.0, &user_id).await?;

        Ok(Json(AckResponse {
            success: true,
            message: "Item deleted".to_string(),
        }))
    }

    /// Claim a found item by answering its validity questions
    #[oai(path = "/:item_id/claim", method = "post", tag = "ItemTags::Requests")]
    async fn submit_claim(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        body: Json<SubmitClaimRequest>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self
            .item_store
            .submit_request(
                &item_id.0,
                &user_id,
                RequestPayload::Claim {
                    answers: body.0.answers,
                    additional_info: body.0.additional_info,
                },
            )
            .await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Tell a lost item's owner you may have found it
    #[oai(path = "/:item_id/inform", method = "post", tag = "ItemTags::Requests")]
    async fn submit_inform(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        body: Json<SubmitInformRequest>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self
            .item_store
            .submit_request(
                &item_id.0,
                &user_id,
                RequestPayload::Inform {
                    message: body.0.message,
                    image: body.0.image,
                },
            )
            .await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Approve a pending request, resolving the item and releasing the
    /// supplied contact details to the requester
    #[oai(
        path = "/:item_id/requests/:request_id/approve",
        method = "post",
        tag = "ItemTags::Requests"
    )]
    async fn approve_request(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        request_id: Path<String>,
        body: Json<ApproveRequestBody>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self
            .item_store
            .approve_request(&item_id.0, &request_id.0, &user_id, body.0.contact_info)
            .await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Reject a pending request; the item stays open
    #[oai(
        path = "/:item_id/requests/:request_id/reject",
        method = "post",
        tag = "ItemTags::Requests"
    )]
    async fn reject_request(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        request_id: Path<String>,
        body: Json<RejectRequestBody>,
    ) -> Result<Json<ItemResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let bundle = self
            .item_store
            .reject_request(&item_id.0, &request_id.0, &user_id, body.0.rejection_reason)
            .await?;

        Ok(Json(ItemResponse {
            success: true,
            item: ItemView::from_bundle(&bundle, &user_id),
        }))
    }

    /// Why a request was rejected; requester and owner only
    #[oai(
        path = "/:item_id/requests/:request_id/rejection-reason",
        method = "get",
        tag = "ItemTags::Requests"
    )]
    async fn rejection_reason(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
        request_id: Path<String>,
    ) -> Result<Json<RejectionReasonResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let reason = self
            .item_store
            .rejection_reason(&item_id.0, &request_id.0, &user_id)
            .await?;

        Ok(Json(RejectionReasonResponse {
            success: true,
            rejection_reason: reason,
        }))
    }

    /// The contact block released to the caller on approval
    #[oai(path = "/:item_id/contact-info", method = "get", tag = "ItemTags::Requests")]
    async fn contact_info(
        &self,
        auth: BearerAuth,
        item_id: Path<String>,
    ) -> Result<Json<ContactInfoResponse>, ItemError> {
        let user_id = self.current_user(&auth)?;
        let contact = self.item_store.contact_info(&item_id.0, &user_id).await?;

        Ok(Json(ContactInfoResponse {
            success: true,
            contact_info: contact,
        }))
    }
}
