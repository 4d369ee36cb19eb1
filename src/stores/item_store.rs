use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::items::ItemError;
use crate::services::Notifier;
use crate::types::db::comment::{self, Entity as Comment};
use crate::types::db::item::{self, Entity as Item};
use crate::types::db::item_request::{self, Entity as ItemRequest};
use crate::types::db::user::{self, Entity as User};
use crate::types::db::validity_question::{self, Entity as ValidityQuestion};
use crate::types::dto::items::{CreateItemRequest, UpdateItemRequest, ValidityQuestionInput};
use crate::types::dto::requests::{ContactInfoInput, ContactInfoView};
use crate::types::dto::stats::StatsBody;
use crate::types::internal::bundle::{ItemBundle, RequestBundle};
use crate::types::internal::status::{ItemKind, ItemStatus, RequestKind, RequestStatus};

/// The two request payload shapes. Claims target found items and carry one
/// answer per validity question; informs target lost items and carry a
/// free-form message.
#[derive(Debug, Clone)]
pub enum RequestPayload {
    Claim {
        answers: Vec<String>,
        additional_info: Option<String>,
    },
    Inform {
        message: String,
        image: Option<String>,
    },
}

impl RequestPayload {
    pub fn kind(&self) -> RequestKind {
        match self {
            RequestPayload::Claim { .. } => RequestKind::Claim,
            RequestPayload::Inform { .. } => RequestKind::Inform,
        }
    }
}

/// Listing filters. `status` overrides the default exclusion of claimed
/// items; without it, claimed items appear only when `include_reunited`.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub item_type: Option<String>,
    pub search: Option<String>,
    pub posted_by: Option<String>,
    pub claimed_by: Option<String>,
    pub status: Option<String>,
    pub include_reunited: bool,
}

/// ItemStore owns the item registry and the claim/inform reconciliation
/// state machine.
///
/// All state transitions run inside a transaction and re-check the row's
/// current status in the UPDATE's WHERE clause, so concurrent reviewers
/// cannot both resolve the same item: the first conditional update wins and
/// the loser observes zero affected rows.
pub struct ItemStore {
    db: DatabaseConnection,
    notifier: Notifier,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            notifier: Notifier::new(db.clone()),
            db,
        }
    }

    /// Post a new lost or found item. Validity questions are only accepted
    /// on found items, where they gate future claims.
    pub async fn create_item(
        &self,
        owner_id: &str,
        req: CreateItemRequest,
    ) -> Result<ItemBundle, ItemError> {
        let kind = ItemKind::parse(&req.item_type)
            .ok_or_else(|| ItemError::validation("item_type must be \"lost\" or \"found\""))?;

        let questions = req.validity_questions.unwrap_or_default();
        validate_questions(kind, &questions)?;

        let now = Utc::now().timestamp();
        let item_id = Uuid::new_v4().to_string();

        let txn = self.db.begin().await.map_err(ItemError::internal_error)?;

        let model = item::ActiveModel {
            id: Set(item_id.clone()),
            item_type: Set(kind.as_str().to_string()),
            title: Set(req.title),
            description: Set(req.description),
            location: Set(req.location),
            image: Set(req.image),
            status: Set(ItemStatus::Active.as_str().to_string()),
            posted_by: Set(owner_id.to_string()),
            claimed_by: Set(None),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&txn).await.map_err(ItemError::internal_error)?;

        insert_questions(&txn, &item_id, &questions).await?;

        txn.commit().await.map_err(ItemError::internal_error)?;

        self.load_bundle(&item_id).await
    }

    /// Fetch one item, counting the view
    pub async fn get_item(&self, item_id: &str) -> Result<ItemBundle, ItemError> {
        let result = Item::update_many()
            .col_expr(
                item::Column::ViewCount,
                Expr::col(item::Column::ViewCount).add(1),
            )
            .filter(item::Column::Id.eq(item_id))
            .exec(&self.db)
            .await
            .map_err(ItemError::internal_error)?;

        if result.rows_affected == 0 {
            return Err(ItemError::not_found("Item"));
        }

        self.load_bundle(item_id).await
    }

    /// List items, newest first
    pub async fn list_items(&self, filter: ItemFilter) -> Result<Vec<ItemBundle>, ItemError> {
        let mut query = Item::find();

        if let Some(item_type) = &filter.item_type {
            let kind = ItemKind::parse(item_type)
                .ok_or_else(|| ItemError::validation("type must be \"lost\" or \"found\""))?;
            query = query.filter(item::Column::ItemType.eq(kind.as_str()));
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(item::Column::Title.contains(search))
                    .add(item::Column::Description.contains(search))
                    .add(item::Column::Location.contains(search)),
            );
        }

        if let Some(posted_by) = &filter.posted_by {
            query = query.filter(item::Column::PostedBy.eq(posted_by));
        }
        if let Some(claimed_by) = &filter.claimed_by {
            query = query.filter(item::Column::ClaimedBy.eq(claimed_by));
        }

        match &filter.status {
            Some(status) => {
                let status = ItemStatus::parse(status).ok_or_else(|| {
                    ItemError::validation("status must be \"active\" or \"claimed\"")
                })?;
                query = query.filter(item::Column::Status.eq(status.as_str()));
            }
            None if !filter.include_reunited => {
                query = query.filter(item::Column::Status.eq(ItemStatus::Active.as_str()));
            }
            None => {}
        }

        let items = query
            .order_by_desc(item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)?;

        self.assemble_bundles(items).await
    }

    /// Edit an item's details. Only the owner may edit; the type is
    /// immutable. A supplied question list replaces the previous one.
    pub async fn update_item(
        &self,
        item_id: &str,
        caller_id: &str,
        req: UpdateItemRequest,
    ) -> Result<ItemBundle, ItemError> {
        let existing = self.find_item(item_id).await?;
        if existing.posted_by != caller_id {
            return Err(ItemError::forbidden("Only the item's owner can edit it"));
        }

        let kind = parse_item_kind(&existing.item_type)?;
        if let Some(questions) = &req.validity_questions {
            validate_questions(kind, questions)?;
        }

        let txn = self.db.begin().await.map_err(ItemError::internal_error)?;

        let mut active: item::ActiveModel = existing.into();
        if let Some(title) = req.title {
            active.title = Set(title);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(location) = req.location {
            active.location = Set(location);
        }
        if let Some(image) = req.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(Utc::now().timestamp());
        active.update(&txn).await.map_err(ItemError::internal_error)?;

        if let Some(questions) = &req.validity_questions {
            ValidityQuestion::delete_many()
                .filter(validity_question::Column::ItemId.eq(item_id))
                .exec(&txn)
                .await
                .map_err(ItemError::internal_error)?;
            insert_questions(&txn, item_id, questions).await?;
        }

        txn.commit().await.map_err(ItemError::internal_error)?;

        self.load_bundle(item_id).await
    }

    /// Delete an item along with its questions and requests
    pub async fn delete_item(&self, item_id: &str, caller_id: &str) -> Result<(), ItemError> {
        let existing = self.find_item(item_id).await?;
        if existing.posted_by != caller_id {
            return Err(ItemError::forbidden("Only the item's owner can delete it"));
        }

        let txn = self.db.begin().await.map_err(ItemError::internal_error)?;

        ItemRequest::delete_many()
            .filter(item_request::Column::ItemId.eq(item_id))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        ValidityQuestion::delete_many()
            .filter(validity_question::Column::ItemId.eq(item_id))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        Comment::delete_many()
            .filter(comment::Column::ItemId.eq(item_id))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        Item::delete_many()
            .filter(item::Column::Id.eq(item_id))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;

        txn.commit().await.map_err(ItemError::internal_error)?;
        Ok(())
    }

    /// Append a pending claim or inform request to an item.
    ///
    /// Preconditions are checked in a fixed order: existence, kind match,
    /// item still active, not the owner's own item, no pending request from
    /// the same user, and (claims only) a complete answer set. The final
    /// insert is guarded by a conditional touch of the item row so a
    /// concurrent approval cannot slip a new request onto a resolved item.
    pub async fn submit_request(
        &self,
        item_id: &str,
        requester_id: &str,
        payload: RequestPayload,
    ) -> Result<ItemBundle, ItemError> {
        let kind = payload.kind();
        let now = Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(ItemError::internal_error)?;

        let item = Item::find_by_id(item_id)
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Item"))?;

        let item_kind = parse_item_kind(&item.item_type)?;
        if kind != item_kind.request_kind() {
            return Err(ItemError::invalid_kind(kind));
        }

        if ItemStatus::parse(&item.status) != Some(ItemStatus::Active) {
            return Err(ItemError::already_resolved());
        }

        if item.posted_by == requester_id {
            return Err(ItemError::self_request());
        }

        let pending = ItemRequest::find()
            .filter(item_request::Column::ItemId.eq(item_id))
            .filter(item_request::Column::RequestedBy.eq(requester_id))
            .filter(item_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .count(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        if pending > 0 {
            return Err(ItemError::duplicate_pending(kind));
        }

        let (answers, additional_info, message, image) = match &payload {
            RequestPayload::Claim {
                answers,
                additional_info,
            } => {
                let questions = ValidityQuestion::find()
                    .filter(validity_question::Column::ItemId.eq(item_id))
                    .order_by_asc(validity_question::Column::Position)
                    .all(&txn)
                    .await
                    .map_err(ItemError::internal_error)?;

                let complete = answers.len() == questions.len()
                    && answers.iter().all(|a| !a.trim().is_empty());
                if !complete {
                    let texts = questions.into_iter().map(|q| q.question).collect();
                    return Err(ItemError::incomplete_answers(texts));
                }

                let encoded =
                    serde_json::to_string(answers).map_err(ItemError::internal_error)?;
                (Some(encoded), additional_info.clone(), None, None)
            }
            RequestPayload::Inform { message, image } => {
                if message.trim().is_empty() {
                    return Err(ItemError::validation("message must not be empty"));
                }
                (None, None, Some(message.clone()), image.clone())
            }
        };

        let requester = User::find_by_id(requester_id)
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("User"))?;

        // Re-check status at write time; a concurrent approval between the
        // read above and this point flips the item to claimed.
        let touched = Item::update_many()
            .col_expr(item::Column::UpdatedAt, Expr::value(now))
            .filter(item::Column::Id.eq(item_id))
            .filter(item::Column::Status.eq(ItemStatus::Active.as_str()))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        if touched.rows_affected == 0 {
            return Err(ItemError::already_resolved());
        }

        let request = item_request::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            item_id: Set(item_id.to_string()),
            kind: Set(kind.as_str().to_string()),
            requested_by: Set(requester_id.to_string()),
            answers: Set(answers),
            additional_info: Set(additional_info),
            message: Set(message),
            image: Set(image),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            rejection_reason: Set(None),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            contact_phone: Set(None),
            contact_alternate_phone: Set(None),
            contact_email: Set(None),
            contact_meeting_location: Set(None),
            contact_meeting_time: Set(None),
            contact_notes: Set(None),
            created_at: Set(now),
        };
        request.insert(&txn).await.map_err(ItemError::internal_error)?;

        txn.commit().await.map_err(ItemError::internal_error)?;

        self.notifier.request_submitted(&item, &requester, kind).await;

        self.load_bundle(item_id).await
    }

    /// Approve a pending request: the item flips to claimed exactly once,
    /// the winner is recorded as claimant, and the owner's contact details
    /// are released to them.
    ///
    /// Both the item and the request are updated conditionally on their
    /// current status; a zero-row update means someone else got there first
    /// and the whole transaction rolls back.
    pub async fn approve_request(
        &self,
        item_id: &str,
        request_id: &str,
        reviewer_id: &str,
        contact: ContactInfoInput,
    ) -> Result<ItemBundle, ItemError> {
        if contact.phone.trim().is_empty() {
            return Err(ItemError::validation("Contact phone is required"));
        }

        let now = Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(ItemError::internal_error)?;

        let item = Item::find_by_id(item_id)
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Item"))?;
        if item.posted_by != reviewer_id {
            return Err(ItemError::forbidden(
                "Only the item's owner can review requests",
            ));
        }

        let request = ItemRequest::find_by_id(request_id)
            .filter(item_request::Column::ItemId.eq(item_id))
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Request"))?;

        let reviewer = User::find_by_id(reviewer_id)
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("User"))?;

        // Email falls back to the reviewer's account address when omitted
        let email = contact
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| reviewer.email.clone());

        let claimed = Item::update_many()
            .col_expr(
                item::Column::Status,
                Expr::value(ItemStatus::Claimed.as_str()),
            )
            .col_expr(
                item::Column::ClaimedBy,
                Expr::value(request.requested_by.clone()),
            )
            .col_expr(item::Column::UpdatedAt, Expr::value(now))
            .filter(item::Column::Id.eq(item_id))
            .filter(item::Column::Status.eq(ItemStatus::Active.as_str()))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        if claimed.rows_affected == 0 {
            return Err(ItemError::already_resolved());
        }

        let settled = ItemRequest::update_many()
            .col_expr(
                item_request::Column::Status,
                Expr::value(RequestStatus::Approved.as_str()),
            )
            .col_expr(
                item_request::Column::ReviewedBy,
                Expr::value(reviewer_id.to_string()),
            )
            .col_expr(item_request::Column::ReviewedAt, Expr::value(now))
            .col_expr(
                item_request::Column::ContactPhone,
                Expr::value(contact.phone.clone()),
            )
            .col_expr(
                item_request::Column::ContactAlternatePhone,
                Expr::value(contact.alternate_phone.clone()),
            )
            .col_expr(item_request::Column::ContactEmail, Expr::value(email.clone()))
            .col_expr(
                item_request::Column::ContactMeetingLocation,
                Expr::value(contact.meeting_location.clone()),
            )
            .col_expr(
                item_request::Column::ContactMeetingTime,
                Expr::value(contact.meeting_time.clone()),
            )
            .col_expr(
                item_request::Column::ContactNotes,
                Expr::value(contact.additional_notes.clone()),
            )
            .filter(item_request::Column::Id.eq(request_id))
            .filter(item_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        if settled.rows_affected == 0 {
            return Err(ItemError::conflict("Request has already been reviewed"));
        }

        txn.commit().await.map_err(ItemError::internal_error)?;

        let contact_view = ContactInfoView {
            phone: contact.phone,
            alternate_phone: contact.alternate_phone.unwrap_or_default(),
            email,
            meeting_location: contact.meeting_location.unwrap_or_default(),
            meeting_time: contact.meeting_time.unwrap_or_default(),
            additional_notes: contact.additional_notes.unwrap_or_default(),
        };
        self.notifier
            .request_approved(&item, &request.requested_by, reviewer_id, &contact_view)
            .await;

        self.load_bundle(item_id).await
    }

    /// Reject a pending request. The item stays active and open to further
    /// requests; a missing reason is stored as "No reason provided".
    pub async fn reject_request(
        &self,
        item_id: &str,
        request_id: &str,
        reviewer_id: &str,
        reason: Option<String>,
    ) -> Result<ItemBundle, ItemError> {
        let now = Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(ItemError::internal_error)?;

        let item = Item::find_by_id(item_id)
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Item"))?;
        if item.posted_by != reviewer_id {
            return Err(ItemError::forbidden(
                "Only the item's owner can review requests",
            ));
        }

        let request = ItemRequest::find_by_id(request_id)
            .filter(item_request::Column::ItemId.eq(item_id))
            .one(&txn)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Request"))?;

        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "No reason provided".to_string());

        let settled = ItemRequest::update_many()
            .col_expr(
                item_request::Column::Status,
                Expr::value(RequestStatus::Rejected.as_str()),
            )
            .col_expr(item_request::Column::RejectionReason, Expr::value(reason))
            .col_expr(
                item_request::Column::ReviewedBy,
                Expr::value(reviewer_id.to_string()),
            )
            .col_expr(item_request::Column::ReviewedAt, Expr::value(now))
            .filter(item_request::Column::Id.eq(request_id))
            .filter(item_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;
        if settled.rows_affected == 0 {
            return Err(ItemError::conflict("Request has already been reviewed"));
        }

        Item::update_many()
            .col_expr(item::Column::UpdatedAt, Expr::value(now))
            .filter(item::Column::Id.eq(item_id))
            .exec(&txn)
            .await
            .map_err(ItemError::internal_error)?;

        txn.commit().await.map_err(ItemError::internal_error)?;

        self.notifier
            .request_rejected(&item, &request.requested_by, reviewer_id)
            .await;

        self.load_bundle(item_id).await
    }

    /// Why was this request turned down? Visible to the requester and the
    /// item's owner only.
    pub async fn rejection_reason(
        &self,
        item_id: &str,
        request_id: &str,
        caller_id: &str,
    ) -> Result<String, ItemError> {
        let item = self.find_item(item_id).await?;

        let request = ItemRequest::find_by_id(request_id)
            .filter(item_request::Column::ItemId.eq(item_id))
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Request"))?;

        if caller_id != request.requested_by && caller_id != item.posted_by {
            return Err(ItemError::forbidden(
                "Only the requester or the item's owner can view this",
            ));
        }

        if RequestStatus::parse(&request.status) != Some(RequestStatus::Rejected) {
            return Err(ItemError::not_rejected());
        }

        Ok(request
            .rejection_reason
            .unwrap_or_else(|| "No reason provided".to_string()))
    }

    /// The contact block released to the caller on approval. NotFound unless
    /// the caller has an approved request on this item.
    pub async fn contact_info(
        &self,
        item_id: &str,
        caller_id: &str,
    ) -> Result<ContactInfoView, ItemError> {
        let request = ItemRequest::find()
            .filter(item_request::Column::ItemId.eq(item_id))
            .filter(item_request::Column::RequestedBy.eq(caller_id))
            .filter(item_request::Column::Status.eq(RequestStatus::Approved.as_str()))
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Approved request"))?;

        Ok(ContactInfoView::from_model(&request))
    }

    /// Dashboard counts: open lost, open found, and reunited items
    pub async fn stats(&self) -> Result<StatsBody, ItemError> {
        let lost_count = Item::find()
            .filter(item::Column::ItemType.eq(ItemKind::Lost.as_str()))
            .filter(item::Column::Status.eq(ItemStatus::Active.as_str()))
            .count(&self.db)
            .await
            .map_err(ItemError::internal_error)?;
        let found_count = Item::find()
            .filter(item::Column::ItemType.eq(ItemKind::Found.as_str()))
            .filter(item::Column::Status.eq(ItemStatus::Active.as_str()))
            .count(&self.db)
            .await
            .map_err(ItemError::internal_error)?;
        let reunited_count = Item::find()
            .filter(item::Column::Status.eq(ItemStatus::Claimed.as_str()))
            .count(&self.db)
            .await
            .map_err(ItemError::internal_error)?;

        Ok(StatsBody {
            lost_count,
            found_count,
            reunited_count,
        })
    }

    async fn find_item(&self, item_id: &str) -> Result<item::Model, ItemError> {
        Item::find_by_id(item_id)
            .one(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .ok_or_else(|| ItemError::not_found("Item"))
    }

    /// Load one item with its questions, requests, and user profiles
    pub async fn load_bundle(&self, item_id: &str) -> Result<ItemBundle, ItemError> {
        let item = self.find_item(item_id).await?;
        let mut bundles = self.assemble_bundles(vec![item]).await?;
        bundles
            .pop()
            .ok_or_else(|| ItemError::internal_error("bundle assembly produced no rows"))
    }

    /// Batch-join items with their children and the involved user profiles
    async fn assemble_bundles(
        &self,
        items: Vec<item::Model>,
    ) -> Result<Vec<ItemBundle>, ItemError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();

        let questions = ValidityQuestion::find()
            .filter(validity_question::Column::ItemId.is_in(item_ids.clone()))
            .order_by_asc(validity_question::Column::Position)
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)?;

        let requests = ItemRequest::find()
            .filter(item_request::Column::ItemId.is_in(item_ids))
            .order_by_asc(item_request::Column::CreatedAt)
            .order_by_asc(item_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)?;

        let mut user_ids: HashSet<String> = HashSet::new();
        for item in &items {
            user_ids.insert(item.posted_by.clone());
            if let Some(claimed_by) = &item.claimed_by {
                user_ids.insert(claimed_by.clone());
            }
        }
        for request in &requests {
            user_ids.insert(request.requested_by.clone());
        }

        let users: HashMap<String, user::Model> = User::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(ItemError::internal_error)?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let mut questions_by_item: HashMap<String, Vec<validity_question::Model>> = HashMap::new();
        for question in questions {
            questions_by_item
                .entry(question.item_id.clone())
                .or_default()
                .push(question);
        }

        let mut requests_by_item: HashMap<String, Vec<RequestBundle>> = HashMap::new();
        for request in requests {
            let requested_by = users.get(&request.requested_by).cloned();
            requests_by_item
                .entry(request.item_id.clone())
                .or_default()
                .push(RequestBundle {
                    request,
                    requested_by,
                });
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let posted_by = users.get(&item.posted_by).cloned();
                let claimed_by = item
                    .claimed_by
                    .as_ref()
                    .and_then(|id| users.get(id))
                    .cloned();
                ItemBundle {
                    questions: questions_by_item.remove(&item.id).unwrap_or_default(),
                    requests: requests_by_item.remove(&item.id).unwrap_or_default(),
                    posted_by,
                    claimed_by,
                    item,
                }
            })
            .collect())
    }
}

fn parse_item_kind(raw: &str) -> Result<ItemKind, ItemError> {
    ItemKind::parse(raw)
        .ok_or_else(|| ItemError::internal_error(format!("unknown item type {:?}", raw)))
}

fn validate_questions(
    kind: ItemKind,
    questions: &[ValidityQuestionInput],
) -> Result<(), ItemError> {
    if kind == ItemKind::Lost && !questions.is_empty() {
        return Err(ItemError::validation(
            "Validity questions are only allowed on found items",
        ));
    }
    for q in questions {
        if q.question.trim().is_empty() || q.answer.trim().is_empty() {
            return Err(ItemError::validation(
                "Validity questions need both a question and an answer",
            ));
        }
    }
    Ok(())
}

async fn insert_questions<C: sea_orm::ConnectionTrait>(
    conn: &C,
    item_id: &str,
    questions: &[ValidityQuestionInput],
) -> Result<(), ItemError> {
    for (position, input) in questions.iter().enumerate() {
        let model = validity_question::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            item_id: Set(item_id.to_string()),
            position: Set(position as i32),
            question: Set(input.question.clone()),
            answer: Set(input.answer.clone()),
        };
        model.insert(conn).await.map_err(ItemError::internal_error)?;
    }
    Ok(())
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore").field("db", &"<connection>").finish()
    }
}
