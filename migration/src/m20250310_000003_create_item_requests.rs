use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ItemRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ItemRequests::ItemId).string().not_null())
                    .col(ColumnDef::new(ItemRequests::Kind).string().not_null())
                    .col(
                        ColumnDef::new(ItemRequests::RequestedBy)
                            .string()
                            .not_null(),
                    )
                    // JSON array of answer strings; only set for claim requests
                    .col(ColumnDef::new(ItemRequests::Answers).string().null())
                    .col(ColumnDef::new(ItemRequests::AdditionalInfo).string().null())
                    .col(ColumnDef::new(ItemRequests::Message).string().null())
                    .col(ColumnDef::new(ItemRequests::Image).string().null())
                    .col(ColumnDef::new(ItemRequests::Status).string().not_null())
                    .col(
                        ColumnDef::new(ItemRequests::RejectionReason)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(ItemRequests::ReviewedBy).string().null())
                    .col(
                        ColumnDef::new(ItemRequests::ReviewedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(ItemRequests::ContactPhone).string().null())
                    .col(
                        ColumnDef::new(ItemRequests::ContactAlternatePhone)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(ItemRequests::ContactEmail).string().null())
                    .col(
                        ColumnDef::new(ItemRequests::ContactMeetingLocation)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ItemRequests::ContactMeetingTime)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(ItemRequests::ContactNotes).string().null())
                    .col(
                        ColumnDef::new(ItemRequests::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_requests_item_id")
                            .from(ItemRequests::Table, ItemRequests::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_requests_requested_by")
                            .from(ItemRequests::Table, ItemRequests::RequestedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate-pending lookups filter on (item_id, requested_by, status)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_item_requests_item_requester")
                    .table(ItemRequests::Table)
                    .col(ItemRequests::ItemId)
                    .col(ItemRequests::RequestedBy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ItemRequests {
    Table,
    Id,
    ItemId,
    Kind,
    RequestedBy,
    Answers,
    AdditionalInfo,
    Message,
    Image,
    Status,
    RejectionReason,
    ReviewedBy,
    ReviewedAt,
    ContactPhone,
    ContactAlternatePhone,
    ContactEmail,
    ContactMeetingLocation,
    ContactMeetingTime,
    ContactNotes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
