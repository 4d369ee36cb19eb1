use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Items::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Items::ItemType).string().not_null())
                    .col(ColumnDef::new(Items::Title).string().not_null())
                    .col(ColumnDef::new(Items::Description).string().not_null())
                    .col(ColumnDef::new(Items::Location).string().not_null())
                    .col(ColumnDef::new(Items::Image).string().null())
                    .col(ColumnDef::new(Items::Status).string().not_null())
                    .col(ColumnDef::new(Items::PostedBy).string().not_null())
                    .col(ColumnDef::new(Items::ClaimedBy).string().null())
                    .col(
                        ColumnDef::new(Items::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Items::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Items::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_posted_by")
                            .from(Items::Table, Items::PostedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Status drives search visibility; index it alongside type
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_items_status")
                    .table(Items::Table)
                    .col(Items::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_items_type")
                    .table(Items::Table)
                    .col(Items::ItemType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ValidityQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ValidityQuestions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ValidityQuestions::ItemId).string().not_null())
                    .col(
                        ColumnDef::new(ValidityQuestions::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ValidityQuestions::Question)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ValidityQuestions::Answer).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_validity_questions_item_id")
                            .from(ValidityQuestions::Table, ValidityQuestions::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_validity_questions_item")
                    .table(ValidityQuestions::Table)
                    .col(ValidityQuestions::ItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ValidityQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    ItemType,
    Title,
    Description,
    Location,
    Image,
    Status,
    PostedBy,
    ClaimedBy,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ValidityQuestions {
    Table,
    Id,
    ItemId,
    Position,
    Question,
    Answer,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
