use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserMedia::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserMedia::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserMedia::Kind).string().not_null())
                    .col(ColumnDef::new(UserMedia::Url).string().not_null())
                    .col(
                        ColumnDef::new(UserMedia::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserMedia::Table, UserMedia::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserMedia::Table)
                    .col(UserMedia::UserId)
                    .name("idx_user_media_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserMedia::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserMedia {
    Table,
    Id,
    UserId,
    Kind,
    Url,
    UploadedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
