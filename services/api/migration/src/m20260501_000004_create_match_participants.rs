use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MatchParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchParticipants::MatchId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchParticipants::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(MatchParticipants::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(MatchParticipants::MatchId)
                            .col(MatchParticipants::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MatchParticipants::Table, MatchParticipants::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MatchParticipants::Table, MatchParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // my-matches / joined-matches filter by user
        manager
            .create_index(
                Index::create()
                    .table(MatchParticipants::Table)
                    .col(MatchParticipants::UserId)
                    .name("idx_match_participants_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchParticipants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MatchParticipants {
    Table,
    MatchId,
    UserId,
    JoinedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
