use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamJoinRequests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeamJoinRequests::TeamId).uuid().not_null())
                    .col(ColumnDef::new(TeamJoinRequests::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(TeamJoinRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(TeamJoinRequests::TeamId)
                            .col(TeamJoinRequests::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamJoinRequests::Table, TeamJoinRequests::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamJoinRequests::Table, TeamJoinRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamJoinRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TeamJoinRequests {
    Table,
    TeamId,
    UserId,
    RequestedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
