use sea_orm::entity::prelude::*;

/// Registered user account. `password_hash` is a PHC-format argon2 string and
/// must never reach a wire response.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub mobile: String,
    pub dob: Date,
    pub location: String,
    pub profile_image: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_media::Entity")]
    UserMedia,
    #[sea_orm(has_many = "super::matches::Entity")]
    Matches,
}

impl Related<super::user_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMedia.def()
    }
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
