//! Follow-edge entity for SeaORM.
//!
//! The (follower_id, following_id) pair carries a unique index (see the
//! migration crate), so a double-follow race surfaces as a constraint
//! violation rather than a duplicate edge.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::FollowEdge {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            follower_id: model.follower_id,
            following_id: model.following_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<quill_core::domain::FollowEdge> for ActiveModel {
    fn from(edge: quill_core::domain::FollowEdge) -> Self {
        Self {
            id: Set(edge.id),
            follower_id: Set(edge.follower_id),
            following_id: Set(edge.following_id),
            created_at: Set(edge.created_at.into()),
        }
    }
}
