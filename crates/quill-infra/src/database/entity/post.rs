//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

use quill_core::domain;

/// Paragraph list stored as a JSONB array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Paragraphs(pub Vec<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
    #[sea_orm(string_value = "fiction")]
    Fiction,
    #[sea_orm(string_value = "nonfiction")]
    Nonfiction,
    #[sea_orm(string_value = "technology")]
    Technology,
    #[sea_orm(string_value = "science")]
    Science,
    #[sea_orm(string_value = "travel")]
    Travel,
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "lifestyle")]
    Lifestyle,
    #[sea_orm(string_value = "opinion")]
    Opinion,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub timestamp: DateTimeWithTimeZone,
    pub category: Category,
    #[sea_orm(column_type = "JsonBinary")]
    pub text: Paragraphs,
    pub is_published: bool,
    pub comment_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Category> for domain::Category {
    fn from(category: Category) -> Self {
        match category {
            Category::Fiction => Self::Fiction,
            Category::Nonfiction => Self::Nonfiction,
            Category::Technology => Self::Technology,
            Category::Science => Self::Science,
            Category::Travel => Self::Travel,
            Category::Food => Self::Food,
            Category::Lifestyle => Self::Lifestyle,
            Category::Opinion => Self::Opinion,
        }
    }
}

impl From<domain::Category> for Category {
    fn from(category: domain::Category) -> Self {
        match category {
            domain::Category::Fiction => Self::Fiction,
            domain::Category::Nonfiction => Self::Nonfiction,
            domain::Category::Technology => Self::Technology,
            domain::Category::Science => Self::Science,
            domain::Category::Travel => Self::Travel,
            domain::Category::Food => Self::Food,
            domain::Category::Lifestyle => Self::Lifestyle,
            domain::Category::Opinion => Self::Opinion,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: model.author_id,
            title: model.title,
            timestamp: model.timestamp.into(),
            category: model.category.into(),
            text: model.text.0,
            is_published: model.is_published,
            comment_count: model.comment_count,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<domain::Post> for ActiveModel {
    fn from(post: domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author),
            title: Set(post.title),
            timestamp: Set(post.timestamp.into()),
            category: Set(post.category.into()),
            text: Set(Paragraphs(post.text)),
            is_published: Set(post.is_published),
            comment_count: Set(post.comment_count),
        }
    }
}
