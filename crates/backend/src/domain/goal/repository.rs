use chrono::Utc;
use contracts::domain::common::EntityMetadata;
use contracts::domain::goal::aggregate::{Goal, GoalId, GoalStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, Set, Statement};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub goal_name: String,
    pub goal_description: String,
    pub goal_end_date: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub resources_link: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Goal {
    type Error = anyhow::Error;

    // A row that does not parse is data corruption; surfacing it beats
    // inventing a fresh id or defaulting the status on read.
    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let uuid = Uuid::parse_str(&m.id)
            .map_err(|e| anyhow::anyhow!("Corrupt goal id {:?}: {}", m.id, e))?;
        let status = m
            .status
            .parse::<GoalStatus>()
            .map_err(|e| anyhow::anyhow!("Corrupt goal row {}: {}", m.id, e))?;

        Ok(Goal {
            id: GoalId(uuid),
            goal_name: m.goal_name,
            goal_description: m.goal_description,
            goal_end_date: m.goal_end_date,
            status,
            resources_link: m.resources_link,
            metadata: EntityMetadata::with_timestamps(m.created_at, m.updated_at),
        })
    }
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Goal>> {
    Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Goal::try_from)
        .collect()
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<Option<Goal>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    result.map(Goal::try_from).transpose()
}

pub async fn get_by_name(db: &DatabaseConnection, name: &str) -> anyhow::Result<Option<Goal>> {
    let result = Entity::find()
        .filter(Column::GoalName.eq(name))
        .one(db)
        .await?;
    result.map(Goal::try_from).transpose()
}

pub async fn insert(db: &DatabaseConnection, aggregate: &Goal) -> anyhow::Result<GoalId> {
    let active = ActiveModel {
        id: Set(aggregate.id.value().to_string()),
        goal_name: Set(aggregate.goal_name.clone()),
        goal_description: Set(aggregate.goal_description.clone()),
        goal_end_date: Set(aggregate.goal_end_date),
        status: Set(aggregate.status.as_str().to_string()),
        resources_link: Set(aggregate.resources_link.clone()),
        created_at: Set(aggregate.metadata.created_at),
        updated_at: Set(aggregate.metadata.updated_at),
    };
    active.insert(db).await?;
    Ok(aggregate.id)
}

/// Overwrite the lifecycle status, touching updated_at. Returns false when the
/// id does not resolve. Writing the same status twice is a no-op by value, so
/// racing finish/discard calls settle on whichever wrote last.
pub async fn set_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: GoalStatus,
) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.as_str()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Hard delete. The record is gone for good, there is no soft-delete flag.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Raw aggregation result for the stats endpoint
#[derive(Debug, FromQueryResult)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

pub async fn count_by_status(db: &DatabaseConnection) -> anyhow::Result<Vec<StatusCount>> {
    let sql = r#"
        SELECT status, COUNT(*) AS count
        FROM goal
        GROUP BY status
    "#;
    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, []);
    let results = StatusCount::find_by_statement(stmt).all(db).await?;
    Ok(results)
}
