use super::repository;
use super::GoalError;
use contracts::domain::goal::aggregate::{Goal, GoalDraft, GoalStatus};
use contracts::domain::goal::deadline;
use contracts::domain::goal::stats::GoalStats;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Create a new goal.
///
/// All three of name, description and end date are required. The end date is
/// accepted as-is, even when it already lies in the past.
pub async fn create(db: &DatabaseConnection, draft: GoalDraft) -> Result<Goal, GoalError> {
    let goal_end_date = draft
        .goal_end_date
        .ok_or_else(|| GoalError::Validation("Goal end date is required".into()))?;

    let mut aggregate = Goal::new_for_insert(
        draft.goal_name.trim().to_string(),
        draft.goal_description.trim().to_string(),
        goal_end_date,
        draft.resources_link,
    );
    aggregate.validate().map_err(GoalError::Validation)?;

    // Uniqueness of the name, checked before touching the store
    if repository::get_by_name(db, &aggregate.goal_name)
        .await?
        .is_some()
    {
        return Err(GoalError::DuplicateName(aggregate.goal_name));
    }

    aggregate.before_write();
    if let Err(err) = repository::insert(db, &aggregate).await {
        // The pre-check races concurrent creates; the UNIQUE constraint on
        // goal_name is the real arbiter, so map its violation too.
        let unique_violation = err
            .downcast_ref::<sea_orm::DbErr>()
            .and_then(|db_err| db_err.sql_err())
            .is_some_and(|sql_err| {
                matches!(sql_err, sea_orm::SqlErr::UniqueConstraintViolation(_))
            });
        if unique_violation {
            return Err(GoalError::DuplicateName(aggregate.goal_name));
        }
        return Err(err.into());
    }

    // Return the stored record, generated id and timestamps included
    repository::get_by_id(db, aggregate.id.value())
        .await?
        .ok_or(GoalError::NotFound)
}

/// All goals, no filtering or pagination
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Goal>, GoalError> {
    Ok(repository::list_all(db).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Goal, GoalError> {
    repository::get_by_id(db, id).await?.ok_or(GoalError::NotFound)
}

/// Mark a goal successfully completed. Idempotent.
pub async fn finish(db: &DatabaseConnection, id: Uuid) -> Result<(), GoalError> {
    if repository::set_status(db, id, GoalStatus::Finished).await? {
        Ok(())
    } else {
        Err(GoalError::NotFound)
    }
}

/// Mark a goal abandoned. Idempotent.
pub async fn discard(db: &DatabaseConnection, id: Uuid) -> Result<(), GoalError> {
    if repository::set_status(db, id, GoalStatus::Discarded).await? {
        Ok(())
    } else {
        Err(GoalError::NotFound)
    }
}

/// Permanently remove a goal
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), GoalError> {
    if repository::delete(db, id).await? {
        Ok(())
    } else {
        Err(GoalError::NotFound)
    }
}

/// Aggregate counts per status for the dashboard
pub async fn stats(db: &DatabaseConnection) -> Result<GoalStats, GoalError> {
    let mut stats = GoalStats::default();
    for row in repository::count_by_status(db).await? {
        stats.total += row.count;
        match row.status.parse() {
            Ok(GoalStatus::Active) => stats.active += row.count,
            Ok(GoalStatus::Finished) => stats.finished += row.count,
            Ok(GoalStatus::Discarded) => stats.discarded += row.count,
            Err(_) => {}
        }
    }
    Ok(stats)
}

/// Discard every expired goal that is still active.
///
/// This is the explicit counterpart of the old render-time auto-discard:
/// rendering stays pure, and this step runs on list-load and from the
/// background worker. Finished and already-discarded goals are left alone.
/// Returns the number of goals discarded.
pub async fn reconcile_expired(db: &DatabaseConnection) -> Result<usize, GoalError> {
    let goals = repository::list_all(db).await?;
    let mut discarded = 0;
    for goal in goals {
        if !goal.is_terminal() && deadline::is_expired(&goal) {
            if repository::set_status(db, goal.id.value(), GoalStatus::Discarded).await? {
                discarded += 1;
            }
        }
    }
    if discarded > 0 {
        tracing::info!("Reconciliation discarded {} expired goal(s)", discarded);
    }
    Ok(discarded)
}
