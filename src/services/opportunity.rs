use crate::domain::opportunity::{Opportunity, UpdateOpportunity};
use crate::domain::stage::Stage;
use crate::domain::types::OpportunityId;
use crate::domain::user::AuthenticatedUser;
use crate::dto::board::BoardPageData;
use crate::forms::opportunity::OpportunityForm;
use crate::repository::{ClientReader, OpportunityReader, OpportunityWriter};
use crate::services::notify::{Notifier, report_outcome};
use crate::services::pipeline::{board_columns, summarize};
use crate::services::session::require_actor;
use crate::services::{ServiceError, ServiceResult};

/// Loads opportunities and clients and shapes them into board columns.
pub fn load_board<R>(repo: &R) -> ServiceResult<BoardPageData>
where
    R: OpportunityReader + ClientReader + ?Sized,
{
    let opportunities = repo.list_opportunities().map_err(|err| {
        log::error!("Failed to load opportunities: {err}");
        err
    })?;
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        err
    })?;

    Ok(BoardPageData {
        columns: board_columns(&opportunities),
        summary: summarize(&opportunities),
        opportunities,
        clients,
    })
}

/// Validates the form and persists a new opportunity owned by the actor.
pub fn create_opportunity<R>(
    repo: &R,
    notifier: &dyn Notifier,
    actor: Option<&AuthenticatedUser>,
    form: OpportunityForm,
) -> ServiceResult<Opportunity>
where
    R: OpportunityWriter + ?Sized,
{
    let actor = require_actor(actor, notifier)?;

    let result = form
        .into_new_opportunity(actor.id)
        .map_err(|err| ServiceError::Form(err.to_string()))
        .and_then(|payload| {
            repo.create_opportunity(&payload)
                .map_err(ServiceError::from)
        });

    report_outcome(
        notifier,
        result,
        "Opportunity created",
        "Could not create the opportunity",
    )
}

/// Applies a full edit coming from the update form.
pub fn update_opportunity<R>(
    repo: &R,
    notifier: &dyn Notifier,
    actor: Option<&AuthenticatedUser>,
    id: OpportunityId,
    form: OpportunityForm,
) -> ServiceResult<Opportunity>
where
    R: OpportunityWriter + ?Sized,
{
    require_actor(actor, notifier)?;

    let result = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))
        .and_then(|updates| {
            repo.update_opportunity(id, &updates)
                .map_err(ServiceError::from)
        });

    report_outcome(
        notifier,
        result,
        "Opportunity updated",
        "Could not update the opportunity",
    )
}

/// Stage-only update issued after a board drag. Notifications are left to the caller.
pub fn move_opportunity<R>(
    repo: &R,
    actor: &AuthenticatedUser,
    id: OpportunityId,
    stage: Stage,
) -> ServiceResult<Opportunity>
where
    R: OpportunityWriter + ?Sized,
{
    log::info!("Seller {} moves opportunity {id} to {stage}", actor.id);
    repo.update_opportunity(id, &UpdateOpportunity::stage(stage))
        .map_err(ServiceError::from)
}
