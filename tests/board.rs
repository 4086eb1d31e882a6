use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use pipeline_crm::domain::opportunity::NewOpportunity;
use pipeline_crm::domain::stage::Stage;
use pipeline_crm::domain::types::{Amount, SellerId};
use pipeline_crm::domain::user::AuthenticatedUser;
use pipeline_crm::repository::{DieselRepository, OpportunityReader, OpportunityWriter};
use pipeline_crm::services::board::{DragEnd, DragOutcome, PipelineBoard};
use pipeline_crm::services::notify::LogNotifier;
use pipeline_crm::services::session::StaticIdentity;

mod common;

#[tokio::test]
async fn test_drag_persists_stage_and_settles() {
    let test_db = common::TestDb::new("test_drag_persists_stage.db");
    let client_id = test_db.seed_client("Acme", None);
    let repo = Arc::new(DieselRepository::new(test_db.pool()));
    let seller = AuthenticatedUser {
        id: SellerId::new(2).unwrap(),
        name: "Kim".to_string(),
        email: "kim@example.com".to_string(),
    };

    let first = repo
        .create_opportunity(&NewOpportunity::new(
            client_id,
            seller.id,
            Amount::new(500.0).unwrap(),
            Stage::Initial,
            None,
        ))
        .unwrap();
    let second = repo
        .create_opportunity(&NewOpportunity::new(
            client_id,
            seller.id,
            Amount::new(750.0).unwrap(),
            Stage::Proposal,
            None,
        ))
        .unwrap();

    let mut board = PipelineBoard::new(
        Handle::current(),
        Arc::clone(&repo),
        Arc::new(LogNotifier),
        Arc::new(StaticIdentity::signed_in(seller)),
    )
    .with_settle_delay(Duration::from_millis(20));
    let current = repo.list_opportunities().unwrap();

    let drop = DragEnd::new(first.id.to_string(), Some(second.id.to_string().as_str()));
    let DragOutcome::Moved { to, sync, .. } = board.on_drag_end(&drop, &current) else {
        panic!("expected a move");
    };
    assert_eq!(to, Stage::Proposal);
    let shown = board.columns(&current);
    assert_eq!(shown[Stage::Proposal.position()].opportunities.len(), 2);

    let persisted = sync.await.unwrap().unwrap();
    assert_eq!(persisted.stage, Stage::Proposal);
    assert!(board.snapshot().is_none());

    let stored = repo.get_opportunity_by_id(first.id).unwrap().unwrap();
    assert_eq!(stored.stage, Stage::Proposal);
    assert_eq!(stored.probability, first.probability);
}
