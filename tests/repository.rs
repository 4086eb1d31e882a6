use pipeline_crm::domain::opportunity::{NewOpportunity, UpdateOpportunity};
use pipeline_crm::domain::stage::Stage;
use pipeline_crm::domain::ticket::{
    NewTicket, TicketCategory, TicketPriority, TicketStatus, UpdateTicket,
};
use pipeline_crm::domain::types::{
    Amount, OpportunityId, Probability, SellerId, TicketDescription, TicketTitle,
};
use pipeline_crm::repository::errors::RepositoryError;
use pipeline_crm::repository::{
    ClientReader, DieselRepository, OpportunityReader, OpportunityWriter, TicketReader,
    TicketWriter,
};

mod common;

#[test]
fn test_client_repository_lists_by_company_name() {
    let test_db = common::TestDb::new("test_client_repository_lists.db");
    test_db.seed_client("Zenith Ltd", Some("ops@zenith.io"));
    test_db.seed_client("Acme", None);
    let repo = DieselRepository::new(test_db.pool());

    let clients = repo.list_clients().unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].company_name.as_str(), "Acme");
    assert!(clients[0].email.is_none());
    assert_eq!(
        clients[1].email.as_ref().map(|e| e.as_str()),
        Some("ops@zenith.io")
    );
}

#[test]
fn test_opportunity_repository_crud() {
    let test_db = common::TestDb::new("test_opportunity_repository_crud.db");
    let client_id = test_db.seed_client("Acme", None);
    let repo = DieselRepository::new(test_db.pool());
    let seller_id = SellerId::new(3).unwrap();

    let created = repo
        .create_opportunity(&NewOpportunity::new(
            client_id,
            seller_id,
            Amount::new(1200.0).unwrap(),
            Stage::Initial,
            None,
        ))
        .unwrap();
    assert_eq!(created.stage, Stage::Initial);
    assert_eq!(created.probability.get(), 10);
    assert_eq!(created.seller_id, seller_id);

    let moved = repo
        .update_opportunity(created.id, &UpdateOpportunity::stage(Stage::Negotiation))
        .unwrap();
    assert_eq!(moved.stage, Stage::Negotiation);
    // Only the stage changes on a move.
    assert_eq!(moved.probability.get(), 10);
    assert_eq!(moved.value.get(), 1200.0);

    let edited = repo
        .update_opportunity(
            created.id,
            &UpdateOpportunity {
                value: Some(Amount::new(900.0).unwrap()),
                probability: Some(Probability::new(80).unwrap()),
                ..UpdateOpportunity::default()
            },
        )
        .unwrap();
    assert_eq!(edited.stage, Stage::Negotiation);
    assert_eq!(edited.value.get(), 900.0);
    assert_eq!(edited.probability.get(), 80);

    let fetched = repo.get_opportunity_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched, edited);
    assert_eq!(repo.list_opportunities().unwrap().len(), 1);
}

#[test]
fn test_opportunity_repository_missing_rows() {
    let test_db = common::TestDb::new("test_opportunity_repository_missing.db");
    let repo = DieselRepository::new(test_db.pool());
    let missing = OpportunityId::new(404).unwrap();

    assert!(repo.get_opportunity_by_id(missing).unwrap().is_none());
    assert!(matches!(
        repo.update_opportunity(missing, &UpdateOpportunity::stage(Stage::Closed)),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_ticket_repository_crud() {
    let test_db = common::TestDb::new("test_ticket_repository_crud.db");
    let client_id = test_db.seed_client("Acme", None);
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_ticket(&NewTicket {
            title: TicketTitle::new("Printer offline").unwrap(),
            description: TicketDescription::new("Second floor"),
            client_id,
            seller_id: SellerId::new(1).unwrap(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            category: TicketCategory::Technical,
        })
        .unwrap();
    assert_eq!(created.status, TicketStatus::Open);
    assert_eq!(created.description.as_str(), "Second floor");

    let started = repo
        .update_ticket(
            created.id,
            &UpdateTicket {
                status: Some(TicketStatus::InProgress),
                ..UpdateTicket::default()
            },
        )
        .unwrap();
    assert_eq!(started.status, TicketStatus::InProgress);

    let updated = repo
        .update_ticket(
            created.id,
            &UpdateTicket {
                status: Some(TicketStatus::Resolved),
                priority: Some(TicketPriority::Urgent),
                ..UpdateTicket::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status, TicketStatus::Resolved);
    assert_eq!(updated.priority, TicketPriority::Urgent);
    assert_eq!(updated.title.as_str(), "Printer offline");

    let tickets = repo.list_tickets().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, created.id);
}
