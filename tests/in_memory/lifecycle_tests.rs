//! End-to-end lifecycle of a private message between two accounts.

use std::sync::Arc;

use courier::private_message::{
    adapters::memory::InMemoryPrivateMessageRepository,
    domain::{Account, AccountId},
    services::{
        DeletionOutcome, PrivateMessageService, PrivateMessageServiceError, SendMessageRequest,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    PrivateMessageService<AccountId, InMemoryPrivateMessageRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    PrivateMessageService::new(
        Arc::new(InMemoryPrivateMessageRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn read_then_delete_from_both_sides(service: TestService) {
    let alice = Account::new("alice");
    let bob = Account::new("bob");

    let message = service
        .send(SendMessageRequest::new(
            &alice,
            &bob,
            "Quarterly report",
            "Draft attached.",
        ))
        .await
        .expect("send should succeed");
    assert!(!message.is_read());

    let read_by_bob = service
        .read_message(message.id(), &bob)
        .await
        .expect("recipient read should succeed");
    let read_at = read_by_bob.read_at().expect("read timestamp set");

    let read_by_alice = service
        .read_message(message.id(), &alice)
        .await
        .expect("sender read should succeed");
    assert_eq!(read_by_alice.read_at(), Some(read_at));

    let after_alice = service
        .mark_deleted(read_by_alice, &alice)
        .await
        .expect("sender deletion should succeed");
    let DeletionOutcome::Retained(retained) = after_alice else {
        panic!("message should survive the first deletion");
    };
    assert!(retained.sender_deleted());
    assert!(!retained.recipient_deleted());

    let after_bob = service
        .mark_deleted(retained, &bob)
        .await
        .expect("recipient deletion should succeed");
    assert_eq!(after_bob, DeletionOutcome::Destroyed(message.id()));

    let lookup = service.read_message(message.id(), &alice).await;
    assert!(matches!(
        lookup,
        Err(PrivateMessageServiceError::NotFound(id)) if id == message.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_cannot_tell_missing_from_forbidden(service: TestService) {
    let alice = Account::new("alice");
    let bob = Account::new("bob");
    let eve = Account::new("eve");

    let message = service
        .send(SendMessageRequest::new(&alice, &bob, "Secret", "For Bob only"))
        .await
        .expect("send should succeed");

    let forbidden = service.read_message(message.id(), &eve).await;
    let missing = service
        .read_message(courier::private_message::domain::MessageId::new(), &eve)
        .await;

    assert!(matches!(
        forbidden,
        Err(PrivateMessageServiceError::NotFound(_))
    ));
    assert!(matches!(
        missing,
        Err(PrivateMessageServiceError::NotFound(_))
    ));
    let unread = service.unread_count(&bob).await.expect("count");
    assert_eq!(unread, 1);
}
