//! Private messages between host-defined user types.
//!
//! The host application here identifies its members by a numeric key
//! rather than the default account UUID.

use std::fmt;
use std::sync::Arc;

use courier::private_message::{
    adapters::memory::{InMemoryParticipantDirectory, InMemoryPrivateMessageRepository},
    domain::{Participant, ReadFilter},
    services::{
        DeletionOutcome, ParticipantResolver, PrivateMessageService, PrivateMessageServiceError,
        SendMessageRequest,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemberId(u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Member {
    id: MemberId,
    display_name: String,
}

impl Member {
    fn new(id: u64, display_name: &str) -> Self {
        Self {
            id: MemberId(id),
            display_name: display_name.to_owned(),
        }
    }
}

impl Participant for Member {
    type Id = MemberId;

    fn participant_id(&self) -> Self::Id {
        self.id
    }
}

type MemberService =
    PrivateMessageService<MemberId, InMemoryPrivateMessageRepository<MemberId>, DefaultClock>;

struct Forum {
    service: MemberService,
    directory: Arc<InMemoryParticipantDirectory<Member>>,
    ada: Member,
    grace: Member,
}

#[fixture]
fn forum() -> Forum {
    let directory = Arc::new(InMemoryParticipantDirectory::new());
    let ada = Member::new(1, "Ada");
    let grace = Member::new(2, "Grace");
    directory.insert(ada.clone()).expect("insert ada");
    directory.insert(grace.clone()).expect("insert grace");
    Forum {
        service: PrivateMessageService::new(
            Arc::new(InMemoryPrivateMessageRepository::new()),
            Arc::new(DefaultClock),
        ),
        directory,
        ada,
        grace,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_exchange_and_resolve_messages(forum: Forum) {
    let message = forum
        .service
        .send(SendMessageRequest::new(
            &forum.ada,
            &forum.grace,
            "Compilers",
            "Have you tried the new linker?",
        ))
        .await
        .expect("send should succeed");

    let read = forum
        .service
        .read_message(message.id(), &forum.grace)
        .await
        .expect("recipient read should succeed");
    assert!(read.is_read());

    let resolver = ParticipantResolver::new(Arc::clone(&forum.directory));
    let sender = resolver
        .sender(&read)
        .await
        .expect("lookup should succeed")
        .expect("sender exists");
    assert_eq!(sender.display_name, "Ada");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_mailboxes_follow_deletions(forum: Forum) {
    let message = forum
        .service
        .send(SendMessageRequest::new(
            &forum.ada,
            &forum.grace,
            "Compilers",
            "Have you tried the new linker?",
        ))
        .await
        .expect("send should succeed");

    let outcome = forum
        .service
        .mark_deleted_by_id(message.id(), &forum.grace)
        .await
        .expect("recipient deletion should succeed");
    assert!(matches!(outcome, DeletionOutcome::Retained(_)));

    let inbox = forum
        .service
        .inbox(&forum.grace, ReadFilter::Any)
        .await
        .expect("inbox should load");
    let sent = forum
        .service
        .sent(&forum.ada, ReadFilter::Unread)
        .await
        .expect("sent should load");
    assert!(inbox.is_empty());
    assert_eq!(sent.len(), 1);

    forum
        .service
        .mark_deleted_by_id(message.id(), &forum.ada)
        .await
        .expect("sender deletion should succeed");
    let result = forum.service.read_message(message.id(), &forum.ada).await;
    assert!(matches!(
        result,
        Err(PrivateMessageServiceError::NotFound(_))
    ));
}
