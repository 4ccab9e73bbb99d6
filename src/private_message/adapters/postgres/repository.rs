//! `PostgreSQL` repository implementation for private messages.

use super::{
    filter::PgMessageFilter,
    models::{
        DeletionFlagsChangeset, NewPrivateMessageRow, PrivateMessageChangeset, PrivateMessageRow,
    },
    schema::private_messages,
};
use crate::private_message::{
    domain::{
        AccountId, MessageContent, MessageId, MessageQuery, ParticipantId,
        PersistedPrivateMessageData, PrivateMessage,
    },
    ports::{
        PrivateMessageRepository, PrivateMessageRepositoryError, PrivateMessageRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by private message adapters.
pub type PrivateMessagePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed private message repository.
///
/// Participant identifiers are stored as UUID columns, so `P` must convert
/// to and from [`Uuid`].
pub struct PostgresPrivateMessageRepository<P = AccountId> {
    pool: PrivateMessagePgPool,
    participant: PhantomData<fn() -> P>,
}

impl<P> PostgresPrivateMessageRepository<P> {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PrivateMessagePgPool) -> Self {
        Self {
            pool,
            participant: PhantomData,
        }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PrivateMessageRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PrivateMessageRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(PrivateMessageRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PrivateMessageRepositoryError::persistence)?
    }
}

impl<P> Clone for PostgresPrivateMessageRepository<P> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<P> fmt::Debug for PostgresPrivateMessageRepository<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresPrivateMessageRepository")
            .field("pool", &self.pool)
            .finish()
    }
}

#[async_trait]
impl<P> PrivateMessageRepository<P> for PostgresPrivateMessageRepository<P>
where
    P: ParticipantId + From<Uuid> + Into<Uuid>,
{
    async fn insert(&self, message: &PrivateMessage<P>) -> PrivateMessageRepositoryResult<()> {
        let message_id = message.id();
        let new_row = to_new_row(message);

        self.run_blocking(move |connection| {
            diesel::insert_into(private_messages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PrivateMessageRepositoryError::DuplicateMessage(message_id)
                    }
                    _ => PrivateMessageRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, message: &PrivateMessage<P>) -> PrivateMessageRepositoryResult<()> {
        let message_id = message.id();
        let changeset = PrivateMessageChangeset {
            read_at: message.read_at(),
            sender_deleted: message.sender_deleted(),
            recipient_deleted: message.recipient_deleted(),
            updated_at: message.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                private_messages::table.filter(private_messages::id.eq(message_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(PrivateMessageRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(PrivateMessageRepositoryError::NotFound(message_id));
            }
            Ok(())
        })
        .await
    }

    async fn update_deletion_flags(
        &self,
        message: &PrivateMessage<P>,
    ) -> PrivateMessageRepositoryResult<PrivateMessage<P>> {
        let message_id = message.id();
        let changeset = deletion_changeset(message);

        self.run_blocking(move |connection| {
            let row = diesel::update(
                private_messages::table.filter(private_messages::id.eq(message_id.into_inner())),
            )
            .set(&changeset)
            .returning(PrivateMessageRow::as_returning())
            .get_result::<PrivateMessageRow>(connection)
            .optional()
            .map_err(PrivateMessageRepositoryError::persistence)?
            .ok_or(PrivateMessageRepositoryError::NotFound(message_id))?;
            row_to_message(row)
        })
        .await
    }

    async fn delete(&self, id: MessageId) -> PrivateMessageRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(
                private_messages::table.filter(private_messages::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(PrivateMessageRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(PrivateMessageRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_matching(
        &self,
        id: MessageId,
        query: &MessageQuery<P>,
    ) -> PrivateMessageRepositoryResult<Option<PrivateMessage<P>>> {
        let filter = PgMessageFilter::from_query(query);
        self.run_blocking(move |connection| {
            let row = filter
                .boxed()
                .filter(private_messages::id.eq(id.into_inner()))
                .select(PrivateMessageRow::as_select())
                .first::<PrivateMessageRow>(connection)
                .optional()
                .map_err(PrivateMessageRepositoryError::persistence)?;
            row.map(row_to_message).transpose()
        })
        .await
    }

    async fn list(
        &self,
        query: &MessageQuery<P>,
    ) -> PrivateMessageRepositoryResult<Vec<PrivateMessage<P>>> {
        let filter = PgMessageFilter::from_query(query);
        self.run_blocking(move |connection| {
            let rows = filter
                .boxed()
                .order((
                    private_messages::created_at.desc(),
                    private_messages::id.desc(),
                ))
                .select(PrivateMessageRow::as_select())
                .load::<PrivateMessageRow>(connection)
                .map_err(PrivateMessageRepositoryError::persistence)?;
            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }

    async fn count(&self, query: &MessageQuery<P>) -> PrivateMessageRepositoryResult<u64> {
        let filter = PgMessageFilter::from_query(query);
        self.run_blocking(move |connection| {
            let total = filter
                .boxed()
                .count()
                .get_result::<i64>(connection)
                .map_err(PrivateMessageRepositoryError::persistence)?;
            u64::try_from(total).map_err(PrivateMessageRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

fn to_new_row<P>(message: &PrivateMessage<P>) -> NewPrivateMessageRow
where
    P: ParticipantId + Into<Uuid>,
{
    NewPrivateMessageRow {
        id: message.id().into_inner(),
        sender_id: message.sender_id().into(),
        recipient_id: message.recipient_id().into(),
        subject: message.content().subject().to_owned(),
        body: message.content().body().to_owned(),
        read_at: message.read_at(),
        sender_deleted: message.sender_deleted(),
        recipient_deleted: message.recipient_deleted(),
        created_at: message.created_at(),
        updated_at: message.updated_at(),
    }
}

fn deletion_changeset<P: ParticipantId>(message: &PrivateMessage<P>) -> DeletionFlagsChangeset {
    DeletionFlagsChangeset {
        sender_deleted: message.sender_deleted().then_some(true),
        recipient_deleted: message.recipient_deleted().then_some(true),
        updated_at: message.updated_at(),
    }
}

fn row_to_message<P>(row: PrivateMessageRow) -> PrivateMessageRepositoryResult<PrivateMessage<P>>
where
    P: ParticipantId + From<Uuid>,
{
    let PrivateMessageRow {
        id,
        sender_id,
        recipient_id,
        subject,
        body,
        read_at,
        sender_deleted,
        recipient_deleted,
        created_at,
        updated_at,
    } = row;

    let content = MessageContent::new(subject, body)
        .map_err(PrivateMessageRepositoryError::invalid_persisted_data)?;

    let data = PersistedPrivateMessageData {
        id: MessageId::from_uuid(id),
        sender_id: P::from(sender_id),
        recipient_id: P::from(recipient_id),
        content,
        read_at,
        sender_deleted,
        recipient_deleted,
        created_at,
        updated_at,
    };
    Ok(PrivateMessage::from_persisted(data))
}
