//! Shared world state for private message BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use courier::private_message::{
    adapters::memory::InMemoryPrivateMessageRepository,
    domain::{Account, AccountId, PrivateMessage},
    services::{PrivateMessageService, PrivateMessageServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestMessageService =
    PrivateMessageService<AccountId, InMemoryPrivateMessageRepository, DefaultClock>;

/// Scenario world for private message behaviour tests.
pub struct PrivateMessageWorld {
    /// The message service under test.
    pub service: TestMessageService,
    /// Repository shared with the service, for storage assertions.
    pub repository: Arc<InMemoryPrivateMessageRepository>,
    /// Accounts created on first mention, keyed by name.
    pub accounts: HashMap<String, Account>,
    /// The message the scenario revolves around.
    pub message: Option<PrivateMessage>,
    /// Result of the last read attempt.
    pub last_read_result: Option<Result<PrivateMessage, PrivateMessageServiceError>>,
}

impl PrivateMessageWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryPrivateMessageRepository::new());
        let service = PrivateMessageService::new(Arc::clone(&repository), Arc::new(DefaultClock));
        Self {
            service,
            repository,
            accounts: HashMap::new(),
            message: None,
            last_read_result: None,
        }
    }

    /// Returns the account with the given name, creating it if needed.
    pub fn account(&mut self, name: &str) -> Account {
        self.accounts
            .entry(name.to_owned())
            .or_insert_with(|| Account::new(name))
            .clone()
    }

    /// Returns the scenario message.
    ///
    /// # Errors
    ///
    /// Returns an error when no message has been sent yet.
    pub fn current_message(&self) -> Result<&PrivateMessage, eyre::Report> {
        self.message
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no message in scenario world"))
    }
}

impl Default for PrivateMessageWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PrivateMessageWorld {
    PrivateMessageWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
