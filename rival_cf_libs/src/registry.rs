use crate::codeforces::SolvedSet;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use thiserror::Error;

type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("handle must not be empty")]
    EmptyHandle,
    #[error("user {0} is already added")]
    DuplicateHandle(String),
    #[error("at least one user is required")]
    MinimumUsersViolation,
    #[error("user {0} is not registered")]
    UnknownUser(UserId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub fn hex(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display colors handed out to users in insertion order.
pub const PALETTE: [Color; 8] = [
    Color("#10b981"), // green
    Color("#3b82f6"), // blue
    Color("#f59e0b"), // amber
    Color("#ef4444"), // red
    Color("#8b5cf6"), // purple
    Color("#ec4899"), // pink
    Color("#14b8a6"), // teal
    Color("#f97316"), // orange
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    handle: String,
    color: Color,
    #[serde(skip)]
    solved: Arc<SolvedSet>,
}

impl User {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn solved(&self) -> &SolvedSet {
        &self.solved
    }

    pub fn has_solved(&self, problem_id: &str) -> bool {
        self.solved.contains(problem_id)
    }
}

/// Ordered collection of tracked users. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistry {
    users: Vec<User>,
    // Number of users ever added. Drives both ids and color assignment.
    inserted: u64,
}

impl UserRegistry {
    pub fn new<I, S>(handles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = UserRegistry {
            users: Vec::new(),
            inserted: 0,
        };
        for handle in handles {
            registry.add_user(handle.as_ref())?;
        }

        if registry.users.is_empty() {
            return Err(RegistryError::MinimumUsersViolation);
        }

        Ok(registry)
    }

    pub fn add_user(&mut self, handle: &str) -> Result<UserId> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(RegistryError::EmptyHandle);
        }

        let lowercase = handle.to_lowercase();
        if self
            .users
            .iter()
            .any(|user| user.handle.trim().to_lowercase() == lowercase)
        {
            return Err(RegistryError::DuplicateHandle(handle.to_string()));
        }

        let id = UserId(self.inserted);
        let color = PALETTE[(self.inserted % PALETTE.len() as u64) as usize];
        self.inserted += 1;

        self.users.push(User {
            id,
            handle: handle.to_string(),
            color,
            solved: Arc::new(SolvedSet::new()),
        });
        tracing::debug!("user {} added as {} with color {}", handle, id, color);

        Ok(id)
    }

    pub fn remove_user(&mut self, id: UserId) -> Result<User> {
        let position = self.position(id)?;
        if self.users.len() <= 1 {
            return Err(RegistryError::MinimumUsersViolation);
        }

        Ok(self.users.remove(position))
    }

    /// Rename a user in place. Uniqueness is only enforced when users are added.
    pub fn update_handle(&mut self, id: UserId, handle: &str) -> Result<()> {
        let position = self.position(id)?;
        self.users[position].handle = handle.to_string();
        Ok(())
    }

    /// Replace the solved set of a user as a whole.
    pub fn set_solved(&mut self, id: UserId, solved: impl Into<Arc<SolvedSet>>) -> Result<()> {
        let position = self.position(id)?;
        self.users[position].solved = solved.into();
        Ok(())
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn position(&self, id: UserId) -> Result<usize> {
        self.users
            .iter()
            .position(|user| user.id == id)
            .ok_or(RegistryError::UnknownUser(id))
    }
}
