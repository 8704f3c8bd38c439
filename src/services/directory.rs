// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Known platform users.
//!
//! Stands in for the authentication provider: it hands out `User` values by
//! id and never changes them.

use crate::models::{Role, User};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to read user directory: {0}")]
    IoError(String),

    #[error("Failed to parse user directory: {0}")]
    ParseError(String),

    #[error("Duplicate user id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    by_id: HashMap<String, usize>,
}

impl UserDirectory {
    pub fn from_users(users: Vec<User>) -> Result<Self, DirectoryError> {
        let mut by_id = HashMap::with_capacity(users.len());
        for (index, user) in users.iter().enumerate() {
            if by_id.insert(user.id.clone(), index).is_some() {
                return Err(DirectoryError::DuplicateId(user.id.clone()));
            }
        }
        Ok(Self { users, by_id })
    }

    /// Load users from a JSON array file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| DirectoryError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load users from a JSON array. Unknown roles are rejected.
    pub fn load_from_json(json_data: &str) -> Result<Self, DirectoryError> {
        let users: Vec<User> = serde_json::from_str(json_data)
            .map_err(|e| DirectoryError::ParseError(e.to_string()))?;
        Self::from_users(users)
    }

    /// Demo roster, one or more users per role.
    pub fn demo() -> Self {
        let users = vec![
            demo_user("u1", "Alex", "Carter", Role::Client, "2023", "Intermediate"),
            demo_user("u2", "Jamie", "Nguyen", Role::Client, "2024", "Beginner"),
            demo_user("c1", "Marcus", "Steel", Role::Coach, "2019", "Elite"),
            demo_user("c2", "Elena", "Ruiz", Role::Coach, "2021", "Elite"),
            demo_user("a1", "Dana", "Whitfield", Role::Admin, "2018", "Staff"),
            demo_user("s1", "Priya", "Shah", Role::Support, "2022", "Staff"),
        ];
        // Ids above are distinct.
        Self::from_users(users).unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.by_id.get(id).map(|&i| &self.users[i])
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn demo_user(
    id: &str,
    first_name: &str,
    last_name: &str,
    role: Role,
    member_since: &str,
    level: &str,
) -> User {
    User {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@ironpulse.fit",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        role,
        avatar: format!("https://i.pravatar.cc/150?u={id}"),
        member_since: member_since.to_string(),
        level: level.to_string(),
    }
}
