// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document-store client with typed operations on the `users` collection.
//!
//! Each user is a single document embedding its exercise log. The store
//! assigns user ids at creation and owns the atomic append to a user's
//! log. An in-memory backend backs isolated tests and offline development;
//! it is constructed explicitly and injected through `AppState`, never held
//! in module-level globals.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Exercise, User};

/// Document store handle shared across request handlers.
#[derive(Clone)]
pub struct UserStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    /// Insertion-ordered users guarded by a single lock.
    Memory(Arc<RwLock<Vec<User>>>),
}

impl UserStore {
    /// Connect to Firestore.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn connect(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn connect_emulator(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing a
        // custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create an in-memory store for testing and offline development.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(Vec::new()))),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a new user with an empty exercise log.
    ///
    /// The store assigns the id; it doubles as the document ID.
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            exercises: Vec::new(),
        };

        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(&user.id)
                    .object(&user)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            Backend::Memory(users) => {
                users.write().await.push(user.clone());
            }
        }

        Ok(user)
    }

    /// Get a user by id.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(users) => {
                Ok(users.read().await.iter().find(|u| u.id == id).cloned())
            }
        }
    }

    /// Get all users. The caller projects away the embedded logs.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .from(collections::USERS)
                .obj()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(users) => Ok(users.read().await.clone()),
        }
    }

    // ─── Atomic Exercise Append ──────────────────────────────────

    /// Append an exercise to a user's embedded log.
    ///
    /// The read-modify-write of the whole user document runs inside a
    /// Firestore transaction, so concurrent appends to the same user are
    /// retried with fresh data instead of losing updates. The in-memory
    /// backend holds its write lock for the whole operation, which gives
    /// the same guarantee.
    ///
    /// Returns the updated user, or `None` if the id is unknown.
    pub async fn append_exercise(
        &self,
        user_id: &str,
        exercise: Exercise,
    ) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                append_exercise_firestore(client, user_id, exercise).await
            }
            Backend::Memory(users) => {
                let mut users = users.write().await;
                match users.iter_mut().find(|u| u.id == user_id) {
                    Some(user) => {
                        user.exercises.push(exercise);
                        Ok(Some(user.clone()))
                    }
                    None => Ok(None),
                }
            }
        }
    }
}

async fn append_exercise_firestore(
    client: &firestore::FirestoreDb,
    user_id: &str,
    exercise: Exercise,
) -> Result<Option<User>, AppError> {
    let mut transaction = client
        .begin_transaction()
        .await
        .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

    // Read the current document; this registers it for conflict detection.
    let user: Option<User> = client
        .fluent()
        .select()
        .by_id_in(collections::USERS)
        .obj()
        .one(user_id)
        .await
        .map_err(|e| AppError::Database(format!("Failed to read user in transaction: {}", e)))?;

    let Some(mut user) = user else {
        let _ = transaction.rollback().await;
        return Ok(None);
    };

    user.exercises.push(exercise);

    client
        .fluent()
        .update()
        .in_col(collections::USERS)
        .document_id(&user.id)
        .object(&user)
        .add_to_transaction(&mut transaction)
        .map_err(|e| {
            AppError::Database(format!("Failed to add user update to transaction: {}", e))
        })?;

    transaction
        .commit()
        .await
        .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

    tracing::debug!(
        user_id = %user.id,
        log_len = user.exercises.len(),
        "Exercise appended"
    );

    Ok(Some(user))
}
