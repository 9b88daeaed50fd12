// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Thin translation layer from domain operations to store calls: each
//! jog operation maps to exactly one point read/write, range scan, or
//! filtered query. No retries, no cross-call transactions; every call
//! is atomic only at the store's per-document level.

use crate::db::collections;
use crate::error::AppError;
use crate::models::Jog;
use chrono::{DateTime, Utc};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing
        // a custom TokenSource implementation struct.
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
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Jog Operations ──────────────────────────────────────────

    /// Insert a new jog, assigning a fresh document id.
    ///
    /// Returns the persisted record including its assigned id. Ids are
    /// UUIDv4 and never reused; `insert` fails if the id already exists.
    pub async fn create_jog(&self, jog: &Jog) -> Result<Jog, AppError> {
        let record = Jog {
            id: uuid::Uuid::new_v4().to_string(),
            ..jog.clone()
        };

        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::JOGS)
            .document_id(&record.id)
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(record)
    }

    /// Point read of a jog by id.
    pub async fn get_jog(&self, id: &str) -> Result<Option<Jog>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::JOGS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Point write of a full jog record (used after merging an update).
    pub async fn set_jog(&self, jog: &Jog) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::JOGS)
            .document_id(&jog.id)
            .object(jog)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Hard delete of a jog by id.
    pub async fn delete_jog(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::JOGS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Range scan over all jogs in the store's natural order.
    ///
    /// No filter and no explicit sort key; pagination is limit/offset
    /// arithmetic done by the caller.
    pub async fn list_jogs(&self, limit: u32, offset: u32) -> Result<Vec<Jog>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::JOGS)
            .limit(limit)
            .offset(offset)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All jogs for a user with `date` in `[from, to]` inclusive.
    ///
    /// This is the match stage of the weekly report; the aggregation
    /// itself is folded in Rust by the report service, since Firestore
    /// aggregates cannot express a per-document divide.
    pub async fn jogs_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Jog>, AppError> {
        // Dates are stored as fixed-precision RFC3339 strings, so bounds
        // rendered the same way compare lexicographically in date order.
        let from = crate::time_utils::format_fixed_rfc3339(from);
        let to = crate::time_utils::format_fixed_rfc3339(to);
        let user_id = user_id.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::JOGS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("date").greater_than_or_equal(from.clone()),
                    q.field("date").less_than_or_equal(to.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
