// SPDX-License-Identifier: MIT

//! Jog service - the business-logic layer for jog records.
//!
//! Validates input, enforces per-user ownership, and delegates each
//! operation to a single store call.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{CreateJogRequest, Jog, UpdateJogRequest};
use validator::Validate;

/// Fixed number of records per page.
pub const PAGE_SIZE: u32 = 2;

/// CRUD operations over jog records.
pub struct JogService {
    db: FirestoreDb,
}

impl JogService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Resolve a raw page query parameter to a usable page number.
    ///
    /// Absent, non-numeric, or non-positive input resolves to page 1
    /// rather than an error.
    pub fn resolve_page(raw: Option<&str>) -> u32 {
        raw.and_then(|p| p.parse::<u32>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1)
    }

    /// Return the page-th slice of jogs in the store's natural order.
    ///
    /// Out-of-range pages return an empty vec, not an error.
    pub async fn find_all(&self, page: u32) -> Result<Vec<Jog>> {
        // Saturating arithmetic: any page large enough to overflow the
        // offset is out of range anyway and yields an empty slice.
        let skip = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        self.db.list_jogs(PAGE_SIZE, skip).await
    }

    /// Create a jog owned by the caller.
    ///
    /// The persisted record's `user_id` is the caller's id, regardless
    /// of anything in the payload. Returns the record with its assigned id.
    pub async fn create(&self, req: CreateJogRequest, user_id: &str) -> Result<Jog> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let jog = Jog {
            id: String::new(), // assigned by the store adapter
            user_id: user_id.to_string(),
            time_seconds: req.time_seconds,
            distance: req.distance,
            date: req.date,
            location: req.location,
        };

        let created = self.db.create_jog(&jog).await?;

        tracing::info!(jog_id = %created.id, user_id, "Jog created");
        Ok(created)
    }

    /// Fetch a jog by id, restricted to its owning user.
    pub async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Jog> {
        let jog = self
            .db
            .get_jog(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Jog {} not found", id)))?;

        if jog.user_id != user_id {
            return Err(AppError::Forbidden("Not the owner of this jog".to_string()));
        }

        Ok(jog)
    }

    /// Apply validated patch fields to an existing jog and return the
    /// post-update record. No write occurs when the record is absent.
    pub async fn update_by_id(
        &self,
        id: &str,
        patch: UpdateJogRequest,
        user_id: &str,
    ) -> Result<Jog> {
        patch
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut jog = self.find_by_id(id, user_id).await?;
        patch.apply_to(&mut jog);
        self.db.set_jog(&jog).await?;

        tracing::info!(jog_id = %jog.id, user_id, "Jog updated");
        Ok(jog)
    }

    /// Remove a jog and return it as it existed immediately before deletion.
    pub async fn delete_by_id(&self, id: &str, user_id: &str) -> Result<Jog> {
        let jog = self.find_by_id(id, user_id).await?;
        self.db.delete_jog(id).await?;

        tracing::info!(jog_id = %jog.id, user_id, "Jog deleted");
        Ok(jog)
    }
}
