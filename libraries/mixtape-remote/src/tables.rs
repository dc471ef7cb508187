//! Relational table operations (PostgREST conventions).

use crate::client::{authorized, check_status, send};
use crate::error::{RemoteError, Result};
use crate::types::{
    project_with_tracks_columns, NewProjectRow, NewTrackRow, ProfileRow, PROFILE_COLUMNS,
    PROJECT_COLUMNS, TRACK_COLUMNS,
};
use mixtape_core::normalize::{RawProject, RawTrack};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

const RETURN_REPRESENTATION: &str = "return=representation";

/// Table client for the hosted backend.
pub struct TablesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> TablesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, api_key: &'a str) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Get all projects owned by the profile with nested tracks, oldest first.
    pub async fn select_projects(&self, profile_id: &str) -> Result<Vec<RawProject>> {
        let url = self.table_url("projects");
        debug!(url = %url, profile_id = %profile_id, "Fetching projects");

        let request = authorized(self.http, Method::GET, &url, self.api_key).query(&[
            ("select", project_with_tracks_columns()),
            ("user_id", format!("eq.{}", profile_id)),
            ("order", "created_at.asc".to_string()),
        ]);
        let response = check_status(send(request).await?).await?;

        let rows: Vec<RawProject> = response.json().await.map_err(|e| {
            RemoteError::Parse(format!("Failed to parse projects response: {}", e))
        })?;

        debug!(projects = rows.len(), "Fetched projects");
        Ok(rows)
    }

    /// Insert a project and return the stored row.
    pub async fn insert_project(&self, row: &NewProjectRow) -> Result<RawProject> {
        self.insert("projects", PROJECT_COLUMNS, row).await
    }

    /// Insert a track and return the stored row.
    pub async fn insert_track(&self, row: &NewTrackRow) -> Result<RawTrack> {
        self.insert("tracks", TRACK_COLUMNS, row).await
    }

    /// Create or update a profile keyed by its unique email.
    pub async fn upsert_profile(&self, row: &ProfileRow) -> Result<ProfileRow> {
        let url = self.table_url("profiles");
        debug!(url = %url, email = %row.email, "Upserting profile");

        let request = authorized(self.http, Method::POST, &url, self.api_key)
            .query(&[("on_conflict", "email"), ("select", PROFILE_COLUMNS)])
            .header(
                "Prefer",
                format!("resolution=merge-duplicates,{}", RETURN_REPRESENTATION),
            )
            .json(row);
        let response = check_status(send(request).await?).await?;

        first_row(response, "profile").await
    }

    /// Delete a project record. Missing records count as deleted.
    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.delete("projects", id).await
    }

    /// Delete a track record. Missing records count as deleted.
    pub async fn delete_track(&self, id: &str) -> Result<()> {
        self.delete("tracks", id).await
    }

    async fn insert<B, T>(&self, table: &'static str, columns: &str, row: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        debug!(url = %url, table, "Inserting row");

        let request = authorized(self.http, Method::POST, &url, self.api_key)
            .query(&[("select", columns)])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(row);
        let response = check_status(send(request).await?).await?;

        first_row(response, table).await
    }

    async fn delete(&self, table: &'static str, id: &str) -> Result<()> {
        let url = self.table_url(table);
        debug!(url = %url, id = %id, "Deleting row");

        let request = authorized(self.http, Method::DELETE, &url, self.api_key)
            .query(&[("id", format!("eq.{}", id))]);
        let response = send(request).await?;

        if response.status().as_u16() == 404 {
            // Already deleted, that's fine
            return Ok(());
        }
        check_status(response).await?;

        debug!(table, id = %id, "Row deleted");
        Ok(())
    }
}

/// First element of a representation array.
async fn first_row<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &'static str,
) -> Result<T> {
    let rows: Vec<T> = response
        .json()
        .await
        .map_err(|e| RemoteError::Parse(format!("Failed to parse {} response: {}", what, e)))?;
    rows.into_iter()
        .next()
        .ok_or(RemoteError::EmptyResponse(what))
}
