//! Persistence service for stored configuration values
//!
//! The management entities (projects, envs, labels) live in `db`. The values
//! a config server hands out live behind [`PersistenceService`], addressed by
//! the ids of their project, env and label. Every method receives the caller's
//! connection so property changes commit or roll back with the request
//! transaction.

mod database;

pub use database::DbPersistenceService;

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::SqliteConnection;

use crate::domain::{Env, Label, Project, Property, PropertyCoordinate};

#[async_trait]
pub trait PersistenceService: Send + Sync {
    /// Properties stored at a coordinate, ordered by key
    async fn find_properties(
        &self,
        conn: &mut SqliteConnection,
        coordinate: PropertyCoordinate<'_>,
    ) -> Result<Vec<Property>, sqlx::Error>;

    /// Replace everything stored at a coordinate
    async fn save_properties(
        &self,
        conn: &mut SqliteConnection,
        coordinate: PropertyCoordinate<'_>,
        properties: &BTreeMap<String, String>,
    ) -> Result<(), sqlx::Error>;

    /// Remove every property of a project, across envs and labels
    async fn delete_properties_by_project(
        &self,
        conn: &mut SqliteConnection,
        project: &Project,
    ) -> Result<u64, sqlx::Error>;

    /// Remove every property stored under one label of a project
    async fn delete_properties_by_label(
        &self,
        conn: &mut SqliteConnection,
        project: &Project,
        label: &Label,
    ) -> Result<u64, sqlx::Error>;

    /// Remove every property stored for an environment, across projects
    async fn delete_properties_by_env(
        &self,
        conn: &mut SqliteConnection,
        env: &Env,
    ) -> Result<u64, sqlx::Error>;
}
