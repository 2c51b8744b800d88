//! In-memory person directory served behind the auth gate.
//!
//! Every lookup takes the caller's [`AuthenticatedContext`] so the directory
//! can attribute the access; there is no other way for it to learn who asked.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use token_engine::AuthenticatedContext;
use utoipa::ToSchema;

const BUNDLED_RECORDS: &str = include_str!("../data/persons.json");

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read records file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Person record keyed by national identity card number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonRecord {
    /// National identity card number
    pub nic: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_names: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PersonDirectory {
    records: Vec<PersonRecord>,
}

impl PersonDirectory {
    pub fn new(records: Vec<PersonRecord>) -> Self {
        Self { records }
    }

    /// Loads records from a JSON file, or the bundled sample records when no
    /// path is given.
    pub fn load(path: Option<&str>) -> Result<Self, DirectoryError> {
        let records: Vec<PersonRecord> = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str(&raw)?
            }
            None => serde_json::from_str(BUNDLED_RECORDS)?,
        };
        info!("Loaded {} person record(s)", records.len());
        Ok(Self::new(records))
    }

    pub fn health(&self, context: &AuthenticatedContext) -> String {
        format!("Healthy - Authenticated as: {}", context.client_id())
    }

    pub fn find_by_nic(&self, context: &AuthenticatedContext, nic: &str) -> Option<&PersonRecord> {
        info!("Client {} requested NIC: {}", context.client_id(), nic);
        self.records.iter().find(|record| record.nic == nic)
    }
}
