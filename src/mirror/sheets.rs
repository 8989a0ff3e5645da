//! Spreadsheet gateway client. One authenticated `values:append` call
//! per submission; no retries, no explicit timeout.

use super::{Mirror, MirrorTable};
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;

pub const SERVICE_ACCOUNT_VAR: &str = "GOOGLE_SERVICE_ACCOUNT";
pub const SHEET_ID_VAR: &str = "GOOGLE_SHEET_ID";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Credential blob carried by GOOGLE_SERVICE_ACCOUNT. Only the
/// ready-to-use bearer token is consumed here; minting and refreshing
/// it is the deployment's concern.
#[derive(Deserialize)]
struct ServiceAccount {
    token: String,
}

pub struct SheetsMirror {
    client: Client,
    api_base: String,
}

impl SheetsMirror {
    pub fn new(api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
        }
    }
}

// Both variables are read at the point of use, not at startup: a
// mis-deployed environment only surfaces when a mirror write is
// actually attempted.
fn sheet_id() -> AppResult<String> {
    env::var(SHEET_ID_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Mirror(format!("{SHEET_ID_VAR} is not set")))
}

fn service_account() -> AppResult<ServiceAccount> {
    let blob = env::var(SERVICE_ACCOUNT_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Mirror(format!("{SERVICE_ACCOUNT_VAR} is not set")))?;

    serde_json::from_str(&blob)
        .map_err(|e| AppError::Mirror(format!("invalid {SERVICE_ACCOUNT_VAR}: {e}")))
}

impl Mirror for SheetsMirror {
    fn append(&self, table: MirrorTable, row: Vec<Value>) -> AppResult<()> {
        let sheet_id = sheet_id()?;
        let account = service_account()?;

        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED",
            self.api_base,
            sheet_id,
            table.worksheet()
        );
        let body = json!({ "values": [row] });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&account.token)
            .json(&body)
            .send()
            .map_err(|e| AppError::Mirror(e.to_string()))?;

        resp.error_for_status()
            .map_err(|e| AppError::Mirror(e.to_string()))?;

        Ok(())
    }
}
