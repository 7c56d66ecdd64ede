//! Rust client for the Feishu Bitable open API
//!
//! This crate provides typed bindings to the subset of the Feishu open
//! platform used to read rows out of a Bitable base: the tenant access token
//! endpoint and the record listing endpoint with cursor pagination.
//!
//! # Example
//!
//! ```no_run
//! use bitable_api::BitableClient;
//!
//! # async fn example() -> Result<(), bitable_api::BitableError> {
//! let client = BitableClient::new();
//!
//! // Exchange app credentials for a tenant access token
//! let access = client.tenant_access_token("cli_xxx", "secret").await?;
//!
//! // Fetch every row of a table, following pagination cursors
//! let records = client
//!     .list_all_records(&access.token, "bascnXXX", "tblXXX")
//!     .await?;
//! println!("{} records", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `POST /open-apis/auth/v3/tenant_access_token/internal` - Tenant access token
//! - `GET /open-apis/bitable/v1/apps/{app_token}/tables/{table_id}/records` - List records

mod client;
mod error;
mod types;

pub use client::BitableClient;
pub use error::{BitableError, Result};
pub use types::{AccessToken, BitableRecord, RecordsData, RecordsPage, RecordsResponse, TokenResponse};
