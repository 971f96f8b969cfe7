//! tfe-client - scoped client for the HCP Terraform / Terraform Enterprise API
//!
//! One [`Client`] holds the credentials, an organization/workspace scope and a
//! typed client per API resource. Resource clients appear as the scope allows:
//! unscoped ones always, organization ones once an organization is set,
//! workspace ones once a workspace is resolved.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> tfe_client::Result<()> {
//! let mut client = tfe_client::Client::builder()
//!     .token("my-token")
//!     .org("acme")
//!     .build()
//!     .await?;
//!
//! if let Some(workspaces) = client.workspaces() {
//!     let all = workspaces.list_all(None, None).await?;
//!     println!("{} workspaces", all.items().len());
//! }
//!
//! client.set_ws("demo").await?;
//! if let Some(runs) = client.runs() {
//!     let page = runs.list(None, None, None).await?;
//!     println!("{} runs on the first page", page.items().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tfe;

pub use cli::{Cli, Command, ListArgs, ListResource};
pub use error::{Result, TfeError};
pub use logging::LogHandle;
pub use tfe::{
    ApiResponse, Client, ClientBuilder, Page, Query, RequiredScope, Requestor, Scope, ScopeState,
    Search,
};
