//! Command execution

use serde_json::Value;

use crate::error::{Result, TfeError};
use crate::tfe::query::Search;
use crate::tfe::registry::Registered;
use crate::tfe::scope::RequiredScope;
use crate::tfe::{
    AgentPools, ApiResponse, Client, ClientBuilder, OAuthClients, Organizations, Projects, Runs,
    StateVersions, Teams, VariableSets, WorkspaceResources, Workspaces,
};

use super::{Cli, Command, ListArgs, ListResource};

/// Build a client from the global flags and run the selected command
pub async fn run(cli: Cli) -> Result<()> {
    let client = builder_from(&cli).build().await?;
    let log = client.log();
    log.debug(format_args!(
        "Connected to {} as scope {:?}",
        client.hostname(),
        client.scope().state()
    ));

    let document = match &cli.command {
        Command::List(args) => list(&client, args).await?,
        Command::ShowWorkspace { name } => show_workspace(&client, name.as_deref()).await?,
    };

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn builder_from(cli: &Cli) -> ClientBuilder {
    let mut builder = ClientBuilder::new()
        .log_level(cli.log_level.as_str())
        .verify(!cli.insecure);
    if let Some(hostname) = &cli.hostname {
        builder = builder.hostname(hostname.as_str());
    }
    if let Some(token) = &cli.token {
        builder = builder.token(token.as_str());
    }
    if let Some(org) = &cli.org {
        builder = builder.org(org.as_str());
    }
    if let Some(ws) = &cli.ws {
        builder = builder.ws(ws.as_str());
    }
    if let Some(url) = &cli.base_url {
        builder = builder.base_url(url.as_str());
    }
    builder
}

/// The client for `R`, or the scope error explaining why it is unavailable
fn require<'a, R: Registered>(client: &'a Client) -> Result<&'a R> {
    client.resource::<R>().ok_or_else(|| match R::SCOPE {
        RequiredScope::OrganizationAndWorkspace if client.scope().organization().is_some() => {
            TfeError::MissingWorkspace
        }
        _ => TfeError::MissingOrganization,
    })
}

async fn list(client: &Client, args: &ListArgs) -> Result<Value> {
    let raw_filters: Vec<&str> = args.filters.iter().map(String::as_str).collect();
    let filters = (!raw_filters.is_empty()).then_some(raw_filters.as_slice());
    let include = args.include.as_deref();

    let response: ApiResponse = match args.resource {
        ListResource::Organizations => require::<Organizations>(client)?.list_all().await?,
        ListResource::Workspaces => {
            require::<Workspaces>(client)?
                .list_all(args.search.clone().map(Search::name), include)
                .await?
        }
        ListResource::Projects => {
            require::<Projects>(client)?
                .list_all(args.search.as_deref(), include)
                .await?
        }
        ListResource::Teams => require::<Teams>(client)?.list_all(filters, include).await?,
        ListResource::OauthClients => require::<OAuthClients>(client)?.list_all().await?,
        ListResource::VariableSets => require::<VariableSets>(client)?.list_all().await?,
        ListResource::AgentPools => require::<AgentPools>(client)?.list_all().await?,
        ListResource::Runs => require::<Runs>(client)?.list_all(None, filters).await?,
        ListResource::WorkspaceResources => {
            require::<WorkspaceResources>(client)?.list_all(None).await?
        }
        ListResource::StateVersions => require::<StateVersions>(client)?.list_all(filters).await?,
    };

    let document = response.into_data().unwrap_or(Value::Null);
    client.log().info(format_args!(
        "Listed {} {}",
        document
            .get("data")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        args.resource
    ));
    Ok(document)
}

async fn show_workspace(client: &Client, name: Option<&str>) -> Result<Value> {
    let workspaces = require::<Workspaces>(client)?;
    let response = workspaces.show(name).await?.error_for_status()?;
    Ok(response.into_data().unwrap_or(Value::Null))
}
