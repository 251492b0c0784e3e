use clap::{Args, Subcommand};
use homestay_app::auth::ApiTokenMetadata;

mod create;
mod list;
mod revoke;

/// Issue, inspect and revoke bearer tokens.
#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(create::CreateTokenArgs),
    List(list::ListTokensArgs),
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

fn describe(token: &ApiTokenMetadata) -> String {
    let last_used = token
        .last_used_at
        .map_or_else(|| "never".to_string(), |at| at.to_string());

    let state = token
        .revoked_at
        .map_or_else(|| "active".to_string(), |at| format!("revoked {at}"));

    format!(
        "{uuid}  user={user}  v{version}  created={created}  last_used={last_used}  {state}",
        uuid = token.uuid,
        user = token.user_uuid,
        version = token.version.as_i16(),
        created = token.created_at,
    )
}
