use clap::Args;
use homestay_app::auth::{PgAuthRepository, UserUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let repository = PgAuthRepository::new(args.database.connect().await?);

    let tokens = repository
        .list_api_tokens_by_user(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("user {} has no tokens", args.user_uuid);
    }

    tokens.iter().for_each(|token| println!("{}", describe(token)));

    Ok(())
}
