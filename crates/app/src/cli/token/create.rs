use clap::Args;
use homestay_app::auth::{PgAuthService, UserUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Owner of the new token
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let service = PgAuthService::new(args.database.connect().await?);

    let issued = service
        .issue_api_token(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("{}", describe(&issued.metadata));
    println!("api_token: {}", issued.token);
    println!("the token is not stored in plain text; copy it now");

    Ok(())
}
