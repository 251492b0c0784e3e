use clap::Args;
use homestay_app::auth::PgAuthRepository;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let repository = PgAuthRepository::new(args.database.connect().await?);

    let revoked = repository
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?
        .ok_or_else(|| format!("token {} is unknown or already revoked", args.token_uuid))?;

    println!("{}", describe(&revoked));

    Ok(())
}
