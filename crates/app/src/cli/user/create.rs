use clap::Args;
use homestay_app::{
    auth::{NewUser, PgAuthService, Role, UserUuid},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login email, unique across users
    #[arg(long)]
    email: String,

    /// Grant the admin role instead of customer
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let service = PgAuthService::new(pool);

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            email: args.email,
            role: if args.admin {
                Role::Admin
            } else {
                Role::Customer
            },
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = service
        .issue_api_token(user.uuid)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
