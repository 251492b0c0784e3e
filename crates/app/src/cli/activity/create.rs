use clap::Args;
use homestay_app::{
    database::Db,
    domain::catalog::{CatalogService, PgCatalogService, data::NewActivity, records::ActivityUuid},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateActivityArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Price per adult in paise
    #[arg(long)]
    price: u64,
}

pub(crate) async fn run(args: CreateActivityArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let service = PgCatalogService::new(&Db::new(pool));

    let activity = service
        .create_activity(NewActivity {
            uuid: ActivityUuid::new(),
            name: args.name,
            description: args.description,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create activity: {error}"))?;

    println!("activity_uuid: {}", activity.uuid);
    println!("activity_name: {}", activity.name);
    println!("activity_price: {}", activity.price);

    Ok(())
}
