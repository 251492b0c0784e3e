use clap::Args;
use homestay_app::{
    database::Db,
    domain::catalog::{CatalogService, PgCatalogService},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListActivitiesArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListActivitiesArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let activities = PgCatalogService::new(&Db::new(pool))
        .list_activities()
        .await
        .map_err(|error| format!("failed to list activities: {error}"))?;

    if activities.is_empty() {
        println!("no active activities");
        return Ok(());
    }

    for activity in activities {
        println!("activity_uuid: {}", activity.uuid);
        println!("name: {}", activity.name);
        println!("price: {}", activity.price);
        println!();
    }

    Ok(())
}
