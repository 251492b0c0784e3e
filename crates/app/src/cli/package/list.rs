use clap::Args;
use homestay_app::{
    database::Db,
    domain::catalog::{CatalogService, PgCatalogService},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListPackagesArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListPackagesArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let packages = PgCatalogService::new(&Db::new(pool))
        .list_packages()
        .await
        .map_err(|error| format!("failed to list packages: {error}"))?;

    if packages.is_empty() {
        println!("no active packages");
        return Ok(());
    }

    for package in packages {
        println!("package_uuid: {}", package.uuid);
        println!("name: {}", package.name);
        println!("duration: {}", package.duration);
        println!("price: {}", package.price);
        println!();
    }

    Ok(())
}
