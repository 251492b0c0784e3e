use clap::Args;
use homestay_app::{
    database::Db,
    domain::catalog::{CatalogService, PgCatalogService, data::NewPackage, records::PackageUuid},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreatePackageArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Package name shown to guests
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Free-form stay length, e.g. "2 nights"
    #[arg(long)]
    duration: String,

    /// Price per adult in paise
    #[arg(long)]
    price: u64,
}

pub(crate) async fn run(args: CreatePackageArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let service = PgCatalogService::new(&Db::new(pool));

    let package = service
        .create_package(NewPackage {
            uuid: PackageUuid::new(),
            name: args.name,
            description: args.description,
            duration: args.duration,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create package: {error}"))?;

    println!("package_uuid: {}", package.uuid);
    println!("package_name: {}", package.name);
    println!("package_price: {}", package.price);

    Ok(())
}
