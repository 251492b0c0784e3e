use clap::{Args, Subcommand};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct PackageCommand {
    #[command(subcommand)]
    command: PackageSubcommand,
}

#[derive(Debug, Subcommand)]
enum PackageSubcommand {
    Create(create::CreatePackageArgs),
    List(list::ListPackagesArgs),
}

pub(crate) async fn run(command: PackageCommand) -> Result<(), String> {
    match command.command {
        PackageSubcommand::Create(args) => create::run(args).await,
        PackageSubcommand::List(args) => list::run(args).await,
    }
}
