use clap::{Args, Subcommand};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct ActivityCommand {
    #[command(subcommand)]
    command: ActivitySubcommand,
}

#[derive(Debug, Subcommand)]
enum ActivitySubcommand {
    Create(create::CreateActivityArgs),
    List(list::ListActivitiesArgs),
}

pub(crate) async fn run(command: ActivityCommand) -> Result<(), String> {
    match command.command {
        ActivitySubcommand::Create(args) => create::run(args).await,
        ActivitySubcommand::List(args) => list::run(args).await,
    }
}
