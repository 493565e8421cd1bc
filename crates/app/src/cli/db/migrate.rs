use clap::Args;
use shopfront_app::database;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    database::migrate(&pool).await?;

    println!("migrations applied");

    Ok(())
}
