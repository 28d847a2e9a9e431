use std::process::ExitCode;

use env_logger::Env;
use log::{error, info};

use mongo_seeder::database::MongoDbClient;
use mongo_seeder::dispatch::run;
use mongo_seeder::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Parse command line arguments and setup logging
    let config = Config::load();
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level_filter().to_string()))
        .init();

    // 2. Reject unknown commands before connecting, then run against MongoDB
    match run(&config, || MongoDbClient::connect(&config)).await {
        Ok(outcome) => {
            info!("Done: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
