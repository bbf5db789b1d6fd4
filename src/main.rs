use clap::Parser;

use release_bot::{Args, Command, Result, command};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_bot")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    match &cli_args.command {
        Command::Release { version, thanks } => {
            command::release::execute(&cli_args, version, thanks).await?
        }
        Command::Notes {
            version,
            labels,
            json,
            thanks,
        } => {
            command::notes::execute(&cli_args, version, labels, *json, thanks)
                .await?
        }
    }

    Ok(())
}
