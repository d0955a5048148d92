use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use taskboard_tui::{
    ApiClient, Config, Profile,
    cli::{self, Cli, Commands},
    models::Status,
    tui, utils,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let args = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if args.dev { Profile::Dev } else { Profile::Prod };

    let config = Config::load_with_profile(profile)?;

    // Logs go to a file: the TUI owns the terminal, so stderr is not usable.
    // The guard must stay alive for the duration of the program.
    let _log_guard = init_tracing(profile)?;

    // CLI override wins over the config file
    let base_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_base_url.clone());
    let client = ApiClient::new(base_url);

    // Network I/O runs on a tokio runtime; the TUI loop itself stays
    // synchronous and receives completions over a channel.
    let runtime = tokio::runtime::Runtime::new()?;

    match args.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = tui::App::new(config, client, runtime.handle().clone());
            tui::run_event_loop(app)?;
        }
        Commands::Add {
            title,
            description,
            date,
            priority,
        } => {
            runtime.block_on(cli::handle_add(title, description, date, priority, &client))?;
        }
        Commands::List => {
            runtime.block_on(cli::handle_list(&client))?;
        }
        Commands::Start { id } => {
            runtime.block_on(cli::handle_set_status(id, Status::InProgress, &client))?;
        }
        Commands::Complete { id } => {
            runtime.block_on(cli::handle_set_status(id, Status::Completed, &client))?;
        }
    }

    Ok(())
}

fn init_tracing(profile: Profile) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir =
        utils::get_data_dir(profile).ok_or_else(|| eyre!("Could not determine data directory"))?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "taskboard.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
