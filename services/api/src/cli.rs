use crate::infra::open_session;
use crate::menu::Menu;
use crate::render::render_report;
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement::config::AppConfig;
use placement::error::AppError;
use placement::telemetry;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Desk",
    about = "Index, shortlist, and schedule placement candidates",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the numbered interactive menu on stdin/stdout
    Menu(StorageArgs),
    /// Print the candidate report and exit
    Report(StorageArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) storage: StorageArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StorageArgs {
    /// Override the candidate CSV file (PLACEMENT_DATA_PATH)
    #[arg(long)]
    pub(crate) data_path: Option<PathBuf>,
}

impl StorageArgs {
    pub(crate) fn apply(self, config: &mut AppConfig) {
        if let Some(path) = self.data_path {
            config.storage.data_path = path;
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::Menu(args) => {
            args.apply(&mut config);
            let mut session = open_session(&config)?;
            let stdin = io::stdin();
            Menu::new(&mut session, stdin.lock(), io::stdout().lock()).run()
        }
        Command::Report(args) => {
            args.apply(&mut config);
            let session = open_session(&config)?;
            let mut stdout = io::stdout().lock();
            render_report(&session.store.report(), &mut stdout)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_menu_with_data_path() {
        let cli = Cli::try_parse_from(["placement", "menu", "--data-path", "/tmp/c.csv"])
            .expect("parses");
        match cli.command {
            Some(Command::Menu(args)) => {
                assert_eq!(args.data_path, Some(PathBuf::from("/tmp/c.csv")));
            }
            other => panic!("expected menu command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["placement"]).expect("parses");
        assert!(cli.command.is_none());
    }
}
