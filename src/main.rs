use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::{debug, error};

mod controller;
mod domain;
mod layout;
mod loader;
mod logging;
mod model;
mod table;
mod ui;

use controller::Controller;
use domain::{TVConfig, TVError};
use model::{Model, Status};
use table::TableView;
use ui::{Styles, TableUI};

#[derive(Parser, Debug)]
#[command(
    about = "A tui based csv table viewer.",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// The csv file to show, taken as is even when it starts with a dash
    #[arg(allow_hyphen_values = true)]
    filename: PathBuf,
}

fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("Warning: {e}");
    }

    match run() {
        Err(TVError::RunLoop(e)) => {
            error!("Run loop failed: {e:?}");
            println!("Error running program: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:?}");
            println!("{e}");
            ExitCode::FAILURE
        }
        Ok(output) => {
            for line in output {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
    }
}

fn run() -> Result<Vec<String>, TVError> {
    let cli = parse_args(std::env::args_os())?;
    let config = TVConfig::from_env();

    let records = loader::load(&cli.filename)?;
    let columns = layout::plan(&records, config.max_column_width);
    let rows = layout::normalize_rows(records, columns.len());

    let styles = Styles::viewer();
    let ui = TableUI::new(&styles);
    let table = TableView::new(columns, rows, styles).with_focus(true);
    let mut model = Model::new(table);
    debug!(
        "Showing {} rows in {} columns",
        model.table().rows().len(),
        model.table().columns().len()
    );
    let controller = Controller;

    let mut terminal = ratatui::try_init().map_err(|e| {
        ratatui::restore();
        TVError::RunLoop(e)
    })?;
    let result = event_loop(&mut terminal, &mut model, &ui, &controller);
    ratatui::restore();
    result?;

    Ok(model.take_output())
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    model: &mut Model,
    ui: &TableUI,
    controller: &Controller,
) -> Result<(), TVError> {
    while model.status != Status::Exiting {
        terminal
            .draw(|f| ui.draw(model, f))
            .map_err(TVError::RunLoop)?;

        let message = controller.next_message()?;
        model.update(message);
    }
    Ok(())
}

fn parse_args<I, T>(args: I) -> Result<Cli, TVError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) => {
            debug!("Invalid arguments: {e}");
            Err(TVError::Usage(format!("Usage: {program} <filename>")))
        }
    }
}
