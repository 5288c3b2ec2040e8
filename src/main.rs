use std::env;
use std::io;
use std::process::ExitCode;

use paystation::csv::{OutcomeWriter, read_commands};
use paystation::{Denominations, PayStation};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const COINS_VAR: &str = "PAYSTATION_COINS";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            "warn".parse().expect("static directive is valid"),
        ))
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        error!("usage: paystation <script.csv>");
        return ExitCode::FAILURE;
    };

    let accepted = match env::var(COINS_VAR) {
        Ok(value) => match value.parse::<Denominations>() {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(var = COINS_VAR, value, "{e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => Denominations::default(),
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let commands = match read_commands(path.clone()) {
        Ok(commands) => commands,
        Err(e) => {
            error!(path, "{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut station = PayStation::with_denominations(accepted);
    let (cmd_sender, cmd_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if cmd_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());

    station
        .run(ReceiverStream::new(cmd_receiver), |outcome| {
            if let Err(e) = writer.write(&outcome) {
                warn!("{e}");
            }
        })
        .await;

    if let Err(e) = writer.flush() {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
