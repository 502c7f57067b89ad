use std::env;
use std::process::ExitCode;

use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vending_machine::csv::{read_commands, write_report};
use vending_machine::machine::MessageBundle;
use vending_machine::model::{LiquidType, SnackType};
use vending_machine::{Amount, MachineConfig, Product, VendingMachine};

/// Products loaded onto the shelves at start-up, assigned round-robin.
fn catalogue() -> Vec<Product> {
    vec![
        Product::liquid(LiquidType::Coke, 250, Amount::from_scaled(25_000)),
        Product::liquid(LiquidType::Water, 500, Amount::from_scaled(15_000)),
        Product::snack(SnackType::ChocolateBar, 50, Amount::from_scaled(20_000)),
        Product::snack(SnackType::Chips, 90, Amount::from_scaled(32_000)),
        Product::liquid(LiquidType::Juice, 330, Amount::from_scaled(37_000)),
    ]
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        error!("usage: vending-machine <commands.csv>");
        return ExitCode::FAILURE;
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let config = match MachineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let commands = match read_commands(path.clone()) {
        Ok(commands) => commands,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut machine = VendingMachine::new(config);
    let catalogue = catalogue();
    let stock = (0..config.shelves).map(|shelf| (shelf, catalogue[shelf % catalogue.len()].clone()));
    if let Err(e) = machine.feed_products(stock) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = machine.feed_coins(config.initial_coins) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    info!(?config, "machine ready");

    let (cmd_sender, cmd_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(cmd) => {
                    if cmd_sender.send(cmd).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    machine.run(ReceiverStream::new(cmd_receiver)).await;

    let bundle = MessageBundle::english();
    if let Err(e) = write_report(std::io::stdout().lock(), &machine, &bundle) {
        error!("failed to write report: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
