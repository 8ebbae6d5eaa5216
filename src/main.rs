use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use counterhub::{
    ActionRequest, ConfigStore, CounterAdapter, DeviceDescriptor, DeviceRegistrar,
    FileConfigStore, PropertyChangeHandler, TimerRecord,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "counterhub")]
#[command(about = "Persisted counter devices backed by a shared config document")]
struct Cli {
    /// Path of the JSON config document.
    #[arg(long, default_value = "counterhub.json")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize the config document and list every counter.
    List,
    /// Append a counter with the given display name; its id is assigned on
    /// the next normalization pass.
    Add { name: String },
    /// Route one action (reset | increment) to a counter by id.
    Invoke { id: String, operation: String },
    /// Print one counter's persisted state.
    Show { id: String },
}

/// Stand-in for the gateway's registration channel: logs each device.
struct LogRegistrar;

impl DeviceRegistrar for LogRegistrar {
    fn register(&self, device: &DeviceDescriptor) -> Option<PropertyChangeHandler> {
        info!(id = %device.id, title = %device.title, "registered device");
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            let adapter = CounterAdapter::start(FileConfigStore::new(&cli.db), &LogRegistrar)
                .await
                .context("failed to start adapter")?;
            let mut devices: Vec<_> = adapter.devices().collect();
            devices.sort_by(|a, b| a.name().cmp(b.name()));
            for device in devices {
                println!("{}  {}  {}", device.id(), device.name(), device.current_count());
            }
        }
        Command::Add { name } => {
            // Plays the role of external configuration: the record goes in
            // without an id and gets one on the next normalization pass.
            let mut store = FileConfigStore::new(&cli.db);
            store.open().await?;
            let mut doc = store.load().await?;
            doc.timers
                .get_or_insert_with(Vec::new)
                .push(TimerRecord::new(name.as_str()));
            store.save(&doc).await?;
            println!("added counter '{}'", name);
        }
        Command::Invoke { id, operation } => {
            let adapter = CounterAdapter::start(FileConfigStore::new(&cli.db), &LogRegistrar)
                .await
                .context("failed to start adapter")?;
            let mut action = ActionRequest::new(operation.as_str());
            adapter
                .perform_action(&id, &mut action)
                .await
                .with_context(|| format!("action '{}' on '{}' failed", operation, id))?;
            let device = adapter
                .device(&id)
                .context("device disappeared after dispatch")?;
            println!("{}  {}  {}", device.id(), device.name(), device.current_count());
        }
        Command::Show { id } => {
            let mut store = FileConfigStore::new(&cli.db);
            store.open().await?;
            let doc = store.load().await?;
            let Some(record) = doc.record(&id) else {
                bail!("no counter with id '{}'", id);
            };
            println!("{}  {}  {}", record.id, record.name, record.count);
        }
    }

    Ok(())
}
