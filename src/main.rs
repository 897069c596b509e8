use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_orchestration::application::engine::PaymentEngine;
use payment_orchestration::application::registry::ProviderRegistry;
use payment_orchestration::domain::ports::PaymentStoreHandle;
use payment_orchestration::domain::provider::ProviderAdapterHandle;
use payment_orchestration::infrastructure::in_memory::InMemoryPaymentStore;
use payment_orchestration::infrastructure::providers::{PaparaAdapter, ParamAdapter};
use payment_orchestration::interfaces::csv::payment_reader::PaymentRequestReader;
use payment_orchestration::interfaces::csv::payment_writer::PaymentWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payment requests CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn build_store(db_path: Option<PathBuf>) -> Result<PaymentStoreHandle> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = db_path {
        let store = payment_orchestration::infrastructure::rocksdb::RocksDbPaymentStore::open(
            db_path,
        )
        .into_diagnostic()?;
        return Ok(Arc::new(store));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }

    Ok(Arc::new(InMemoryPaymentStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let store = build_store(cli.db_path)?;
    let adapters: Vec<ProviderAdapterHandle> =
        vec![Arc::new(ParamAdapter), Arc::new(PaparaAdapter)];
    let registry = ProviderRegistry::new(adapters).into_diagnostic()?;
    let engine = PaymentEngine::new(store, Arc::new(registry));

    // Create and charge each request through the synchronous path.
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = PaymentRequestReader::new(file);
    for request in reader.requests() {
        match request {
            Ok(request) => match engine.create(request).await {
                Ok(payment) => {
                    if let Err(e) = engine.process(payment.id()).await {
                        eprintln!("Error processing payment: {}", e);
                    }
                }
                Err(e) => eprintln!("Error creating payment: {}", e),
            },
            Err(e) => eprintln!("Error reading payment request: {}", e),
        }
    }

    // Output the final state of every payment.
    let payments = engine.list().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payments(payments).into_diagnostic()?;

    Ok(())
}
