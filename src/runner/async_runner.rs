use std::error::Error;
use std::io::Write;
use std::path::Path;

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::warn;

use crate::{
    csv_utils::write_csv,
    dto::{AccountRow, Operation},
    runner::seed_engine,
    Engine,
};

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Runs the banking engine async over a day's operations file and writes the
/// final account balances to the provided writer. Spawns two tasks:
/// * CSV reader - streams operations from the input file, deserializes them
///   and sends them to the processor via channel.
/// * Processor - owns the seeded engine and applies operations received from
///   the channel until it is closed.
///
/// The seed files are small and read synchronously before the tasks start.
///
/// # Errors
/// Returns an error if:
/// * Any input file cannot be read
/// * The CSV is malformed
/// * A seed row is invalid (e.g. a duplicate account id)
/// * Writing to the output fails
pub async fn run<P, W>(
    accounts_path: P,
    rates_path: P,
    operations_path: P,
    writer: W,
) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    let engine = seed_engine(accounts_path, rates_path)?;

    // Create channel for passing operations from reader to processor
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let operations_path = operations_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_operations(operations_path, tx));
    let processor_handle = tokio::spawn(process_operations(engine, rx));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;

    // Get final engine state
    let engine = processor_handle.await?;

    // Sort accounts by id for deterministic output
    let mut rows: Vec<_> = engine.accounts().map(AccountRow::from).collect();
    rows.sort_by_key(|row| row.account);

    write_csv(writer, rows.into_iter())?;
    Ok(())
}

/// Reads and deserializes operations from a CSV file.
/// Returns them through the provided channel.
async fn read_operations(
    operations_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<Operation>,
) -> Result<(), CsvError> {
    let file = File::open(operations_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<Operation>();
    while let Some(result) = records.next().await {
        match result {
            Ok(operation) => {
                if tx.send(operation).await.is_err() {
                    // Receiver dropped, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Applies operations received through the channel.
/// Returns the final engine state once the channel is closed by the reader.
async fn process_operations(mut engine: Engine, mut rx: mpsc::Receiver<Operation>) -> Engine {
    while let Some(operation) = rx.recv().await {
        // Business rule rejections are expected - log and move on
        if let Err(err) = engine.process(operation) {
            warn!(%err, "operation rejected");
        }
    }
    engine
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_day() -> Result<()> {
        let mut output = Vec::new();
        run(
            "data/accounts.csv",
            "data/rates.csv",
            "data/operations.csv",
            &mut output,
        )
        .await?;

        let expected = "account,number,currency,balance,active
1,TR000001,TRY,40000,true
2,US000002,USD,2434,true
3,EU000003,EUR,2592,true
4,TR000004,TRY,1000,false
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_operations_leave_balances_untouched() -> Result<()> {
        let mut output = Vec::new();
        run(
            "data/accounts.csv",
            "data/rates.csv",
            "data/rejected_operations.csv",
            &mut output,
        )
        .await?;

        let expected = "account,number,currency,balance,active
1,TR000001,TRY,50000,true
2,US000002,USD,2500,true
3,EU000003,EUR,2000,true
4,TR000004,TRY,1000,false
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }
}
