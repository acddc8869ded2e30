use std::error::Error;
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::{
    csv_utils::{read_csv, write_csv},
    dto::{AccountRow, Operation},
    runner::seed_engine,
};

/// Runs the banking engine over a day's operations file and writes the final
/// account balances to the provided writer.
///
/// # Arguments
/// * `accounts_path` - Path to the accounts seed CSV file
/// * `rates_path` - Path to the exchange rates seed CSV file
/// * `operations_path` - Path to the CSV file of operations to replay
/// * `writer` - Where to write the account balances (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * Any input file cannot be read
/// * The CSV is malformed
/// * A seed row is invalid (e.g. a duplicate account id)
/// * Writing to the output fails
///
/// Rejected operations are not errors: they are logged at warn level and
/// leave the books untouched.
pub fn run<P, W>(
    accounts_path: P,
    rates_path: P,
    operations_path: P,
    writer: W,
) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
    W: Write,
{
    let mut engine = seed_engine(accounts_path, rates_path).map_err(|e| -> Box<dyn Error> { e })?;

    for operation in read_csv::<Operation, _>(operations_path)? {
        // CSV parsing errors are critical - propagate them
        let operation = operation?;
        // Business rule rejections are expected - log and move on
        if let Err(err) = engine.process(operation) {
            warn!(%err, "operation rejected");
        }
    }

    // Sort accounts by id for deterministic output
    let mut rows: Vec<_> = engine.accounts().map(AccountRow::from).collect();
    rows.sort_by_key(|row| row.account);

    write_csv(writer, rows.into_iter())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_day() -> Result<(), Box<dyn Error>> {
        let mut output = Vec::new();
        run(
            "data/accounts.csv",
            "data/rates.csv",
            "data/operations.csv",
            &mut output,
        )?;

        let expected = "account,number,currency,balance,active
1,TR000001,TRY,40000,true
2,US000002,USD,2434,true
3,EU000003,EUR,2592,true
4,TR000004,TRY,1000,false
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[test]
    fn test_rejected_operations_leave_balances_untouched() -> Result<(), Box<dyn Error>> {
        let mut output = Vec::new();
        run(
            "data/accounts.csv",
            "data/rates.csv",
            "data/rejected_operations.csv",
            &mut output,
        )?;

        // Every row in the file is invalid, so the output is the seed state
        let expected = "account,number,currency,balance,active
1,TR000001,TRY,50000,true
2,US000002,USD,2500,true
3,EU000003,EUR,2000,true
4,TR000004,TRY,1000,false
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        let result = run(
            "data/accounts.csv",
            "data/rates.csv",
            "data/no_such_file.csv",
            Vec::new(),
        );
        assert!(result.is_err());
    }
}
