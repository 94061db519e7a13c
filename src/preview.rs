use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::PreviewArgs,
    io_utils,
    store::{StoreOptions, open_input_store},
    table,
};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let store = open_input_store(
        &args.input,
        &StoreOptions {
            format: args.format,
            delimiter: args.delimiter,
            encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        },
    );
    let mut records = store
        .load()
        .with_context(|| format!("Loading records from {:?}", args.input))?;
    let total = records.len();
    records.truncate(args.rows);

    let (headers, rows) = table::record_rows(&records);
    table::print_table(&headers, &rows);
    info!(
        "Displayed {} of {total} record(s) from {}",
        rows.len(),
        store.describe()
    );
    Ok(())
}
