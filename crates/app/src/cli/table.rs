use std::io::{self, Write};

use bistro::booking::TableIds;
use bistro_app::context::AppContext;
use clap::Args;

use super::{report, write_failed};

#[derive(Debug, Args)]
pub(crate) struct TableArgs {
    /// Table ids joined by dashes, such as 3-7-12
    tables: TableIds,
}

pub(crate) fn run(context: &AppContext, args: &TableArgs) -> Result<(), String> {
    let booking = context
        .bookings
        .record_tables(&args.tables)
        .map_err(|error| report("failed to save booking", &error))?;

    let tables: Vec<String> = booking.table_ids.iter().map(ToString::to_string).collect();

    writeln!(io::stdout().lock(), "Ordering for tables {}", tables.join(", "))
        .map_err(write_failed)
}
