mod utils;

pub mod grouping;
pub mod input;
pub mod overrides;
pub mod report;
pub mod taeti;
pub mod time;

#[doc(hidden)]
pub use static_assertions;

use std::io::Write;

use anyhow::Context;
use log::info;

use crate::grouping::group_taetis;
use crate::input::{Config, IssueCatalog};
use crate::report::Report;
use crate::time::PrettyDuration;

/// Reads the issue table and the time log of the `config` and writes the
/// grouped report.
///
/// Nothing is written if any of the inputs is invalid.
pub fn generate_report(config: &Config, mut writer: impl Write) -> anyhow::Result<()> {
    info!("reading issues from `{}`", config.issues().display());
    let catalog = IssueCatalog::from_file(
        config.issues(),
        config.default_project(),
        config.default_task(),
    )
    .with_context(|| format!("failed to read `{}`", config.issues().display()))?;

    info!("reading time log from `{}`", config.log().display());
    let entries = input::parse_log_file(config.log())
        .with_context(|| format!("failed to read `{}`", config.log().display()))?;

    let mut taetis = taeti::build_taetis(&entries, &catalog);
    overrides::apply_overrides(&mut taetis, config.overrides());

    let root = group_taetis(&taetis);
    info!("worked: {}", PrettyDuration::from(root.duration()));

    let mut output = Vec::new();
    Report::new(&root, config.print_order())
        .style(config.style())
        .write_to(&mut output)?;

    writer.write_all(&output)?;
    writer.flush()?;

    Ok(())
}
