//! `build-dataset-xml` - create the ERDDAP `<dataset />` element for a glider
//! deployment data set.

use anyhow::Result;
use clap::Parser;
use erddap_dataset_xml::cli;
use erddap_dataset_xml::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
