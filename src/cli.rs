use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::consts;
use crate::ui;
use crate::unclip;
use crate::util;

/// Browse the password store, copy an entry, and walk away: the clipboard
/// clears itself once the timeout expires, unless something else was copied
/// in the meantime.
#[derive(Debug, Parser)]
#[clap(name = "passtui", version = consts::VERSION.as_str(), term_width = 80)]
struct Opts {
    /// Seconds until a copied password is cleared from the clipboard
    #[clap(long, short = 't')]
    timeout: Option<u64>,
    #[clap(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Wait out the timeout, then clear the clipboard if it still holds the
    /// copied password
    #[clap(hide = true)]
    Unclip {
        timeout: u64,
        /// Clear the clipboard even if its contents changed since the copy
        #[clap(long, short = 'f')]
        force: bool,
    },
}

/// Parse the command line and run exactly one of the two roles this binary
/// serves: the interactive browser (default), or the detached clipboard
/// clearer (`unclip`, spawned on copy).
pub fn opt() -> Result<()> {
    let matches = Opts::parse();

    match matches.cmd {
        Some(Cmd::Unclip { timeout, force }) => unclip::unclip(timeout, force),
        None => {
            util::verify_store_exists()?;

            let timeout = matches
                .timeout
                .unwrap_or_else(|| *consts::PASSWORD_STORE_CLIP_TIME);

            ui::interactive(timeout)
        }
    }
}
