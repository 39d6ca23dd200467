use clap::Args;
use eyre::Result;
use xschema_build::GenerationPass;

use super::{UnwrapOrExit, args::ConfigArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub args: ConfigArgs,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let pass = GenerationPass::new(self.args.resolve().unwrap_or_exit());

        ops::clean(&pass, self.dry_run)
            .unwrap_or_exit()
            .render(&mut TerminalOutput::new());
        Ok(())
    }
}
