use clap::Args;
use eyre::Result;
use xschema_build::GenerationPass;

use super::{UnwrapOrExit, args::ConfigArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: ConfigArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let pass = GenerationPass::new(self.args.resolve().unwrap_or_exit());

        let report = ops::check(&pass).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
