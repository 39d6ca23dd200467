use clap::Args;
use eyre::Result;
use xschema_build::GenerationPass;

use super::{UnwrapOrExit, args::ConfigArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub args: ConfigArgs,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let pass = GenerationPass::new(self.args.resolve().unwrap_or_exit());

        ops::list(&pass)
            .unwrap_or_exit()
            .render(&mut TerminalOutput::new());
        Ok(())
    }
}
