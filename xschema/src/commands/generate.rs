use clap::Args;
use eyre::Result;
use xschema_build::{GenerationPass, StalePolicy};
use xschema_codegen::RustCompiler;

use super::{UnwrapOrExit, args::ConfigArgs};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: ConfigArgs,

    /// Empty both output directories before generating
    #[arg(long)]
    pub clean: bool,

    /// Preview generated code without writing to disk
    #[arg(long, conflicts_with = "emit_cargo")]
    pub dry_run: bool,

    /// Print Cargo build-script directives instead of a summary
    #[arg(long)]
    pub emit_cargo: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let mut config = self.args.resolve().unwrap_or_exit();
        if self.clean {
            config = config.with_stale_outputs(StalePolicy::Clean);
        }

        let pass = GenerationPass::new(config);
        let compiler = RustCompiler::new();

        if self.dry_run {
            ops::preview(&pass, &compiler)
                .unwrap_or_exit()
                .render(&mut TerminalOutput::new());
        } else if self.emit_cargo {
            ops::emit_cargo(&pass, &compiler).unwrap_or_exit();
        } else {
            ops::generate(&pass, &compiler)
                .unwrap_or_exit()
                .render(&mut TerminalOutput::new());
        }

        Ok(())
    }
}
