//! `tablebook init`: create the data directory and database up front.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use tablebook::operations::{init_database, plan_init, InitOptions, InitStep};

#[derive(Parser)]
#[command(about = "Initialize tablebook data directory and database")]
pub struct InitCommand {
    /// Replace an existing database, discarding its data
    #[arg(long)]
    overwrite: bool,

    /// Also write a commented configuration file
    #[arg(long)]
    with_config: bool,

    /// Print the steps without executing them
    #[arg(long)]
    dry_run: bool,
}

fn completed(step: &InitStep) -> &'static str {
    match step {
        InitStep::CreateDataDir(_) => "Created data directory",
        InitStep::CreateDatabase(_) => "Created database",
        InitStep::ReplaceDatabase(_) => "Recreated database",
        InitStep::WriteConfig(_) => "Created default configuration file",
        InitStep::KeepConfig(_) => "Configuration file already exists (not overwritten)",
    }
}

impl InitCommand {
    /// Initializes the directory named by `--data-dir`, or the default one.
    /// `--disable-autoinit` does not apply here.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = InitOptions::new(resolve_data_dir(global)?)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);

        if self.dry_run {
            let steps = plan_init(&options)?;
            println!("Dry run, would initialize {}:", options.data_dir.display());
            for step in &steps {
                println!("  - {step}");
            }
            return Ok(());
        }

        let result = init_database(&options)?;
        println!("Initialized tablebook in: {}", result.data_dir.display());
        for step in &result.steps {
            println!("  - {}", completed(step));
        }
        Ok(())
    }
}
