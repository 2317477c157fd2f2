use std::env;

use anyhow::Context;
use denoising_imputer::{run, ImputerConfig};
use log::info;

const CONFIG_ENV: &str = "IMPUTER_CONFIG";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV).ok())
        .context("usage: denoising-imputer <config.json>, or set IMPUTER_CONFIG")?;

    let config = ImputerConfig::from_file(&path)
        .with_context(|| format!("failed to load the configuration at '{path}'"))?;

    let outcome = run(&config)?;

    let missing = outcome.imputation.mask.iter().filter(|&&m| m).count();
    info!(missing = missing; "imputation finished");

    if let Some(loss) = outcome.imputation.losses.last() {
        info!(loss = *loss; "final reconstruction cost");
    }

    if let Some(report) = outcome.report {
        println!(
            "imputed {} cells, mean absolute error {:.4}, accuracy {:.4}",
            report.imputed, report.mean_abs_error, report.accuracy
        );
    }

    if config.output.is_none() {
        print!("{}", outcome.imputation.table.to_csv());
    }

    Ok(())
}
