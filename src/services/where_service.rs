use std::path::{Path, PathBuf};

use crate::options::Sku;
use crate::process::{Invocation, OutputMode, ProcessError, ProcessRunner, RunOutcome};

/// Builds the locator's filter arguments: `-requires` ids, then `-products`.
///
/// With no sku, `all_products` widens the search to every product
/// (`-products *`); otherwise the locator's default product set applies.
pub fn filter_args(sku: Option<Sku>, requires: &[String], all_products: bool) -> Vec<String> {
    let mut args = Vec::new();

    if !requires.is_empty() {
        args.push("-requires".to_string());
        args.extend(requires.iter().cloned());
    }

    match sku {
        Some(sku) => {
            args.push("-products".to_string());
            args.push(sku.product_id());
        }
        None if all_products => {
            args.push("-products".to_string());
            args.push("*".to_string());
        }
        None => {}
    }

    args
}

/// Runs the locator tool.
#[derive(Debug, Clone)]
pub struct WhereService {
    locator: PathBuf,
    runner: ProcessRunner,
}

impl WhereService {
    pub fn new(locator: impl Into<PathBuf>, runner: ProcessRunner) -> Self {
        Self {
            locator: locator.into(),
            runner,
        }
    }

    pub fn locator(&self) -> &Path {
        &self.locator
    }

    /// The locator call for `args`; `-nologo` always comes first.
    pub fn invocation(&self, args: &[String]) -> Invocation {
        Invocation::new(&self.locator)
            .arg("-nologo")
            .args(args.iter().cloned())
    }

    /// Runs the locator, decoding JSON when `args` ask for it.
    pub async fn query<F>(&self, args: &[String], on_line: F) -> Result<RunOutcome, ProcessError>
    where
        F: FnMut(&str),
    {
        let invocation = self.invocation(args);
        self.runner
            .run(&invocation, OutputMode::detect(args), on_line)
            .await
    }

    /// Queries every instance matching `sku` and `requires` as JSON without
    /// echoing anything.
    pub async fn all_instances(
        &self,
        sku: Option<Sku>,
        requires: &[String],
    ) -> Result<RunOutcome, ProcessError> {
        let mut args = vec![
            "-prerelease".to_string(),
            "-format".to_string(),
            "json".to_string(),
        ];
        args.extend(filter_args(sku, requires, true));

        self.query(&args, |_| {}).await
    }

    /// The locator's own help text without its banners.
    pub async fn help(&self) -> Result<Vec<String>, ProcessError> {
        let invocation = self.invocation(&["-?".to_string()]);
        self.runner.help_lines(&invocation).await
    }
}
