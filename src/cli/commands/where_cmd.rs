use std::io;

use anyhow::Result;
use tracing::debug;

use crate::cli::context::AppContext;
use crate::cli::help::write_help;
use crate::options::{CommandDescriptor, OptionError, Options, ParsedArgs, Sku, sets, workload};
use crate::services::filter_args;
use crate::{echo, status};

/// A parsed `vs where` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereDescriptor {
    pub sku: Option<Sku>,
    pub requires: Vec<String>,
    pub extra_arguments: Vec<String>,
    pub help: bool,
}

impl CommandDescriptor for WhereDescriptor {
    fn options() -> Result<Options, OptionError> {
        sets::sku()?.with(sets::requires()?)
    }

    fn from_parsed(parsed: ParsedArgs) -> Result<Self, OptionError> {
        Ok(Self {
            sku: parsed.value("sku")?,
            requires: workload::resolve_all(parsed.all("requires")),
            help: parsed.help_requested(),
            extra_arguments: parsed.into_extra(),
        })
    }
}

impl WhereDescriptor {
    /// Locator arguments after `-nologo`: filters, then pass-through extras.
    pub fn locator_args(&self) -> Vec<String> {
        let mut args = filter_args(self.sku, &self.requires, false);
        args.extend(self.extra_arguments.iter().cloned());
        args
    }
}

pub async fn run_where(ctx: &AppContext, args: Vec<String>) -> Result<i32> {
    let descriptor = WhereDescriptor::parse(args)?;

    if descriptor.help {
        let help = ctx.where_service.help().await;
        write_help(
            &mut io::stdout().lock(),
            "vs where [options] [vswhere arguments]",
            &WhereDescriptor::options()?,
            "vswhere options",
            help,
        )?;
        return Ok(0);
    }

    let locator_args = descriptor.locator_args();
    let invocation = ctx.where_service.invocation(&locator_args);
    status!("Running {invocation}");

    let outcome = ctx
        .where_service
        .query(&locator_args, |line| echo!("{line}"))
        .await?;

    debug!(
        exit_code = outcome.exit_code,
        instances = outcome.instances.len(),
        "locator finished"
    );
    Ok(outcome.exit_code)
}
