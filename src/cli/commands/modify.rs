use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing::debug;

use crate::chooser::{Chooser, LineInput, PromptInput};
use crate::cli::context::AppContext;
use crate::cli::help::write_help;
use crate::instance::VisualStudioInstance;
use crate::options::{CommandDescriptor, OptionError, Options, ParsedArgs, Sku, sets, workload};
use crate::ui::{Spinner, Style};
use crate::{echo, status};

/// A parsed `vs modify` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyDescriptor {
    pub sku: Option<Sku>,
    /// `Some("")` when `--nick` was given without a value.
    pub nickname: Option<String>,
    pub workloads_added: Vec<String>,
    pub workloads_removed: Vec<String>,
    pub extra_arguments: Vec<String>,
    pub help: bool,
}

impl CommandDescriptor for ModifyDescriptor {
    fn options() -> Result<Options, OptionError> {
        sets::sku()?
            .with(sets::nickname()?)?
            .with(sets::workloads()?)
    }

    fn from_parsed(parsed: ParsedArgs) -> Result<Self, OptionError> {
        Ok(Self {
            sku: parsed.value("sku")?,
            nickname: parsed.last("nickname").map(str::to_string),
            workloads_added: workload::resolve_all(parsed.all("add")),
            workloads_removed: workload::resolve_all(parsed.all("remove")),
            help: parsed.help_requested(),
            extra_arguments: parsed.into_extra(),
        })
    }
}

impl ModifyDescriptor {
    /// The installer runs unattended whenever it has something to change.
    pub fn needs_passive(&self) -> bool {
        !self.workloads_added.is_empty()
            || !self.workloads_removed.is_empty()
            || self.extra_arguments.iter().any(|a| is_config_argument(a))
    }

    /// Installer arguments after `modify --channelId .. --productId ..`.
    pub fn installer_args(&self, instance: &VisualStudioInstance) -> Vec<String> {
        let mut args = Vec::new();

        if self.needs_passive() {
            args.push("--passive".to_string());
        }
        for id in &self.workloads_added {
            args.push("--add".to_string());
            args.push(id.clone());
        }
        for id in &self.workloads_removed {
            args.push("--remove".to_string());
            args.push(id.clone());
        }
        args.push("--installPath".to_string());
        args.push(instance.installation_path.clone());
        args.extend(self.extra_arguments.iter().cloned());

        args
    }

    /// Whether `instance` passes the nickname filter. A bare `--nick`
    /// filters nothing.
    pub fn matches(&self, instance: &VisualStudioInstance) -> bool {
        match self.nickname.as_deref() {
            None | Some("") => true,
            Some(nick) => instance
                .nickname()
                .is_some_and(|n| n.eq_ignore_ascii_case(nick)),
        }
    }
}

/// `--config`, `--config=<file>` or `--config:<file>`, in any case.
fn is_config_argument(arg: &str) -> bool {
    const FLAG: &str = "--config";
    match (arg.get(..FLAG.len()), arg.get(FLAG.len()..)) {
        (Some(name), Some(rest)) if name.eq_ignore_ascii_case(FLAG) => {
            rest.is_empty() || rest.starts_with(['=', ':'])
        }
        _ => false,
    }
}

/// Asks the user to pick one instance, off the async runtime so Ctrl+C
/// still reaches `main` while the prompt waits.
async fn choose_instance(
    instances: Vec<VisualStudioInstance>,
) -> Result<Option<VisualStudioInstance>> {
    tokio::task::spawn_blocking(move || {
        if io::stdin().is_terminal() {
            Chooser::new(PromptInput, io::stderr()).choose(instances)
        } else {
            Chooser::new(LineInput::new(io::stdin().lock()), io::stderr()).choose(instances)
        }
    })
    .await
    .context("Instance selection was interrupted")?
}

pub async fn run_modify(ctx: &AppContext, args: Vec<String>) -> Result<i32> {
    let descriptor = ModifyDescriptor::parse(args)?;

    if descriptor.help {
        let help = ctx.installer.help().await;
        write_help(
            &mut io::stdout().lock(),
            "vs modify [options] [installer arguments]",
            &ModifyDescriptor::options()?,
            "installer options",
            help,
        )?;
        return Ok(0);
    }

    let spinner = Spinner::new("Looking for instances...");
    let outcome = ctx
        .where_service
        .all_instances(descriptor.sku, &[])
        .await;
    spinner.stop();
    let outcome = outcome?;

    if !outcome.success() {
        return Ok(outcome.exit_code);
    }
    if let Some(advisory) = &outcome.advisory {
        crate::warn!("{} {advisory}", Style::warning("Warning:"));
    }

    let candidates: Vec<_> = outcome
        .instances
        .into_iter()
        .filter(|i| descriptor.matches(i))
        .collect();
    debug!(candidates = candidates.len(), "instances after filtering");

    let Some(instance) = choose_instance(candidates).await? else {
        status!("No instance selected, nothing to modify.");
        return Ok(0);
    };

    let installer_args = descriptor.installer_args(&instance);
    let invocation = ctx.installer.modify_invocation(&instance, &installer_args);
    status!("Running {invocation}");

    let exit_code = ctx
        .installer
        .modify(&instance, &installer_args, |line| echo!("{line}"))
        .await?;
    Ok(exit_code)
}
