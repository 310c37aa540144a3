//! Reusable option sets that commands compose with [`Options::with`].

use super::{OptionError, Options};

/// `--sku`: the edition to filter on or operate on.
pub fn sku() -> Result<Options, OptionError> {
    Options::new(&[(
        "sku=",
        "Edition, one of [e|ent|enterprise], [p|pro|professional], [c|com|community] or [b|build|buildtools]",
    )])
}

/// `--requires` and `+workload`: workloads an instance must have.
pub fn requires() -> Result<Options, OptionError> {
    Ok(Options::new(&[(
        "requires=",
        "Workload or component id (or alias) an instance must have",
    )])?
    .with_workload_shorthand("requires"))
}

/// `--add`, `--remove` and `+workload`: workload changes for modify.
pub fn workloads() -> Result<Options, OptionError> {
    Ok(Options::new(&[
        ("add=", "Workload or component id (or alias) to add"),
        ("remove=", "Workload or component id (or alias) to remove"),
    ])?
    .with_workload_shorthand("add"))
}

/// `--nick`: selects instances by their nickname.
pub fn nickname() -> Result<Options, OptionError> {
    Options::new(&[("nick|nickname:", "Optional nickname to use")])
}

/// `--save`/`--alias`: the alias name to save the command line under,
/// read back as `alias`.
pub fn save() -> Result<Options, OptionError> {
    Options::new(&[("save|alias=", "Alias name to save the command line as")])
}

/// `--global`: save to the user configuration instead of the current directory.
pub fn global() -> Result<Options, OptionError> {
    Options::new(&[("g|global", "Save to the user configuration instead of ./.vs.toml")])
}
