//! Option declarations and pass-through-tolerant argument parsing.
//!
//! Options are declared with compact prototype strings:
//!
//! - `"g|global"` - a boolean flag with two names
//! - `"sku="` - an option with a required value (`--sku pro`, `--sku=pro`)
//! - `"nick|nickname:"` - an option with an optional, attached value
//!   (`--nick=preview`, `--nick:preview`, or bare `--nick`)
//!
//! Tokens that match no declared option are never rejected. They are kept,
//! in order, as extra arguments and forwarded to the external tool, which
//! may understand flags this layer has never heard of.

mod parser;
pub mod sets;
pub mod sku;
pub mod workload;

use std::collections::HashMap;
use std::io::{self, Write};
use std::str::FromStr;

use thiserror::Error;

pub use parser::is_help_flag;
pub use sku::Sku;

/// Errors raised while declaring or parsing options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// Two merged option sets declare the same name.
    #[error("option name '{0}' is declared more than once")]
    Duplicate(String),

    /// A prototype string could not be understood.
    #[error("invalid option prototype '{0}'")]
    InvalidPrototype(String),

    /// A required-value option was the last token.
    #[error("missing value for option '--{0}'")]
    MissingValue(String),

    /// A value was supplied but could not be converted.
    #[error("invalid value '{value}' for option '--{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// A mandatory option was not supplied.
    #[error("option '--{0}' is required")]
    Required(String),
}

/// How an option consumes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Presence only.
    Flag,
    /// Takes the attached value or the following token.
    Required,
    /// Takes an attached value only.
    Optional,
}

/// A single declared option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    names: Vec<String>,
    kind: ValueKind,
    description: String,
}

impl OptionDef {
    /// Declares an option from a prototype such as `"nick|nickname:"`.
    pub fn new(prototype: &str, description: &str) -> Result<Self, OptionError> {
        let (body, kind) = if let Some(body) = prototype.strip_suffix('=') {
            (body, ValueKind::Required)
        } else if let Some(body) = prototype.strip_suffix(':') {
            (body, ValueKind::Optional)
        } else {
            (prototype, ValueKind::Flag)
        };

        let names: Vec<String> = body.split('|').map(str::to_string).collect();
        let valid = names.iter().all(|n| {
            !n.is_empty() && !n.starts_with('-') && !n.contains(['=', ':', ' '])
        });
        if !valid {
            return Err(OptionError::InvalidPrototype(prototype.to_string()));
        }

        Ok(Self {
            names,
            kind,
            description: description.to_string(),
        })
    }

    /// The canonical name: the longest alias, ties going to the earlier one,
    /// so `"g|global"` is `global` and `"save|alias"` is `alias`.
    pub fn name(&self) -> &str {
        self.names.iter().fold("", |best, n| {
            if n.len() > best.len() { n.as_str() } else { best }
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Renders the names column, e.g. `-g, --global` or `--sku=VALUE`.
    fn synopsis(&self) -> String {
        let names = self
            .names
            .iter()
            .map(|n| {
                if n.chars().count() == 1 {
                    format!("-{n}")
                } else {
                    format!("--{n}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        match self.kind {
            ValueKind::Flag => names,
            ValueKind::Required => format!("{names}=VALUE"),
            ValueKind::Optional => format!("{names}[=VALUE]"),
        }
    }
}

/// An ordered set of options for one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    defs: Vec<OptionDef>,
    workload_sink: Option<String>,
}

impl Options {
    /// Builds a set from `(prototype, description)` pairs.
    pub fn new(entries: &[(&str, &str)]) -> Result<Self, OptionError> {
        entries.iter().try_fold(Self::default(), |options, (proto, desc)| {
            options.with_def(OptionDef::new(proto, desc)?)
        })
    }

    /// Merges another set into this one, rejecting any shared name.
    pub fn with(self, other: Self) -> Result<Self, OptionError> {
        let sink = match (self.workload_sink.clone(), other.workload_sink.clone()) {
            (Some(a), Some(b)) if a != b => return Err(OptionError::Duplicate("+".to_string())),
            (a, b) => a.or(b),
        };

        let mut merged = other
            .defs
            .into_iter()
            .try_fold(self, Self::with_def)?;
        merged.workload_sink = sink;
        Ok(merged)
    }

    fn with_def(mut self, def: OptionDef) -> Result<Self, OptionError> {
        if let Some(dup) = def.names.iter().find(|n| self.find(n).is_some()) {
            return Err(OptionError::Duplicate(dup.clone()));
        }
        self.defs.push(def);
        Ok(self)
    }

    /// Routes `+name` tokens into the values of the option named `canonical`.
    pub fn with_workload_shorthand(mut self, canonical: &str) -> Self {
        self.workload_sink = Some(canonical.to_string());
        self
    }

    pub fn defs(&self) -> &[OptionDef] {
        &self.defs
    }

    fn find(&self, name: &str) -> Option<&OptionDef> {
        self.defs.iter().find(|d| d.matches(name))
    }

    /// Parses raw arguments left to right.
    pub fn parse<I, S>(&self, args: I) -> Result<ParsedArgs, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        parser::parse(self, args.into_iter().map(Into::into))
    }

    /// Writes one line per option: synopsis padded to a column, then help.
    pub fn write_descriptions(&self, out: &mut impl Write) -> io::Result<()> {
        for def in &self.defs {
            let synopsis = def.synopsis();
            if synopsis.len() < 28 {
                writeln!(out, "  {synopsis:<28} {}", def.description)?;
            } else {
                writeln!(out, "  {synopsis}")?;
                writeln!(out, "  {:<28} {}", "", def.description)?;
            }
        }
        if self.workload_sink.is_some() {
            writeln!(out, "  {:<28} {}", "+WORKLOAD", "Shorthand for a workload id or alias")?;
        }
        Ok(())
    }
}

/// The result of parsing arguments against an [`Options`] set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: HashMap<String, Vec<String>>,
    extra: Vec<String>,
    help_requested: bool,
}

impl ParsedArgs {
    /// Last value given for `name`; later occurrences win.
    pub fn last(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.last())
            .map(String::as_str)
    }

    /// Every value given for `name`, in order.
    pub fn all(&self, name: &str) -> &[String] {
        self.values.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether `name` appeared at all.
    pub fn flag(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Converts the last value for `name` with [`FromStr`].
    pub fn value<T>(&self, name: &str) -> Result<Option<T>, OptionError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.last(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| OptionError::InvalidValue {
                    name: name.to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Tokens no option consumed, in their original order.
    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    pub fn into_extra(self) -> Vec<String> {
        self.extra
    }

    /// Whether a help flag stopped parsing.
    pub const fn help_requested(&self) -> bool {
        self.help_requested
    }
}

/// Implemented by the parsed, immutable form of each command.
pub trait CommandDescriptor: Sized {
    /// The options this command understands.
    fn options() -> Result<Options, OptionError>;

    /// Builds the descriptor from parsed arguments.
    fn from_parsed(parsed: ParsedArgs) -> Result<Self, OptionError>;

    fn parse<I, S>(args: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parsed = Self::options()?.parse(args)?;
        Self::from_parsed(parsed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_kinds() {
        let flag = OptionDef::new("g|global", "").unwrap();
        assert_eq!(flag.kind(), ValueKind::Flag);
        assert_eq!(flag.name(), "global");
        assert_eq!(flag.names(), ["g", "global"]);

        let required = OptionDef::new("sku=", "").unwrap();
        assert_eq!(required.kind(), ValueKind::Required);
        assert_eq!(required.name(), "sku");

        let optional = OptionDef::new("nick|nickname:", "").unwrap();
        assert_eq!(optional.kind(), ValueKind::Optional);
        assert_eq!(optional.name(), "nickname");

        assert_eq!(OptionDef::new("save|alias=", "").unwrap().name(), "alias");
        assert_eq!(OptionDef::new("from|into=", "").unwrap().name(), "from");
    }

    #[test]
    fn test_invalid_prototype() {
        assert!(matches!(
            OptionDef::new("a||b", ""),
            Err(OptionError::InvalidPrototype(_))
        ));
        assert!(matches!(
            OptionDef::new("--sku=", ""),
            Err(OptionError::InvalidPrototype(_))
        ));
    }

    #[test]
    fn test_with_rejects_duplicate_names() {
        let a = Options::new(&[("sku=", "")]).unwrap();
        let b = Options::new(&[("s|sku=", "")]).unwrap();
        assert_eq!(a.with(b), Err(OptionError::Duplicate("sku".to_string())));
    }

    #[test]
    fn test_with_rejects_duplicate_alias() {
        let a = Options::new(&[("g|global", "")]).unwrap();
        let b = Options::new(&[("g|group=", "")]).unwrap();
        assert_eq!(a.with(b), Err(OptionError::Duplicate("g".to_string())));
    }

    #[test]
    fn test_with_is_associative() {
        let a = || Options::new(&[("sku=", "")]).unwrap();
        let b = || Options::new(&[("g|global", "")]).unwrap();
        let c = || Options::new(&[("nick|nickname:", "")]).unwrap();

        let left = a().with(b()).unwrap().with(c()).unwrap();
        let right = a().with(b().with(c()).unwrap()).unwrap();
        assert_eq!(left, right);
        assert_eq!(left.defs().len(), 3);
    }

    #[test]
    fn test_disjoint_sets_parse_each_value() {
        let options = Options::new(&[("sku=", "")])
            .unwrap()
            .with(Options::new(&[("g|global", "")]).unwrap())
            .unwrap()
            .with(Options::new(&[("nick|nickname:", "")]).unwrap())
            .unwrap();

        let parsed = options
            .parse([
                "first",
                "--sku",
                "pro",
                "-latest",
                "--global",
                "--nick=preview",
                "last",
            ])
            .unwrap();

        assert_eq!(parsed.last("sku"), Some("pro"));
        assert!(parsed.flag("global"));
        assert_eq!(parsed.last("nickname"), Some("preview"));
        assert_eq!(parsed.extra(), ["first", "-latest", "last"]);
        assert!(!parsed.help_requested());
    }

    #[test]
    fn test_value_parses_with_from_str() {
        let options = Options::new(&[("sku=", "")]).unwrap();

        let parsed = options.parse(["--sku", "ent"]).unwrap();
        assert_eq!(parsed.value::<Sku>("sku").unwrap(), Some(Sku::Enterprise));

        let parsed = options.parse(Vec::<String>::new()).unwrap();
        assert_eq!(parsed.value::<Sku>("sku").unwrap(), None);

        let parsed = options.parse(["--sku", "ultimate"]).unwrap();
        assert!(matches!(
            parsed.value::<Sku>("sku"),
            Err(OptionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_write_descriptions() {
        let options = Options::new(&[
            ("sku=", "Edition to use"),
            ("g|global", "Save globally"),
            ("nick|nickname:", "Nickname filter"),
        ])
        .unwrap()
        .with_workload_shorthand("requires");

        let mut out = Vec::new();
        options.write_descriptions(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("--sku=VALUE"));
        assert!(text.contains("Edition to use"));
        assert!(text.contains("-g, --global"));
        assert!(text.contains("--nick, --nickname[=VALUE]"));
        assert!(text.contains("+WORKLOAD"));
    }
}
