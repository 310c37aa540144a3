use super::{OptionError, Options, ParsedArgs, ValueKind};

const HELP_FLAGS: &[&str] = &["-?", "/?", "-h", "-help", "--help"];

/// Returns `true` for the tokens that short-circuit into help output.
pub fn is_help_flag(token: &str) -> bool {
    HELP_FLAGS.contains(&token)
}

/// Splits `--name=value` / `-name:value` into the name and attached value.
fn split_token(token: &str) -> Option<(&str, Option<&str>)> {
    let body = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    if body.is_empty() {
        return None;
    }

    Some(match body.find(['=', ':']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    })
}

pub fn parse(
    options: &Options,
    mut args: impl Iterator<Item = String>,
) -> Result<ParsedArgs, OptionError> {
    let mut parsed = ParsedArgs::default();

    while let Some(token) = args.next() {
        if is_help_flag(&token) {
            parsed.help_requested = true;
            break;
        }

        // Everything after a bare `--` belongs to the external tool.
        if token == "--" {
            parsed.extra.push(token);
            parsed.extra.extend(args.by_ref());
            break;
        }

        if let Some(sink) = options.workload_sink.as_deref()
            && let Some(workload) = token.strip_prefix('+')
            && !workload.is_empty()
        {
            parsed
                .values
                .entry(sink.to_string())
                .or_default()
                .push(workload.to_string());
            continue;
        }

        let Some((name, attached)) = split_token(&token) else {
            parsed.extra.push(token);
            continue;
        };
        let Some(def) = options.find(name) else {
            parsed.extra.push(token);
            continue;
        };

        let canonical = def.name().to_string();
        let value = match (def.kind(), attached) {
            (ValueKind::Flag, None) => String::new(),
            (ValueKind::Flag, Some(value)) => {
                return Err(OptionError::InvalidValue {
                    name: canonical,
                    value: value.to_string(),
                    reason: "this option does not take a value".to_string(),
                });
            }
            (ValueKind::Required | ValueKind::Optional, Some(value)) => value.to_string(),
            (ValueKind::Required, None) => args
                .next()
                .ok_or_else(|| OptionError::MissingValue(canonical.clone()))?,
            (ValueKind::Optional, None) => String::new(),
        };

        parsed.values.entry(canonical).or_default().push(value);
    }

    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options::new(&[
            ("sku=", "Edition"),
            ("g|global", "Global"),
            ("nick|nickname:", "Nickname"),
            ("requires=", "Workload"),
        ])
        .unwrap()
        .with_workload_shorthand("requires")
    }

    #[test]
    fn test_split_token() {
        assert_eq!(split_token("--sku"), Some(("sku", None)));
        assert_eq!(split_token("-sku=pro"), Some(("sku", Some("pro"))));
        assert_eq!(split_token("--nick:preview"), Some(("nick", Some("preview"))));
        assert_eq!(split_token("-format=json"), Some(("format", Some("json"))));
        assert_eq!(split_token("positional"), None);
        assert_eq!(split_token("-"), None);
        assert_eq!(split_token("--"), None);
    }

    #[test]
    fn test_last_value_wins() {
        let parsed = options()
            .parse(["--sku", "ent", "--sku=pro", "-sku:com"])
            .unwrap();
        assert_eq!(parsed.last("sku"), Some("com"));
        assert_eq!(parsed.all("sku").len(), 3);
    }

    #[test]
    fn test_absent_option_is_unset() {
        let parsed = options().parse(["positional"]).unwrap();
        assert_eq!(parsed.last("sku"), None);
        assert!(!parsed.flag("global"));
        assert!(parsed.all("requires").is_empty());
    }

    #[test]
    fn test_alias_resolves_to_canonical_name() {
        let parsed = options().parse(["-g", "--nick=dev"]).unwrap();
        assert!(parsed.flag("global"));
        assert_eq!(parsed.last("nickname"), Some("dev"));
    }

    #[test]
    fn test_unknown_tokens_pass_through_in_order() {
        let parsed = options()
            .parse(["-latest", "--sku", "pro", "-format=json", "x", "--config", "a.vsconfig"])
            .unwrap();
        assert_eq!(
            parsed.extra(),
            ["-latest", "-format=json", "x", "--config", "a.vsconfig"]
        );
    }

    #[test]
    fn test_required_value_missing() {
        assert_eq!(
            options().parse(["--sku"]),
            Err(OptionError::MissingValue("sku".to_string()))
        );
    }

    #[test]
    fn test_optional_value_does_not_consume_next_token() {
        let parsed = options().parse(["--nick", "positional"]).unwrap();
        assert_eq!(parsed.last("nickname"), Some(""));
        assert_eq!(parsed.extra(), ["positional"]);
    }

    #[test]
    fn test_flag_with_value_is_rejected() {
        assert!(matches!(
            options().parse(["--global=yes"]),
            Err(OptionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_workload_shorthand() {
        let parsed = options()
            .parse(["+core", "--requires", "Microsoft.Component.MSBuild", "+web"])
            .unwrap();
        assert_eq!(
            parsed.all("requires"),
            ["core", "Microsoft.Component.MSBuild", "web"]
        );
        assert!(parsed.extra().is_empty());
    }

    #[test]
    fn test_plus_without_sink_passes_through() {
        let options = Options::new(&[("sku=", "")]).unwrap();
        let parsed = options.parse(["+core"]).unwrap();
        assert_eq!(parsed.extra(), ["+core"]);
    }

    #[test]
    fn test_help_flags_stop_parsing() {
        for flag in ["-?", "-h", "-help", "--help"] {
            let parsed = options().parse(["--sku", "pro", flag, "--sku"]).unwrap();
            assert!(parsed.help_requested(), "{flag} should request help");
            assert_eq!(parsed.last("sku"), Some("pro"));
        }
    }

    #[test]
    fn test_double_dash_forwards_rest() {
        let parsed = options().parse(["--", "--sku", "pro"]).unwrap();
        assert_eq!(parsed.extra(), ["--", "--sku", "pro"]);
        assert_eq!(parsed.last("sku"), None);
    }
}
