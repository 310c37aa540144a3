//! Workload ids and the short aliases accepted on the command line.

/// Prefix for workload ids given without a namespace.
const WORKLOAD_PREFIX: &str = "Microsoft.VisualStudio.Workload.";

/// Short aliases and the workload ids they stand for.
pub const WORKLOAD_ALIASES: &[(&str, &str)] = &[
    ("azure", "Microsoft.VisualStudio.Workload.Azure"),
    ("core", "Microsoft.VisualStudio.Workload.NetCoreTools"),
    ("cpp", "Microsoft.VisualStudio.Workload.NativeDesktop"),
    ("data", "Microsoft.VisualStudio.Workload.Data"),
    ("desktop", "Microsoft.VisualStudio.Workload.ManagedDesktop"),
    ("mobile", "Microsoft.VisualStudio.Workload.NetCrossPlat"),
    ("unity", "Microsoft.VisualStudio.Workload.ManagedGame"),
    ("web", "Microsoft.VisualStudio.Workload.NetWeb"),
    ("xamarin", "Microsoft.VisualStudio.Workload.NetCrossPlat"),
];

/// Expands an alias or bare name into a full workload or component id.
///
/// Ids that already carry a namespace (contain a `.`) are returned as-is.
pub fn resolve(id: &str) -> String {
    if let Some((_, full)) = WORKLOAD_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(id))
    {
        return (*full).to_string();
    }

    if id.contains('.') {
        id.to_string()
    } else {
        format!("{WORKLOAD_PREFIX}{id}")
    }
}

/// Resolves every entry, keeping the order.
pub fn resolve_all(ids: &[String]) -> Vec<String> {
    ids.iter().map(|id| resolve(id)).collect()
}
