//! Formatting of parameter-override and extra-port clauses.
//!
//! Both functions are pure: the output depends only on the map's insertion
//! order. Key validity is the caller's responsibility.

use crate::block::PortMap;

/// Formats a parameter map as a Verilog parameter-override clause.
///
/// An empty map yields an empty string. Otherwise each entry becomes
/// `.NAME(value)` with the key upper-cased; a `None` value renders as an
/// empty binding, meaning "use the declared default". Bindings are joined
/// with `", "` and wrapped in `#(...)`.
pub fn format_param_str(parameters: &PortMap) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let bindings: Vec<String> = parameters
        .iter()
        .map(|(key, value)| {
            format!(
                ".{}({})",
                key.to_uppercase(),
                value.as_deref().unwrap_or("")
            )
        })
        .collect();
    format!("#({})", bindings.join(", "))
}

/// Formats an extra-port map as bindings appended to an instantiation record.
///
/// An empty map yields an empty string. Otherwise each entry becomes
/// `.key(value)` with the key emitted verbatim (ports are case-sensitive),
/// prefixed by `",\n  "` so the result continues the mandatory port list.
pub fn format_port_str(extra_ports: &PortMap) -> String {
    if extra_ports.is_empty() {
        return String::new();
    }
    let bindings: Vec<String> = extra_ports
        .iter()
        .map(|(key, value)| format!(".{}({})", key, value.as_deref().unwrap_or("")))
        .collect();
    format!(",\n  {}", bindings.join(",\n  "))
}
