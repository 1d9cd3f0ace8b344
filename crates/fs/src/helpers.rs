/// Path of entry `name` under the listing prefix `prefix`, as seen by path
/// matchers. Slashes at the seam collapse to one; an empty side yields the
/// other side unchanged.
pub fn join_path(prefix: &str, name: &str) -> String {
    match (prefix, name) {
        ("", _) => name.to_owned(),
        (_, "") => prefix.to_owned(),
        _ => format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            name.trim_start_matches('/')
        ),
    }
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
