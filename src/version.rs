//! Version line embedded in generated programs when none is given.

use std::env;
use std::path::Path;

use chrono::Local;

const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// `@(#) $Id: <file> <version> <timestamp> <user> Exp $`
pub fn version_info(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let stamp = Local::now().format("%F %T%z");
    format!(
        "@(#) $Id: {} {} {} {} Exp $",
        name,
        env!("CARGO_PKG_VERSION"),
        stamp,
        user_name()
    )
}

fn user_name() -> String {
    USER_VARS
        .iter()
        .find_map(|var| env::var(var).ok().filter(|value| !value.is_empty()))
        .unwrap_or_else(|| "noname".to_string())
}
