//! CLI probe for `pageflow_core`.
//!
//! # Responsibility
//! - Without arguments, print the core version to verify linkage.
//! - With a file, paginate it and print one summary line per page.
//!
//! Usage: `pageflow_cli [FILE] [MAX_LINES] [CHARS_PER_LINE]`
//!
//! Set `PAGEFLOW_LOG_DIR` (absolute) to write core logs there.

use pageflow_core::{core_version, default_log_level, import_text, init_logging, PagerConfig};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "PAGEFLOW_LOG_DIR";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(message) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        println!("pageflow_core version={}", core_version());
        return ExitCode::SUCCESS;
    };

    let config = match parse_config(&args[1..]) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    let session = match import_text(path, config.build_engine()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "pages={} policy={:?}",
        session.page_count(),
        config.constraints()
    );
    for (index, page) in session.pages().iter().enumerate() {
        println!(
            "page {} id={} lines={} chars={}",
            index + 1,
            page.id,
            page.line_count(),
            page.char_len()
        );
    }
    ExitCode::SUCCESS
}

fn parse_config(args: &[String]) -> Result<PagerConfig, String> {
    let mut config = PagerConfig::default();
    if let Some(raw) = args.first() {
        config.max_lines = raw
            .parse()
            .map_err(|_| format!("MAX_LINES must be a positive integer, got `{raw}`"))?;
    }
    if let Some(raw) = args.get(1) {
        let chars_per_line = raw
            .parse()
            .map_err(|_| format!("CHARS_PER_LINE must be a positive integer, got `{raw}`"))?;
        config.chars_per_line = Some(chars_per_line);
    }
    config.normalized().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_config;
    use pageflow_core::{Constraints, PagerConfig};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_budget_arguments_use_defaults() {
        let config = parse_config(&[]).unwrap();
        assert_eq!(config, PagerConfig::default());
    }

    #[test]
    fn max_lines_selects_line_policy() {
        let config = parse_config(&args(&["3"])).unwrap();
        assert_eq!(config.constraints(), Constraints::lines(3));
    }

    #[test]
    fn chars_per_line_selects_wrapped_policy() {
        let config = parse_config(&args(&["4", "60"])).unwrap();
        assert_eq!(config.constraints(), Constraints::wrapped(60, 4));
    }

    #[test]
    fn non_numeric_arguments_are_rejected() {
        let err = parse_config(&args(&["many"])).unwrap_err();
        assert!(err.contains("MAX_LINES"));
        let err = parse_config(&args(&["4", "-1"])).unwrap_err();
        assert!(err.contains("CHARS_PER_LINE"));
    }

    #[test]
    fn zero_budget_is_rejected() {
        let err = parse_config(&args(&["0"])).unwrap_err();
        assert!(err.contains("max_lines"));
    }
}
