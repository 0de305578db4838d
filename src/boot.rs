use anyhow::{Context, Result};
use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::{io::Write, path::PathBuf, process::ExitCode};

use crate::{
    config::DialogConfig,
    dialog::Selection,
    i18n::lang,
    ports::{FixedPortSource, PortSource, SerialPortSource},
    tui::select_port_and_baud_with,
};

/// Environment variable naming the log file. The dialog owns the terminal, so
/// logs never go to stdout while it is open.
pub const LOG_FILE_ENV: &str = "COMSEL_LOG_FILE";

/// Common initialization used by the launcher: logging and translations.
pub fn init_common() {
    let log_file = std::env::var(LOG_FILE_ENV).ok().or_else(|| {
        #[cfg(debug_assertions)]
        {
            Some("./comsel.log".to_string())
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    });

    if let Some(path) = log_file {
        if let Err(err) = init_file_logger(&path) {
            eprintln!("Failed to initialize file logger at '{path}': {err}");
            env_logger::init();
        }
    } else {
        env_logger::init();
    }

    crate::i18n::init_i18n();
}

fn init_file_logger(path: &str) -> Result<()> {
    let target = Box::new(
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Can't open log file {path}"))?,
    );
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(target))
        .filter(None, LevelFilter::Debug)
        .parse_default_env()
        .try_init()
        .context("Logger already initialized")?;
    Ok(())
}

pub fn build_cli() -> Command {
    Command::new("comsel")
        .about("Pick a serial port and baud rate")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Dialog config file (TOML); defaults to $COMSEL_CONFIG"),
        )
        .arg(
            Arg::new("ports")
                .long("ports")
                .short('p')
                .value_name("LIST")
                .help("Comma separated port list to offer instead of the system enumeration"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the selection as JSON")
                .action(ArgAction::SetTrue),
        )
}

/// Human readable result line, in the current language.
pub fn describe_selection(selection: Option<&Selection>) -> String {
    match selection {
        Some(selection) => lang()
            .selected_summary
            .replace("{port}", &selection.port)
            .replace("{baud}", &selection.baud.to_string()),
        None => lang().nothing_selected.clone(),
    }
}

pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let config = DialogConfig::resolve(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let source: Box<dyn PortSource> = match matches.get_one::<String>("ports") {
        Some(list) => {
            log::info!("Using fixed port list from arguments: {list}");
            Box::new(FixedPortSource::parse(list))
        }
        None => Box::new(SerialPortSource),
    };

    let selection = select_port_and_baud_with(source, config)?;

    if matches.get_flag("json") {
        println!(
            "{}",
            serde_json::to_string(&selection).context("Failed to serialize selection")?
        );
    } else {
        println!("{}", describe_selection(selection.as_ref()));
    }

    Ok(if selection.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_flags() {
        let matches = build_cli()
            .try_get_matches_from(["comsel", "--config", "dialog.toml", "-p", "COM1,COM2", "--json"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("dialog.toml"))
        );
        assert_eq!(
            matches.get_one::<String>("ports").map(String::as_str),
            Some("COM1,COM2")
        );
        assert!(matches.get_flag("json"));
    }

    #[test]
    fn describes_selection_and_cancellation() {
        let selection = Selection {
            port: "COM3".to_string(),
            baud: 9600,
        };
        let text = describe_selection(Some(&selection));
        assert!(text.contains("COM3"));
        assert!(text.contains("9600"));
        assert_eq!(describe_selection(None), lang().nothing_selected);
    }

    #[test]
    fn json_output_shape() {
        let selection = Some(Selection {
            port: "COM3".to_string(),
            baud: 9600,
        });
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"{"port":"COM3","baud":9600}"#
        );
        assert_eq!(serde_json::to_string(&None::<Selection>).unwrap(), "null");
    }
}
