// src/cli.rs
use std::{env, error::Error, iter::Peekable, path::PathBuf};

use chrono::Weekday;

use crate::{
    analysis::AnalysisState,
    commands::{Command, CommandRegistry, Outcome},
    config::options::AppOptions,
    context::{AppContext, Readiness},
    credentials::{self, KeyringStore},
    extract::Schema,
    goals,
    sort::{Direction, SortOutcome},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub source: Option<String>,
    pub schema: Option<Schema>,
    pub sort: Option<String>,
    pub desc: bool,
    /// `Some(None)`: export to the default directory
    pub export: Option<Option<PathBuf>>,
    pub analyze: bool,
    pub day: Option<Weekday>,
    pub set_key: Option<String>,
    pub clear_key: bool,
    pub help: bool,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }

    let ctx = AppContext::new(Box::new(KeyringStore::default()), AppOptions::default())
        .with_env_key(credentials::env_override());
    run_with(&args, ctx)
}

/// Runs the parsed arguments against a prepared context. Everything goes through the registry.
pub fn run_with(args: &CliArgs, mut ctx: AppContext) -> Result<(), Box<dyn Error>> {
    let registry = CommandRegistry::default();
    let exec = |ctx: &mut AppContext, trigger: &str, payload: Option<&str>| -> Result<Outcome, Box<dyn Error>> {
        let cmd = registry.resolve(trigger, payload)?;
        ctx.dispatch(cmd).map_err(|e| e.user_message().into())
    };

    if args.clear_key {
        exec(&mut ctx, "clear-api-key", None)?;
        eprintln!("API key removed.");
    }
    if let Some(key) = &args.set_key {
        exec(&mut ctx, "save-api-key", Some(key.as_str()))?;
        eprintln!("API key saved.");
    }

    let Some(source) = &args.source else {
        if args.set_key.is_some() || args.clear_key {
            return Ok(());
        }
        return Err("Missing <source> (see --help)".into());
    };

    ctx.options.export.schema = args.schema;
    ctx.day_override = args.day;
    if let Some(Some(dir)) = &args.export {
        ctx.options.export.set_out_dir(&dir.to_string_lossy());
    }
    if args.analyze {
        ctx.init();
    }

    let loaded = exec(&mut ctx, "load-table", Some(source.as_str()))?;
    eprintln!("{}", loaded.message());

    if let Some(col) = &args.sort {
        let want = if args.desc { Direction::Descending } else { Direction::Ascending };
        // A click toggles; at most two clicks reach the wanted direction
        for _ in 0..2 {
            match ctx.dispatch(Command::SortBy(col.clone()))? {
                Outcome::Sorted(SortOutcome::Sorted { direction, .. }) if direction == want => break,
                Outcome::Sorted(SortOutcome::UnknownColumn) => {
                    return Err(format!("Unknown column: {}", col).into());
                }
                _ => {}
            }
        }
    }

    if args.export.is_some() {
        let out = exec(&mut ctx, "export-csv-btn", None)?;
        eprintln!("{}", out.message());
    }

    if args.analyze {
        if ctx.readiness() == Readiness::NotReady {
            return Err(crate::analysis::MSG_MISSING_KEY.into());
        }
        exec(&mut ctx, "generate-ai-btn", None)?;
        ctx.wait_analysis();
        match ctx.analysis.snapshot() {
            AnalysisState::Done(text) => println!("{}", text),
            AnalysisState::Failed(msg) => return Err(msg.into()),
            other => return Err(format!("Analysis ended in state {:?}", other).into()),
        }
    }

    if args.export.is_none() && !args.analyze {
        if let Outcome::Copied(text) = exec(&mut ctx, "copy-csv-btn", None)? {
            println!("{}", text);
        }
    }

    Ok(())
}

/// Hand-rolled flag parser. Flags may come before or after the source.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, Box<dyn Error>> {
    let mut out = CliArgs::default();
    let mut args = args.into_iter().peekable();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--schema" => {
                let v = args.next().ok_or("Missing value for --schema")?;
                out.schema = Some(Schema::parse(&v).ok_or_else(|| format!("Unknown schema: {}", v))?);
            }
            "--sort" => out.sort = Some(args.next().ok_or("Missing column for --sort")?),
            "--desc" => out.desc = true,
            "--export" => out.export = Some(optional_value(&mut args).map(PathBuf::from)),
            "--analyze" => out.analyze = true,
            "--day" => {
                let v = args.next().ok_or("Missing value for --day")?;
                out.day = Some(goals::parse_weekday(&v).ok_or_else(|| format!("Unknown day: {}", v))?);
            }
            "--set-key" => out.set_key = Some(args.next().ok_or("Missing value for --set-key")?),
            "--clear-key" => out.clear_key = true,
            "-h" | "--help" => out.help = true,
            flag if flag.starts_with('-') => return Err(format!("Unknown arg: {}", flag).into()),
            _ => {
                if out.source.is_some() {
                    return Err(format!("Unexpected extra argument: {}", a).into());
                }
                out.source = Some(a.clone());
            }
        }
    }

    if out.desc && out.sort.is_none() {
        return Err("--desc needs --sort <column>".into());
    }
    Ok(out)
}

fn optional_value<I: Iterator<Item = String>>(args: &mut Peekable<I>) -> Option<String> {
    match args.peek() {
        Some(v) if !v.starts_with('-') => args.next(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(v: &[&str]) -> Result<CliArgs, Box<dyn Error>> {
        parse_args(v.iter().map(|s| s!(*s)))
    }

    #[test]
    fn flags_in_any_order() {
        let a = parse(&["--sort", "decks", "page.html", "--desc", "--day", "sexta"]).unwrap();
        assert_eq!(a.source.as_deref(), Some("page.html"));
        assert_eq!(a.sort.as_deref(), Some("decks"));
        assert!(a.desc);
        assert_eq!(a.day, Some(Weekday::Fri));
    }

    #[test]
    fn export_dir_is_optional() {
        assert_eq!(parse(&["p.html", "--export"]).unwrap().export, Some(None));
        assert_eq!(parse(&["--export", "--analyze", "p.html"]).unwrap().export, Some(None));
        assert_eq!(
            parse(&["p.html", "--export", "reports"]).unwrap().export,
            Some(Some(PathBuf::from("reports")))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--schema", "wide"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["a.html", "b.html"]).is_err());
        assert!(parse(&["a.html", "--desc"]).is_err());
        assert!(parse(&["--day"]).is_err());
    }
}
