//! Entry point for the sysdash TUI. Parses args, resolves the endpoint and runs the App.

use anyhow::Context;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use sysdash::app::App;
use sysdash::fetch::{endpoint_url, DEFAULT_URL};
use sysdash::profiles::{
    default_log_path, load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use sysdash::scheduler::{DEFAULT_PERIOD, MIN_PERIOD};
use tracing_subscriber::EnvFilter;

struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    interval_ms: Option<u64>,
    log_file: Option<String>,
    save: bool,
    dry_run: bool,
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--profile NAME|-P NAME] [--save] [--interval MS|-i MS] [--log-file PATH] [--dry-run] [http://HOST:PORT/api/system]"
    )
}

fn parse_interval(v: Option<String>) -> Result<Option<u64>, String> {
    match v {
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("Invalid interval '{s}': expected milliseconds")),
        None => Err("--interval needs a value in milliseconds".into()),
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sysdash".into());
    let mut url: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut interval_ms: Option<u64> = None;
    let mut log_file: Option<String> = None;
    let mut save = false; // --save
    let mut dry_run = false; // --dry-run

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(usage(&prog));
            }
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--interval" | "-i" => {
                interval_ms = parse_interval(it.next())?;
            }
            "--log-file" => {
                log_file = it.next();
            }
            "--save" => {
                save = true;
            }
            "--dry-run" => {
                dry_run = true;
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--interval=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    interval_ms = parse_interval(Some(v.to_string()))?;
                }
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {}", usage(&prog)));
                }
            }
        }
    }
    Ok(ParsedArgs {
        url,
        profile,
        interval_ms,
        log_file,
        save,
        dry_run,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reuse the same parsing logic for testability
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    // before profile resolution so an unreadable profiles.json is logged
    init_logging(parsed.log_file.as_deref())?;

    let Some(entry) = resolve_entry(&parsed)? else {
        return Ok(());
    };
    let url = endpoint_url(&entry.url)?;
    let period = entry
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_PERIOD)
        .max(MIN_PERIOD);

    if parsed.dry_run {
        println!("{url} every {} ms", period.as_millis());
        return Ok(());
    }

    let mut app = App::new(url.as_str(), period);
    app.run().await
}

fn init_logging(path: Option<&str>) -> anyhow::Result<()> {
    let path = path.map(PathBuf::from).unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_env("SYSDASH_LOG").unwrap_or_else(|_| EnvFilter::new("sysdash=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// Returns None when the user aborted a prompt
fn resolve_entry(parsed: &ParsedArgs) -> anyhow::Result<Option<ProfileEntry>> {
    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        interval_ms: parsed.interval_ms,
    };

    let mut profiles_mut = profiles_file.clone();
    let entry = match req.resolve(&profiles_file, DEFAULT_URL) {
        ResolveProfile::Direct(entry) => {
            // Possibly save if profile specified and --save or new entry
            if let Some(name) = parsed.profile.as_ref() {
                let persist = match profiles_mut.profiles.get(name) {
                    // New profile: auto-save immediately
                    None => true,
                    Some(existing) if *existing != entry => {
                        parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ))
                    }
                    Some(_) => false,
                };
                if persist {
                    profiles_mut.profiles.insert(name.clone(), entry.clone());
                    save_or_warn(&profiles_mut);
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let picked = line
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| names.get(idx))
                .and_then(|name| profiles_mut.profiles.get(name));
            match picked {
                Some(entry) => {
                    let mut entry = entry.clone();
                    if parsed.interval_ms.is_some() {
                        entry.interval_ms = parsed.interval_ms;
                    }
                    entry
                }
                None => return Ok(None),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter URL (http://HOST:PORT/api/system): ")?;
            if url.trim().is_empty() {
                return Ok(None);
            }
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                interval_ms: parsed.interval_ms,
            };
            profiles_mut.profiles.insert(name, entry.clone());
            save_or_warn(&profiles_mut);
            entry
        }
    };
    Ok(Some(entry))
}

fn save_or_warn(p: &sysdash::profiles::ProfilesFile) {
    if let Err(e) = save_profiles(p) {
        eprintln!("warning: could not save profiles: {e}");
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
