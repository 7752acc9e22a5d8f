// src/cli.rs
use std::{env, fs::File, io::BufWriter, path::PathBuf, time::Duration};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use crate::config::options::{EnumerateOptions, ResolveOptions};
use crate::error::OracleError;
use crate::progress::Progress;
use crate::scrape::{self, Oracle, decklist};
use crate::stats::DeckStats;
use crate::{csv, report};

pub enum Command {
    Deck { path: PathBuf, resolve: ResolveOptions, print_cards: bool },
    Dump { legality: String, out: PathBuf, sep: char, enumerate: EnumerateOptions },
}

/// Prints one line per finished item to stderr.
struct CliProgress {
    total: usize,
    done: usize,
}

impl CliProgress {
    fn new() -> Self {
        Self { total: 0, done: 0 }
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label}", self.done, self.total);
    }
    fn item_failed(&mut self, label: &str, err: &OracleError) {
        self.done += 1;
        eprintln!("[{}/{}] {label}: {err}", self.done, self.total);
    }
}

pub fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Deck { path, resolve, print_cards } => run_deck(&path, &resolve, print_cards),
        Command::Dump { legality, out, sep, enumerate } => run_dump(&legality, &out, sep, &enumerate),
    }
}

fn run_deck(path: &PathBuf, opts: &ResolveOptions, print_cards: bool) -> Result<()> {
    let text = decklist::load_decklist(path)
        .wrap_err_with(|| format!("reading decklist {}", path.display()))?;
    let oracle = Oracle::remote();
    let mut progress = CliProgress::new();

    let resolution = scrape::resolve_decklist(&oracle, &text, opts, Some(&mut progress));
    for miss in &resolution.unresolved {
        eprintln!("Unresolved: {} ({})", miss.query, miss.error);
    }
    if let Some(e) = resolution.fatal() {
        bail!("Deck statistics withheld: {e}");
    }

    let stats = DeckStats::compute(&resolution.items);
    print!("{}", report::render(&stats));

    if print_cards {
        for item in resolution.resolved() {
            println!("{}", serde_json::to_string(&item.card)?);
        }
    }
    Ok(())
}

fn run_dump(legality: &str, out: &PathBuf, sep: char, opts: &EnumerateOptions) -> Result<()> {
    let oracle = Oracle::remote();
    let mut progress = CliProgress::new();

    let batch = scrape::dump_legality(&oracle, legality, opts, Some(&mut progress))?;
    for (id, err) in &batch.failed {
        eprintln!("Card {id} skipped: {err}");
    }
    if let Some(e) = batch.fatal() {
        bail!("Dump of '{legality}' aborted: {e}");
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(out).wrap_err_with(|| format!("creating {}", out.display()))?;
    csv::write_cards(BufWriter::new(file), &batch.cards, sep)?;
    println!("Wrote {} card(s) to {}", batch.cards.len(), out.display());
    Ok(())
}

pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut args = args.iter();
    let cmd = match args.next().map(String::as_str) {
        Some("-h" | "--help") | None => {
            eprintln!(include_str!("cli_help.txt"));
            std::process::exit(0);
        }
        Some(c) => c.to_string(),
    };
    let target = args.next().ok_or_else(|| eyre!("Missing argument for '{cmd}'"))?.clone();

    let mut resolve = ResolveOptions::default();
    let mut enumerate = EnumerateOptions::default();
    let mut print_cards = false;
    let mut out: Option<PathBuf> = None;
    let mut sep = ',';

    while let Some(a) = args.next() {
        match a.as_str() {
            "--workers" => {
                let v: usize = next_value(&mut args, a)?.parse()?;
                if v == 0 { bail!("--workers must be at least 1"); }
                resolve.workers = v;
                enumerate.workers = v;
            }
            "--delay-ms" => {
                let v: u64 = next_value(&mut args, a)?.parse()?;
                enumerate.page_delay = Duration::from_millis(v);
            }
            "--cards" => print_cards = true,
            "-o" | "--out" => out = Some(PathBuf::from(next_value(&mut args, a)?)),
            "--format" => {
                sep = match next_value(&mut args, a)?.to_ascii_lowercase().as_str() {
                    "csv" => ',',
                    "tsv" => '\t',
                    other => bail!("Unknown format: {other}"),
                };
            }
            _ => bail!("Unknown arg: {a}"),
        }
    }

    match cmd.as_str() {
        "deck" => Ok(Command::Deck { path: PathBuf::from(target), resolve, print_cards }),
        "dump" => {
            let ext = if sep == '\t' { "tsv" } else { "csv" };
            let out = out.unwrap_or_else(|| PathBuf::from(default_dump_name(&target, ext)));
            Ok(Command::Dump { legality: target, out, sep, enumerate })
        }
        other => Err(eyre!("Unknown command: {other}")),
    }
}

fn next_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str> {
    args.next().map(String::as_str).ok_or_else(|| eyre!("Missing value for {flag}"))
}

/// "Ivory Edition" → "ivory_edition.csv"
fn default_dump_name(legality: &str, ext: &str) -> String {
    let mut stem = s!();
    for word in legality.split_whitespace() {
        if !stem.is_empty() { stem.push('_'); }
        stem.extend(word.chars().filter(|c| c.is_ascii_alphanumeric()).map(|c| c.to_ascii_lowercase()));
    }
    if stem.is_empty() { stem = s!("cards"); }
    join!(&stem, ".", ext)
}
