//! Tabval CLI - format, parse and inspect typed values

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tabval::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabval")]
#[command(
    author,
    version,
    about = "Format and parse typed table values with patterns and locales"
)]
struct Cli {
    /// Default locale (BCP-47 or POSIX tag); overrides TABVAL_LOCALE and LANG
    #[arg(short, long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render values written in canonical form through a pattern
    Format {
        /// Value kind: boolean, number, text, date, timeofday, datetime
        #[arg(short, long)]
        kind: ValueKind,

        /// Display pattern (default: the kind's default pattern)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Values in canonical form, e.g. 2007-07-20 or 1234.5
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Parse text through a pattern and print the resulting value
    Parse {
        /// Value kind: boolean, number, text, date, timeofday, datetime
        #[arg(short, long)]
        kind: ValueKind,

        /// Input pattern (default: the kind's default pattern)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Print query literals instead of canonical values
        #[arg(long)]
        literal: bool,

        /// Text to parse
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// List the default pattern of every kind
    Defaults,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    install_settings(cli.locale.as_deref())?;

    match cli.command {
        Commands::Format {
            kind,
            pattern,
            values,
        } => format_values(kind, pattern.as_deref(), &values),
        Commands::Parse {
            kind,
            pattern,
            literal,
            inputs,
        } => parse_inputs(kind, pattern.as_deref(), literal, &inputs),
        Commands::Defaults => list_defaults(),
    }
}

fn install_settings(locale: Option<&str>) -> Result<()> {
    let settings = match locale {
        Some(tag) => {
            let locale =
                Locale::parse(tag).with_context(|| format!("Invalid --locale '{}'", tag))?;
            FormatSettings::new(locale)
        }
        None => FormatSettings::from_env(),
    };
    tracing::debug!(locale = %settings.default_locale, "installing format settings");
    if settings.install().is_err() {
        bail!("Format settings were already installed");
    }
    Ok(())
}

fn format_values(kind: ValueKind, pattern: Option<&str>, values: &[String]) -> Result<()> {
    // Canonical input is read with the kind default under en-US
    let reader = FormatSettings::global().create_default(kind, Some(&Locale::en_us()));
    let writer = ValueFormatter::create_from_pattern(kind, pattern, None)
        .context("Failed to create formatter")?;

    let mut out = io::stdout().lock();
    for text in values {
        let value = reader.parse(text);
        if value.is_null() {
            bail!("'{}' is not a canonical {} value", text, kind);
        }
        let rendered = writer
            .format(&value)
            .with_context(|| format!("Failed to format '{}'", text))?;
        writeln!(out, "{}", rendered).context("Failed to write to stdout")?;
    }
    Ok(())
}

fn parse_inputs(
    kind: ValueKind,
    pattern: Option<&str>,
    literal: bool,
    inputs: &[String],
) -> Result<()> {
    let formatter = ValueFormatter::create_from_pattern(kind, pattern, None)
        .context("Failed to create formatter")?;

    let mut out = io::stdout().lock();
    for text in inputs {
        let value = formatter.parse(text);
        let shown = if literal && !value.is_null() {
            value
                .to_query_literal()
                .with_context(|| format!("No query literal for '{}'", text))?
        } else {
            value.to_debug_string()
        };
        writeln!(out, "{}", shown).context("Failed to write to stdout")?;
    }
    Ok(())
}

fn list_defaults() -> Result<()> {
    let formatters = ValueFormatter::create_default_formatters(None);

    let mut out = io::stdout().lock();
    for (kind, formatter) in &formatters {
        writeln!(
            out,
            "{}\t{}\t{}",
            kind,
            formatter.pattern(),
            formatter.locale()
        )
        .context("Failed to write to stdout")?;
    }
    Ok(())
}
