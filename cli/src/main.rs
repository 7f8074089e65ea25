//! folio CLI - running header and footer placement tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use folio::engine::{build_descriptors, resolve_numbers};
use folio::{
    Band, ContentTemplate, Folio, JsonFormat, Layout, Metadata, NumberingStart, PlacementOptions,
    Side, Theme,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Compute running header and footer placements for paginated documents", long_about = None)]
struct Cli {
    /// Page layout, e.g. "title,toc,body*12,back*2"
    #[arg(value_name = "LAYOUT")]
    layout: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct LayoutArgs {
    /// Page layout, e.g. "title,toc,body*12,back*2"
    #[arg(value_name = "LAYOUT", required_unless_present = "layout_file")]
    layout: Option<String>,

    /// Read the layout from a JSON file instead
    #[arg(long, value_name = "FILE", conflicts_with = "layout")]
    layout_file: Option<PathBuf>,

    /// Theme JSON file (stock theme if omitted)
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Where virtual page numbering starts
    #[arg(long, value_enum, env = "FOLIO_START_AT")]
    start_at: Option<StartAt>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute placements for every page
    Place {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Suppress running headers
        #[arg(long)]
        noheader: bool,

        /// Suppress running footers
        #[arg(long)]
        nofooter: bool,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author
        #[arg(long)]
        author: Option<String>,

        /// Document date, YYYY-MM-DD or RFC 3339 (for {docdate} and {docyear})
        #[arg(long, value_name = "DATE", value_parser = parse_date)]
        date: Option<DateTime<Utc>>,

        /// Header content for every page (placeholders allowed)
        #[arg(long, value_name = "TEXT")]
        header: Option<String>,

        /// Alignment of --header content
        #[arg(long, value_enum, default_value = "center")]
        header_align: Align,

        /// TrueType/OpenType font used to measure text
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the role, side and virtual number of every page
    Numbers {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print the stock theme as JSON
    Theme {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StartAt {
    /// Number from the title page
    Title,
    /// Number from the table of contents
    Toc,
    /// Number from the first body page
    Body,
}

impl From<StartAt> for NumberingStart {
    fn from(start: StartAt) -> Self {
        match start {
            StartAt::Title => NumberingStart::Title,
            StartAt::Toc => NumberingStart::Toc,
            StartAt::Body => NumberingStart::Body,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Align {
    Left,
    Center,
    Right,
}

impl From<Align> for folio::Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => folio::Alignment::Left,
            Align::Center => folio::Alignment::Center,
            Align::Right => folio::Alignment::Right,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Place {
            layout,
            noheader,
            nofooter,
            title,
            author,
            date,
            header,
            header_align,
            font,
            json,
            compact,
            output,
        }) => {
            let metadata = Metadata {
                title,
                author,
                date,
            };
            let options = PlacementOptions::new()
                .with_noheader(noheader)
                .with_nofooter(nofooter)
                .with_metadata(metadata);
            let header = header.map(|text| ContentTemplate::new(text, header_align.into()));
            let format = json.then_some(if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            });
            cmd_place(
                &layout,
                options,
                header,
                font.as_deref(),
                format,
                output.as_deref(),
            )
        }
        Some(Commands::Numbers { layout }) => cmd_numbers(&layout),
        Some(Commands::Theme { output }) => cmd_theme(output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: place with the stock theme if a layout is provided
            if let Some(layout) = cli.layout {
                let args = LayoutArgs {
                    layout: Some(layout),
                    layout_file: None,
                    theme: None,
                    start_at: None,
                };
                cmd_place(&args, PlacementOptions::new(), None, None, None, None)
            } else {
                println!("{}", "Usage: folio <LAYOUT>".yellow());
                println!("       folio --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
        .map_err(|e| format!("invalid date '{}': {}", s, e))
}

fn load_layout(args: &LayoutArgs) -> Result<Layout, Box<dyn std::error::Error>> {
    let layout: Layout = match (&args.layout, &args.layout_file) {
        (_, Some(path)) => serde_json::from_str(&fs::read_to_string(path)?)?,
        (Some(s), None) => Layout::parse(s)?,
        (None, None) => return Err("no layout given".into()),
    };
    log::debug!("Loaded layout with {} pages", layout.len());
    Ok(layout)
}

fn load_theme(args: &LayoutArgs) -> Result<Theme, Box<dyn std::error::Error>> {
    let theme = match &args.theme {
        Some(path) => Theme::from_file(path)?,
        None => Theme::default(),
    };
    Ok(match args.start_at {
        Some(start) => theme.with_start_at(start.into()),
        None => theme,
    })
}

fn cmd_place(
    args: &LayoutArgs,
    options: PlacementOptions,
    header: Option<ContentTemplate>,
    font: Option<&Path>,
    format: Option<JsonFormat>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_layout(args)?;

    let mut theme = load_theme(args)?;
    if let Some(template) = header {
        theme = theme.with_band_content(Band::Header, template);
    }

    let mut folio = Folio::new().with_theme(theme).with_options(options);
    if let Some(path) = font {
        folio = folio.with_font_file(path)?;
    }

    let result = folio.place(&layout);
    let rendered = match format {
        Some(format) => result.to_json(format)?,
        None => result.to_text(),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!(
            "{} {} placements to {}",
            "Saved".green(),
            result.placements.len(),
            path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_numbers(args: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_layout(args)?;
    let theme = load_theme(args)?;

    let descriptors = build_descriptors(&layout.pages);
    let numbers = resolve_numbers(theme.running_content_start_at, &descriptors);

    println!("{}", "Page Numbering".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (page, number) in descriptors.iter().zip(&numbers) {
        let side = match Side::of(page.physical_index) {
            Side::Recto => "recto",
            Side::Verso => "verso",
        };
        let number = number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".dimmed().to_string());
        let marker = if page.is_role_first { "*" } else { " " };
        println!(
            "{:>5} {} {:<6} {:<6} {}",
            page.physical_index,
            marker,
            page.role,
            side,
            number.bold()
        );
    }

    Ok(())
}

fn cmd_theme(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = Theme::default().to_json()?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "folio".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Running header and footer placement tool");
    println!();
    println!("License: MIT");
}
