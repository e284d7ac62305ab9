//! docpress - markdown report publisher

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use docpress::export::{Exporter, InsertStrategy, PdfExporter, RequestsExporter};
use docpress::{Block, Outline, Report, Store};

#[derive(Parser)]
#[command(name = "docpress")]
#[command(version, about = "Markdown report publisher", long_about = None)]
#[command(after_help = "EXAMPLES:
    docpress requests report.md          Emit the document API request batch
    docpress pdf report.md -o out.pdf    Render a print-layout PDF
    docpress save report.md              Keep a timestamped copy under output/
    docpress info report.md              Show report structure")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress progress messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Emit the document API request batch as JSON
    Requests {
        /// Input markdown file, or - for stdin
        input: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Anchor each block after the previous one instead of at the
        /// document head (document order instead of reversed)
        #[arg(long)]
        append: bool,
    },

    /// Render the print layout to a PDF file
    Pdf {
        /// Input markdown file, or - for stdin
        input: String,

        /// Output file (defaults to the input name with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keep a timestamped copy under the output directory
    Save {
        /// Input markdown file, or - for stdin
        input: String,

        /// Basename for the saved file
        #[arg(long, default_value = "report")]
        name: String,

        /// File extension
        #[arg(long, default_value = "md")]
        format: String,

        /// Output directory
        #[arg(long, default_value = "output")]
        dir: PathBuf,
    },

    /// Show report structure without converting
    Info {
        /// Input markdown file, or - for stdin
        input: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> docpress::Result<()> {
    let quiet = cli.quiet;

    match cli.command {
        Command::Requests {
            input,
            output,
            append,
        } => {
            let report = load_report(&input)?;
            let strategy = if append {
                InsertStrategy::Append
            } else {
                InsertStrategy::Start
            };
            let exporter = RequestsExporter::with_strategy(strategy);

            match output {
                Some(path) => {
                    let mut file = fs::File::create(&path)?;
                    exporter.export(&report, &mut file)?;
                    if !quiet {
                        println!("wrote {}", path.display());
                    }
                }
                None => {
                    let stdout = io::stdout();
                    exporter.export(&report, &mut stdout.lock())?;
                }
            }
        }

        Command::Pdf { input, output } => {
            let report = load_report(&input)?;
            let path = output.unwrap_or_else(|| default_pdf_path(&input));
            let mut file = fs::File::create(&path)?;
            PdfExporter::new().export(&report, &mut file)?;
            if !quiet {
                println!("wrote {}", path.display());
            }
        }

        Command::Save {
            input,
            name,
            format,
            dir,
        } => {
            let report = load_report(&input)?;
            let store = Store::with_dir(dir);
            let path = store.save(&report.body, &name, &format)?;
            if !quiet {
                println!("File successfully saved to: {}", path.display());
            }
        }

        Command::Info { input } => {
            let report = load_report(&input)?;
            show_info(&report);
        }
    }

    Ok(())
}

fn load_report(input: &str) -> docpress::Result<Report> {
    let body = if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };
    Ok(Report::from_markdown(body))
}

fn default_pdf_path(input: &str) -> PathBuf {
    if input == "-" {
        PathBuf::from("report.pdf")
    } else {
        Path::new(input).with_extension("pdf")
    }
}

fn show_info(report: &Report) {
    let outline = Outline::parse(&report.body);

    let mut headings = 0;
    let mut paragraphs = 0;
    let mut lists = 0;
    let mut items = 0;
    for block in &outline.blocks {
        match block {
            Block::Heading { .. } => headings += 1,
            Block::Paragraph { .. } => paragraphs += 1,
            Block::List { items: list, .. } => {
                lists += 1;
                items += list.len();
            }
        }
    }

    println!("Title: {}", report.title);
    println!("Lines: {}", report.line_count());
    println!("Headings: {headings}");
    println!("Paragraphs: {paragraphs}");
    println!("Lists: {lists} ({items} items)");
}
