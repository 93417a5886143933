use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use fig_reader_core::{load_figure_with, FigError, FigureNode, LoadOptions};
use tracing_subscriber::EnvFilter;

fn main() -> fig_reader_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { input, options } => run_summary(&input, &options),
        Commands::Dump {
            input,
            output,
            options,
        } => run_dump(&input, output.as_deref(), &options),
    }
}

fn run_summary(input: &Path, args: &OptionArgs) -> fig_reader_core::Result<()> {
    let figure = load_figure_with(input, &args.resolve()?)?;
    print!("{}", render_summary(&figure));
    Ok(())
}

fn run_dump(input: &Path, output: Option<&Path>, args: &OptionArgs) -> fig_reader_core::Result<()> {
    let figure = load_figure_with(input, &args.resolve()?)?;
    let json = to_json(&figure)?;
    match output {
        Some(path) => {
            tracing::info!(?path, "writing figure dump");
            std::fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn to_json(figure: &FigureNode) -> fig_reader_core::Result<String> {
    serde_json::to_string_pretty(figure).map_err(dump_error)
}

fn dump_error(err: serde_json::Error) -> FigError {
    FigError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("failed to serialise figure as JSON: {err}"),
    ))
}

fn render_summary(figure: &FigureNode) -> String {
    let mut out = format!(
        "figure: {} properties, {} axes\n",
        figure.properties.len(),
        figure.children.len()
    );
    for (index, axes) in figure.children.iter().enumerate() {
        out.push_str(&format!(
            "  axes {index}: {} properties, {} error-bar series\n",
            axes.properties.len(),
            axes.children.len()
        ));
        for series in &axes.children {
            out.push_str(&format!(
                "    {:?}: {} points, color [{:.3}, {:.3}, {:.3}]\n",
                series.label,
                series.len(),
                series.color[0],
                series.color[1],
                series.color[2]
            ));
        }
    }
    out
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Reads MATLAB figure files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the axes and error-bar series found in a figure.
    Summary {
        /// Path to the `.fig` file.
        input: PathBuf,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Decode a figure and write the tree as JSON.
    Dump {
        /// Path to the `.fig` file.
        input: PathBuf,
        /// Output path; the JSON is printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON file with load options.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Keep series whose x, y and error bounds differ in length.
    #[arg(long)]
    permissive: bool,
}

impl OptionArgs {
    fn resolve(&self) -> Result<LoadOptions, FigError> {
        let mut options = match &self.config {
            Some(path) => LoadOptions::from_json_file(path)?,
            None => LoadOptions::default(),
        };
        if self.permissive {
            options.length_check = fig_reader_core::LengthCheck::Permissive;
        }
        tracing::debug!(?options, "resolved load options");
        Ok(options)
    }
}
