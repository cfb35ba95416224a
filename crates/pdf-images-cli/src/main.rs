use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_images::{ConvertOptions, ImageCollection, SelectedFile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "img2pdf", about = "Combine images into a single PDF", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert images into a PDF, one page per image
    Convert {
        /// Input image file(s), in page order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file (defaults to converted_images.pdf in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        page: PageArgs,

        /// Load options from a JSON file before applying flags
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,
    },

    /// Print where an image of the given size lands on the page
    Layout {
        /// Image width in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Image height in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(clap::Args)]
struct PageArgs {
    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// How images are scaled onto the page
    #[arg(long, value_enum)]
    fit: Option<FitArg>,
}

impl PageArgs {
    /// Overwrite only the options that were given on the command line
    fn apply(&self, options: &mut ConvertOptions) {
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(fit) = self.fit {
            options.fit_mode = fit.into();
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    /// Span the page width for landscape images, the height otherwise
    Orientation,
    /// Scale down until the whole image fits on the page
    Contain,
}

impl From<PaperArg> for pdf_images::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_images::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<FitArg> for pdf_images::FitMode {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Orientation => Self::Orientation,
            FitArg::Contain => Self::Contain,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            page,
            config,
            save_config,
        } => {
            let mut options = match &config {
                Some(path) => ConvertOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ConvertOptions::default(),
            };
            page.apply(&mut options);
            // Nothing to repaint on a terminal
            options.repaint_delay_ms = 0;
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                log::info!("Saved options to {}", path.display());
            }

            let selected = input
                .iter()
                .map(SelectedFile::from_path)
                .collect::<pdf_images::Result<Vec<_>>>()?;

            let mut collection = ImageCollection::new();
            let outcome = collection
                .add_files(selected)
                .context("None of the inputs is an image")?;
            if outcome.duplicates > 0 {
                log::warn!("Skipped {} duplicate file(s)", outcome.duplicates);
            }
            let skipped = input.len() - outcome.accepted;
            if skipped > 0 {
                log::warn!("Skipped {} non-image file(s)", skipped);
            }

            let output_path = output.unwrap_or_else(|| pdf_images::output_path_in(".", &options));
            let files = collection.snapshot();

            let report = pdf_images::convert_to_file(&files, &options, &output_path, |current, total| {
                if current < total {
                    log::info!("[{}/{}] {}", current + 1, total, files[current].name);
                }
            })
            .await?;

            if let Some(report) = report {
                println!(
                    "Converted {} image(s) → {}",
                    report.page_count,
                    report.path.display()
                );
            }
        }

        Commands::Layout {
            width,
            height,
            page,
        } => {
            let mut options = ConvertOptions::default();
            page.apply(&mut options);
            options.validate()?;

            let (page_width, page_height) = options.page_dimensions_mm();
            let layout = pdf_images::PageLayout::compute_with(
                options.fit_mode,
                width,
                height,
                page_width,
                page_height,
            );

            println!("Page Layout:");
            println!(
                "  Page: {} {:.2} x {:.2} mm",
                options.paper_size.name(),
                layout.page_width,
                layout.page_height
            );
            println!("  Image: {} x {} px", layout.image_width, layout.image_height);
            println!("  Size: {:.3} x {:.3} mm", layout.width, layout.height);
            println!("  Offset: ({:.3}, {:.3}) mm", layout.x, layout.y);
            if layout.overflows() {
                println!("  Note: image extends past the page edges");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_rejects_zero_dimensions() {
        assert!(Cli::try_parse_from(["img2pdf", "layout", "--width", "0", "--height", "5"]).is_err());
        assert!(Cli::try_parse_from(["img2pdf", "layout", "--width", "5", "--height", "0"]).is_err());
    }

    #[test]
    fn test_layout_accepts_positive_dimensions() {
        let cli =
            Cli::try_parse_from(["img2pdf", "layout", "--width", "600", "--height", "800"]).unwrap();
        match cli.command {
            Commands::Layout { width, height, .. } => assert_eq!((width, height), (600, 800)),
            _ => panic!("expected layout command"),
        }
    }
}
