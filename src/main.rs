use anyhow::{Context, Result};
use cubedocs::{Command, Config, CubePipe, Document, DirSource, Navigation, PageLoader};
use std::io::Write;
use std::path::Path;

fn main() -> Result<()> {
    let config = Config::parse();
    config.init_logging();
    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Build {
            root,
            output,
            default_page,
            open,
        } => build(root, output, default_page, *open),
        Command::Render { root, location } => render(root, location.as_deref()),
        Command::Pipe { program, dir } => pipe(CubePipe {
            program: program.clone(),
            working_dir: dir.clone(),
            ..CubePipe::default()
        }),
    }
}

fn build(root: &Path, output: &Path, default_page: &str, open: bool) -> Result<()> {
    let report = cubedocs::build_site(root, output, default_page)
        .with_context(|| format!("Failed to build site from {}", root.display()))?;

    for slug in &report.skipped {
        eprintln!("Warning: Skipped page {} (output name collision)", slug);
    }

    for slug in &report.failed {
        eprintln!(
            "Warning: Failed to load page {} ({})",
            slug,
            cubedocs::resolve_path(slug)
        );
    }

    println!(
        "Generated {} pages in {} ({} failed)",
        report.written.len(),
        output.display(),
        report.failed.len()
    );

    if open {
        let index_path = output.join("index.html");
        if let Err(e) = open::that(&index_path) {
            eprintln!("Warning: Failed to open {}: {}", index_path.display(), e);
        }
    }

    Ok(())
}

fn render(root: &Path, location: Option<&str>) -> Result<()> {
    let slugs = cubedocs::discover_pages(root, cubedocs::DEFAULT_PAGE)?;
    let document = Document::new(Navigation::from_slugs(&slugs));
    let mut loader = PageLoader::new(DirSource::new(root), document);

    loader.start(location);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", loader.document().content()).context("Failed to write page")?;
    Ok(())
}

fn pipe(pipe: CubePipe) -> Result<()> {
    match pipe.run() {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&output.stdout)
                .context("Failed to relay interpreter output")?;
            writeln!(stdout, "command returned {}", output.return_value())
                .context("Failed to write exit status")?;
        }
        Err(e) => {
            eprintln!("Warning: {:#}", e);
        }
    }
    Ok(())
}
