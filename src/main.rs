// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn};

use mysqldump_converter::Parser as DumpParser;
use mysqldump_converter::{render_migration, render_tables, Dump, RenderConfig};

/// Convert mysqldump files into PHP seed arrays and Laravel migrations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert INSERT row data into PHP array literals
    Php(PhpArgs),
    /// Convert CREATE TABLE schemas into Laravel migration files
    Laravel(LaravelArgs),
}

#[derive(Args)]
struct PhpArgs {
    /// Path to the mysqldump .sql file
    input: PathBuf,

    /// Directory the generated files are written into
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,

    /// Rows a table may hold before its data moves to an overflow file
    #[arg(long, default_value_t = 1000)]
    max_rows: usize,

    /// Spaces of indentation for rendered rows
    #[arg(long, default_value_t = 4)]
    indent: usize,
}

#[derive(Args)]
struct LaravelArgs {
    /// Path to the mysqldump .sql file
    input: PathBuf,

    /// Directory the generated files are written into
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Php(args) => convert_php(&args),
        Commands::Laravel(args) => convert_laravel(&args),
    }
}

/// Info-level logging unless RUST_LOG overrides it
fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    if env::var("RUST_LOG").is_err() {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.format_timestamp_millis().init();
}

fn convert_php(args: &PhpArgs) -> Result<()> {
    let dump = load_dump(&args.input)?;
    let config = RenderConfig {
        max_rows: args.max_rows,
        indent: " ".repeat(args.indent),
    };
    let output = render_tables(&dump.tables, &config);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let target = args.out_dir.join(format!("{}_converted_sql.php", file_stem(&args.input)));
    write_file(&target, &output.script)?;
    for artifact in &output.overflows {
        write_file(&args.out_dir.join(&artifact.file_name), &artifact.script)?;
    }

    info!(
        "{}: {} tables rendered, {} statements skipped, {} overflow files -> {}",
        args.input.display(),
        dump.tables.len(),
        dump.skipped.len(),
        output.overflows.len(),
        target.display()
    );
    Ok(())
}

fn convert_laravel(args: &LaravelArgs) -> Result<()> {
    let dump = load_dump(&args.input)?;
    if dump.migrations.is_empty() {
        warn!(
            "no usable CREATE TABLE statements in {}",
            args.input.display()
        );
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut written: Vec<String> = Vec::new();
    for unit in &dump.migrations {
        let file = render_migration(unit);
        if written.contains(&file.file_name) {
            warn!(
                "duplicate CREATE TABLE `{}`; overwriting {}",
                unit.table, file.file_name
            );
        }
        write_file(&args.out_dir.join(&file.file_name), &file.script)?;
        written.push(file.file_name);
    }

    info!(
        "{}: {} migration files written to {}",
        args.input.display(),
        dump.migrations.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn load_dump(input: &Path) -> Result<Dump> {
    let content =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let dump = DumpParser::parse_dump(&content);
    for record in &dump.skipped {
        info!("skipped: {} ({})", record.fragment, record.reason);
    }
    Ok(dump)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dump".to_string())
}
