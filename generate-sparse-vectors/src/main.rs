use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vectorlink_fixtures::{
    params::SparseParams, sparse::SparseGenerator, util::file_or_stdout_writer,
};

/// Print sql that creates a `vectors` table and fills it with seeded
/// random sparse vectors, each stored as a format-9 binary blob
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Command {
    /// path to a json file with generation parameters. flags given on the
    /// command line override its fields
    #[arg(short, long)]
    config: Option<String>,

    /// path to the output file. if empty, writes to stdout
    #[arg(short, long)]
    output: Option<String>,

    /// number of rows [default: 500000]
    #[arg(long)]
    samples: Option<usize>,
    /// total dimensionality of every vector [default: 20000]
    #[arg(long)]
    dimensionality: Option<u32>,
    /// stored (index, value) pairs per vector, at most the dimensionality [default: 200]
    #[arg(long)]
    nonzeros: Option<u32>,
    /// [default: 0]
    #[arg(long)]
    seed: Option<u64>,
    /// [default: vectors]
    #[arg(long)]
    table: Option<String>,
    /// log progress every N rows, 0 to disable [default: 100000]
    #[arg(long)]
    progress: Option<usize>,
}

impl Command {
    fn params(&self) -> Result<SparseParams, anyhow::Error> {
        let mut params = match &self.config {
            Some(path) => SparseParams::from_json_file(path)
                .with_context(|| format!("could not load configuration file {path}"))?,
            None => SparseParams::default(),
        };
        if let Some(samples) = self.samples {
            params.samples = samples;
        }
        if let Some(dimensionality) = self.dimensionality {
            params.dimensionality = dimensionality;
        }
        if let Some(nonzeros) = self.nonzeros {
            params.nonzeros = nonzeros;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(table) = &self.table {
            params.table = table.clone();
        }
        if let Some(progress) = self.progress {
            params.progress = progress;
        }

        Ok(params)
    }
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("generate_sparse_vectors=info".parse()?)
                .add_directive("vectorlink_fixtures=info".parse()?),
        )
        .init();

    let args = Command::parse();
    let generator =
        SparseGenerator::new(args.params()?).context("invalid sparse generation parameters")?;

    let writer =
        file_or_stdout_writer(args.output.as_ref()).context("could not create output file")?;
    generator
        .write_sql(writer)
        .context("could not write sparse vectors")?;

    Ok(())
}
