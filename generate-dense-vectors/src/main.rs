use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vectorlink_fixtures::{
    dense::DenseGenerator, params::DenseParams, util::file_or_stdout_writer,
};

/// Print sql that creates a `vectors` table and fills it with seeded
/// uniform random dense vectors
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

    /// number of rows [default: 100000]
    #[arg(long)]
    samples: Option<usize>,
    /// number of floats per vector [default: 1024]
    #[arg(long)]
    features: Option<usize>,
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
    fn params(&self) -> Result<DenseParams, anyhow::Error> {
        let mut params = match &self.config {
            Some(path) => DenseParams::from_json_file(path)
                .with_context(|| format!("could not load configuration file {path}"))?,
            None => DenseParams::default(),
        };
        if let Some(samples) = self.samples {
            params.samples = samples;
        }
        if let Some(features) = self.features {
            params.features = features;
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
                .add_directive("generate_dense_vectors=info".parse()?)
                .add_directive("vectorlink_fixtures=info".parse()?),
        )
        .init();

    let args = Command::parse();
    let generator =
        DenseGenerator::new(args.params()?).context("invalid dense generation parameters")?;

    let writer =
        file_or_stdout_writer(args.output.as_ref()).context("could not create output file")?;
    generator
        .write_sql(writer)
        .context("could not write dense vectors")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = Command::try_parse_from(["generate-dense-vectors"]).unwrap();
        assert_eq!(DenseParams::default(), args.params().unwrap());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Command::try_parse_from([
            "generate-dense-vectors",
            "--samples",
            "3",
            "--features",
            "8",
            "--seed",
            "42",
            "--table",
            "dense",
        ])
        .unwrap();
        let params = args.params().unwrap();
        assert_eq!(3, params.samples);
        assert_eq!(8, params.features);
        assert_eq!(42, params.seed);
        assert_eq!("dense", params.table);
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join(format!(
            "generate-dense-vectors-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"samples": 10, "features": 4, "seed": 5}"#).unwrap();

        let args = Command::try_parse_from([
            "generate-dense-vectors",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "6",
        ])
        .unwrap();
        let params = args.params().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(10, params.samples);
        assert_eq!(4, params.features);
        assert_eq!(6, params.seed);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = Command::try_parse_from([
            "generate-dense-vectors",
            "--config",
            "/nonexistent/dense-config.json",
        ])
        .unwrap();
        assert!(args.params().is_err());
    }
}
