//! Builds an ID3 decision tree from a CSV file and classifies a sample with it.

use anyhow::{bail, Context, Result};
use clap::Parser;
use csv::ReaderBuilder;
use rusty_id3::data::dataset::CategoricalDataset;
use rusty_id3::data::encoder::{read_records, LabelEncoder};
use rusty_id3::metrics::confusion::ClassificationMetrics;
use rusty_id3::trees::params::Id3Params;
use rusty_id3::trees::{Id3Classifier, Sample};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "id3")]
#[command(about = "ID3 decision tree classifier for categorical CSV data", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV file, one sample per row
    #[arg(long)]
    data: PathBuf,

    /// Comma-separated column names in column order; defaults to the CSV header
    #[arg(long)]
    attributes: Option<String>,

    /// Name of the class column
    #[arg(long = "class")]
    class_label: String,

    /// The first row of the CSV file is a header
    #[arg(long)]
    header: bool,

    /// Cells are already non-negative integer codes
    #[arg(long)]
    encoded: bool,

    /// Attribute value of the sample to classify, as name=value (repeatable)
    #[arg(long = "sample")]
    sample: Vec<String>,

    /// Train on this fraction of the rows and report accuracy on the rest
    #[arg(long)]
    evaluate: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut reader = ReaderBuilder::new()
        .has_headers(cli.header)
        .from_path(&cli.data)
        .with_context(|| format!("failed to open {}", cli.data.display()))?;

    let names = match (&cli.attributes, cli.header) {
        (Some(list), _) => Id3Params::parse_names(list),
        (None, true) => reader
            .headers()
            .context("failed to read the CSV header")?
            .iter()
            .map(|name| name.trim().to_string())
            .collect(),
        (None, false) => bail!("column names are required: pass --attributes or --header"),
    };
    let params = Id3Params::with_names(names, &cli.class_label)?;
    let class_index = params.class_index();

    let (encoder, dataset) = if cli.encoded {
        (None, CategoricalDataset::<u32>::from_csv_codes(reader)?)
    } else {
        let records = read_records(reader)?;
        let (encoder, dataset) = LabelEncoder::fit_transform::<u32>(&records)?;
        (Some(encoder), dataset)
    };
    info!(
        rows = dataset.nrows(),
        columns = dataset.ncols(),
        "loaded dataset"
    );

    let mut classifier = Id3Classifier::new(params);

    match cli.evaluate {
        Some(train_size) => {
            let (train, test) = dataset.train_test_split(train_size, cli.seed)?;
            classifier.fit(&train)?;
            if test.is_empty() {
                bail!("the test split is empty, lower --evaluate");
            }
            let predictions = classifier.predict(&test)?;
            let labels = test.column_values(class_index);
            println!(
                "Accuracy: {}%",
                classifier.accuracy(&labels, &predictions)? * 100.0
            );
            println!(
                "Coverage: {}%",
                classifier.coverage(&labels, &predictions)? * 100.0
            );
        }
        None => {
            classifier.fit(&dataset)?;
        }
    }

    let tree = classifier.tree().context("tree was not built")?;
    match &encoder {
        Some(encoder) => print!("{}", tree.render_with(encoder, class_index)),
        None => print!("{}", tree),
    }

    if cli.sample.is_empty() {
        return Ok(());
    }
    let (sample, unknown): (Sample<u32>, Vec<String>) = match &encoder {
        Some(encoder) => classifier.parse_encoded_sample(cli.sample.as_slice(), encoder)?,
        None => (classifier.parse_sample(cli.sample.as_slice())?, Vec::new()),
    };
    if !unknown.is_empty() {
        info!(attributes = ?unknown, "sample has categories not present in the data");
    }

    match classifier.classify_with_unknown(&sample, &unknown)? {
        Some(class) => match &encoder {
            Some(encoder) => println!("Classification result: {}", encoder.decode(class_index, class)?),
            None => println!("Classification result: {}", class),
        },
        None => println!("Classification result: no classification"),
    }
    Ok(())
}
