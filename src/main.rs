use clap::{Parser, ValueEnum};
use ranklab::batch::{run_batch, BatchConfig, Model};
use ranklab::config;
use ranklab::eval;
use ranklab::formats::{parse_topics, QueryFields, RelevanceJudgments};
use ranklab::scoring::{Bm25Params, JmParams, PrfParams};
use ranklab::tokenizer::TokenSource;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    /// Plain BM25 ranking.
    Bm25,
    /// Jelinek-Mercer language model ranking.
    Jm,
    /// PRF expansion rescored with BM25.
    PrfBm25,
    /// PRF expansion rescored with the JM language model.
    PrfJm,
}

impl From<ModelArg> for Model {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Bm25 => Model::Bm25,
            ModelArg::Jm => Model::JmLm,
            ModelArg::PrfBm25 => Model::PrfBm25,
            ModelArg::PrfJm => Model::PrfJm,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldsArg {
    /// Query from the topic title only.
    Title,
    /// Query from title + description + narrative.
    Full,
}

#[derive(Parser)]
#[command(name = "ranklab", about = "Batch IR ranking and evaluation")]
struct Args {
    /// Topic file with <Query> records
    #[arg(short = 'q', long)]
    topics: PathBuf,

    /// Root directory holding Data_C<nnn> partition directories
    #[arg(short, long)]
    collection: PathBuf,

    /// Directory of Dataset<nnn>.txt relevance judgment files
    #[arg(long)]
    qrels: Option<PathBuf>,

    /// Directory for ranking run files
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Scoring model
    #[arg(short, long, value_enum, default_value_t = ModelArg::Bm25)]
    model: ModelArg,

    /// Topic fields used to build queries
    #[arg(long, value_enum, default_value_t = FieldsArg::Title)]
    fields: FieldsArg,

    /// Comma-separated stop word file merged into the built-in set
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// BM25 term frequency saturation
    #[arg(long, default_value_t = config::BM25_K1)]
    k1: f64,

    /// BM25 length normalization
    #[arg(long, default_value_t = config::BM25_B)]
    b: f64,

    /// BM25 query term frequency saturation
    #[arg(long, default_value_t = config::BM25_K2)]
    k2: f64,

    /// JM smoothing weight on the document model
    #[arg(long, default_value_t = config::JM_LAMBDA)]
    lambda: f64,

    /// PRF: top documents assumed relevant
    #[arg(long, default_value_t = config::PRF_TOP_DOCS)]
    top_docs: usize,

    /// PRF: expansion terms appended to the query
    #[arg(long, default_value_t = config::PRF_EXPANSION_TERMS)]
    expansion_terms: usize,

    /// Write the evaluation report as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ranklab=info")),
        )
        .init();

    let args = Args::parse();

    let source = match &args.stopwords {
        Some(path) => TokenSource::with_stopword_file(path)?,
        None => TokenSource::new(),
    };

    let topic_text = fs::read_to_string(&args.topics)?;
    let records = parse_topics(&topic_text);
    if records.is_empty() {
        eprintln!("Error: no parsable topic records in {:?}", args.topics);
        std::process::exit(1);
    }
    let fields = match args.fields {
        FieldsArg::Title => QueryFields::TitleOnly,
        FieldsArg::Full => QueryFields::Full,
    };
    let queries: Vec<_> = records.iter().map(|r| r.to_query(&source, fields)).collect();
    tracing::info!("parsed {} topics from {:?}", queries.len(), args.topics);

    let batch_config = BatchConfig {
        collection_root: args.collection.clone(),
        output_dir: Some(args.output.clone()),
        model: args.model.into(),
        bm25: Bm25Params {
            k1: args.k1,
            b: args.b,
            k2: args.k2,
        },
        jm: JmParams::with_lambda(args.lambda),
        prf: PrfParams {
            top_docs: args.top_docs,
            expansion_terms: args.expansion_terms,
        },
    };

    let rankings = run_batch(&queries, &source, &batch_config);
    println!(
        "Ranked {} of {} queries (run files in {:?})",
        rankings.len(),
        queries.len(),
        args.output
    );

    if let Some(qrels_dir) = &args.qrels {
        let judgments = RelevanceJudgments::load_dir(qrels_dir)?;
        let report = eval::evaluate(&rankings, &judgments);
        println!();
        println!("--- Evaluation ({} judged queries) ---", report.queries_evaluated);
        println!("MAP:      {:.4}", report.mean_average_precision);
        println!("P@10:     {:.4}", report.mean_precision_at_10);
        println!("DCG@10:   {:.4}", report.mean_dcg_at_10);

        if let Some(report_path) = &args.report {
            let json = serde_json::to_string_pretty(&report)?;
            fs::write(report_path, json)?;
            tracing::info!("wrote evaluation report to {:?}", report_path);
        }
    }

    Ok(())
}
