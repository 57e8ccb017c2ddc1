use anyhow::Result;
use rsent::RedditSentiment;

const DATA_ROOT: &str = "./data";
const REPORT_ROOT: &str = "./reports";

fn main() -> Result<()> {
    let hw = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);

    let summary = RedditSentiment::new()
        .data_dir(DATA_ROOT)
        .out_dir(REPORT_ROOT)
        .parallelism(hw)
        .forum_concurrency(4)
        .progress(true)
        .progress_label("analysing forums")
        .write_reports()?;

    println!(
        "Analysed {} forums / {} threads / {} comments; {} unknown terms, {} significant. Reports in {}",
        summary.forums,
        summary.threads,
        summary.comments,
        summary.unknown_terms,
        summary.significant_terms,
        summary.out_dir.display()
    );

    Ok(())
}
