use std::error::Error;

use perfbench_report::cli;
use perfbench_report::dataset::Dataset;
use perfbench_report::pivot::SummaryTable;
use perfbench_report::plot;

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = cli::cli();

    let mut df = Dataset::load(
        &arguments.first,
        &["type", "order", "density", "runtime_igraph"],
    )?;
    let mut df2 = Dataset::load(&arguments.second, &["order", "density", "runtime_ours"])?;

    // milliseconds to seconds
    df.millis_to_secs();
    df2.millis_to_secs();

    plot::runtime_boxplot(&df.melt(), &arguments.figure)?;

    println!("{}", df.len());
    println!("{}", df2.len());

    let merged = df.concat(df2);

    let disagreements = merged.disagreements();
    if !disagreements.is_empty() {
        for trial in &disagreements {
            println!(
                "DISAGREEMENT order={} density={} path={}",
                trial.order,
                trial.density,
                trial.graph_path.as_deref().unwrap_or("?")
            );
        }
        println!("{} trials where igraph and ours disagree", disagreements.len());
    }

    let table = SummaryTable::build(&merged);
    println!("{}", table);

    Ok(())
}
