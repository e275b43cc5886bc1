use clap::{command, Arg};

#[derive(Debug)]
pub struct CliArgs {
    pub first: String,
    pub second: String,
    pub figure: String,
}

pub fn cli() -> CliArgs {
    let arguments = command!("Benchmark Report")
        .version("1.0")
        .about("Builds the runtime boxplot and the mean-runtime summary table from the perfect-graph experiment CSVs.")
        .arg(
            Arg::new("first")
                .help("Summary CSV with both runtime_igraph and runtime_ours columns")
                .required(false)
                .default_value("../outputs/exp_summary1.csv")
                .index(1),
        )
        .arg(
            Arg::new("second")
                .help("Summary CSV with only the runtime_ours column")
                .required(false)
                .default_value("../outputs/exp_summary2.csv")
                .index(2),
        )
        .arg(
            Arg::new("figure")
                .help("Output path of the boxplot image")
                .long("figure")
                .short('f')
                .default_value("fig.png"),
        )
        .get_matches();

    let first = match arguments.get_one::<String>("first") {
        Some(path) => path.to_string(),
        None => panic!("First input is required"),
    };

    let second = match arguments.get_one::<String>("second") {
        Some(path) => path.to_string(),
        None => panic!("Second input is required"),
    };

    let figure = match arguments.get_one::<String>("figure") {
        Some(path) => path.to_string(),
        None => panic!("Figure output path is required"),
    };

    return CliArgs {
        first,
        second,
        figure,
    };
}
