use std::fmt;
use std::io::Read;
use std::num::{ParseFloatError, ParseIntError};

/// Graph generation methods the experiment benchmarks against, in the
/// fixed display order used by both the chart and the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphType {
    ErdosRenyi,
    BarabasiAlbert,
    Imh,
    PerfectOperations,
}

impl GraphType {
    pub const ALL: [GraphType; 4] = [
        GraphType::ErdosRenyi,
        GraphType::BarabasiAlbert,
        GraphType::Imh,
        GraphType::PerfectOperations,
    ];

    /// The label the experiment writes into the `type` column.
    pub fn csv_name(&self) -> &'static str {
        match self {
            GraphType::ErdosRenyi => "erdos-renyi",
            GraphType::BarabasiAlbert => "barabasi-albert",
            GraphType::Imh => "IMH",
            GraphType::PerfectOperations => "perfectOperations",
        }
    }

    /// Short code used for the summary table column headers.
    pub fn code(&self) -> &'static str {
        match self {
            GraphType::ErdosRenyi => "ER",
            GraphType::BarabasiAlbert => "BA",
            GraphType::Imh => "IMH",
            GraphType::PerfectOperations => "PO",
        }
    }

    /// Tick label on the chart's category axis.
    pub fn tick_label(&self) -> &'static str {
        match self {
            GraphType::ErdosRenyi => "Erdös-Rényi",
            GraphType::BarabasiAlbert => "Barabasi-Albert",
            GraphType::Imh => "IMH",
            GraphType::PerfectOperations => "PO",
        }
    }

    fn from_csv(name: &str) -> Option<GraphType> {
        GraphType::ALL.iter().copied().find(|t| t.csv_name() == name)
    }
}

/// The two implementations whose runtimes are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Igraph,
    Ours,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Igraph, Algorithm::Ours];

    /// The runtime column this algorithm's measurements live in.
    pub fn column(&self) -> &'static str {
        match self {
            Algorithm::Igraph => "runtime_igraph",
            Algorithm::Ours => "runtime_ours",
        }
    }

    /// Display name for legends and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Igraph => "igraph",
            Algorithm::Ours => "ours",
        }
    }

    fn is_perfect_column(&self) -> &'static str {
        match self {
            Algorithm::Igraph => "is_perfect_igraph",
            Algorithm::Ours => "is_perfect_ours",
        }
    }
}

#[derive(Debug)]
pub enum DataError {
    Csv(csv::Error),
    MissingColumn(String),
    Int(ParseIntError),
    Float(ParseFloatError),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> DataError {
        DataError::Csv(err)
    }
}

impl From<ParseIntError> for DataError {
    fn from(err: ParseIntError) -> DataError {
        DataError::Int(err)
    }
}

impl From<ParseFloatError> for DataError {
    fn from(err: ParseFloatError) -> DataError {
        DataError::Float(err)
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Csv(err) => write!(f, "{}", err),
            DataError::MissingColumn(name) => write!(f, "missing column '{}'", name),
            DataError::Int(err) => write!(f, "invalid integer: {}", err),
            DataError::Float(err) => write!(f, "invalid number: {}", err),
        }
    }
}

impl std::error::Error for DataError {}

/// One measured trial. Runtime columns absent from the source file stay
/// `None`, as do the correctness flags the experiment only sometimes emits.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub graph_path: Option<String>,
    pub graph_type: Option<GraphType>,
    pub order: u64,
    pub density: f64,
    pub runtime_igraph: Option<f64>,
    pub runtime_ours: Option<f64>,
    pub is_perfect_igraph: Option<bool>,
    pub is_perfect_ours: Option<bool>,
}

impl Trial {
    pub fn runtime(&self, algorithm: Algorithm) -> Option<f64> {
        match algorithm {
            Algorithm::Igraph => self.runtime_igraph,
            Algorithm::Ours => self.runtime_ours,
        }
    }
}

/// One long-format measurement produced by [`Dataset::melt`], one row per
/// (trial, algorithm column) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub graph_type: Option<GraphType>,
    pub algorithm: Algorithm,
    pub runtime: Option<f64>,
}

/// A loaded benchmark table plus which runtime columns its file carried.
/// The presence flags drive melt (only present columns produce long rows)
/// and survive concatenation as a union.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub trials: Vec<Trial>,
    pub has_igraph: bool,
    pub has_ours: bool,
}

impl Dataset {
    /// Reads a summary CSV. `required` names the columns this file must
    /// carry; a required name absent from the header is a hard error.
    pub fn load(path: &str, required: &[&str]) -> Result<Dataset, DataError> {
        let rdr = csv::Reader::from_path(path)?;
        Dataset::from_reader(rdr, required)
    }

    pub fn from_reader<R: Read>(
        mut rdr: csv::Reader<R>,
        required: &[&str],
    ) -> Result<Dataset, DataError> {
        let headers = rdr.headers()?.clone();
        let index_of = |name: &str| headers.iter().position(|h| h == name);

        for &name in required {
            if index_of(name).is_none() {
                return Err(DataError::MissingColumn(name.to_string()));
            }
        }

        let path_idx = index_of("graph_path");
        let type_idx = index_of("type");
        let order_idx = index_of("order").ok_or(DataError::MissingColumn("order".to_string()))?;
        let density_idx =
            index_of("density").ok_or(DataError::MissingColumn("density".to_string()))?;
        let igraph_idx = index_of(Algorithm::Igraph.column());
        let ours_idx = index_of(Algorithm::Ours.column());
        let perfect_igraph_idx = index_of(Algorithm::Igraph.is_perfect_column());
        let perfect_ours_idx = index_of(Algorithm::Ours.is_perfect_column());

        let mut trials = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty());

            let runtime = |idx| field(idx).map(|s: &str| s.parse::<f64>()).transpose();
            // 0/1 flags; anything else is treated as not recorded
            let flag = |idx| field(idx).and_then(|s: &str| s.parse::<i64>().ok()).map(|v| v != 0);

            trials.push(Trial {
                graph_path: field(path_idx).map(str::to_string),
                graph_type: field(type_idx).and_then(GraphType::from_csv),
                order: record[order_idx].parse()?,
                density: record[density_idx].parse()?,
                runtime_igraph: runtime(igraph_idx)?,
                runtime_ours: runtime(ours_idx)?,
                is_perfect_igraph: flag(perfect_igraph_idx),
                is_perfect_ours: flag(perfect_ours_idx),
            });
        }

        Ok(Dataset {
            trials,
            has_igraph: igraph_idx.is_some(),
            has_ours: ours_idx.is_some(),
        })
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn has_column(&self, algorithm: Algorithm) -> bool {
        match algorithm {
            Algorithm::Igraph => self.has_igraph,
            Algorithm::Ours => self.has_ours,
        }
    }

    /// Converts every present runtime from milliseconds to seconds.
    pub fn millis_to_secs(&mut self) {
        for trial in &mut self.trials {
            if let Some(ms) = trial.runtime_igraph {
                trial.runtime_igraph = Some(ms / 1000.0);
            }
            if let Some(ms) = trial.runtime_ours {
                trial.runtime_ours = Some(ms / 1000.0);
            }
        }
    }

    /// Wide-to-long reshape: one `Measurement` per trial and per runtime
    /// column the file carried, keeping rows whose value is missing.
    pub fn melt(&self) -> Vec<Measurement> {
        let mut long = Vec::new();
        for &algorithm in Algorithm::ALL.iter().filter(|&&a| self.has_column(a)) {
            for trial in &self.trials {
                long.push(Measurement {
                    graph_type: trial.graph_type,
                    algorithm,
                    runtime: trial.runtime(algorithm),
                });
            }
        }
        long
    }

    /// Row-wise union: all rows of `self` followed by all rows of `other`.
    /// No key join takes place; shared (order, density) pairs only meet
    /// later, at the aggregation step.
    pub fn concat(mut self, other: Dataset) -> Dataset {
        self.trials.extend(other.trials);
        Dataset {
            trials: self.trials,
            has_igraph: self.has_igraph || other.has_igraph,
            has_ours: self.has_ours || other.has_ours,
        }
    }

    /// Trials where both implementations recorded a verdict and the
    /// verdicts differ.
    pub fn disagreements(&self) -> Vec<&Trial> {
        self.trials
            .iter()
            .filter(|t| match (t.is_perfect_igraph, t.is_perfect_ours) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            })
            .collect()
    }
}

#[cfg(test)]
fn dataset_from(csv_text: &str, required: &[&str]) -> Result<Dataset, DataError> {
    Dataset::from_reader(csv::Reader::from_reader(csv_text.as_bytes()), required)
}

#[test]
fn should_convert_millis_to_secs() {
    let mut df = dataset_from(
        "type,order,density,runtime_igraph,runtime_ours\n\
         erdos-renyi,10,0.5,1500,250\n",
        &["runtime_igraph"],
    )
    .unwrap();
    df.millis_to_secs();
    let trial = &df.trials[0];
    assert_eq!(trial.runtime_igraph, Some(1.5));
    assert_eq!(trial.runtime_ours, Some(0.25));
    // multiplying back recovers the original milliseconds
    assert!((trial.runtime_ours.unwrap() * 1000.0 - 250.0).abs() < 1e-9);
}

#[test]
fn should_melt_wide_to_long() {
    let df = dataset_from(
        "type,order,density,runtime_igraph,runtime_ours\n\
         erdos-renyi,10,0.5,1.0,2.0\n\
         IMH,20,0.3,3.0,4.0\n\
         barabasi-albert,30,0.7,5.0,6.0\n",
        &[],
    )
    .unwrap();
    let long = df.melt();
    // two algorithm columns, three rows
    assert_eq!(long.len(), 6);
    let igraph: Vec<_> = long
        .iter()
        .filter(|m| m.algorithm == Algorithm::Igraph)
        .collect();
    assert_eq!(igraph.len(), 3);
    assert_eq!(igraph[1].graph_type, Some(GraphType::Imh));
    assert_eq!(igraph[1].runtime, Some(3.0));
    let ours: Vec<_> = long
        .iter()
        .filter(|m| m.algorithm == Algorithm::Ours)
        .collect();
    assert_eq!(ours[2].graph_type, Some(GraphType::BarabasiAlbert));
    assert_eq!(ours[2].runtime, Some(6.0));
}

#[test]
fn should_melt_only_present_columns() {
    let df = dataset_from(
        "type,order,density,runtime_ours\n\
         IMH,10,0.5,2.0\n\
         IMH,20,0.5,4.0\n",
        &[],
    )
    .unwrap();
    let long = df.melt();
    assert_eq!(long.len(), 2);
    assert!(long.iter().all(|m| m.algorithm == Algorithm::Ours));
}

#[test]
fn should_concat_as_row_union() {
    let first = dataset_from(
        "type,order,density,runtime_igraph,runtime_ours\n\
         erdos-renyi,10,0.5,1.0,2.0\n\
         IMH,20,0.3,3.0,4.0\n",
        &[],
    )
    .unwrap();
    let second = dataset_from(
        "type,order,density,runtime_ours\n\
         perfectOperations,30,0.7,5.0\n",
        &[],
    )
    .unwrap();
    let merged = first.concat(second);
    assert_eq!(merged.len(), 3);
    assert!(merged.has_igraph && merged.has_ours);
    // the column only the first file had is missing in the second file's rows
    assert_eq!(merged.trials[2].runtime_igraph, None);
    assert_eq!(merged.trials[2].runtime_ours, Some(5.0));
    // first file's rows come first, unchanged
    assert_eq!(merged.trials[0].runtime_igraph, Some(1.0));
}

#[test]
fn should_load_header_only_csv_as_empty() {
    let df = dataset_from(
        "order,density,runtime_ours\n",
        &["order", "density", "runtime_ours"],
    )
    .unwrap();
    assert!(df.is_empty());
    assert_eq!(df.len(), 0);
    assert!(df.melt().is_empty());
}

#[test]
fn should_error_on_missing_required_column() {
    let err = dataset_from(
        "type,order,density,runtime_ours\n\
         IMH,10,0.5,2.0\n",
        &["runtime_igraph"],
    )
    .unwrap_err();
    match err {
        DataError::MissingColumn(name) => assert_eq!(name, "runtime_igraph"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn should_tolerate_unknown_type_and_extra_columns() {
    let df = dataset_from(
        "graph_path,type,order,density,id,runtime_ours,is_perfect_ours\n\
         graphs/a.g6,mystery,10,0.5,7,2.0,1\n",
        &["runtime_ours"],
    )
    .unwrap();
    let trial = &df.trials[0];
    assert_eq!(trial.graph_type, None);
    assert_eq!(trial.graph_path.as_deref(), Some("graphs/a.g6"));
    assert_eq!(trial.is_perfect_ours, Some(true));
}

#[test]
fn should_find_disagreements() {
    let df = dataset_from(
        "type,order,density,runtime_igraph,is_perfect_igraph,runtime_ours,is_perfect_ours\n\
         IMH,10,0.5,1.0,1,2.0,1\n\
         IMH,20,0.5,1.0,1,2.0,0\n\
         IMH,30,0.5,,,2.0,0\n",
        &[],
    )
    .unwrap();
    let bad = df.disagreements();
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0].order, 20);
}
