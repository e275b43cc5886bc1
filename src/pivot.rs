use std::collections::BTreeMap;
use std::fmt;

use crate::dataset::{Algorithm, Dataset, GraphType};

/// The fixed column sequence of the summary table: graph type outer,
/// algorithm inner.
pub const COLUMNS: [(GraphType, Algorithm); 8] = [
    (GraphType::ErdosRenyi, Algorithm::Igraph),
    (GraphType::ErdosRenyi, Algorithm::Ours),
    (GraphType::BarabasiAlbert, Algorithm::Igraph),
    (GraphType::BarabasiAlbert, Algorithm::Ours),
    (GraphType::Imh, Algorithm::Igraph),
    (GraphType::Imh, Algorithm::Ours),
    (GraphType::PerfectOperations, Algorithm::Igraph),
    (GraphType::PerfectOperations, Algorithm::Ours),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub order: u64,
    pub density: f64,
    /// Mean runtime per [`COLUMNS`] entry; `None` where no trial contributed.
    pub cells: [Option<f64>; 8],
}

/// Mean runtimes grouped by (order, density), one column per
/// (graph type, algorithm) pair, rows sorted by key.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn build(data: &Dataset) -> SummaryTable {
        #[derive(Default, Clone, Copy)]
        struct Acc {
            sum: f64,
            count: u64,
        }

        // Densities are non-negative, so their bit patterns sort in
        // numeric order and make a usable BTreeMap key.
        let mut groups: BTreeMap<(u64, u64), [Acc; 8]> = BTreeMap::new();

        for trial in &data.trials {
            // trials without a graph type have no column to land in
            let graph_type = match trial.graph_type {
                Some(t) => t,
                None => continue,
            };
            let accs = groups
                .entry((trial.order, trial.density.to_bits()))
                .or_default();
            for (i, &(col_type, algorithm)) in COLUMNS.iter().enumerate() {
                if col_type != graph_type {
                    continue;
                }
                if let Some(runtime) = trial.runtime(algorithm) {
                    accs[i].sum += runtime;
                    accs[i].count += 1;
                }
            }
        }

        let rows = groups
            .into_iter()
            .map(|((order, density_bits), accs)| SummaryRow {
                order,
                density: f64::from_bits(density_bits),
                cells: accs.map(|acc| {
                    (acc.count > 0).then(|| acc.sum / acc.count as f64)
                }),
            })
            .collect();

        SummaryTable { rows }
    }

    /// Display labels of the eight columns, outer then inner.
    pub fn column_labels() -> [(&'static str, &'static str); 8] {
        let mut labels = [("", ""); 8];
        for (i, (graph_type, algorithm)) in COLUMNS.iter().enumerate() {
            labels[i] = (graph_type.code(), algorithm.label());
        }
        labels
    }
}

const CELL_WIDTH: usize = 12;

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order_width = self
            .rows
            .iter()
            .map(|r| r.order.to_string().len())
            .chain(["order".len()].into_iter())
            .max()
            .unwrap_or(5);
        let density_width = self
            .rows
            .iter()
            .map(|r| r.density.to_string().len())
            .chain(["density".len()].into_iter())
            .max()
            .unwrap_or(7);
        let index_width = order_width + 1 + density_width;

        let labels = SummaryTable::column_labels();

        // outer header: one code over each igraph/ours pair
        write!(f, "{:index_width$}", "")?;
        for (code, _) in labels.iter().step_by(2) {
            write!(f, "{:>width$}", code, width = 2 * CELL_WIDTH)?;
        }
        writeln!(f)?;

        // inner header: algorithm labels
        write!(f, "{:index_width$}", "")?;
        for (_, algorithm) in labels.iter() {
            write!(f, "{:>CELL_WIDTH$}", algorithm)?;
        }
        writeln!(f)?;

        writeln!(f, "{:<order_width$} {:<density_width$}", "order", "density")?;

        for row in &self.rows {
            write!(
                f,
                "{:<order_width$} {:<density_width$}",
                row.order, row.density
            )?;
            for cell in &row.cells {
                match cell {
                    Some(value) => write!(f, "{:>CELL_WIDTH$.6}", value)?,
                    None => write!(f, "{:>CELL_WIDTH$}", "NaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use crate::dataset::{DataError, Trial};

#[cfg(test)]
fn trial(graph_type: GraphType, order: u64, density: f64, igraph: Option<f64>, ours: Option<f64>) -> Trial {
    Trial {
        graph_path: None,
        graph_type: Some(graph_type),
        order,
        density,
        runtime_igraph: igraph,
        runtime_ours: ours,
        is_perfect_igraph: None,
        is_perfect_ours: None,
    }
}

#[cfg(test)]
fn dataset_of(trials: Vec<Trial>) -> Dataset {
    Dataset {
        trials,
        has_igraph: true,
        has_ours: true,
    }
}

#[test]
fn should_order_summary_columns() {
    assert_eq!(
        SummaryTable::column_labels(),
        [
            ("ER", "igraph"),
            ("ER", "ours"),
            ("BA", "igraph"),
            ("BA", "ours"),
            ("IMH", "igraph"),
            ("IMH", "ours"),
            ("PO", "igraph"),
            ("PO", "ours"),
        ]
    );

    // a two-row, two-key dataset lands in the right cells
    let table = SummaryTable::build(&dataset_of(vec![
        trial(GraphType::Imh, 10, 0.5, Some(1.0), Some(2.0)),
        trial(GraphType::ErdosRenyi, 20, 0.3, Some(3.0), Some(4.0)),
    ]));
    assert_eq!(table.rows.len(), 2);
    // rows sorted by (order, density)
    assert_eq!(table.rows[0].order, 10);
    assert_eq!(table.rows[1].order, 20);
    // IMH pair sits at columns 4 and 5
    assert_eq!(table.rows[0].cells[4], Some(1.0));
    assert_eq!(table.rows[0].cells[5], Some(2.0));
    assert_eq!(table.rows[0].cells[0], None);
    // ER pair sits at columns 0 and 1
    assert_eq!(table.rows[1].cells[0], Some(3.0));
    assert_eq!(table.rows[1].cells[1], Some(4.0));
}

#[test]
fn should_average_rows_sharing_a_key() {
    let table = SummaryTable::build(&dataset_of(vec![
        trial(GraphType::BarabasiAlbert, 10, 0.5, Some(1.0), Some(3.0)),
        trial(GraphType::BarabasiAlbert, 10, 0.5, Some(2.0), Some(5.0)),
    ]));
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].cells[2], Some(1.5));
    assert_eq!(table.rows[0].cells[3], Some(4.0));
}

#[test]
fn should_drop_rows_without_a_graph_type() {
    let mut untyped = trial(GraphType::Imh, 10, 0.5, Some(1.0), None);
    untyped.graph_type = None;
    let table = SummaryTable::build(&dataset_of(vec![untyped]));
    assert!(table.rows.is_empty());
}

#[test]
fn should_summarize_end_to_end() -> Result<(), DataError> {
    let first = "type,order,density,runtime_igraph,runtime_ours\n\
                 erdos-renyi,10,0.5,1000,500\n\
                 barabasi-albert,10,0.5,1000,500\n\
                 IMH,10,0.5,1000,500\n\
                 perfectOperations,10,0.5,1000,500\n";
    let second = "order,density,runtime_ours\n";

    let mut df = Dataset::from_reader(
        csv::Reader::from_reader(first.as_bytes()),
        &["type", "order", "density", "runtime_igraph"],
    )?;
    let mut df2 = Dataset::from_reader(
        csv::Reader::from_reader(second.as_bytes()),
        &["order", "density", "runtime_ours"],
    )?;
    df.millis_to_secs();
    df2.millis_to_secs();

    let table = SummaryTable::build(&df.concat(df2));
    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!((row.order, row.density), (10, 0.5));
    for (i, &(_, algorithm)) in COLUMNS.iter().enumerate() {
        let expected = match algorithm {
            Algorithm::Igraph => 1.0,
            Algorithm::Ours => 0.5,
        };
        assert_eq!(row.cells[i], Some(expected));
    }

    let rendered = table.to_string();
    assert!(rendered.contains("ER"));
    assert!(rendered.contains("igraph"));
    assert!(rendered.contains("order"));
    Ok(())
}
