use log::{info, warn};
use machine_learning::training::{TrainerBuilder, TrainerSpec};
use ndarray::{Array2, ArrayView2, Zip};

use crate::{config::ImputerConfig, table::Table, ImputerErr, Result};

/// The outcome of imputing a table.
#[derive(Debug, Clone)]
pub struct Imputation {
    /// The input table with its missing cells filled in.
    pub table: Table,
    /// The cells that were missing in the input.
    pub mask: Array2<bool>,
    /// The model's cost after every epoch.
    pub losses: Vec<f64>,
}

/// How close an imputation got to the true values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImputationReport {
    /// The amount of cells that were imputed and could be scored.
    pub imputed: usize,
    /// The mean absolute error over the imputed cells.
    pub mean_abs_error: f64,
    /// The fraction of imputed cells that match the reference once rounded.
    pub accuracy: f64,
}

/// The result of a full run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub imputation: Imputation,
    pub report: Option<ImputationReport>,
}

/// Fills the missing cells of a table with a denoising autoencoder's reconstruction.
///
/// Missing cells are replaced by zero, the model is trained over the whole table and then every
/// row is reconstructed. Only the cells that were missing take the reconstructed value.
pub fn impute(table: &Table, spec: &TrainerSpec) -> Result<Imputation> {
    let mask = table.missing_mask();
    let missing = mask.iter().filter(|&&m| m).count();

    info!(
        rows = table.nrows(),
        columns = table.ncols(),
        missing = missing;
        "imputing table"
    );

    if table.nrows() > 0 {
        for (name, column) in table.columns().iter().zip(mask.columns()) {
            if column.iter().all(|&m| m) {
                warn!(column = name.as_str(); "column has no observed values");
            }
        }
    }

    let filled = table.filled(0.);
    let (mut model, trainer) = TrainerBuilder::new().build(spec, filled.clone())?;
    let losses = trainer.train(&mut model)?;
    let reconstructed = model.reconstruct(filled.view())?;

    let mut values = table.values().to_owned();
    Zip::from(&mut values)
        .and(&mask)
        .and(&reconstructed)
        .for_each(|v, &missing, &z| {
            if missing {
                *v = z;
            }
        });

    Ok(Imputation {
        table: Table::new(table.columns().to_vec(), values)?,
        mask,
        losses,
    })
}

/// Scores the imputed cells against a complete reference table.
///
/// Cells whose reference value is itself missing are not scored. When nothing was scored every
/// metric is zero.
pub fn evaluate(
    imputed: &Table,
    reference: &Table,
    mask: ArrayView2<bool>,
) -> Result<ImputationReport> {
    check_same("rows", imputed.nrows(), reference.nrows())?;
    check_same("columns", imputed.ncols(), reference.ncols())?;
    check_same("mask rows", mask.nrows(), imputed.nrows())?;
    check_same("mask columns", mask.ncols(), imputed.ncols())?;

    for (got, expected) in imputed.columns().iter().zip(reference.columns()) {
        if got != expected {
            return Err(ImputerErr::ColumnMismatch {
                got: got.clone(),
                expected: expected.clone(),
            });
        }
    }

    let mut imputed_cells = 0;
    let mut abs_error = 0.;
    let mut hits = 0;

    Zip::from(imputed.values())
        .and(reference.values())
        .and(mask)
        .for_each(|&v, &truth, &missing| {
            if !missing || truth.is_nan() {
                return;
            }

            imputed_cells += 1;
            abs_error += (v - truth).abs();
            if v.round() == truth {
                hits += 1;
            }
        });

    if imputed_cells == 0 {
        return Ok(ImputationReport {
            imputed: 0,
            mean_abs_error: 0.,
            accuracy: 0.,
        });
    }

    Ok(ImputationReport {
        imputed: imputed_cells,
        mean_abs_error: abs_error / imputed_cells as f64,
        accuracy: hits as f64 / imputed_cells as f64,
    })
}

/// Reads the configured table, imputes it, writes the result and scores it when a reference is
/// configured.
pub fn run(config: &ImputerConfig) -> Result<RunOutcome> {
    config.validate()?;

    info!("reading table from '{}'", config.input.display());
    let table = Table::read_csv(&config.input)?;

    let imputation = impute(&table, &config.spec())?;

    if let Some(output) = &config.output {
        imputation.table.write_csv(output)?;
        info!("imputed table written to '{}'", output.display());
    }

    let report = match &config.reference {
        Some(path) => {
            let reference = Table::read_csv(path)?;
            let report = evaluate(&imputation.table, &reference, imputation.mask.view())?;
            info!(
                imputed = report.imputed,
                mean_abs_error = report.mean_abs_error,
                accuracy = report.accuracy;
                "imputation scored"
            );
            Some(report)
        }
        None => None,
    };

    Ok(RunOutcome { imputation, report })
}

fn check_same(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(ImputerErr::ShapeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn table(values: Array2<f64>) -> Table {
        let columns = (0..values.ncols()).map(|j| format!("c{j}")).collect();
        Table::new(columns, values).unwrap()
    }

    fn quick_spec() -> TrainerSpec {
        TrainerSpec {
            n_hidden: 2,
            epochs: 20,
            ..TrainerSpec::default()
        }
    }

    #[test]
    fn impute_only_touches_missing_cells() {
        let nan = f64::NAN;
        let input = table(array![
            [1., 0., nan, 1.],
            [0., nan, 1., 0.],
            [1., 1., 0., nan],
        ]);

        let imputation = impute(&input, &quick_spec()).unwrap();

        assert_eq!(imputation.mask, input.missing_mask());
        assert_eq!(imputation.losses.len(), 20);
        assert_eq!(imputation.table.columns(), input.columns());

        Zip::from(imputation.table.values())
            .and(input.values())
            .and(&imputation.mask)
            .for_each(|&v, &original, &missing| {
                if missing {
                    assert!(v > 0. && v < 1., "imputed {v}");
                } else {
                    assert_eq!(v, original);
                }
            });
    }

    #[test]
    fn impute_without_missing_cells_is_identity() {
        let input = table(array![[1., 0.], [0., 1.]]);
        let imputation = impute(&input, &quick_spec()).unwrap();

        assert_eq!(imputation.table, input);
    }

    #[test]
    fn impute_is_reproducible_with_a_seed() {
        let input = table(array![[1., f64::NAN, 0.], [f64::NAN, 1., 1.]]);

        let a = impute(&input, &quick_spec()).unwrap();
        let b = impute(&input, &quick_spec()).unwrap();

        assert_eq!(a.table.filled(-1.), b.table.filled(-1.));
        assert_eq!(a.losses, b.losses);
    }

    #[test]
    fn impute_empty_table_fails() {
        let input = table(Array2::zeros((0, 3)));
        assert!(matches!(
            impute(&input, &quick_spec()),
            Err(ImputerErr::Ml(_))
        ));
    }

    #[test]
    fn evaluate_scores_only_masked_cells() {
        let imputed = table(array![[0.9, 0.2], [0.4, 5.]]);
        let reference = table(array![[1., 1.], [0., 7.]]);
        let mask = array![[true, true], [true, false]];

        let report = evaluate(&imputed, &reference, mask.view()).unwrap();

        assert_eq!(report.imputed, 3);
        assert!((report.mean_abs_error - (0.1 + 0.8 + 0.4) / 3.).abs() < 1e-5);
        assert!((report.accuracy - 2. / 3.).abs() < 1e-5);
    }

    #[test]
    fn evaluate_without_missing_cells_is_zero() {
        let values = table(array![[1., 0.]]);
        let mask = Array2::from_elem((1, 2), false);

        let report = evaluate(&values, &values, mask.view()).unwrap();

        assert_eq!(
            report,
            ImputationReport {
                imputed: 0,
                mean_abs_error: 0.,
                accuracy: 0.
            }
        );
    }

    #[test]
    fn evaluate_rejects_mismatched_tables() {
        let imputed = table(array![[1., 0.]]);
        let mask = Array2::from_elem((1, 2), true);

        let other_shape = table(array![[1., 0.], [0., 1.]]);
        assert!(matches!(
            evaluate(&imputed, &other_shape, mask.view()),
            Err(ImputerErr::ShapeMismatch { .. })
        ));

        let renamed = Table::new(vec!["x".into(), "c1".into()], array![[1., 0.]]).unwrap();
        assert!(matches!(
            evaluate(&imputed, &renamed, mask.view()),
            Err(ImputerErr::ColumnMismatch { .. })
        ));

        let small_mask = Array2::from_elem((1, 1), true);
        assert!(matches!(
            evaluate(&imputed, &imputed, small_mask.view()),
            Err(ImputerErr::ShapeMismatch { .. })
        ));
    }
}
