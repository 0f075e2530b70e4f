use std::io::Write;

use itertools::Itertools;
use tracing::info;

use crate::{
    params::DenseParams,
    rng::{seeded_rng, unit_floats, FixtureRng},
    sql,
    util::report_progress,
    FixtureError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DenseRow {
    pub id: usize,
    pub values: Vec<f32>,
}

impl DenseRow {
    /// Renders the values as `[v0, v1, ...]`, each value being the
    /// shortest decimal that parses back to the same `f32`.
    pub fn vector_literal(&self) -> String {
        format!("[{}]", self.values.iter().join(", "))
    }
}

pub struct DenseGenerator {
    params: DenseParams,
    rng: FixtureRng,
    next_id: usize,
}

impl DenseGenerator {
    pub fn new(params: DenseParams) -> Result<Self, FixtureError> {
        params.validate()?;
        let rng = seeded_rng(params.seed);
        Ok(Self {
            params,
            rng,
            next_id: 0,
        })
    }

    pub fn params(&self) -> &DenseParams {
        &self.params
    }

    /// Draws all values of the next row before moving on, so row `i`
    /// only depends on the seed and the rows before it.
    pub fn next_row(&mut self) -> DenseRow {
        let values = unit_floats(&mut self.rng, self.params.features);
        let id = self.next_id;
        self.next_id += 1;

        DenseRow { id, values }
    }

    /// Writes the table header followed by one insert per sample.
    /// Returns the number of rows written.
    pub fn write_sql<W: Write>(mut self, mut writer: W) -> Result<usize, FixtureError> {
        let samples = self.params.samples;
        let table = self.params.table.clone();
        info!(
            samples,
            features = self.params.features,
            seed = self.params.seed,
            "generating dense vectors"
        );

        sql::create_table(&mut writer, &table, self.params.features)?;
        for _ in 0..samples {
            let row = self.next_row();
            sql::insert_dense(&mut writer, &table, row.id, &row.vector_literal())?;
            report_progress("dense", row.id + 1, samples, self.params.progress);
        }
        writer.flush()?;

        info!(rows = samples, "done");
        Ok(samples)
    }
}
