//! Sparse vectors and their format-9 blob encoding.
//!
//! The blob is little-endian with no padding:
//!
//! | bytes      | content                         |
//! |------------|---------------------------------|
//! | `4 * k`    | values as `f32`, in sample order |
//! | `4 * k`    | indices as `u32`, same order     |
//! | `4`        | dimensionality as `u32`          |
//! | `1`        | format tag, always `9`           |

use std::{
    collections::HashSet,
    io::{self, Write},
};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rand::seq::index;
use tracing::info;

use crate::{
    params::SparseParams,
    rng::{seeded_rng, unit_floats, FixtureRng},
    sql,
    util::report_progress,
    FixtureError,
};

pub const SPARSE_FORMAT_TAG: u8 = 9;

const PAIR_LEN: usize = std::mem::size_of::<f32>() + std::mem::size_of::<u32>();
const TRAILER_LEN: usize = std::mem::size_of::<u32>() + std::mem::size_of::<u8>();

/// Size in bytes of the blob for a vector with `nonzeros` stored pairs.
pub const fn encoded_len(nonzeros: usize) -> usize {
    nonzeros * PAIR_LEN + TRAILER_LEN
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    values: Vec<f32>,
    indices: Vec<u32>,
    dimensionality: u32,
}

impl SparseVector {
    /// `values[i]` is the value stored at position `indices[i]`.
    pub fn new(
        values: Vec<f32>,
        indices: Vec<u32>,
        dimensionality: u32,
    ) -> Result<Self, FixtureError> {
        if values.len() != indices.len() {
            return Err(FixtureError::InvalidSparseVector(format!(
                "{} values but {} indices",
                values.len(),
                indices.len()
            )));
        }
        if let Some(out_of_range) = indices.iter().find(|&&i| i >= dimensionality) {
            return Err(FixtureError::InvalidSparseVector(format!(
                "index {out_of_range} is outside dimensionality {dimensionality}"
            )));
        }
        let mut seen = HashSet::with_capacity(indices.len());
        if let Some(duplicate) = indices.iter().find(|&&i| !seen.insert(i)) {
            return Err(FixtureError::InvalidSparseVector(format!(
                "index {duplicate} appears more than once"
            )));
        }

        Ok(Self {
            values,
            indices,
            dimensionality,
        })
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn dimensionality(&self) -> u32 {
        self.dimensionality
    }

    pub fn nonzeros(&self) -> usize {
        self.values.len()
    }

    pub fn encode_into<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for &value in &self.values {
            writer.write_f32::<LittleEndian>(value)?;
        }
        for &index in &self.indices {
            writer.write_u32::<LittleEndian>(index)?;
        }
        writer.write_u32::<LittleEndian>(self.dimensionality)?;
        writer.write_u8(SPARSE_FORMAT_TAG)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut blob = Vec::with_capacity(encoded_len(self.nonzeros()));
        self.encode_into(&mut blob)
            .expect("writing into a vec cannot fail");
        blob
    }

    /// Uppercase hex of the blob, ready to go between `x'` and `'`.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.encode())
    }

    pub fn decode(blob: &[u8]) -> Result<Self, FixtureError> {
        if blob.len() < TRAILER_LEN || (blob.len() - TRAILER_LEN) % PAIR_LEN != 0 {
            return Err(FixtureError::MalformedBlob(format!(
                "length {} does not match any number of stored pairs",
                blob.len()
            )));
        }
        let nonzeros = (blob.len() - TRAILER_LEN) / PAIR_LEN;

        let mut reader = blob;
        let mut values = vec![0.0_f32; nonzeros];
        reader.read_f32_into::<LittleEndian>(&mut values)?;
        let mut indices = vec![0_u32; nonzeros];
        reader.read_u32_into::<LittleEndian>(&mut indices)?;
        let dimensionality = reader.read_u32::<LittleEndian>()?;
        let tag = reader.read_u8()?;
        if tag != SPARSE_FORMAT_TAG {
            return Err(FixtureError::MalformedBlob(format!(
                "format tag is {tag}, expected {SPARSE_FORMAT_TAG}"
            )));
        }

        Self::new(values, indices, dimensionality)
    }

    pub fn from_hex(hex: &str) -> Result<Self, FixtureError> {
        Self::decode(&hex::decode(hex)?)
    }
}

pub struct SparseGenerator {
    params: SparseParams,
    rng: FixtureRng,
}

impl SparseGenerator {
    pub fn new(params: SparseParams) -> Result<Self, FixtureError> {
        params.validate()?;
        let rng = seeded_rng(params.seed);
        Ok(Self { params, rng })
    }

    pub fn params(&self) -> &SparseParams {
        &self.params
    }

    /// Indices are drawn first (without replacement, in random order),
    /// then one value per index.
    pub fn next_vector(&mut self) -> SparseVector {
        let dimensionality = self.params.dimensionality;
        let nonzeros = self.params.nonzeros as usize;
        let indices: Vec<u32> = index::sample(&mut self.rng, dimensionality as usize, nonzeros)
            .into_iter()
            .map(|i| i as u32)
            .collect();
        let values = unit_floats(&mut self.rng, nonzeros);

        SparseVector {
            values,
            indices,
            dimensionality,
        }
    }

    /// Writes the table header followed by one insert per sample.
    /// Returns the number of rows written.
    pub fn write_sql<W: Write>(mut self, mut writer: W) -> Result<usize, FixtureError> {
        let samples = self.params.samples;
        let table = self.params.table.clone();
        info!(
            samples,
            dimensionality = self.params.dimensionality,
            nonzeros = self.params.nonzeros,
            seed = self.params.seed,
            blob_bytes = encoded_len(self.params.nonzeros as usize),
            "generating sparse vectors"
        );

        sql::create_table(&mut writer, &table, self.params.dimensionality as usize)?;
        for id in 0..samples {
            let vector = self.next_vector();
            sql::insert_blob(&mut writer, &table, id, &vector.to_hex())?;
            report_progress("sparse", id + 1, samples, self.params.progress);
        }
        writer.flush()?;

        info!(rows = samples, "done");
        Ok(samples)
    }
}
