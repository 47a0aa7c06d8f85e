use ndarray::Array2;
use std::collections::BTreeSet;

use crate::models::VariantFeatures;

/// One-hot encoding of the category attributes of the feature table.
///
/// Columns are grouped by attribute (`category_name` first) and sorted by value
/// inside each group. Missing values contribute no column.
#[derive(Debug, Clone)]
pub struct EncodedFeatures {
    pub columns: Vec<String>,
    pub matrix: Array2<f32>,
}

const ATTRIBUTES: [&str; 2] = ["category_name", "sub_category_name"];

fn attribute(row: &VariantFeatures, attr: usize) -> Option<&str> {
    match attr {
        0 => row.category_name.as_deref(),
        _ => row.sub_category_name.as_deref(),
    }
}

pub fn encode(rows: &[VariantFeatures]) -> EncodedFeatures {
    let mut columns = Vec::new();
    let mut offsets = Vec::with_capacity(ATTRIBUTES.len());

    let mut vocabularies: Vec<Vec<&str>> = Vec::with_capacity(ATTRIBUTES.len());
    for (attr, attr_name) in ATTRIBUTES.iter().enumerate() {
        let values: BTreeSet<&str> = rows.iter().filter_map(|r| attribute(r, attr)).collect();
        offsets.push(columns.len());
        columns.extend(values.iter().map(|v| format!("{}_{}", attr_name, v)));
        vocabularies.push(values.into_iter().collect());
    }

    let mut matrix = Array2::<f32>::zeros((rows.len(), columns.len()));
    for (i, row) in rows.iter().enumerate() {
        for (attr, vocabulary) in vocabularies.iter().enumerate() {
            if let Some(value) = attribute(row, attr) {
                if let Ok(pos) = vocabulary.binary_search(&value) {
                    matrix[[i, offsets[attr] + pos]] = 1.0;
                }
            }
        }
    }

    EncodedFeatures { columns, matrix }
}
