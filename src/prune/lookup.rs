//! Lookup structures derived from the mapping table.

use crate::table::{OtuRow, TaxId};
use log::warn;
use std::collections::{HashMap, HashSet};

/// Membership set and rename map built once from the mapping table rows.
///
/// * `tax_ids` - every taxid present in the table (used by the filter pass)
/// * `otu_by_tax_id` - taxid to OTU label (used by the rename pass); for a
///   taxid listed more than once, the last row wins
///
/// Immutable after construction.
///
/// # Example
/// ```
/// use otuprune::prune::TaxidLookup;
/// use otuprune::table::OtuRow;
///
/// let rows = [OtuRow::new(9606, "OTU_A"), OtuRow::new(9606, "OTU_B")];
/// let lookup = TaxidLookup::from_rows(&rows);
///
/// assert_eq!(lookup.len(), 1);
/// assert_eq!(lookup.otu(9606), Some("OTU_B"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaxidLookup {
    tax_ids: HashSet<TaxId>,
    otu_by_tax_id: HashMap<TaxId, String>,
}

impl TaxidLookup {
    /// Builds the lookup structures from table rows, in row order.
    pub fn from_rows(rows: &[OtuRow]) -> Self {
        rows.iter().cloned().collect()
    }

    /// Returns the set of all taxids in the table.
    pub fn tax_ids(&self) -> &HashSet<TaxId> {
        &self.tax_ids
    }

    /// Returns the taxid to OTU label map.
    pub fn otu_map(&self) -> &HashMap<TaxId, String> {
        &self.otu_by_tax_id
    }

    /// Returns `true` if `tax_id` is in the table.
    pub fn contains(&self, tax_id: TaxId) -> bool {
        self.tax_ids.contains(&tax_id)
    }

    /// Returns the OTU label `tax_id` maps to, if any.
    pub fn otu(&self, tax_id: TaxId) -> Option<&str> {
        self.otu_by_tax_id.get(&tax_id).map(String::as_str)
    }

    /// Returns the number of distinct taxids.
    pub fn len(&self) -> usize {
        self.tax_ids.len()
    }

    /// Returns `true` if the table had no rows.
    pub fn is_empty(&self) -> bool {
        self.tax_ids.is_empty()
    }
}

impl FromIterator<OtuRow> for TaxidLookup {
    fn from_iter<I: IntoIterator<Item = OtuRow>>(rows: I) -> Self {
        let mut lookup = TaxidLookup::default();
        for OtuRow { tax_id, otu } in rows {
            lookup.tax_ids.insert(tax_id);
            if let Some(previous) = lookup.otu_by_tax_id.insert(tax_id, otu) {
                let current = &lookup.otu_by_tax_id[&tax_id];
                if previous != *current {
                    warn!("Taxid {tax_id} is mapped to both '{previous}' and '{current}', using '{current}'");
                }
            }
        }
        lookup
    }
}
