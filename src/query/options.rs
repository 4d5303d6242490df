use crate::index::build::DataIndex;
use crate::index::types::{Facet, TagSet};
use crate::query::filter::FilterState;
use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selection state offered to the user for one facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    /// Tags currently selected, in selection order
    pub selected: Vec<String>,
    /// Values present in the current result that are not yet selected
    pub selectable: Vec<String>,
}

/// Options for every facet
pub type OptionsUpdate = BTreeMap<Facet, FacetOptions>;

/// Derive the selectable values of every facet from the final result.
///
/// Only values carried by at least one result item are offered, so a
/// selection can never lead to an empty result on its own. Values are listed
/// in the order they first appear while walking the result.
pub fn recalculate(
    index: &DataIndex,
    filters: &FilterState,
    result: &RoaringBitmap,
) -> OptionsUpdate {
    let mut present: [TagSet; 3] = Default::default();

    for slot in result.iter() {
        let Some(item) = index.item(slot) else {
            continue;
        };
        for facet in Facet::ALL {
            let values = &mut present[facet.index()];
            for value in item.facet_values(facet) {
                if !values.contains(value) {
                    values.insert(value.to_string());
                }
            }
        }
    }

    Facet::ALL
        .into_iter()
        .map(|facet| {
            let selected = filters.selected(facet);
            let options = FacetOptions {
                selected: selected.iter().cloned().collect(),
                selectable: present[facet.index()]
                    .iter()
                    .filter(|value| !selected.contains(*value))
                    .cloned()
                    .collect(),
            };
            (facet, options)
        })
        .collect()
}
