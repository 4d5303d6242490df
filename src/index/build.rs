use crate::error::{EngineError, Result};
use crate::index::types::{Facet, Item, ItemId, Slot, TagSet};
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;

/// Lowercased text fields of an item, precomputed for free-text matching
#[derive(Debug, Clone)]
pub struct Haystack {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

impl Haystack {
    fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.to_lowercase(),
            description: item.description.to_lowercase(),
            ingredients: item
                .ingredients
                .iter()
                .map(|i| i.name.to_lowercase())
                .collect(),
        }
    }

    /// True if any field contains `needle`, which must already be lowercase
    #[inline]
    pub fn contains(&self, needle: &str) -> bool {
        self.name.contains(needle)
            || self.description.contains(needle)
            || self.ingredients.iter().any(|i| i.contains(needle))
    }
}

/// Immutable lookup structures over the item collection.
///
/// Items are stored by slot, the order in which they were registered. Every
/// identifier set in the engine is a bitmap of slots, so iterating one yields
/// items in registration order.
#[derive(Debug, Clone)]
pub struct DataIndex {
    items: Vec<Item>,
    haystacks: Vec<Haystack>,
    slots: FxHashMap<ItemId, Slot>,
    universe: RoaringBitmap,
    facet_universes: [TagSet; 3],
    /// Per facet, slots carrying each value, aligned with `facet_universes`
    postings: [Vec<RoaringBitmap>; 3],
}

impl DataIndex {
    /// Scan the collection once and build every lookup table.
    ///
    /// Fails only if two items share an identifier.
    pub fn build(items: Vec<Item>) -> Result<Self> {
        let mut slots = FxHashMap::default();
        slots.reserve(items.len());
        let mut facet_universes: [TagSet; 3] = Default::default();
        let mut postings: [Vec<RoaringBitmap>; 3] = Default::default();
        let mut haystacks = Vec::with_capacity(items.len());

        for (slot, item) in items.iter().enumerate() {
            if slots.insert(item.id, slot as Slot).is_some() {
                return Err(EngineError::DuplicateItem(item.id));
            }

            for facet in Facet::ALL {
                let universe = &mut facet_universes[facet.index()];
                let lists = &mut postings[facet.index()];
                for value in item.facet_values(facet) {
                    let pos = match universe.get_index_of(value) {
                        Some(pos) => pos,
                        None => {
                            lists.push(RoaringBitmap::new());
                            universe.insert_full(value.to_string()).0
                        }
                    };
                    lists[pos].insert(slot as Slot);
                }
            }

            haystacks.push(Haystack::from_item(item));
        }

        let universe: RoaringBitmap = (0..items.len() as Slot).collect();

        log::info!(
            "Indexed {} items ({} ingredients, {} appliances, {} utensils)",
            items.len(),
            facet_universes[Facet::Ingredients.index()].len(),
            facet_universes[Facet::Appliances.index()].len(),
            facet_universes[Facet::Utensils.index()].len(),
        );

        Ok(Self {
            items,
            haystacks,
            slots,
            universe,
            facet_universes,
            postings,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by slot
    pub fn item(&self, slot: Slot) -> Option<&Item> {
        self.items.get(slot as usize)
    }

    /// Get an item by identifier
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.slot_of(id).and_then(|slot| self.item(slot))
    }

    /// Resolve an identifier to its slot
    pub fn slot_of(&self, id: ItemId) -> Option<Slot> {
        self.slots.get(&id).copied()
    }

    /// Resolve a slot to its identifier.
    ///
    /// Slots handed out by this index are always in range.
    #[inline]
    pub fn id_of(&self, slot: Slot) -> ItemId {
        self.items[slot as usize].id
    }

    /// Get all items in registration order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn haystack(&self, slot: Slot) -> &Haystack {
        &self.haystacks[slot as usize]
    }

    /// Every slot of the collection
    pub fn universe(&self) -> &RoaringBitmap {
        &self.universe
    }

    /// Distinct values of `facet` across all items, in first-seen order
    pub fn facet_universe(&self, facet: Facet) -> &TagSet {
        &self.facet_universes[facet.index()]
    }

    /// Slots of the items carrying `value` for `facet`
    pub fn postings(&self, facet: Facet, value: &str) -> Option<&RoaringBitmap> {
        self.facet_universe(facet)
            .get_index_of(value)
            .map(|pos| &self.postings[facet.index()][pos])
    }

    /// Map a set of slots to identifiers, preserving slot order
    pub fn ids(&self, slots: &RoaringBitmap) -> Vec<ItemId> {
        slots.iter().map(|slot| self.id_of(slot)).collect()
    }
}
