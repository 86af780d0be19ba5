//! Field catalogs, one per asset class.
//!
//! The `<Kind>Field` types are generated by `build.rs` from `catalog/*.tsv`.

use super::field::{CatalogId, Field, FieldFormat};

include!(concat!(env!("OUT_DIR"), "/catalog.rs"));

/// Read-only view over one generated catalog.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    id: CatalogId,
    fields: &'static [&'static Field],
}

impl Catalog {
    pub fn get(id: CatalogId) -> Catalog {
        let fields = match id {
            CatalogId::Stock => StockField::ALL,
            CatalogId::Crypto => CryptoField::ALL,
            CatalogId::Forex => ForexField::ALL,
            CatalogId::Futures => FuturesField::ALL,
        };
        Catalog { id, fields }
    }

    pub fn id(&self) -> CatalogId {
        self.id
    }

    pub fn fields(&self) -> &'static [&'static Field] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks a field up by catalog key (`PRICE`), ignoring ASCII case.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields
            .iter()
            .copied()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Looks a field up by its exact wire name (`close`).
    pub fn by_wire_name(&self, wire_name: &str) -> Option<&'static Field> {
        self.fields
            .iter()
            .copied()
            .find(|f| f.wire_name == wire_name)
    }

    /// Fields whose key or label contains `text`, case-insensitively.
    pub fn search(&self, text: &str) -> Vec<&'static Field> {
        let needle = text.to_lowercase();
        self.fields
            .iter()
            .copied()
            .filter(|f| {
                f.name.to_lowercase().contains(&needle) || f.label.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
