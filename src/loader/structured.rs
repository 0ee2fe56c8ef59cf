// =============================================================================
// STRUCTURED — Almanach au format TOML
// =============================================================================
//
//   seeds = [79, 14, 55, 13]
//
//   [[maps]]
//   from = "seed"
//   to = "soil"
//   rules = [[50, 98, 2], [52, 50, 48]]
//
// Chaque règle est un triplet [destination, source, longueur], comme dans le
// format texte. Le décodage est entièrement délégué à serde.
//
// =============================================================================

use serde::Deserialize;
use tracing::debug;

use super::{Almanac, LoadError, Loader};
use crate::core::batch::SeedSet;
use crate::core::category::Category;
use crate::core::chain::CategoryMapChain;
use crate::core::map::CategoryMap;
use crate::core::range::Value;
use crate::core::rule::RangeRule;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    seeds: SeedSet,
    #[serde(default)]
    maps: Vec<MapEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapEntry {
    from: Category,
    to: Category,
    #[serde(default)]
    rules: Vec<[Value; 3]>,
}

impl From<MapEntry> for CategoryMap {
    fn from(entry: MapEntry) -> Self {
        let rules = entry
            .rules
            .into_iter()
            .map(|[d, s, l]| RangeRule::new(d, s, l))
            .collect();
        CategoryMap::with_rules(entry.from, entry.to, rules)
    }
}

/// Loader du format TOML
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredLoader;

impl Loader for StructuredLoader {
    fn load(&self, input: &str) -> Result<Almanac, LoadError> {
        let doc: Document = toml::from_str(input)?;
        let chain: CategoryMapChain = doc.maps.into_iter().map(CategoryMap::from).collect();
        debug!(seeds = doc.seeds.len(), maps = chain.len(), "parsed structured almanac");
        Ok(Almanac { seeds: doc.seeds, chain })
    }

    fn name(&self) -> &str {
        "structured"
    }
}
