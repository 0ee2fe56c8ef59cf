// =============================================================================
// TEXT — Le format texte de l'almanach
// =============================================================================
//
//   seeds: 79 14 55 13
//
//   seed-to-soil map:
//   50 98 2
//   52 50 48
//
//   soil-to-fertilizer map:
//   ...
//
// Règles de lecture :
//   - lignes vides ignorées, espaces de bord retirés
//   - une seule ligne `seeds:`
//   - `x-to-y map:` ouvre une transition
//   - `d s l` ajoute une règle à la transition ouverte
//   - tout le reste est une erreur, avec son numéro de ligne
//
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{Almanac, LoadError, Loader};
use crate::core::batch::SeedSet;
use crate::core::category::Category;
use crate::core::chain::CategoryMapChain;
use crate::core::map::CategoryMap;
use crate::core::range::Value;

// Motif constant : compilé une fois, au premier en-tête lu
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)-to-(\w+)\s+map:").expect("header pattern is valid"));

/// Loader du format texte
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader;

fn parse_number(token: &str, line: usize) -> Result<Value, LoadError> {
    match token.parse::<Value>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(LoadError::InvalidNumber { line, token: token.to_string() }),
    }
}

fn parse_category(name: &str, line: usize) -> Result<Category, LoadError> {
    name.parse()
        .map_err(|_| LoadError::UnknownCategory { line, name: name.to_string() })
}

impl Loader for TextLoader {
    fn load(&self, input: &str) -> Result<Almanac, LoadError> {
        let mut seeds: Option<SeedSet> = None;
        let mut maps: Vec<CategoryMap> = Vec::new();
        let mut current: Option<CategoryMap> = None;

        for (i, raw) in input.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            // --- seeds: n n n ---
            if let Some(rest) = line.strip_prefix("seeds:") {
                if seeds.is_some() {
                    return Err(LoadError::DuplicateSeeds { line: line_no });
                }
                let values = rest
                    .split_whitespace()
                    .map(|t| parse_number(t, line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                seeds = Some(SeedSet::new(values));
                maps.extend(current.take());
                continue;
            }

            // --- x-to-y map: ---
            if let Some(caps) = HEADER.captures(line) {
                let from = parse_category(&caps[1], line_no)?;
                let to = parse_category(&caps[2], line_no)?;
                maps.extend(current.take());
                current = Some(CategoryMap::new(from, to));
                continue;
            }

            // --- d s l --- (un signe en tête reste une règle ; parse_number tranche)
            if line.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
                let Some(map) = current.as_mut() else {
                    return Err(LoadError::UnexpectedLine { line: line_no, content: line.to_string() });
                };
                let tokens: Vec<&str> = line.split_whitespace().collect();
                if tokens.len() != 3 {
                    return Err(LoadError::MalformedRule { line: line_no, found: tokens.len() });
                }
                map.add_rule(
                    parse_number(tokens[0], line_no)?,
                    parse_number(tokens[1], line_no)?,
                    parse_number(tokens[2], line_no)?,
                );
                continue;
            }

            return Err(LoadError::UnexpectedLine { line: line_no, content: line.to_string() });
        }
        maps.extend(current.take());

        let seeds = seeds.ok_or(LoadError::MissingSeeds)?;
        for map in &maps {
            debug!(from = %map.from, to = %map.to, rules = map.rules.len(), "parsed map");
        }
        debug!(seeds = seeds.len(), maps = maps.len(), "parsed text almanac");

        Ok(Almanac { seeds, chain: CategoryMapChain::new(maps) })
    }

    fn name(&self) -> &str {
        "text"
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rule::RangeRule;

    const SMALL: &str = "
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-location map:
        0 15 37
    ";

    #[test]
    fn test_load_small() {
        let almanac = TextLoader.load(SMALL).unwrap();
        assert_eq!(almanac.seeds.values, vec![79, 14, 55, 13]);
        assert_eq!(almanac.chain.len(), 2);

        let seed_to_soil = almanac.chain.map_from(Category::Seed).unwrap();
        assert_eq!(seed_to_soil.to, Category::Soil);
        assert_eq!(
            seed_to_soil.rules,
            vec![RangeRule::new(50, 98, 2), RangeRule::new(52, 50, 48)]
        );
    }

    #[test]
    fn test_reload_display_output() {
        let almanac = TextLoader.load(SMALL).unwrap();
        let again = TextLoader.load(&almanac.to_string()).unwrap();
        assert_eq!(again.seeds, almanac.seeds);
        assert_eq!(again.chain.maps(), almanac.chain.maps());
    }

    #[test]
    fn test_values_beyond_32_bits() {
        let almanac = TextLoader
            .load("seeds: 3082872446\nseed-to-location map:\n4131958457 3082872446 10\n")
            .unwrap();
        assert_eq!(almanac.seeds.values, vec![3_082_872_446]);
        assert_eq!(almanac.chain.maps()[0].rules[0].destination_start, 4_131_958_457);
    }

    #[test]
    fn test_missing_seeds() {
        let err = TextLoader.load("seed-to-soil map:\n1 2 3\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingSeeds));
    }

    #[test]
    fn test_duplicate_seeds() {
        let err = TextLoader.load("seeds: 1\nseeds: 2\n").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateSeeds { line: 2 }));
    }

    #[test]
    fn test_unknown_category() {
        let err = TextLoader.load("seeds: 1\n\ncompost-to-soil map:\n").unwrap_err();
        match err {
            LoadError::UnknownCategory { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "compost");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let err = TextLoader.load("seeds: 1 x2\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 1, ref token } if token == "x2"));

        let err = TextLoader
            .load("seeds: 1\nseed-to-soil map:\n1 2 99999999999999999999\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 3, .. }));
    }

    #[test]
    fn test_negative_seed_rejected() {
        let err = TextLoader.load("seeds: -4\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_signed_rule_field_rejected() {
        let err = TextLoader.load("seeds: 1\nseed-to-soil map:\n-1 2 3\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 3, ref token } if token == "-1"));

        // même lecture que pour les graines
        let almanac = TextLoader.load("seeds: +1\nseed-to-soil map:\n+5 2 3\n").unwrap();
        assert_eq!(almanac.seeds.values, vec![1]);
        assert_eq!(almanac.chain.maps()[0].rules, vec![RangeRule::new(5, 2, 3)]);
    }

    #[test]
    fn test_header_ignores_trailing_text() {
        let almanac = TextLoader
            .load("seeds: 7\nseed-to-location map: (sample)\n0 5 10\n")
            .unwrap();
        assert_eq!(almanac.chain.len(), 1);
        assert_eq!(almanac.chain.maps()[0].rules, vec![RangeRule::new(0, 5, 10)]);
    }

    #[test]
    fn test_rule_outside_map() {
        let err = TextLoader.load("seeds: 1\n50 98 2\n").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedLine { line: 2, .. }));
    }

    #[test]
    fn test_malformed_rule() {
        let err = TextLoader.load("seeds: 1\nseed-to-soil map:\n50 98\n").unwrap_err();
        assert!(matches!(err, LoadError::MalformedRule { line: 3, found: 2 }));
    }

    #[test]
    fn test_garbage_line() {
        let err = TextLoader.load("seeds: 1\nhello\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unexpected content 'hello'");
    }

    #[test]
    fn test_empty_map_is_kept() {
        let almanac = TextLoader.load("seeds: 1\nseed-to-location map:\n").unwrap();
        assert_eq!(almanac.chain.len(), 1);
        assert!(almanac.chain.maps()[0].rules.is_empty());
    }
}
