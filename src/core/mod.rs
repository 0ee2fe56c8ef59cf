// =============================================================================
// CORE — Le moteur de résolution
// =============================================================================
//
// Ce module regroupe toute la logique pure :
// pas de fichier, pas de texte, pas de configuration — uniquement des
// catégories, des règles d'intervalles et la traversée de la chaîne.
//
// Architecture :
//   category  → les étapes du pipeline (seed ... location)
//   range     → valeurs i64 et intervalles demi-ouverts
//   rule      → une règle (destination, source, longueur)
//   map       → une transition A → B = liste ordonnée de règles
//   chain     → toutes les transitions, indexées par catégorie source
//   validate  → la vérification d'une chaîne mal formée
//   resolve   → le résolveur (valeur par valeur ou par intervalles)
//   batch     → un lot de graines réduit à sa plus petite valeur terminale
//
// =============================================================================

pub mod category;
pub mod range;
pub mod rule;
pub mod map;
pub mod chain;
pub mod validate;
pub mod resolve;
pub mod batch;
