// =============================================================================
// ALMANAC — Résolution d'identifiants à travers une chaîne de catégories
// =============================================================================
//
// Une valeur entre dans la catégorie de base (seed) et traverse une suite de
// transitions jusqu'à la catégorie terminale (location). Chaque transition
// est une liste de règles d'intervalles demi-ouverts à décalage constant ;
// une valeur qu'aucune règle ne couvre passe telle quelle.
//
// Architecture :
//   core/    → Le moteur pur (catégories, règles, chaîne, résolveur)
//   loader/  → Lecture des entrées (format texte, TOML)
//   config   → Réglages de l'outil
//   solve    → Le pipeline complet, jusqu'au minimum terminal
//   error    → L'erreur de haut niveau
//
// =============================================================================

pub mod core;
pub mod loader;
pub mod config;
pub mod solve;
pub mod error;
