// Heuristic package extraction from archive contents
//
// Extractors scan entry names and selected entry contents to recover the
// third-party packages an application bundles, without executing anything.
// Each heuristic is independent and best-effort; results are merged and
// deduplicated per framework.

pub mod common;
pub mod flutter;
pub mod react_native;
