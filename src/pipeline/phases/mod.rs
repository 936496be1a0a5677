// Pipeline phases for bug localization and repair
//
// Each phase is self-contained with its own prompt construction and
// execution logic, and hands its output to the next phase through the
// analysis context.

#[path = "01_collect.rs"]
pub mod collect;
#[path = "02_graph.rs"]
pub mod graph;
#[path = "03_localize.rs"]
pub mod localize;
#[path = "04_repair.rs"]
pub mod repair;
