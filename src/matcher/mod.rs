//! The two matching passes: exact (bit-equal vertices) and nearby
//! (tolerance-quantized). Both build on [`crate::hash_table::EdgeTable`]
//! and [`crate::neighbor::record_neighbors`]; nearby additionally stitches
//! vertices together around a pivot walk.

mod exact;
mod nearby;
