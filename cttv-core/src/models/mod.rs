pub mod clinvar;
pub mod variant;

// re-export for cleaner imports
pub use self::clinvar::{ClinvarRecord, VariantMeasure};
pub use self::variant::VariantRecord;
