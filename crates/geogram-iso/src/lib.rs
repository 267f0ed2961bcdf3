#![deny(missing_docs)]
#![doc = "Isomorphism classification and geometric normalisation for geogram candidate graphs."]

/// Geometry-free views of geometric graphs.
pub mod canonical;
/// Exact topological isomorphism testing.
pub mod classifier;
/// Isomorphism invariants used as a classification pre-filter.
pub mod invariants;
/// Centroid, scale and rotation normalisation.
pub mod normalize;

pub use canonical::AbstractGraph;
pub use classifier::{find_isomorphism, is_isomorphic, Classifier, StructuralClassifier};
pub use invariants::{invariant_key, StructuralInvariants};
pub use normalize::{centroid, frobenius_norm, normalize, Normalizer, RotationAlignment};
