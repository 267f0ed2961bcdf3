use std::fmt;

use geogram_iso::RotationAlignment;
use serde::{Deserialize, Serialize};

use crate::context::AnalyzerContext;
use crate::isogroup::Isogroups;

/// Predicate consulted by the analysis loops; returning `true` stops the loop.
pub type StopPolicy = Box<dyn Fn(&AnalyzerContext<'_>) -> bool>;

/// Transformation applied to freshly produced or accumulated isogroups.
pub type FilterPolicy = Box<dyn Fn(Isogroups) -> Isogroups>;

/// Which collection the filtering policy is applied to after each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterScope {
    /// Filter the next-order groups before they are merged and become the frontier.
    #[default]
    Frontier,
    /// Filter the whole global accumulator after the merge.
    Global,
}

/// Reaction to a pass whose candidates cannot be normalised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Propagate the geometry error and abort the analysis.
    #[default]
    AbortAnalysis,
    /// Discard the pass, log a warning and stop extending.
    SkipPass,
}

/// Typed configuration for a [`crate::GraphAnalyzer`] run.
///
/// Missing stop policies never fire and a missing filter is the identity, so
/// `AnalyzerConfig::default()` expands until no new isogroups appear.
pub struct AnalyzerConfig {
    /// Checked by the outer loop before every detection round.
    pub generation_stop: Option<StopPolicy>,
    /// Checked by the inner loop before every expansion pass.
    pub detection_stop: Option<StopPolicy>,
    /// Applied after every pass that produced candidates.
    pub filter: Option<FilterPolicy>,
    /// Collection the filter applies to.
    pub filter_scope: FilterScope,
    /// Rotation step of the normaliser.
    pub rotation: RotationAlignment,
    /// Handling of degenerate candidate geometry.
    pub degenerate: DegeneratePolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            generation_stop: None,
            detection_stop: None,
            filter: None,
            filter_scope: FilterScope::default(),
            rotation: RotationAlignment::default(),
            degenerate: DegeneratePolicy::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Sets the outer-loop stop predicate.
    pub fn with_generation_stop(
        mut self,
        policy: impl Fn(&AnalyzerContext<'_>) -> bool + 'static,
    ) -> Self {
        self.generation_stop = Some(Box::new(policy));
        self
    }

    /// Sets the inner-loop stop predicate.
    pub fn with_detection_stop(
        mut self,
        policy: impl Fn(&AnalyzerContext<'_>) -> bool + 'static,
    ) -> Self {
        self.detection_stop = Some(Box::new(policy));
        self
    }

    /// Sets the isogroup filter.
    pub fn with_filter(mut self, policy: impl Fn(Isogroups) -> Isogroups + 'static) -> Self {
        self.filter = Some(Box::new(policy));
        self
    }

    /// Sets the collection the filter applies to.
    pub fn with_filter_scope(mut self, scope: FilterScope) -> Self {
        self.filter_scope = scope;
        self
    }

    /// Sets the normaliser rotation policy.
    pub fn with_rotation(mut self, rotation: RotationAlignment) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the degenerate-geometry policy.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub(crate) fn generation_stop(&self, ctx: &AnalyzerContext<'_>) -> bool {
        self.generation_stop.as_ref().map_or(false, |stop| stop(ctx))
    }

    pub(crate) fn detection_stop(&self, ctx: &AnalyzerContext<'_>) -> bool {
        self.detection_stop.as_ref().map_or(false, |stop| stop(ctx))
    }

    pub(crate) fn apply_filter(&self, groups: Isogroups) -> Isogroups {
        match &self.filter {
            Some(filter) => filter(groups),
            None => groups,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("generation_stop", &self.generation_stop.is_some())
            .field("detection_stop", &self.detection_stop.is_some())
            .field("filter", &self.filter.is_some())
            .field("filter_scope", &self.filter_scope)
            .field("rotation", &self.rotation)
            .field("degenerate", &self.degenerate)
            .finish()
    }
}
