//! Target emission.
//!
//! Given the sources handed to a compile step, declare everything that step
//! produces: an object and an ALI file per unit, plus (for entry points) the
//! binder-generated pair and its own object and ALI file. Entry points also
//! get dependency edges on their ALI closure so that touching any withed
//! unit invalidates the main program.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, trace};

use crate::builder::closure::ClosureResolver;
use crate::builder::graph::DependencyGraph;
use crate::builder::naming::ArtifactNamer;
use crate::core::unit::filter_sources;
use crate::scan::is_entry_point;

/// Result of emitting targets for a batch of sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Emission {
    /// Every file the step produces
    pub targets: Vec<PathBuf>,
    /// The retained source units
    pub sources: Vec<PathBuf>,
    /// Retained sources classified as entry points
    pub entry_points: Vec<PathBuf>,
}

/// Computes targets and dependency edges for source batches.
#[derive(Debug, Clone, Copy)]
pub struct TargetEmitter<'a> {
    namer: &'a ArtifactNamer,
}

impl<'a> TargetEmitter<'a> {
    /// Create an emitter naming artifacts with `namer`.
    pub fn new(namer: &'a ArtifactNamer) -> Self {
        TargetEmitter { namer }
    }

    /// Emit targets for `sources`, registering closure edges in `graph`.
    ///
    /// `targets` are the targets the caller would have assumed; they are
    /// replaced entirely by the computed set.
    pub fn emit<G>(&self, targets: &[PathBuf], sources: &[PathBuf], graph: &mut G) -> Emission
    where
        G: DependencyGraph + ?Sized,
    {
        trace!("requested targets {:?}", targets);

        let sources = filter_sources(sources);
        let resolver = ClosureResolver::new(self.namer);

        let mut emission = Emission::default();
        let mut bind_sources = Vec::new();

        for source in &sources {
            let (Some(obj), Some(ali)) = (
                self.namer.object_artifact(source, None),
                self.namer.summary_artifact(source, None),
            ) else {
                continue;
            };

            emission.targets.push(obj.clone());
            emission.targets.push(ali.clone());

            if !is_entry_point(source) {
                continue;
            }

            emission.entry_points.push(source.clone());

            let mut produced = vec![obj, ali];
            if let Some(bind) = self.namer.bind_units(source) {
                produced.push(bind.body.clone());
                produced.push(bind.spec.clone());
                bind_sources.push(bind.body);
                bind_sources.push(bind.spec);
            }

            let closure = resolver.closure_with(source, &mut HashSet::new());
            debug!("{:?} depend on {:?}", produced, closure);
            graph.depends(&produced, &closure);
        }

        if !bind_sources.is_empty() {
            let bind_targets: Vec<PathBuf> = bind_sources
                .iter()
                .filter_map(|b| self.namer.object_artifact(b, None))
                .collect();

            let generated = self.emit(&bind_targets, &bind_sources, graph);
            emission.targets.extend(generated.targets);
        }

        emission.sources = sources;
        debug!("emitting targets {:?}", emission.targets);
        emission
    }
}
