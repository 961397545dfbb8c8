//! Implementation of `alibuild emit`.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::builder::emitter::TargetEmitter;
use crate::builder::graph::{BuildGraph, GraphEdge};
use crate::util::fs::collect_sources;
use crate::util::GlobalContext;

/// Targets, retained sources and closure edges for a batch of sources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmitPlan {
    pub targets: Vec<PathBuf>,
    pub sources: Vec<PathBuf>,
    pub entry_points: Vec<PathBuf>,
    pub edges: Vec<GraphEdge>,
}

impl EmitPlan {
    /// Serialize the plan as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute what compiling `paths` would produce, without running anything.
pub fn emit(ctx: &GlobalContext, paths: &[PathBuf]) -> Result<EmitPlan> {
    let sources = collect_sources(ctx.cwd(), paths)?;
    let config = ctx.load_config();
    let namer = ctx.namer(&config);

    let mut graph = BuildGraph::new();
    let emission = TargetEmitter::new(&namer).emit(&[], &sources, &mut graph);

    Ok(EmitPlan {
        targets: emission.targets,
        sources: emission.sources,
        entry_points: emission.entry_points,
        edges: graph.edges(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AdaProject;

    #[test]
    fn test_emit_directory() {
        let project = AdaProject::greet_program();
        let mut ctx = GlobalContext::with_cwd(project.root().to_path_buf());
        ctx.set_build_dir(Some(PathBuf::from("build")));

        let plan = emit(&ctx, &[PathBuf::from("src")]).unwrap();

        // greet.adb and greet.ads collapse to one unit
        assert_eq!(plan.sources.len(), 2);
        assert_eq!(plan.entry_points, vec![project.src_path("main.adb")]);
        assert!(plan.targets.contains(&project.build_path("b~main.o")));
        assert!(plan.targets.contains(&project.build_path("b~main.ali")));
        assert!(plan.edges.contains(&GraphEdge {
            target: project.build_path("main.o"),
            requires: project.build_path("greet.ali"),
        }));

        let json = plan.to_json().unwrap();
        assert!(json.contains("\"entry_points\""));
    }
}
