//! Build executor with progress reporting.
//!
//! Runs a [`BuildAction`] for every retained unit of a batch. Library units
//! are built before entry points so that the binder finds every ALI file of
//! a main program's closure already on disk. The first failure stops the
//! build.

use std::path::PathBuf;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::builder::action::{ActionError, BuildAction};
use crate::builder::emitter::{Emission, TargetEmitter};
use crate::builder::events::BuildEvent;
use crate::builder::graph::BuildGraph;
use crate::builder::naming::ArtifactNamer;
use crate::builder::toolchain::Toolchain;
use crate::util::process::CommandRunner;

/// How build progress is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFormat {
    /// Status lines and a progress bar on stderr
    #[default]
    Human,
    /// One JSON event per line on stdout
    Json,
}

/// Everything a successful build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Targets and entry points declared for the batch
    pub emission: Emission,
    /// Closure edges registered while emitting
    pub graph: BuildGraph,
    /// Object files written, in build order
    pub objects: Vec<PathBuf>,
    /// Executables linked
    pub executables: Vec<PathBuf>,
    /// Number of units compiled
    pub units_built: usize,
}

/// Build executor with progress tracking.
pub struct BuildExecutor<'a, R: CommandRunner + ?Sized> {
    namer: &'a ArtifactNamer,
    toolchain: &'a Toolchain,
    runner: &'a R,
    verbose: bool,
    format: MessageFormat,
    link: bool,
}

impl<'a, R: CommandRunner + ?Sized> BuildExecutor<'a, R> {
    /// Create a new build executor.
    pub fn new(namer: &'a ArtifactNamer, toolchain: &'a Toolchain, runner: &'a R) -> Self {
        BuildExecutor {
            namer,
            toolchain,
            runner,
            verbose: false,
            format: MessageFormat::Human,
            link: false,
        }
    }

    /// Enable verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the message format.
    pub fn message_format(mut self, format: MessageFormat) -> Self {
        self.format = format;
        self
    }

    /// Also link every entry point.
    pub fn link(mut self, link: bool) -> Self {
        self.link = link;
        self
    }

    /// Build `sources`.
    pub fn execute(&self, sources: &[PathBuf]) -> Result<BuildReport, ActionError> {
        let start = Instant::now();

        let mut report = BuildReport::default();
        report.emission = TargetEmitter::new(self.namer).emit(&[], sources, &mut report.graph);

        if report.emission.sources.is_empty() {
            return Err(ActionError::NoSources);
        }

        let order = self.build_order(&report.emission);
        let link_count = if self.link {
            report.emission.entry_points.len()
        } else {
            0
        };

        if self.verbose && self.format == MessageFormat::Human {
            eprintln!("   Compiling {} unit(s)", order.len());
            if link_count > 0 {
                eprintln!("     Linking {} program(s)", link_count);
            }
        }

        let total = order.len() + link_count;
        let pb = if !self.verbose && self.format == MessageFormat::Human && total > 1 {
            let pb = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let result = self.run(&order, &mut report, pb.as_ref());

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        let elapsed = start.elapsed();
        match self.format {
            MessageFormat::Json => {
                if let Err(ref e) = result {
                    println!("{}", BuildEvent::error(e.to_string()).to_json());
                }
                let event = BuildEvent::finished(
                    result.is_ok(),
                    elapsed.as_millis() as u64,
                    report.units_built as u64,
                );
                println!("{}", event.to_json());
            }
            MessageFormat::Human if result.is_ok() => {
                eprintln!(
                    "    Finished {} unit(s) in {:.2}s",
                    report.units_built,
                    elapsed.as_secs_f64()
                );
            }
            MessageFormat::Human => {}
        }

        result.map(|()| report)
    }

    fn run(
        &self,
        order: &[PathBuf],
        report: &mut BuildReport,
        pb: Option<&ProgressBar>,
    ) -> Result<(), ActionError> {
        let action = BuildAction::new(self.namer, self.toolchain, self.runner);

        for unit in order {
            let name = unit
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if let Some(pb) = pb {
                pb.set_message(name.clone());
            } else if self.verbose && self.format == MessageFormat::Human {
                eprintln!("   Compiling {}", name);
            }

            let targets: Vec<PathBuf> = self
                .namer
                .object_artifact(unit, None)
                .into_iter()
                .chain(self.namer.summary_artifact(unit, None))
                .collect();

            let outcome = action.build(&targets, std::slice::from_ref(unit))?;
            report.units_built += 1;

            if self.format == MessageFormat::Json {
                println!(
                    "{}",
                    BuildEvent::compiled(unit, outcome.objects.clone()).to_json()
                );
                if let Some(ref bind) = outcome.bound {
                    let event = BuildEvent::BinderGenerated {
                        unit: unit.clone(),
                        files: vec![bind.body.clone(), bind.spec.clone()],
                    };
                    println!("{}", event.to_json());
                }
            }

            report.objects.extend(outcome.objects);
            if let Some(pb) = pb {
                pb.inc(1);
            }
        }

        if !self.link {
            return Ok(());
        }

        for unit in &report.emission.entry_points {
            if let Some(pb) = pb {
                pb.set_message(format!("linking {}", unit.display()));
            } else if self.verbose && self.format == MessageFormat::Human {
                eprintln!("     Linking {}", unit.display());
            }

            let executable = action.link(unit)?;
            debug!("linked {}", executable.display());

            if self.format == MessageFormat::Json {
                let event = BuildEvent::UnitLinked {
                    unit: unit.clone(),
                    executable: executable.clone(),
                };
                println!("{}", event.to_json());
            }

            report.executables.push(executable);
            if let Some(pb) = pb {
                pb.inc(1);
            }
        }

        Ok(())
    }

    /// Library units first, then entry points, each in input order.
    fn build_order(&self, emission: &Emission) -> Vec<PathBuf> {
        let (mains, libraries): (Vec<PathBuf>, Vec<PathBuf>) = emission
            .sources
            .iter()
            .cloned()
            .partition(|s| emission.entry_points.contains(s));

        libraries.into_iter().chain(mains).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::action::Tool;
    use crate::test_support::{AdaProject, CommandPattern, MockRunner};

    #[test]
    fn test_libraries_build_before_entry_points() {
        let project = AdaProject::greet_program();
        let runner = MockRunner::gnat();
        let executor = BuildExecutor::new(project.namer(), project.toolchain(), &runner);

        let report = executor
            .execute(&[project.src_path("main.adb"), project.src_path("greet.adb")])
            .unwrap();

        let calls: Vec<String> = runner.calls().iter().map(|c| c.display()).collect();
        assert_eq!(calls.len(), 4);
        assert!(calls[0].ends_with("greet.adb"));
        assert!(calls[1].ends_with("main.adb"));
        assert!(calls[2].starts_with("gnatbind"));
        assert!(calls[3].ends_with("b~main.adb"));

        assert_eq!(report.units_built, 2);
        assert_eq!(
            report.objects,
            vec![
                project.build_path("greet.o"),
                project.build_path("main.o"),
                project.build_path("b~main.o"),
            ]
        );
        assert_eq!(report.emission.entry_points, vec![project.src_path("main.adb")]);
        assert!(report
            .graph
            .requirements(&project.build_path("main.o"))
            .contains(&project.build_path("greet.ali")));
        assert!(report.executables.is_empty());
    }

    #[test]
    fn test_link_entry_points() {
        let project = AdaProject::greet_program();
        let runner = MockRunner::gnat();
        let executor = BuildExecutor::new(project.namer(), project.toolchain(), &runner).link(true);

        let report = executor
            .execute(&[project.src_path("greet.adb"), project.src_path("main.adb")])
            .unwrap();

        let last = runner.calls().last().map(|c| c.display()).unwrap();
        assert!(last.starts_with("gnatlink"));
        assert_eq!(report.executables.len(), 1);
        assert!(report.executables[0].exists());
    }

    #[test]
    fn test_first_failure_stops_build() {
        let project = AdaProject::greet_program();
        let runner = MockRunner::gnat();
        runner.fail(CommandPattern::Contains("greet.adb".to_string()), 1);
        let executor = BuildExecutor::new(project.namer(), project.toolchain(), &runner)
            .message_format(MessageFormat::Json);

        let err = executor
            .execute(&[project.src_path("main.adb"), project.src_path("greet.adb")])
            .unwrap_err();

        assert!(matches!(
            err,
            ActionError::ToolFailed {
                tool: Tool::Compiler,
                ..
            }
        ));
        assert_eq!(runner.calls().len(), 1);
        assert!(!project.build_path("main.o").exists());
    }

    #[test]
    fn test_no_ada_sources() {
        let project = AdaProject::new();
        let runner = MockRunner::gnat();
        let executor = BuildExecutor::new(project.namer(), project.toolchain(), &runner);

        let err = executor
            .execute(&[project.unit("README.txt", "notes")])
            .unwrap_err();
        assert!(matches!(err, ActionError::NoSources));
    }
}
