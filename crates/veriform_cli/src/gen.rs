//! `veriform gen`: generate verification artifacts for a batch of designs.
//!
//! Each input file is one design, processed independently:
//!
//! 1. Parse the VHDL file
//! 2. Merge `<netlist-dir>/<design>.json` when present
//! 3. Extract the design spec
//! 4. Render the wrapper, `.sby` configuration and C harness
//! 5. Write everything to `<out>/<design>/`
//!
//! Designs are prepared in parallel, then every design claims its output
//! directory in input order: a later input that resolves to an already
//! claimed design name fails instead of overwriting the earlier one. Writes
//! run in parallel again. A design that fails is reported and counted
//! without affecting the others; results are printed in input order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};
use veriform_config::{discover_config, ProjectConfig};
use veriform_diagnostics::DiagnosticSink;
use veriform_formal::{generate_bundle, write_artifact, WriteOutcome};
use veriform_ir::{is_identifier, DesignSpec};
use veriform_netlist::load_netlist;
use veriform_source::SourceDb;
use veriform_unify::unify;

use crate::pipeline::{load_rtl, print_diagnostics, render_diagnostics, to_document, PipelineError};
use crate::{GenArgs, GlobalArgs};

/// One input file between the prepare and write stages.
struct DesignJob {
    input: PathBuf,
    source_db: SourceDb,
    sink: DiagnosticSink,
    outcome: Result<PreparedDesign, PipelineError>,
}

/// Rendered documents for one design, not yet on disk.
struct PreparedDesign {
    design: String,
    out_dir: PathBuf,
    documents: Vec<(String, String)>,
}

/// What happened to one input file.
struct DesignReport {
    input: PathBuf,
    outcome: Result<DesignOutput, PipelineError>,
    rendered: Vec<String>,
}

/// Files produced for one design.
struct DesignOutput {
    design: String,
    out_dir: PathBuf,
    files: Vec<(PathBuf, WriteOutcome)>,
}

/// Runs the `veriform gen` command.
///
/// Returns exit code 0 if every design succeeded, 1 if any failed.
pub fn run(args: &GenArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = discover_config(global.config.as_deref(), &std::env::current_dir()?)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()?;

    if !global.quiet {
        eprintln!("   Generating {} design(s)", args.inputs.len());
    }

    let reports: Vec<DesignReport> = pool.install(|| {
        let mut jobs: Vec<DesignJob> = args
            .inputs
            .par_iter()
            .map(|input| prepare_job(input, args, &config))
            .collect();
        claim_output_dirs(&mut jobs);
        jobs.into_par_iter()
            .map(|job| finish_job(job, args, global))
            .collect()
    });

    let mut failed = 0;
    for report in &reports {
        print_diagnostics(&report.rendered, args.format);
        match &report.outcome {
            Ok(output) => {
                if !global.quiet {
                    let written = output
                        .files
                        .iter()
                        .filter(|(_, o)| *o == WriteOutcome::Written)
                        .count();
                    eprintln!(
                        "     Wrote {} -> {} ({written} written, {} unchanged)",
                        output.design,
                        output.out_dir.display(),
                        output.files.len() - written
                    );
                }
            }
            Err(_) => {
                failed += 1;
                if !global.quiet {
                    eprintln!("    Failed {}", report.input.display());
                }
            }
        }
    }

    if !global.quiet {
        eprintln!(
            "   Result: {} design(s) generated, {failed} failed",
            reports.len() - failed
        );
    }
    Ok(if failed > 0 { 1 } else { 0 })
}

/// Runs one design up to, but not including, writing its files.
fn prepare_job(input: &Path, args: &GenArgs, config: &ProjectConfig) -> DesignJob {
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let outcome = prepare_design(input, args, config, &mut source_db, &sink);
    DesignJob {
        input: input.to_path_buf(),
        source_db,
        sink,
        outcome,
    }
}

/// Fails every design whose name an earlier input already produced.
///
/// Names are compared case-insensitively: VHDL treats them that way, and the
/// output directories may live on a case-insensitive filesystem.
fn claim_output_dirs(jobs: &mut [DesignJob]) {
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();
    for job in jobs.iter_mut() {
        let design = match &job.outcome {
            Ok(prepared) => prepared.design.clone(),
            Err(_) => continue,
        };
        match claimed.entry(design.to_ascii_lowercase()) {
            Entry::Occupied(first) => {
                debug!(design = %design, input = %job.input.display(), "duplicate design name");
                job.outcome = Err(PipelineError::DuplicateDesign {
                    design,
                    first: first.get().clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(job.input.clone());
            }
        }
    }
}

/// Writes a prepared design and renders everything it reported.
fn finish_job(job: DesignJob, args: &GenArgs, global: &GlobalArgs) -> DesignReport {
    let DesignJob {
        input,
        source_db,
        sink,
        outcome,
    } = job;
    let outcome = outcome.and_then(write_design);
    if let Err(e) = &outcome {
        e.report(&sink);
    }

    let mut diagnostics = sink.take_all();
    if global.quiet {
        diagnostics.retain(|d| d.severity.is_error());
    }
    DesignReport {
        input,
        outcome,
        rendered: render_diagnostics(&diagnostics, &source_db, args.format, global.color),
    }
}

fn prepare_design(
    input: &Path,
    args: &GenArgs,
    config: &ProjectConfig,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<PreparedDesign, PipelineError> {
    // Absolute, so the `.sby` file can name it from the output directory.
    let rtl_path = std::fs::canonicalize(input).map_err(|source| PipelineError::Rtl {
        path: input.to_path_buf(),
        source,
    })?;
    let mut rtl = load_rtl(&rtl_path, source_db, sink)?;

    let netlist = match &args.netlist_dir {
        Some(dir) => {
            let path = dir.join(format!("{}.json", rtl.design_name));
            if path.is_file() {
                debug!(netlist = %path.display(), "merging netlist");
                Some(load_netlist(&path, Some(rtl.design_name.as_str()), sink)?)
            } else {
                rtl.note(format!(
                    "No netlist found at {}; using the RTL view only.",
                    path.display()
                ));
                None
            }
        }
        None => None,
    };

    let ast = unify(Some(rtl), netlist, sink)?;
    // A netlist may rename the design; the name becomes a directory and
    // SystemVerilog and C identifiers.
    if !is_identifier(&ast.design_name) {
        return Err(PipelineError::InvalidDesignName {
            design: ast.design_name.clone(),
        });
    }
    let spec = DesignSpec::from_ast(&ast);
    let bundle = generate_bundle(&spec, config, sink);

    let design = ast.design_name.clone();
    let mut documents = vec![
        (format!("{design}.ast.json"), to_document(&ast, "module", &design)?),
        (format!("{design}.spec.json"), to_document(&spec, "spec", &design)?),
    ];
    documents.extend(bundle.iter().map(|a| (a.file_name.clone(), a.contents.clone())));
    Ok(PreparedDesign {
        out_dir: args.out.join(&design),
        design,
        documents,
    })
}

fn write_design(prepared: PreparedDesign) -> Result<DesignOutput, PipelineError> {
    let PreparedDesign {
        design,
        out_dir,
        documents,
    } = prepared;
    let mut files = Vec::with_capacity(documents.len());
    for (name, contents) in documents {
        let path = out_dir.join(name);
        let outcome = write_artifact(&path, &contents)?;
        files.push((path, outcome));
    }
    info!(design = %design, dir = %out_dir.display(), "artifacts generated");
    Ok(DesignOutput {
        design,
        out_dir,
        files,
    })
}
