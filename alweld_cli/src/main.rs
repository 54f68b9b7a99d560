//! # AlWeld CLI Application
//!
//! Prompt-driven front end for the welded tube calculator. Every prompt has
//! a default, so pressing Enter repeatedly runs the reference case: a
//! 2 x 3 x 0.125 6061-T6 tube with one weld zone on the top face.
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).

use std::io::{self, BufRead, Write};

use alweld_core::analysis::LoadActions;
use alweld_core::calculations::{LoadCaseResult, WeldedTubeAnalysis, WeldedTubeInput};
use alweld_core::envelope::{DesignCriteria, DesignMethod};
use alweld_core::materials::AlloyCatalog;
use alweld_core::partition::{TubeProfile, WeldZone};
use alweld_core::units::UnitLabels;
use alweld_core::CalcError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    read_line(prompt).unwrap_or_else(|| default.to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(catalog: &AlloyCatalog) -> Result<WeldedTubeInput, CalcError> {
    let defaults = WeldedTubeInput::default();
    let grades: Vec<&str> = catalog.grade_ids().collect();

    let grade = prompt_string(
        &format!("Alloy grade ({}) [{}]: ", grades.join(", "), defaults.grade),
        &defaults.grade,
    );
    let profile = TubeProfile {
        d: prompt_f64(&format!("Depth d (in) [{}]: ", defaults.profile.d), defaults.profile.d),
        b: prompt_f64(&format!("Width b (in) [{}]: ", defaults.profile.b), defaults.profile.b),
        t: prompt_f64(&format!("Wall t (in) [{}]: ", defaults.profile.t), defaults.profile.t),
        r_out: prompt_f64(
            &format!("Outer corner radius (in) [{}]: ", defaults.profile.r_out),
            defaults.profile.r_out,
        ),
    };
    let weld_radius = prompt_f64(
        &format!("Weld zone radius (in) [{}]: ", defaults.weld_radius),
        defaults.weld_radius,
    );

    let count = prompt_f64("Number of weld zones [1]: ", 1.0).max(0.0) as usize;
    let mut zones = Vec::with_capacity(count);
    for i in 1..=count {
        let face = prompt_string(&format!("  Zone {i} face (top/bottom/left/right) [top]: "), "top");
        let position = prompt_f64(&format!("  Zone {i} position along face (in) [0]: "), 0.0);
        zones.push(WeldZone::parse(&face, position)?);
    }

    Ok(WeldedTubeInput {
        label: "CLI-Demo".to_string(),
        grade,
        profile,
        weld_radius,
        zones,
    })
}

fn read_criteria() -> DesignCriteria {
    let method = match prompt_string("Design method (ASD/LRFD) [ASD]: ", "ASD")
        .to_uppercase()
        .as_str()
    {
        "LRFD" => DesignMethod::Lrfd,
        _ => DesignMethod::Asd,
    };
    let factor = prompt_f64(
        &format!(
            "{} factor {} [{}]: ",
            method,
            method.factor_symbol(),
            method.default_factor()
        ),
        method.default_factor(),
    );
    DesignCriteria { method, factor }
}

fn read_actions(units: &UnitLabels) -> LoadActions {
    LoadActions {
        n: prompt_f64(&format!("Axial N ({}) [1.0]: ", units.force), 1.0),
        vx: prompt_f64(&format!("Shear Vx ({}) [0]: ", units.force), 0.0),
        vy: prompt_f64(&format!("Shear Vy ({}) [0]: ", units.force), 0.0),
        mxx: prompt_f64(&format!("Moment Mxx ({}) [0]: ", units.moment), 0.0),
        myy: prompt_f64(&format!("Moment Myy ({}) [0]: ", units.moment), 0.0),
        mzz: prompt_f64(&format!("Torsion Mzz ({}) [0]: ", units.moment), 0.0),
    }
}

fn print_load_case(result: &LoadCaseResult, units: &UnitLabels) {
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  STRESS ENVELOPE ({}, {} = {})",
        result.criteria.method,
        result.criteria.method.factor_symbol(),
        result.criteria.factor
    );
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  {:<22} {:>10} {:>10} {:>8} {:>10} {:>7}",
        "Zone", "Max", "Min", "Fy", "Allowable", "SR"
    );
    for (zone, entry) in result.envelope.iter() {
        println!(
            "  {:<22} {:>10.3} {:>10.3} {:>8.2} {:>10.3} {:>7.3} {}",
            zone,
            entry.max_stress,
            entry.min_stress,
            entry.fy,
            entry.allowable_stress,
            entry.stress_ratio,
            status_icon(entry.passes())
        );
    }
    println!("  (stresses in {})", units.stress);
    println!();

    for (zone, ranges) in &result.component_extremes {
        println!("  {zone}:");
        for (key, range) in ranges {
            println!("    {:<8} {:>10.3} .. {:>10.3}", key, range.min, range.max);
        }
    }

    println!("═══════════════════════════════════════════════════════════════");
    match result.envelope.governing() {
        Some((zone, entry)) => println!(
            "  RESULT: {} (governs: {} at SR {:.3})",
            if result.passes() { "PASS" } else { "FAIL" },
            zone,
            entry.stress_ratio
        ),
        None => println!("  RESULT: no zones"),
    }
    println!("═══════════════════════════════════════════════════════════════");
}

fn run(units: &UnitLabels) -> Result<(), CalcError> {
    let catalog = AlloyCatalog::builtin()?;
    let input = read_input(&catalog)?;
    debug!(?input, "read tube input");

    println!();
    println!("Partitioning and meshing section...");
    let analysis = WeldedTubeAnalysis::prepare(input, &catalog)?;

    if let Some(props) = analysis.geometric_properties() {
        println!();
        println!("Section properties:");
        println!("  A   = {:.4} {}", props.area, units.area());
        println!("  Ixx = {:.4} {}", props.ixx, units.inertia());
        println!("  Iyy = {:.4} {}", props.iyy, units.inertia());
        for (material, area) in &props.area_by_material {
            println!("  {material}: {:.4} {}", area, units.area());
        }
    }
    if let Some(warping) = analysis.warping_properties() {
        println!("  J   = {:.4} {}", warping.j, units.inertia());
    }
    println!();

    // Each pass reuses the prepared section
    loop {
        let criteria = read_criteria();
        let actions = read_actions(units);
        debug!(?criteria, ?actions, "read load case");
        println!();
        let result = analysis.evaluate(&actions, &criteria)?;
        print_load_case(&result, units);

        println!();
        println!("JSON Output:");
        if let Ok(json) = serde_json::to_string_pretty(&result) {
            println!("{}", json);
        }
        println!();

        let again = prompt_string("Run another load case? (y/N) [N]: ", "N");
        if !again.eq_ignore_ascii_case("y") {
            return Ok(());
        }
    }
}

fn main() {
    init_logging();

    println!("AlWeld CLI - Partially Welded Aluminum Tube Calculator");
    println!("=======================================================");
    println!();

    let units = UnitLabels::KIP_INCH;
    if let Err(e) = run(&units) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
