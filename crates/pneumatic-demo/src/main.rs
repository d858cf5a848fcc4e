//! Headless runner: runs pneumatic scenes, prints snapshots, verifies determinism.
//!
//! Usage: `pneumatic-demo [scene-path] [ticks]`. Without a path every bundled
//! scene is run.

use std::path::PathBuf;
use std::process::ExitCode;

use pneumatic_core::event::NetworkEvent;
use pneumatic_core::fixed::{Ticks, fixed64_to_f64};
use pneumatic_demo::{DEFAULT_TICKS, DemoError, SceneReport, bundled_scenes, run_scene, scenes_dir};

fn parse_args() -> Result<(Option<PathBuf>, Ticks), DemoError> {
    let mut args = std::env::args().skip(1);
    let path = args.next().map(PathBuf::from);
    let ticks = match args.next() {
        Some(arg) => arg.parse().map_err(|e: std::num::ParseIntError| DemoError::InvalidArgument {
            arg,
            detail: e.to_string(),
        })?,
        None => DEFAULT_TICKS,
    };
    Ok((path, ticks))
}

fn print_report(report: &SceneReport) {
    println!("--- {} ---", report.scene);
    println!(
        "    After {} ticks: {} components, {} tubes, state hash = {:#018x}",
        report.ticks,
        report.components.len(),
        report.tubes.len(),
        report.state_hash
    );

    for event in &report.events {
        match event {
            NetworkEvent::AlertRaised {
                component,
                message,
                tick,
            } => println!("      tick {tick:>4}: {component}: {message}"),
            NetworkEvent::AlertCleared { component, tick } => {
                println!("      tick {tick:>4}: {component}: ok")
            }
        }
    }

    for snap in &report.components {
        let pressures: Vec<String> = snap
            .terminal_pressures
            .iter()
            .map(|(t, p)| format!("{t}={:.3}", fixed64_to_f64(*p)))
            .collect();
        let mut line = format!("      [{:>10}] {}", snap.kind, snap.id);
        line.push_str(&format!(" p({})", pressures.join(", ")));
        if let Some(expansion) = snap.expansion {
            line.push_str(&format!(" expansion={:.3}", fixed64_to_f64(expansion)));
        }
        if let (Some(left), Some(right)) = (snap.left_pressed, snap.right_pressed) {
            line.push_str(&format!(" left={left} right={right}"));
        }
        if let Some(alert) = &snap.alert {
            line.push_str(&format!(" ALERT: {alert}"));
        }
        println!("{line}");
    }

    for tube in &report.tubes {
        println!(
            "      {:>12}: {} -> {} mass={:.3}{}",
            tube.name,
            tube.from,
            tube.to,
            fixed64_to_f64(tube.residual_mass),
            if tube.pressurized { " (pressurized)" } else { "" }
        );
    }
    println!("    Determinism: PASS (hashes match)");
    println!();
}

fn run() -> Result<usize, DemoError> {
    let (path, ticks) = parse_args()?;
    let scenes = match path {
        Some(path) => vec![path],
        None => bundled_scenes(&scenes_dir())?,
    };
    for scene in &scenes {
        print_report(&run_scene(scene, ticks)?);
    }
    Ok(scenes.len())
}

fn main() -> ExitCode {
    match run() {
        Ok(count) => {
            println!("All {count} scenes passed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
