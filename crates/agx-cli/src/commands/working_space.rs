//! Working space inspection command

use crate::WorkingSpaceArgs;
use agx_math::Mat3;
use agx_primaries::RgbColourspace;
use anyhow::{Context, Result};

pub fn run(args: WorkingSpaceArgs, verbose: u8) -> Result<()> {
    let settings = args.formation.resolve()?;
    let pair = settings
        .working_spaces()
        .context("Failed to derive working spaces")?;

    print_space(&pair.reference);
    print_space(&pair.working);
    print_space(&pair.destination);

    print_matrix(
        &format!("{} -> {}", pair.working.name, pair.reference.name),
        &pair.inset_matrix()?,
    );
    print_matrix(
        &format!("{} -> {}", pair.destination.name, pair.working.name),
        &pair.outset_matrix()?,
    );

    if verbose > 0 {
        let area = |cs: &RgbColourspace| cs.gamut().signed_area().abs();
        let reference = area(&pair.reference);
        println!(
            "Gamut area relative to {}: working {:.4}, destination {:.4}",
            pair.reference.name,
            area(&pair.working) / reference,
            area(&pair.destination) / reference
        );
    }
    Ok(())
}

fn print_space(cs: &RgbColourspace) {
    println!("{}", cs.name);
    for (label, p) in ["R", "G", "B"].iter().zip(&cs.primaries) {
        println!("  {label}  {p}");
    }
    println!("  W  {}", cs.whitepoint);
    println!();
}

fn print_matrix(title: &str, m: &Mat3) {
    println!("{title}");
    for i in 0..3 {
        let r = m.row(i);
        println!("  [{:>12.8}, {:>12.8}, {:>12.8}]", r.x, r.y, r.z);
    }
    println!();
}
