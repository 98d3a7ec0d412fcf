//! Formation curve tabulation command

use crate::CurveArgs;
use agx_curve::log2::normalized_log2_to_open_domain;
use anyhow::{bail, Context, Result};
use tracing::debug;

pub fn run(args: CurveArgs, verbose: u8) -> Result<()> {
    let settings = args.formation.resolve()?;
    let curve = settings.curve();
    let sample = curve.sample().context("Failed to sample formation curve")?;

    let rows: Vec<usize> = if args.all {
        (0..sample.len()).collect()
    } else {
        row_indices(sample.len(), args.steps)?
    };
    debug!(rows = rows.len(), samples = sample.len(), "Printing curve");

    if verbose > 0 {
        println!("# log2 range [{}, {}] EV around {}", curve.min_ev, curve.max_ev, curve.grey);
    }
    println!("x,scene,y");
    for i in rows {
        let x = sample.xs()[i];
        let scene = normalized_log2_to_open_domain(x, curve.grey, curve.min_ev, curve.max_ev);
        println!("{x:.6},{scene:.6e},{:.6}", sample.ys()[i]);
    }
    Ok(())
}

/// `steps` indices spread evenly over `len` samples, first and last included.
fn row_indices(len: usize, steps: usize) -> Result<Vec<usize>> {
    if steps < 2 {
        bail!("--steps must be at least 2, got {steps}");
    }
    let steps = steps.min(len);
    Ok((0..steps)
        .map(|i| ((i * (len - 1)) as f64 / (steps - 1) as f64).round() as usize)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_both_ends() {
        let rows = row_indices(4096, 17).unwrap();
        assert_eq!(rows.len(), 17);
        assert_eq!(rows[0], 0);
        assert_eq!(rows[16], 4095);
        assert!(rows.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_rows_clamp_to_len() {
        assert_eq!(row_indices(3, 10).unwrap(), [0, 1, 2]);
        assert!(row_indices(4096, 1).is_err());
    }
}
