//! Backend equivalence audit

use crate::AuditArgs;
use anyhow::{Result, bail};
use tracing::{debug, info};
use xform_core::{Avx, Backend, Radians, Scalar, SimdLevel, Sse2, Sse4};
use xform_math::{Mat4, Quat, Vec3, Vec4, mat4, vec4};

/// Fast normalize is accepted within this relative error.
const FAST_TOLERANCE: f32 = 0.01;

/// Largest deviations of one backend from [`Scalar`].
#[derive(Debug)]
struct Report {
    level: SimdLevel,
    /// Lane-wise kernels and matrix products that did not match bit for bit.
    exact_mismatches: usize,
    dot: f32,
    normalize: f32,
    normalize_fast: f32,
    transform: f32,
}

impl Report {
    fn passes(&self, tolerance: f32) -> bool {
        self.exact_mismatches == 0
            && self.dot <= tolerance
            && self.normalize <= tolerance
            && self.transform <= tolerance
            && self.normalize_fast <= FAST_TOLERANCE
    }
}

pub fn run(args: AuditArgs, verbose: u8) -> Result<()> {
    if args.samples == 0 {
        bail!("--samples must be at least 1");
    }

    let levels = match args.level.as_deref() {
        Some(name) => vec![super::parse_level(name)?],
        None => SimdLevel::ALL.to_vec(),
    };

    let vectors = sample_vectors(args.samples);
    let matrices = sample_matrices(&vectors);
    info!(
        vectors = vectors.len(),
        matrices = matrices.len(),
        "auditing {} backend(s)",
        levels.len()
    );

    println!(
        "{:<8} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "level", "exact", "dot", "normalize", "fast", "transform"
    );

    let mut failed = Vec::new();
    for level in levels {
        if !level.is_available() {
            debug!(%level, "level is emulated on this host");
        }
        let report = audit_level(level, &vectors, &matrices);
        println!(
            "{:<8} {:>8} {:>12.3e} {:>12.3e} {:>12.3e} {:>12.3e}",
            report.level,
            report.exact_mismatches,
            report.dot,
            report.normalize,
            report.normalize_fast,
            report.transform
        );
        if verbose > 1 {
            println!("  {report:?}");
        }
        if !report.passes(args.tolerance) {
            failed.push(report.level);
        }
    }

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|l| l.name()).collect();
        bail!(
            "Backend(s) deviate from scalar beyond tolerance {}: {}",
            args.tolerance,
            names.join(", ")
        );
    }
    Ok(())
}

fn audit_level(level: SimdLevel, vectors: &[Vec4], matrices: &[Mat4]) -> Report {
    match level {
        SimdLevel::Scalar => audit::<Scalar>(vectors, matrices),
        SimdLevel::Sse2 => audit::<Sse2>(vectors, matrices),
        SimdLevel::Sse4 => audit::<Sse4>(vectors, matrices),
        SimdLevel::Avx => audit::<Avx>(vectors, matrices),
    }
}

fn audit<B: Backend>(vectors: &[Vec4], matrices: &[Mat4]) -> Report {
    let mut report = Report {
        level: B::LEVEL,
        exact_mismatches: 0,
        dot: 0.0,
        normalize: 0.0,
        normalize_fast: 0.0,
        transform: 0.0,
    };

    for (a, b) in vectors.iter().zip(vectors.iter().cycle().skip(1)) {
        let (a, b) = (*a, *b);
        let exact = [
            vec4::add::<B>(a, b).to_array() == vec4::add::<Scalar>(a, b).to_array(),
            vec4::subtract::<B>(a, b).to_array() == vec4::subtract::<Scalar>(a, b).to_array(),
            vec4::element_wise::<B>(a, b).to_array()
                == vec4::element_wise::<Scalar>(a, b).to_array(),
            vec4::multiply::<B>(a, 0.75).to_array() == vec4::multiply::<Scalar>(a, 0.75).to_array(),
            vec4::compare::<B>(a, b) == vec4::compare::<Scalar>(a, b),
        ];
        report.exact_mismatches += exact.iter().filter(|ok| !**ok).count();

        let scale = vec4::magnitude::<Scalar>(a) * vec4::magnitude::<Scalar>(b);
        let dot = (vec4::dot::<B>(a, b) - vec4::dot::<Scalar>(a, b)).abs() / scale;
        report.dot = report.dot.max(dot);

        let reference = vec4::normalize::<Scalar>(a);
        report.normalize = report.normalize.max(deviation(vec4::normalize::<B>(a), reference));
        report.normalize_fast = report
            .normalize_fast
            .max(deviation(vec4::normalize_fast::<B>(a), reference));

        let q = Quat::from_vector(a.xyz(), a.w());
        if q.conjugate_with::<B>().to_array() != q.conjugate_with::<Scalar>().to_array() {
            report.exact_mismatches += 1;
        }
    }

    for m in matrices {
        for n in matrices {
            if mat4::multiply::<B>(m, n).to_cols_array() != mat4::multiply::<Scalar>(m, n).to_cols_array() {
                report.exact_mismatches += 1;
            }
            if mat4::compare::<B>(m, n) != mat4::compare::<Scalar>(m, n) {
                report.exact_mismatches += 1;
            }
        }
        report.exact_mismatches += compare_misses::<B>(m);
        let norm = frobenius(m);
        for v in vectors {
            let reference = mat4::transform_vec4::<Scalar>(m, *v);
            let diff = vec4::magnitude::<Scalar>(mat4::transform_vec4::<B>(m, *v) - reference);
            report.transform = report
                .transform
                .max(diff / (norm * vec4::magnitude::<Scalar>(*v)));
        }
    }

    report
}

/// Counts single-element edits of `m` that `compare::<B>` fails to notice.
fn compare_misses<B: Backend>(m: &Mat4) -> usize {
    if !mat4::compare::<B>(m, m) {
        return 1;
    }
    (0..16)
        .filter(|&i| {
            let mut edited = *m;
            edited.as_array_mut()[i] += 1.0;
            mat4::compare::<B>(m, &edited)
        })
        .count()
}

/// Distance from `reference`, relative to its length.
fn deviation(v: Vec4, reference: Vec4) -> f32 {
    vec4::magnitude::<Scalar>(v - reference) / vec4::magnitude::<Scalar>(reference)
}

fn frobenius(m: &Mat4) -> f32 {
    m.as_array().iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Deterministic vectors spread over several orders of magnitude.
///
/// No sample is zero-length, so every kernel is inside its contract.
fn sample_vectors(n: usize) -> Vec<Vec4> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.618_034;
            let scale = 10f32.powi((i % 7) as i32 - 3);
            Vec4::new(
                t.sin() * scale,
                (t * 1.7).cos() * scale,
                (t * 0.3).sin() - 0.5,
                1.0 + (t * 2.3).cos() * 0.25,
            )
        })
        .collect()
}

fn sample_matrices(vectors: &[Vec4]) -> Vec<Mat4> {
    let mut out = vec![
        Mat4::IDENTITY,
        Mat4::translation(1.0, -2.0, 3.0),
        Mat4::rotation(Radians::new(0.9), Vec3::new(0.0, 0.6, 0.8)),
        Mat4::perspective(Radians::new(1.0), 16.0 / 9.0, 0.1, 100.0),
        Mat4::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, Vec3::Y),
    ];
    out.extend(
        vectors
            .chunks_exact(4)
            .take(8)
            .map(|c| Mat4::from_cols(c[0], c[1], c[2], c[3])),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(level: SimdLevel) -> Report {
        Report {
            level,
            exact_mismatches: 0,
            dot: 0.0,
            normalize: 0.0,
            normalize_fast: 0.0,
            transform: 0.0,
        }
    }

    #[test]
    fn test_report_passes() {
        assert!(clean(SimdLevel::Avx).passes(1e-5));

        let mut r = clean(SimdLevel::Sse2);
        r.exact_mismatches = 1;
        assert!(!r.passes(1.0));

        let mut r = clean(SimdLevel::Sse4);
        r.transform = 1e-4;
        assert!(!r.passes(1e-5));
        assert!(r.passes(1e-3));

        // Fast normalize has its own fixed bound
        let mut r = clean(SimdLevel::Scalar);
        r.normalize_fast = 0.005;
        assert!(r.passes(1e-6));
        r.normalize_fast = 0.02;
        assert!(!r.passes(1.0));
    }

    #[test]
    fn test_deviation_is_relative() {
        let reference = Vec4::new(3.0, 0.0, 4.0, 0.0);
        assert_eq!(deviation(reference, reference), 0.0);
        assert_eq!(deviation(Vec4::new(3.0, 0.0, 4.0, 5.0), reference), 1.0);
        assert_eq!(deviation(Vec4::new(30.0, 0.0, 40.0, 0.0), reference * 10.0), 0.0);
    }

    #[test]
    fn test_compare_misses() {
        let m = Mat4::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(compare_misses::<Scalar>(&m), 0);
        assert_eq!(compare_misses::<Sse2>(&m), 0);
        assert_eq!(compare_misses::<Sse4>(&m), 0);
        assert_eq!(compare_misses::<Avx>(&m), 0);
    }

    #[test]
    fn test_every_level_passes_audit() {
        let vectors = sample_vectors(64);
        let matrices = sample_matrices(&vectors);
        for level in SimdLevel::ALL {
            let report = audit_level(level, &vectors, &matrices);
            assert_eq!(report.level, level);
            assert_eq!(report.exact_mismatches, 0, "{level}");
            assert!(report.passes(1e-4), "{report:?}");
        }
    }
}
