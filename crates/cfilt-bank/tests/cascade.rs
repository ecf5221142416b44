// SPDX-License-Identifier: LGPL-3.0-or-later
//
// Property tests for the SOS filter bank: registry lifecycle, loader
// validation, and DF2T cascade numerics checked against an independently
// coded direct-form reference implementation.

use std::f64::consts::PI;

use cfilt_bank::error::FilterError;
use cfilt_bank::registry::{FilterRegistry32, FilterRegistry64};
use cfilt_bank::sos::SosMatrix;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const IDENTITY_ROW: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// RBJ cookbook lowpass section with a0 normalized to 1.
fn lowpass_row(fc: f64, fs: f64, q: f64) -> [f64; 6] {
    let w0 = 2.0 * PI * fc / fs;
    let alpha = w0.sin() / (2.0 * q);
    let cos_w0 = w0.cos();
    let a0 = 1.0 + alpha;
    [
        ((1.0 - cos_w0) / 2.0) / a0,
        (1.0 - cos_w0) / a0,
        ((1.0 - cos_w0) / 2.0) / a0,
        1.0,
        (-2.0 * cos_w0) / a0,
        (1.0 - alpha) / a0,
    ]
}

/// 4th-order Butterworth lowpass as two sections (standard pole-pair Qs).
fn butterworth4_rows(fc: f64, fs: f64) -> Vec<[f64; 6]> {
    vec![
        lowpass_row(fc, fs, 0.541_196_100_146_197),
        lowpass_row(fc, fs, 1.306_562_964_876_376),
    ]
}

fn flat(rows: &[[f64; 6]]) -> Vec<f64> {
    rows.iter().flat_map(|r| r.iter().copied()).collect()
}

fn flat32(rows: &[[f64; 6]]) -> Vec<f32> {
    rows.iter().flat_map(|r| r.iter().map(|&v| v as f32)).collect()
}

fn noise(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Naive cascaded direct-form-I reference:
/// `y[n] = b0 x[n] + b1 x[n-1] + b2 x[n-2] - a1 y[n-1] - a2 y[n-2]`,
/// with the conventional (non-negated) denominator signs.
fn reference_sosfilt(rows: &[[f64; 6]], input: &[f64]) -> Vec<f64> {
    let mut signal = input.to_vec();
    for row in rows {
        let (b0, b1, b2, a1, a2) = (row[0], row[1], row[2], row[4], row[5]);
        let (mut x1, mut x2, mut y1, mut y2) = (0.0, 0.0, 0.0, 0.0);
        for v in signal.iter_mut() {
            let x = *v;
            let y = b0 * x + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2;
            x2 = x1;
            x1 = x;
            y2 = y1;
            y1 = y;
            *v = y;
        }
    }
    signal
}

#[test]
fn capacity_invariant() {
    // Exercised with the small build variant's capacity
    let data = flat(&[IDENTITY_ROW]);
    let m = SosMatrix::new(&data, 6).unwrap();

    let mut reg = FilterRegistry64::with_capacity(25);
    for k in 0..25 {
        assert_eq!(reg.init(m, None).unwrap(), k);
    }
    assert_eq!(
        reg.init(m, None).unwrap_err(),
        FilterError::CapacityExceeded { capacity: 25 }
    );
}

#[test]
fn shape_rejection_consumes_nothing() {
    let mut reg = FilterRegistry64::default();
    let good = flat(&[IDENTITY_ROW]);
    let h = reg.init(SosMatrix::new(&good, 6).unwrap(), None).unwrap();

    let five_cols = [1.0f64, 0.0, 0.0, 0.0, 0.0];
    assert_eq!(
        reg.init(SosMatrix::new(&five_cols, 5).unwrap(), None)
            .unwrap_err(),
        FilterError::Columns(5)
    );

    let too_many = flat(&vec![IDENTITY_ROW; 17]);
    assert_eq!(
        reg.init(SosMatrix::new(&too_many, 6).unwrap(), None)
            .unwrap_err(),
        FilterError::Stages(17)
    );

    // Ragged data never even forms a matrix
    assert_eq!(
        SosMatrix::<f64>::new(&good[..5], 6).unwrap_err(),
        FilterError::Ragged { len: 5, cols: 6 }
    );

    // No handle was consumed, and the existing slot is untouched
    assert_eq!(reg.len(), 1);
    let y = reg.apply(h, &[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(y, vec![1.0, 2.0, 3.0]);
}

#[test]
fn identity_cascade_both_precisions() {
    let input = noise(128, 1);

    let mut reg64 = FilterRegistry64::default();
    let data = flat(&[IDENTITY_ROW]);
    let h = reg64.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    assert_eq!(reg64.apply(h, &input).unwrap(), input);

    let mut reg32 = FilterRegistry32::default();
    let data32 = flat32(&[IDENTITY_ROW]);
    let input32: Vec<f32> = input.iter().map(|&v| v as f32).collect();
    let h = reg32
        .init(SosMatrix::new(&data32, 6).unwrap(), None)
        .unwrap();
    assert_eq!(reg32.apply(h, &input32).unwrap(), input32);
}

#[test]
fn continuation_matches_one_shot() {
    let rows = butterworth4_rows(2000.0, 48000.0);
    let data = flat(&rows);
    let input = noise(256, 2);

    let mut reg = FilterRegistry64::default();
    let split_h = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    let whole_h = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();

    let whole = reg.apply(whole_h, &input).unwrap();

    // Identical operation sequence, so bit-identical results
    for k in [0, 1, 37, 128, 255, 256] {
        reg.init(SosMatrix::new(&data, 6).unwrap(), Some(split_h))
            .unwrap();
        let mut split = reg.apply(split_h, &input[..k]).unwrap();
        split.extend(reg.apply(split_h, &input[k..]).unwrap());
        assert_eq!(whole, split, "split at {k} diverged");
    }
}

#[test]
fn reinit_clears_residual_energy() {
    let rows = butterworth4_rows(500.0, 48000.0);
    let data = flat(&rows);

    let mut reg = FilterRegistry64::default();
    let h = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    reg.apply(h, &noise(512, 3)).unwrap();

    let new_rows = vec![lowpass_row(4000.0, 48000.0, 1.0)];
    let new_data = flat(&new_rows);
    reg.init(SosMatrix::new(&new_data, 6).unwrap(), Some(h))
        .unwrap();

    let out = reg.apply(h, &vec![0.0; 256]).unwrap();
    assert_eq!(out, vec![0.0; 256]);
}

#[test]
fn precision_parity_on_step_input() {
    let rows = butterworth4_rows(1000.0, 48000.0);

    let mut reg64 = FilterRegistry64::default();
    let data = flat(&rows);
    let h64 = reg64.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    let y64 = reg64.apply(h64, &vec![1.0f64; 100]).unwrap();

    let mut reg32 = FilterRegistry32::default();
    let data32 = flat32(&rows);
    let h32 = reg32
        .init(SosMatrix::new(&data32, 6).unwrap(), None)
        .unwrap();
    let y32 = reg32.apply(h32, &vec![1.0f32; 100]).unwrap();

    // Tolerance proportional to f32 epsilon with headroom for 100 samples
    // of accumulated recursion.
    let tol = 4e3 * f32::EPSILON as f64;
    for (a, b) in y32.iter().zip(y64.iter()) {
        assert!(
            (*a as f64 - b).abs() < tol,
            "f32 {a} vs f64 {b} outside tolerance {tol}"
        );
    }
}

#[test]
fn inplace_matches_out_of_place() {
    let rows = butterworth4_rows(3000.0, 44100.0);
    let data = flat(&rows);
    let input = noise(300, 4);

    let mut reg = FilterRegistry64::default();
    let a = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    let b = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();

    let mut dst = vec![0.0f64; input.len()];
    reg.process(a, &mut dst, &input).unwrap();

    let mut buf = input.clone();
    reg.process_inplace(b, &mut buf).unwrap();

    assert_eq!(dst, buf);
}

#[test]
fn df2t_matches_direct_form_reference() {
    let rows = [
        lowpass_row(800.0, 48000.0, 0.707),
        lowpass_row(2500.0, 48000.0, 1.2),
        lowpass_row(6000.0, 48000.0, 0.9),
    ];
    let data = flat(&rows);
    let input = noise(512, 5);

    let mut reg = FilterRegistry64::default();
    let h = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    let got = reg.apply(h, &input).unwrap();

    let expected = reference_sosfilt(&rows, &input);
    for (i, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
        assert!(
            (g - e).abs() < 1e-9,
            "sample {i}: df2t {g} vs reference {e}"
        );
    }
}

#[test]
fn step_response_settles_to_dc_gain() {
    // A unity-DC-gain lowpass driven with a step should settle near 1.
    let rows = butterworth4_rows(1000.0, 48000.0);
    let data = flat(&rows);

    let mut reg = FilterRegistry64::default();
    let h = reg.init(SosMatrix::new(&data, 6).unwrap(), None).unwrap();
    let y = reg.apply(h, &vec![1.0; 4000]).unwrap();

    let tail = &y[3000..];
    for v in tail {
        assert!((v - 1.0).abs() < 1e-6, "settled value {v}");
    }
}
