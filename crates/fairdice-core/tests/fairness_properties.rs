//! Statistical and adversarial properties of the fair value deriver.

use fairdice_core::{CommitmentChannel, Die, Error, FairnessViolation, ProbabilityMatrix, Secret};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn draw(modulus: u64, rng: &mut StdRng) -> u64 {
    let mut channel = CommitmentChannel::new(modulus).unwrap();
    let published = channel.commit(rng).unwrap();
    let revealed = channel.reveal().unwrap();
    published.verify(&revealed).unwrap()
}

fn chi_square(counts: &[u64], samples: u64) -> f64 {
    let expected = samples as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Derived values stay in range and show no modulo bias.
///
/// Critical values are for p = 0.0001, so a correct deriver essentially
/// never fails.
#[test]
fn test_values_are_uniform() {
    let mut rng = StdRng::seed_from_u64(200);
    let cases = [(2u64, 4_000u64, 15.14), (6, 6_000, 25.74), (7, 7_000, 27.86)];
    for (modulus, samples, critical) in cases {
        let mut counts = vec![0u64; modulus as usize];
        for _ in 0..samples {
            let value = draw(modulus, &mut rng);
            assert!(value < modulus);
            counts[value as usize] += 1;
        }
        let stat = chi_square(&counts, samples);
        assert!(
            stat < critical,
            "modulus {}: chi-square {} over {} ({:?})",
            modulus,
            stat,
            critical,
            counts
        );
    }
}

/// Altering the revealed secret always fails, whatever the bit flipped
#[test]
fn test_tampered_secret_never_verifies() {
    let mut rng = StdRng::seed_from_u64(201);
    for bit in 0..256usize {
        let mut channel = CommitmentChannel::new(6).unwrap();
        let published = channel.commit(&mut rng).unwrap();
        let mut revealed = channel.reveal().unwrap();

        let mut bytes = *revealed.secret.as_bytes();
        bytes[bit / 8] ^= 1 << (bit % 8);
        revealed.secret = Secret::from_bytes(bytes);

        match published.verify(&revealed) {
            Err(Error::Fairness(FairnessViolation::DigestMismatch)) => {}
            other => panic!("bit {}: tampering not detected: {:?}", bit, other),
        }
    }
}

/// Replaying a reveal reproduces the published digest for any modulus
#[test]
fn test_reveal_round_trip() {
    let mut rng = StdRng::seed_from_u64(202);
    for modulus in [2u64, 3, 6, 10, 1 << 40, u64::MAX] {
        let mut channel = CommitmentChannel::new(modulus).unwrap();
        let published = channel.commit(&mut rng).unwrap();
        let revealed = channel.reveal().unwrap();

        assert!(published
            .commitment
            .verify(&revealed.secret, &revealed.params.message()));
        assert_eq!(published.verify(&revealed).unwrap(), revealed.value);
        assert!(revealed.value < modulus);
    }
}

/// Antisymmetry holds for arbitrary dice
#[test]
fn test_matrix_antisymmetry_over_random_dice() {
    use rand::Rng;

    let mut rng = StdRng::seed_from_u64(203);
    for _ in 0..50 {
        let count = rng.gen_range(3..8);
        let dice: Vec<Die> = (0..count)
            .map(|_| {
                let mut faces = [0i64; 6];
                for face in faces.iter_mut() {
                    *face = rng.gen_range(-5..=12);
                }
                Die::from(faces)
            })
            .collect();
        let matrix = ProbabilityMatrix::compute(&dice);

        for i in 0..count {
            assert_eq!(matrix.advantage(i, i), None);
            for j in (i + 1)..count {
                assert_eq!(
                    matrix.advantage(i, j).unwrap(),
                    -matrix.advantage(j, i).unwrap()
                );
            }
        }
    }
}
