// Integration test for the vector quantizer across every supported format
// (format validation -> batch encode -> batch decode)
use fpq::{
    decode_uint_to_vecs, encode_vecs_to_uint, f16, is_valid_format, DType, FloatElement,
    SignConvention, UIntElement, VectorFormat,
};

/// Slowly rotating vectors with a non-trivial, never-zero length.
fn trajectory(count: usize) -> Vec<[f64; 3]> {
    (0..count)
        .map(|i| {
            let phase = i as f64 * 0.37;
            [phase.sin() * 10.0, phase.cos() * 5.0, 1.0 + (phase * 0.5).sin()]
        })
        .collect()
}

fn roundtrip<F: FloatElement, U: UIntElement>(
    vs: &[[f64; 3]],
    nbits: u32,
    convention: SignConvention,
) -> (Vec<U>, Vec<[f64; 3]>) {
    let input: Vec<[F; 3]> = vs.iter().map(|v| v.map(F::from_f64)).collect();
    let codes: Vec<U> = encode_vecs_to_uint(&input, nbits, convention).unwrap();
    let back: Vec<[F; 3]> = decode_uint_to_vecs(&codes, nbits, convention).unwrap();
    (codes, back.into_iter().map(|v| v.map(F::to_f64)).collect())
}

fn max_relative_error(expected: &[[f64; 3]], decoded: &[[f64; 3]]) -> f64 {
    expected
        .iter()
        .zip(decoded)
        .map(|(e, d)| {
            let norm = e.iter().map(|c| c * c).sum::<f64>().sqrt();
            e.iter().zip(d).map(|(a, b)| (a - b).abs() / norm).fold(0.0, f64::max)
        })
        .fold(0.0, f64::max)
}

fn sweep_format<F: FloatElement, U: UIntElement>() -> usize {
    let vs = trajectory(64);
    let mut checked = 0;
    for nbits in 0..=U::BITS {
        if !is_valid_format(F::DTYPE, U::DTYPE, nbits) {
            continue;
        }
        for convention in SignConvention::ALL {
            let (codes, back) = roundtrip::<F, U>(&vs, nbits, convention);
            for (code, v) in codes.iter().zip(&back) {
                assert!(code.to_u64() >> (U::BITS - 2) < 3);
                assert!(
                    v.iter().all(|c| c.is_finite()),
                    "{:?} from {} {} nbits {}",
                    v,
                    F::DTYPE,
                    U::DTYPE,
                    nbits
                );
            }
        }
        checked += 1;
    }
    checked
}

#[test]
fn test_every_valid_format_roundtrips() {
    let mut formats = 0;
    formats += sweep_format::<f16, u8>();
    formats += sweep_format::<f16, u16>();
    formats += sweep_format::<f16, u32>();
    formats += sweep_format::<f16, u64>();
    formats += sweep_format::<f32, u8>();
    formats += sweep_format::<f32, u16>();
    formats += sweep_format::<f32, u32>();
    formats += sweep_format::<f32, u64>();
    formats += sweep_format::<f64, u8>();
    formats += sweep_format::<f64, u16>();
    formats += sweep_format::<f64, u32>();
    formats += sweep_format::<f64, u64>();
    // u8: 1 each, u16: 5 each, f16/u32: 6, f32/u32 + f64/u32: 13 each, f32/u64: 11, f64/u64: 29
    assert_eq!(formats, 3 + 15 + 6 + 13 + 11 + 13 + 29);
}

#[test]
fn test_tolerances_by_format() {
    let vs = trajectory(500);
    for convention in SignConvention::ALL {
        let (_, back) = roundtrip::<f32, u32>(&vs, 10, convention);
        assert!(max_relative_error(&vs, &back) < 1e-1);
        let (_, back) = roundtrip::<f64, u64>(&vs, 20, convention);
        assert!(max_relative_error(&vs, &back) < 1e-3);
        let (_, back) = roundtrip::<f32, u64>(&vs, 20, convention);
        assert!(max_relative_error(&vs, &back) < 1e-3);
    }
}

#[test]
fn test_descriptor_drives_encoding() {
    let format: VectorFormat =
        serde_json::from_str(r#"{"float":"f64","uint":"u64","nbits":18,"convention":"d3d"}"#)
            .unwrap();
    let breakdown = format.validate().unwrap();
    assert_eq!(breakdown.as_tuple(), (2, 18, 18, 26));
    assert_eq!(breakdown.norm_dtype(), DType::F32);

    let vs = trajectory(32);
    let (_, back) = roundtrip::<f64, u64>(&vs, format.nbits, format.convention);
    assert!(max_relative_error(&vs, &back) < 1e-3);
}
