use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use fpq::{
    decode_uint_to_quats, decode_uint_to_vecs, encode_quats_to_uint, encode_vecs_to_uint,
    FloatElement, QuatFormat, SignConvention, UIntElement, VectorFormat,
};
use rand::Rng;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Vector,
    Quat,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// What to quantize
    #[arg(long, value_enum, default_value_t = Mode::Vector)]
    mode: Mode,

    /// Number of random samples
    #[arg(long, default_value_t = 100_000)]
    count: usize,

    /// Bits per kept vector component (ignored for quaternions)
    #[arg(long, default_value_t = 20)]
    nbits: u32,

    /// Width of the packed code: 8, 16, 32 or 64
    #[arg(long, default_value_t = 64)]
    uint_bits: u32,

    /// Use float32 inputs instead of float64
    #[arg(long)]
    single: bool,

    /// Sign convention: std, opengl or direct3d
    #[arg(long, default_value = "std")]
    convention: SignConvention,

    /// Print the resolved format as JSON and exit
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match (args.single, args.uint_bits) {
        (false, 8) => run::<f64, u8>(&args),
        (false, 16) => run::<f64, u16>(&args),
        (false, 32) => run::<f64, u32>(&args),
        (false, 64) => run::<f64, u64>(&args),
        (true, 8) => run::<f32, u8>(&args),
        (true, 16) => run::<f32, u16>(&args),
        (true, 32) => run::<f32, u32>(&args),
        (true, 64) => run::<f32, u64>(&args),
        (_, other) => bail!("unsupported code width {} (expected 8, 16, 32 or 64)", other),
    }
}

fn run<F: FloatElement, U: UIntElement>(args: &Args) -> Result<()> {
    match args.mode {
        Mode::Vector => run_vectors::<F, U>(args),
        Mode::Quat => run_quats::<F, U>(args),
    }
}

fn run_vectors<F: FloatElement, U: UIntElement>(args: &Args) -> Result<()> {
    let format = VectorFormat::of::<F, U>(args.nbits).with_convention(args.convention);
    let breakdown = format.validate().with_context(|| format!("cannot use {}", format))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&format)?);
        return Ok(());
    }
    println!(
        "Format: {} -> fields {:?}, norm as {}",
        format,
        breakdown.as_tuple(),
        breakdown.norm_dtype()
    );

    let mut rng = rand::thread_rng();
    let vs: Vec<[F; 3]> = (0..args.count)
        .map(|_| std::array::from_fn(|_| F::from_f64(rng.gen_range(-100.0..100.0))))
        .collect();

    let start = Instant::now();
    let codes: Vec<U> = encode_vecs_to_uint(&vs, args.nbits, args.convention)?;
    let back: Vec<[F; 3]> = decode_uint_to_vecs(&codes, args.nbits, args.convention)?;
    let elapsed = start.elapsed();

    let mut max_rel = 0.0f64;
    for (v, b) in vs.iter().zip(&back) {
        let norm = v.iter().map(|c| c.to_f64().powi(2)).sum::<f64>().sqrt();
        for (x, y) in v.iter().zip(b) {
            max_rel = max_rel.max((x.to_f64() - y.to_f64()).abs() / norm);
        }
    }

    info!(count = vs.len(), ?elapsed, "vector round trip finished");
    println!("Vectors: {} | Max error / |v|: {:.3e} | {:?}", vs.len(), max_rel, elapsed);
    println!("Ratio: {:.2}x", (3 * F::BITS) as f64 / U::BITS as f64);
    Ok(())
}

fn run_quats<F: FloatElement, U: UIntElement>(args: &Args) -> Result<()> {
    let format = QuatFormat::of::<F, U>().with_convention(args.convention);
    let breakdown = format.validate().with_context(|| format!("cannot use {}", format))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&format)?);
        return Ok(());
    }
    println!("Format: {} -> {} bits per component", format, breakdown.component_bits);

    let mut rng = rand::thread_rng();
    let qs: Vec<[F; 4]> = (0..args.count)
        .map(|_| {
            let q: [f64; 4] = std::array::from_fn(|_| rng.gen_range(-1.0..1.0));
            let n = q.iter().map(|c| c * c).sum::<f64>().sqrt().max(f64::MIN_POSITIVE);
            q.map(|c| F::from_f64(c / n))
        })
        .collect();

    let start = Instant::now();
    let codes: Vec<U> = encode_quats_to_uint(&qs, args.convention)?;
    let back: Vec<[F; 4]> = decode_uint_to_quats(&codes, args.convention)?;
    let elapsed = start.elapsed();

    let mut worst_dot = 1.0f64;
    for (q, b) in qs.iter().zip(&back) {
        let dot: f64 = q.iter().zip(b).map(|(x, y)| x.to_f64() * y.to_f64()).sum();
        worst_dot = worst_dot.min(dot.abs());
    }
    let worst_angle = 2.0 * worst_dot.min(1.0).acos().to_degrees();

    info!(count = qs.len(), ?elapsed, "quaternion round trip finished");
    println!(
        "Quaternions: {} | Max rotation error: {:.4} deg | {:?}",
        qs.len(),
        worst_angle,
        elapsed
    );
    println!("Ratio: {:.2}x", (4 * F::BITS) as f64 / U::BITS as f64);
    Ok(())
}
