use num_bigint::BigUint;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use threshold_ecc::error::Result;
use threshold_ecc::harness::{benchmark, BcEctssSystem, BenchReport, ElGamalSystem, ThresholdCryptosystem};
use threshold_ecc::params::{parse_int, SystemParams};
use threshold_ecc::scalar::Scalar;

const DEFAULT_REPS: usize = 10;
const MESSAGE: u64 = 5234583490578210874;
const TAG: &str = "124353464568757742342366456234";

fn reps_from_env() -> usize {
    std::env::var("BENCH_REPS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REPS)
}

fn print_report(r: &BenchReport) {
    println!(
        "RESULT,system={},reps={},ok={},setup_ms={:.3},encrypt_ms={:.3},decrypt_ms={:.3}",
        r.name,
        r.reps,
        r.ok,
        r.avg.setup.as_secs_f64() * 1e3,
        r.avg.encrypt.as_secs_f64() * 1e3,
        r.avg.decrypt.as_secs_f64() * 1e3,
    );
}

fn run_exp<S: ThresholdCryptosystem>(sys: &mut S, reps: usize, message: &BigUint) -> Result<()> {
    info!(system = sys.name(), reps, "running benchmark");
    let report = benchmark(sys, reps, message)?;
    print_report(&report);
    Ok(())
}

fn run() -> Result<()> {
    let reps = reps_from_env();
    let params = SystemParams::secp256k1(3)?;
    let field = params.field();

    let ids: Vec<Scalar> = (1..=7).map(|i| field.from_u64(i)).collect();
    let decrypters: Vec<Scalar> = (1..=4).map(|i| field.from_u64(i)).collect();
    let message = BigUint::from(MESSAGE);
    let tag = parse_int(TAG)?.magnitude().clone();

    let mut bcectss = BcEctssSystem::new(params.clone(), ids.clone(), decrypters.clone(), tag)?;
    let mut elgamal = ElGamalSystem::new(params, ids, decrypters)?;

    run_exp(&mut bcectss, reps, &message)?;
    run_exp(&mut elgamal, reps, &message)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        error!(%err, "benchmark failed");
        std::process::exit(1);
    }
}
