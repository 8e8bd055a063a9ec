extern crate clap;
extern crate env_logger;
extern crate netlib_src;
extern crate spinblock;

use std::process;
use spinblock::error::Error;
use spinblock::linalg::Lapack;
use spinblock::matrix_builder::MatrixBuilder;
use spinblock::model::ModelConf;
use spinblock::operator::Operator;

const DEGENERACY_TOLER: f64 = 1e-8;

fn run(config: &str, observable_s2: bool) -> Result<(), Error> {
    println!("config: {}", config);
    let model = ModelConf::load(config)?.make_model()?;
    println!("multiplicities: {:?}", model.converter.multiplicities());
    println!("dimension: {}", model.converter.total_size());

    let space = model.reduce()?;
    println!("blocks: {}", space.blocks.len());
    for line in space.to_string().lines() {
        println!("# {}", line);
    }

    let solver = Lapack::default();
    let spectrum = model.spectrum(&solver, &space)?;
    let s2 = if observable_s2 {
        let s2 = Operator::total_spin_squared(&model.converter);
        let matrices = MatrixBuilder::new(&model.converter).build(&space, &s2);
        spectrum.expectation_values(&matrices)
    } else {
        vec![0.0; spectrum.levels.len()]
    };
    let ground = spectrum.levels.first().map(|l| l.energy).unwrap_or(0.0);
    println!("ground_energy: {}", ground);
    println!("levels:");
    for level in spectrum.degenerate_sums(&s2, DEGENERACY_TOLER) {
        print!("  - {{ energy: {}, multiplicity: {}",
               level.energy, level.multiplicity);
        if observable_s2 {
            print!(", s2: {}", level.sum / level.multiplicity as f64);
        }
        println!(" }}");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = clap::App::new(env!("CARGO_PKG_NAME"))
        .args_from_usage("--config=<config> 'YAML file describing the model'")
        .args_from_usage("[--observable-s2] 'Print the total spin squared of each level'")
        .get_matches();

    let config = matches.value_of("config").unwrap();
    if let Err(e) = run(config, matches.is_present("observable-s2")) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
