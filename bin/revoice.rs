use revoice::pipeline::{self, Options};
use revoice::world::World;

use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgMatches, Command};


fn app() -> Command<'static> {
    Command::new("revoice")
        .about("Pitch, formant and breathiness retouching for speech recordings")
        .version(clap::crate_version!())
        .arg(Arg::new("input")
                .help("The input file to use (wav)")
                .value_name("INPUT")
                .required(true))
        .arg(Arg::new("output")
                .help("The file to write the result to (wav); plays back directly if omitted")
                .value_name("OUTPUT")
                .required(false))
        .arg(Arg::new("transpose")
                .help("Transpose amount [semitones]")
                .value_name("SEMITONES")
                .short('t')
                .long("transpose")
                .default_value("6"))
        .arg(Arg::new("correct-pitch")
                .help("Pitch correction strength [%]")
                .value_name("PERCENT")
                .short('c')
                .long("correct-pitch")
                .default_value("0"))
        .arg(Arg::new("formant")
                .help("Formant shift [semitones]")
                .value_name("SEMITONES")
                .short('f')
                .long("formant")
                .default_value("3"))
        .arg(Arg::new("breathiness")
                .help("Breathiness boost [%]")
                .value_name("PERCENT")
                .short('b')
                .long("breathiness")
                .default_value("30"))
        .arg(Arg::new("high-quality")
                .help("Use the slower, higher-quality pitch analysis")
                .short('H')
                .long("high-quality"))
        .arg(Arg::new("visualize")
                .help("Plot the pitch track, spectral envelope and aperiodicity")
                .short('v')
                .long("visualize"))
}

fn float_arg(matches: &ArgMatches, name: &str) -> f64 {
    let value = matches.value_of(name).unwrap();
    value.parse().unwrap_or_else(|_| {
        eprintln!("error: invalid value '{}' for --{}", value, name);
        process::exit(2);
    })
}

fn main() {
    let matches = app().get_matches();

    let opt = Options {
        input: PathBuf::from(matches.value_of_os("input").unwrap()),
        output: matches.value_of_os("output").map(PathBuf::from),
        transpose: float_arg(&matches, "transpose"),
        correct_pitch: float_arg(&matches, "correct-pitch"),
        formant: float_arg(&matches, "formant"),
        breathiness: float_arg(&matches, "breathiness"),
        high_quality: matches.is_present("high-quality"),
        visualize: matches.is_present("visualize"),
    };

    if let Err(err) = pipeline::run(&World::new(), &opt) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
