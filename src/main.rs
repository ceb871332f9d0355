#[macro_use] extern crate log;
extern crate simplelog;
extern crate disjoint_set;

use simplelog::*;
use std::env;
use std::fs::File;
use std::path::Path;
use std::process;

use disjoint_set::{Scenario, ScenarioError};


fn init_logging() {
    let level = match env::var("DISJOINT_SET_LOG").as_ref().map(String::as_str) {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        _ => LevelFilter::Info,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto),
    ];
    match File::create("disjoint-set.log") {
        Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Warn, Config::default(), file)),
        Err(e) => eprintln!("not writing disjoint-set.log: {}", e),
    }
    let _ = CombinedLogger::init(loggers);
}

fn run() -> Result<(), ScenarioError> {
    let scenario = match env::args().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => {
            info!("no scenario given, running the built-in one");
            Scenario::builtin()
        }
    };
    for answer in scenario.run()? {
        println!("{}", answer);
    }
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
