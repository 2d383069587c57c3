use rk4sim::{bench_gravity, bench_rk4, bench_rk4_curve};
use rk4sim::{preset_by_token, prompt_scenario, run_2d, Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML file name inside the scenarios/ directory
    #[arg(short, default_value = "three_body.yaml")]
    file_name: String,

    /// Built-in preset token ('default' or 'orbit') instead of a YAML file
    #[arg(long)]
    preset: Option<String>,

    /// Prompt for the setup on stdin instead of loading a file
    #[arg(long)]
    interactive: bool,

    /// Run the timing probes and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_rk4();
        bench_rk4_curve();
        return Ok(());
    }

    let scenario_cfg = if args.interactive {
        prompt_scenario()?
    } else if let Some(token) = &args.preset {
        preset_by_token(token)?
    } else {
        load_scenario_from_yaml(&args.file_name)?
    };

    let scenario = Scenario::build_scenario(scenario_cfg)?;
    run_2d(scenario);

    Ok(())
}
