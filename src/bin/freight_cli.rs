use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rust_freight::file::read_file;
use rust_freight::{Starmap, ValidationError, Vessel, VesselID, Waypoint};

/// Launches one vessel into the planets of a catalogue and runs a list of
/// commands against it: `fly <planet|x,y>`, `load <t>`, `unload <t>`, `report`.
#[derive(Debug, Parser)]
struct Args {
    /// Planet catalogue to load
    #[arg(long, default_value = "planets.txt")]
    planets: String,

    /// Name of the vessel
    #[arg(long, default_value = "Корабль")]
    name: String,

    /// Cargo capacity in tonnes
    #[arg(long, default_value_t = 1000.0)]
    capacity: f64,

    /// Starting position, as `x,y`
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [0.0, 0.0]
    )]
    at: Vec<f64>,

    commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Fly(String),
    Load(f64),
    Unload(f64),
    Report,
}

fn parse_commands(words: &[String]) -> Result<Vec<Command>> {
    let mut words = words.iter();
    let mut commands = vec![];
    while let Some(word) = words.next() {
        let mut argument = |what: &str| {
            words
                .next()
                .ok_or_else(|| anyhow!("`{}` needs {}", word, what))
        };
        let command = match word.to_lowercase().as_str() {
            "fly" => Command::Fly(argument("a planet or `x,y`")?.clone()),
            "load" => Command::Load(parse_weight(argument("a weight")?)?),
            "unload" => Command::Unload(parse_weight(argument("a weight")?)?),
            "report" => Command::Report,
            other => bail!("unknown command `{}`", other),
        };
        commands.push(command);
    }
    Ok(commands)
}

fn parse_weight(text: &str) -> Result<f64> {
    text.parse()
        .with_context(|| format!("`{}` is not a weight", text))
}

fn resolve_waypoint(starmap: &Starmap, target: &str) -> Result<Waypoint> {
    if target.contains(',') {
        let parts: Vec<_> = target.split(',').map(str::trim).collect();
        let coords = match parts[..] {
            [x, y] => (x.parse::<f64>(), y.parse::<f64>()),
            _ => return Err(ValidationError::NotADestination.into()),
        };
        match coords {
            (Ok(x), Ok(y)) => Ok(Waypoint::Coordinates(x, y)),
            _ => Err(ValidationError::MalformedDestination.into()),
        }
    } else {
        let planet = starmap
            .find_planet(target)
            .ok_or_else(|| anyhow!("no planet named `{}`", target))?;
        Ok(Waypoint::Planet(planet.id()))
    }
}

fn run(starmap: &mut Starmap, ship: VesselID, commands: &[Command]) -> Result<()> {
    for command in commands {
        match command {
            Command::Fly(target) => {
                let waypoint = resolve_waypoint(starmap, target)?;
                starmap.fly_vessel(ship, waypoint)?;
            }
            Command::Load(weight) => starmap.load(ship, *weight)?,
            Command::Unload(weight) => starmap.unload(ship, *weight)?,
            Command::Report => {}
        }
        if let Some(vessel) = starmap.get_vessel(ship) {
            println!("{}", vessel);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let commands = parse_commands(&args.commands)?;

    let mut starmap = read_file(&args.planets)
        .with_context(|| format!("loading {}", args.planets))?;
    let vessel = Vessel::new(&args.name, &args.at, args.capacity)?;
    let ship = starmap.add_vessel(vessel);

    let outcome = run(&mut starmap, ship, &commands);

    println!();
    for planet in starmap.planets() {
        println!("{}", planet);
    }
    outcome
}
