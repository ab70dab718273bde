//! ExFour headless runner
//!
//! Loads a scenario, plays a short scripted skirmish through the command
//! queue and logs every fleet movement.
//!
//! Usage:
//!   exfour-sim [scenario.json] [seconds]
//!
//! Without a scenario file the built-in three-planet skirmish is used.
//! Pass `-` as the path to keep the built-in map and still set a duration.

mod runner;

use std::process::ExitCode;

use exfour_engine::{Command, PlanetId, Scenario, Scene, SimEvent};

use runner::SimRunner;

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 20.0;

fn load_scenario(path: Option<&str>) -> Result<Scenario, String> {
    match path {
        None | Some("-") => Ok(Scenario::skirmish()),
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
            Scenario::from_json(&json).map_err(|e| format!("{}: {}", path, e))
        }
    }
}

/// Frame-indexed orders: seed the selected planet, send fleets to every
/// other planet in turn, and zoom out then back in.
fn script(scene: &Scene) -> Vec<(u32, Command)> {
    let mut orders = Vec::new();
    let Some(home) = scene.selected().or_else(|| scene.planets().first().map(|p| p.id)) else {
        return orders;
    };
    if scene.selected().is_none() {
        orders.push((0, Command::PlanetClicked(home)));
    }
    if scene.planet(home).is_some_and(|p| p.ship_count() < 2) {
        orders.push((0, Command::SpawnShips { planet: home, count: None }));
    }
    orders.push((30, Command::Zoom { amount: 0.5 }));

    let targets: Vec<PlanetId> = scene.planets().iter().map(|p| p.id).filter(|id| *id != home).collect();
    for (i, target) in targets.into_iter().enumerate() {
        orders.push((60 * (i as u32 + 1), Command::PlanetClicked(target)));
    }
    orders.push((180, Command::Zoom { amount: -1.0 }));
    orders.sort_by_key(|(at, _)| *at);
    orders
}

fn planet_name(scene: &Scene, id: PlanetId) -> String {
    scene.planet(id).map_or_else(|| id.to_string(), |p| p.name.clone())
}

fn report(scene: &Scene, event: &SimEvent) {
    match event {
        SimEvent::PlanetSelected(Some(id)) => log::info!("selected {}", planet_name(scene, *id)),
        SimEvent::PlanetSelected(None) => log::info!("selection cleared"),
        SimEvent::FleetDispatched { from, to, ships } => log::info!(
            "fleet of {} launched {} -> {}",
            ships.len(),
            planet_name(scene, *from),
            planet_name(scene, *to)
        ),
        SimEvent::DispatchRejected { from, to } => log::warn!(
            "transfer {} -> {} refused",
            planet_name(scene, *from),
            planet_name(scene, *to)
        ),
        SimEvent::ShipArrived { ship, planet } => {
            log::debug!("{} settled around {}", ship, planet_name(scene, *planet))
        }
        SimEvent::ShipsSpawned { planet, spawned, discarded } => log::info!(
            "{} spawned {} ships ({} discarded)",
            planet_name(scene, *planet),
            spawned,
            discarded
        ),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let seconds = match args.get(2).map(|s| s.parse::<f32>()) {
        None => DEFAULT_SECONDS,
        Some(Ok(s)) if s > 0.0 => s,
        Some(_) => {
            log::error!("run length must be a positive number of seconds, got {:?}", args[2]);
            return ExitCode::FAILURE;
        }
    };

    let scenario = match load_scenario(args.get(1).map(String::as_str)) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::error!("cannot load scenario: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let scene = match Scene::from_scenario(&scenario) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("cannot build scene: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "ExFour: {} planets, {} ships, running {} s",
        scene.planets().len(),
        scene.ships().len(),
        seconds
    );

    let mut orders = script(&scene).into_iter().peekable();
    let mut runner = SimRunner::new(scene);
    let frames = (seconds / FRAME_DT).ceil() as u32;
    let mut arrivals = 0usize;

    for frame in 0..frames {
        while let Some((_, command)) = orders.next_if(|(at, _)| *at <= frame) {
            runner.push_command(command);
        }
        runner.tick(FRAME_DT);
        for event in runner.drain_events() {
            if matches!(event, SimEvent::ShipArrived { .. }) {
                arrivals += 1;
            }
            report(runner.scene(), &event);
        }
    }

    let scene = runner.scene();
    log::info!("after {:.1} s, {} ships arrived", runner.elapsed_ms() / 1000.0, arrivals);
    for planet in scene.planets() {
        log::info!(
            "  {:<8} {:>4} / {:<4} ships, {} shells",
            planet.name,
            planet.ship_count(),
            planet.capacity(),
            planet.shell_count()
        );
    }
    let in_flight = scene.ships().iter().filter(|s| s.attacking().is_some()).count();
    if in_flight > 0 {
        log::info!("  {} ships still in transit", in_flight);
    }
    if let Some(zoom) = scene.zoom().current() {
        log::info!("  camera zoom {:.3}", zoom);
    }

    match scene.check_invariants() {
        Ok(()) => ExitCode::SUCCESS,
        Err(violation) => {
            log::error!("{}", violation);
            ExitCode::FAILURE
        }
    }
}
