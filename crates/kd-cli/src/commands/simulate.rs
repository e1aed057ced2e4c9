use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use kd_core::{ResourceKind, STAT_MAX, Stat};
use kd_simulation::systems::SpawnSystem;
use kd_simulation::{Action, ActionState, SimConfig, SimEventKind, Simulation, TuningProfile};
use tracing::info;

/// Everything `kd simulate` needs to run.
pub struct SimulateArgs {
    pub ticks: u64,
    pub seed: u64,
    pub dt: f64,
    pub profile: TuningProfile,
    pub hold: Vec<Action>,
    pub craft_every: Option<u64>,
    pub verbose: bool,
    pub json: bool,
}

pub fn run(args: &SimulateArgs) -> Result<(), String> {
    let config = SimConfig::default()
        .with_seed(args.seed)
        .with_profile(args.profile.clone())
        .with_max_events(if args.verbose { 0 } else { 2000 });

    let mut sim = Simulation::with_default_systems(config).map_err(|e| e.to_string())?;
    sim.init()
        .map_err(|e| format!("simulation init failed: {e}"))?;

    info!(
        ticks = args.ticks,
        seed = args.seed,
        profile = %args.profile.name,
        "running simulation"
    );
    let mut input = ActionState::holding(&args.hold);
    for tick in 1..=args.ticks {
        if let Some(n) = args.craft_every.filter(|n| *n > 0) {
            input.set(Action::Craft, tick % n == 0);
        }
        sim.step(&input, args.dt)
            .map_err(|e| format!("simulation error: {e}"))?;
    }

    if args.json {
        print_json(&sim, args)
    } else {
        print_report(&sim, args);
        Ok(())
    }
}

fn print_json(sim: &Simulation, args: &SimulateArgs) -> Result<(), String> {
    let registry = &sim.state().registry;
    let mut entities = serde_json::Map::new();
    for kind in ResourceKind::ALL {
        entities.insert(kind.to_string(), registry.count(kind).into());
    }
    let mut report = serde_json::json!({
        "ticks": sim.current_tick(),
        "seed": args.seed,
        "profile": sim.profile().name,
        "elapsed_seconds": sim.clock().elapsed_seconds(),
        "incapacitated": sim.state().player.is_incapacitated(),
        "hud": sim.hud(),
        "entities": entities,
    });
    if args.verbose {
        report["events"] = serde_json::to_value(sim.events().events())
            .map_err(|e| format!("JSON serialization error: {e}"))?;
    }
    let out = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    println!("{out}");
    Ok(())
}

fn print_report(sim: &Simulation, args: &SimulateArgs) {
    let state = sim.state();

    // Header
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({} ticks, seed={}, dt={:.4}s, profile={})",
            args.ticks,
            args.seed,
            args.dt,
            sim.profile().name
        )
        .dimmed()
    );
    let respawned = sim.get_system::<SpawnSystem>().map_or(0, SpawnSystem::respawned);
    println!(
        "  {:.1} simulated seconds, {} events logged, {} respawns",
        sim.clock().elapsed_seconds(),
        sim.events().len(),
        respawned
    );
    println!();

    // Events
    if args.verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().events() {
            let tick_label = format!("[tick {:>4}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    } else {
        let notable: Vec<_> = sim
            .events()
            .events()
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    SimEventKind::Incapacitated
                        | SimEventKind::StatDepleted { .. }
                        | SimEventKind::CampfireCrafted { .. }
                )
            })
            .collect();
        if !notable.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for event in notable {
                let label = match event.kind {
                    SimEventKind::Incapacitated => "DOWN".red().bold(),
                    SimEventKind::StatDepleted { .. } => "WARN".yellow().bold(),
                    _ => "FIRE".green().bold(),
                };
                println!("  {label}  [tick {:>4}] {}", event.tick, event.description);
            }
            println!();
        }
    }

    // Player status
    println!("  {}", "Player Status".bold().underline());
    println!();
    let hud = sim.hud();
    let vitals = &state.player.vitals;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec!["Health".to_string(), format_stat_bar(vitals.get(Stat::Health))]);
    table.add_row(vec!["Hunger".to_string(), format_stat_bar(vitals.get(Stat::Hunger))]);
    table.add_row(vec!["Thirst".to_string(), format_stat_bar(vitals.get(Stat::Thirst))]);
    table.add_row(vec!["Wood".to_string(), hud.wood.to_string()]);
    table.add_row(vec!["Stone".to_string(), hud.stone.to_string()]);
    table.add_row(vec!["Campfires".to_string(), hud.campfires.to_string()]);
    table.add_row(vec!["Position".to_string(), state.player.position.to_string()]);
    println!("{table}");
    println!();

    // World
    println!("  {}", "World".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Count"]);
    for kind in ResourceKind::ALL {
        table.add_row(vec![kind.to_string(), state.registry.count(kind).to_string()]);
    }
    println!("{table}");
    println!();

    println!("  {hud}");
    if state.player.is_incapacitated() {
        println!("  {}", "The survivor has collapsed.".red().bold());
    }
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::Incapacitated => description.red().bold(),
        SimEventKind::StatDepleted { .. } => description.red(),
        SimEventKind::CraftRejected { .. } => description.yellow(),
        SimEventKind::CampfireCrafted { .. } => description.green(),
        SimEventKind::TreeFelled { .. }
        | SimEventKind::RockBroken { .. }
        | SimEventKind::BerryEaten { .. } => description.cyan(),
        SimEventKind::Spawned { .. } => description.dimmed(),
    }
}

fn format_stat_bar(val: f64) -> String {
    let frac = (val / STAT_MAX).clamp(0.0, 1.0);
    let filled = (frac * 10.0).round() as usize;
    let empty = 10_usize.saturating_sub(filled);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));
    let shown = val.floor() as u32;

    if frac <= 0.15 {
        format!("[{}] {:>3}", bar.red(), shown)
    } else if frac <= 0.4 {
        format!("[{}] {:>3}", bar.yellow(), shown)
    } else {
        format!("[{}] {:>3}", bar.green(), shown)
    }
}
