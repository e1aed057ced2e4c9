use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use kd_simulation::TuningProfile;

pub fn run() -> Result<(), String> {
    let profiles = TuningProfile::builtin();

    println!("  {}", "Tuning Profiles".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name",
        "Speed",
        "Reach",
        "Hunger/s",
        "Thirst/s",
        "Berry",
        "Respawn below (tree/rock/berry/water)",
    ]);
    for p in &profiles {
        let s = &p.spawn;
        table.add_row(vec![
            p.name.clone(),
            format!("{:.1}", p.player.speed),
            format!("{:.0}", p.player.reach),
            format!("{:.1}", p.survival.hunger_decay),
            format!("{:.1}", p.survival.thirst_decay),
            format!("+{:.0}", p.survival.berry_hunger),
            format!(
                "{}/{}/{}/{}",
                s.trees.threshold, s.rocks.threshold, s.berries.threshold, s.waters.threshold
            ),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} profiles", profiles.len());
    Ok(())
}
