pub mod export_profile;
pub mod profiles;
pub mod simulate;

use std::path::Path;

use kd_simulation::TuningProfile;

/// Resolve a tuning profile from a file if one was given, else by name.
pub fn load_profile(name: &str, file: Option<&Path>) -> Result<TuningProfile, String> {
    match file {
        Some(path) => TuningProfile::load(path).map_err(|e| e.to_string()),
        None => TuningProfile::by_name(name).map_err(|e| {
            let known: Vec<String> = TuningProfile::builtin().into_iter().map(|p| p.name).collect();
            format!("{e}. Use: {}", known.join(", "))
        }),
    }
}
