use std::path::Path;

pub fn run(name: &str, output: Option<&Path>) -> Result<(), String> {
    let profile = super::load_profile(name, None)?;
    let content = profile.to_json_pretty().map_err(|e| e.to_string())?;

    if let Some(path) = output {
        std::fs::write(path, format!("{content}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
