//! Version command - show version information

use crate::service::registry::PROVIDERS;

/// Print version information
///
/// If verbose is false, prints a single line with name and version.
/// If verbose is true, also prints build details and the registered providers.
pub fn print_version(verbose: bool) {
    println!("{} {}", crate::NAME, crate::VERSION);

    if verbose {
        println!();
        println!("Providers:");
        for provider in PROVIDERS {
            let features: Vec<String> = provider.features.iter().map(ToString::to_string).collect();
            println!(
                "  - {} ({}) [{}]",
                provider.name,
                provider.confine_os.join(", "),
                features.join(", ")
            );
            println!("    {}", provider.description);
        }
        println!();
        println!("Build info:");
        println!("  Target:    {}", env!("BUILD_TARGET"));
        println!("  Host OS:   {}", std::env::consts::OS);
        println!("  Rust:      {}", env!("RUSTC_VERSION"));
        if let Ok(exe) = std::env::current_exe() {
            println!("  Executable: {}", exe.display());
        }
    }
}
