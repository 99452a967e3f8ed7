//! List checks command implementation.

use name_lint_core::Check;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks:\n");
    println!("{:<8} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for check in Check::ALL {
        println!(
            "{:<8} {:<22} {}",
            check.code(),
            check.name(),
            check.description()
        );
    }

    println!("\nAll checks are enabled by default and report warnings.");
    println!("Use --checks to run a subset, e.g.:");
    println!("  name-lint check --checks type-name,method-name");
    println!("  name-lint check --checks NL001,NL003");
}
