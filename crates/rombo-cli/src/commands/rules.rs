use rombo_core::compat::verdict::{VerdictTemplate, COMPATIBLE, SAME_SUBSTANCE};
use rombo_core::compat::{RuleId, RULES};

pub fn list() -> Result<(), rombo_core::error::RomboError> {
    println!("Compatibility rules, evaluated in order (first match wins):\n");

    print_rule(1, RuleId::Identity, "Same id or product name", &SAME_SUBSTANCE);
    for (i, rule) in RULES.iter().enumerate() {
        print_rule(i + 2, rule.id, rule.description, &rule.verdict);
    }
    print_rule(RULES.len() + 2, RuleId::Default, "No rule matched", &COMPATIBLE);

    println!("An item without hazard data classifies as carrying no hazard, so a");
    println!("\"Compatible\" verdict for it means insufficient data, not confirmed safe.");
    println!("NFPA ratings outside 0-4 or with decimals are read as 0, so a");
    println!("mistyped flammability such as 5 or 2.5 does not mark the item flammable.");

    Ok(())
}

fn print_rule(position: usize, id: RuleId, description: &str, verdict: &VerdictTemplate) {
    println!(
        "  {:<2}  {:<24} {:<8} {}",
        position, id, verdict.status, description
    );
    println!("      {}  {}\n", verdict.icon, verdict.message);
}
