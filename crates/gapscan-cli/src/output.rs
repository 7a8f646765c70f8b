use chrono::Utc;
use gapscan_core::ResourceReport;
use serde::Serialize;

/// Scan results for one template file.
#[derive(Debug, Serialize)]
pub struct TemplateScan {
    pub template: String,
    pub resources: Vec<ResourceReport>,
}

/// Prints scan results as a human-readable report.
pub fn render_text(scans: &[TemplateScan]) {
    println!(
        "gapscan report - {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    for scan in scans {
        println!();
        println!("Template: {}", scan.template);

        for report in &scan.resources {
            println!();
            println!("  Resource: {}", report.logical_name);

            if report.currently_implements.is_empty() {
                println!("    Implements: (none)");
            } else {
                println!("    Implements:");
                for capability in &report.currently_implements {
                    println!("      - {} ({})", capability.title, capability.id);
                }
            }

            if !report.has_gaps() {
                println!("    No capability gaps.");
                continue;
            }

            println!("    Missing:");
            for recommendation in &report.recommendations {
                println!(
                    "      - {} ({})",
                    recommendation.capability.title, recommendation.capability.id
                );
                for (index, plan) in recommendation.implementations.iter().enumerate() {
                    if plan.is_empty() {
                        println!("        Option {}: (no resource steps)", index + 1);
                        continue;
                    }
                    println!("        Option {}:", index + 1);
                    for step in &plan.resources {
                        println!("          {} {}", step.action.as_str(), step.resource_type);
                        for property in &step.properties {
                            println!("            {} = {}", property.name, property.value);
                        }
                    }
                }
            }
        }
    }

    let total: usize = scans.iter().map(|s| s.resources.len()).sum();
    let with_gaps: usize = scans
        .iter()
        .flat_map(|s| &s.resources)
        .filter(|r| r.has_gaps())
        .count();
    println!();
    println!("{total} resources scanned, {with_gaps} with gaps");
}
