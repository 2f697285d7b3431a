// ABOUTME: Strategy command resolving tier and legacy macro strategy names
// ABOUTME: Prints the canonical tier with its protein anchor and remaining-calorie split

use crate::helpers::display::print_json;
use serde_json::json;
use vitalis::errors::AppResult;
use vitalis_intelligence::config::IntelligenceConfig;
use vitalis_intelligence::macro_allocator::MacroIntensity;

/// Resolve `raw` and print the tier it maps to
pub fn resolve(raw: &str, config: &IntelligenceConfig) -> AppResult<()> {
    let macros = &config.nutrition.macros;
    let intensity = MacroIntensity::resolve(raw, macros)?;
    let tier = macros.tiers.get(intensity);

    print_json(&json!({
        "input": raw,
        "intensity": intensity,
        "legacy": MacroIntensity::from_canonical(&raw.trim().to_lowercase()).is_none(),
        "protein_g_per_kg": tier.protein_g_per_kg,
        "carb_share_of_remainder": tier.carb_share_of_remainder,
        "fat_share_of_remainder": tier.fat_share_of_remainder,
    }))
}
