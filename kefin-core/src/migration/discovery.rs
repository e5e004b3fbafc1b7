use tracing::{debug, warn};

use kefin_model::{HomeScreenConfig, LegacyDiscovery};

use super::MigrationReport;
use super::overlay::overlay_discovery;
use crate::catalog::DISCOVERY_GROUP_ID;
use crate::error::MigrationError;

/// Overlays `sectionTypes` entries onto discovery sections with the same id.
/// Keys that name no discovery section are reported and dropped.
pub(crate) fn migrate_discovery_sections(
    config: &mut HomeScreenConfig,
    discovery: &LegacyDiscovery,
    report: &mut MigrationReport,
) -> Result<(), MigrationError> {
    if discovery.section_types.is_empty() {
        return Ok(());
    }
    if config.discovery.is_empty() {
        return Err(MigrationError::MissingGroup(DISCOVERY_GROUP_ID.to_string()));
    }

    for (key, legacy) in &discovery.section_types {
        let target = config
            .discovery
            .iter_mut()
            .flat_map(|group| group.sections.iter_mut())
            .find(|section| section.id == *key);

        match target {
            Some(section) => {
                *section = overlay_discovery(section, legacy);
                debug!(section_id = %key, "legacy discovery section merged");
                report.overlaid += 1;
            }
            None => {
                warn!(key = %key, "legacy discovery section has no default; dropped");
                report.dropped.push(format!("discovery.sectionTypes.{key}"));
            }
        }
    }
    Ok(())
}
