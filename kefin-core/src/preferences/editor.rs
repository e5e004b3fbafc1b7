//! List edits behind the order editor's drag, arrow and toggle controls.
//!
//! Every edit renumbers `order` to `index * 10`, so the saved orders always
//! reflect what the user sees and leave room for later insertions.

use super::mapper::ResolvedSection;

const ORDER_STEP: i64 = 10;

/// The list as the editor shows it: stably sorted by order, disabled
/// sections included so they can be switched back on.
pub fn editor_list(resolved: &[ResolvedSection]) -> Vec<ResolvedSection> {
    let mut list: Vec<(usize, &ResolvedSection)> =
        resolved.iter().enumerate().collect();
    list.sort_by_key(|(index, section)| (section.order, *index));
    list.into_iter().map(|(_, section)| section.clone()).collect()
}

pub fn renumber(list: &mut [ResolvedSection]) {
    for (index, section) in list.iter_mut().enumerate() {
        section.order = index as i64 * ORDER_STEP;
    }
}

/// Moves the entry at `from` to `to`. Out-of-range indices leave the list
/// untouched and return false.
pub fn move_section(list: &mut Vec<ResolvedSection>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    if from != to {
        let section = list.remove(from);
        list.insert(to, section);
    }
    renumber(list);
    true
}

pub fn move_up(list: &mut Vec<ResolvedSection>, index: usize) -> bool {
    index > 0 && move_section(list, index, index - 1)
}

pub fn move_down(list: &mut Vec<ResolvedSection>, index: usize) -> bool {
    move_section(list, index, index + 1)
}

pub fn toggle_section(list: &mut [ResolvedSection], id: &str, enabled: bool) -> bool {
    let Some(section) = list.iter_mut().find(|section| section.id == id) else {
        return false;
    };
    section.enabled = enabled;
    renumber(list);
    true
}
